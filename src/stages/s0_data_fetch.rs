//! S0 DataFetch: validates the job configuration and finalizes the
//! context's input fields. `company_data` and `sitemap_urls` are supplied
//! by the caller before the run starts (fetching them is an out-of-scope
//! external service per the pipeline's purpose); this stage's job is to
//! reject invalid input fast and to make sitemap-fetch failure a
//! non-fatal empty list rather than an aborted run.

use crate::context::ExecutionContext;
use crate::error::{Error, Result};

pub fn run(mut ctx: ExecutionContext) -> Result<ExecutionContext> {
    ctx.job_config
        .validate()
        .map_err(Error::InputInvalid)?;

    // Sitemap fetch failure is non-fatal: an empty list is a valid
    // post-condition, never a reason to abort. Since sitemap fetching is
    // a caller-side concern, there is nothing further to do here beyond
    // accepting whatever the caller populated (possibly empty).

    Ok(ctx)
}

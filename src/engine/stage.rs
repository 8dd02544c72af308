//! Stage metadata and the `Stage` trait each `S0..S9` implementation
//! satisfies, grounded in the reference framework's node-manifest pattern
//! (`NodeManifest::new(name, NodeType)` in `codex_dashflow/crates/core/src/graph.rs`).

use std::time::Duration;

use async_trait::async_trait;

use crate::context::ExecutionContext;
use crate::engine::retry::RetryConfig;
use crate::error::Result;

/// Declarative metadata for a registered stage: its read/write contract,
/// concurrency role, and retry/timeout policy.
#[derive(Clone, Debug)]
pub struct StageSpec {
    pub number: u8,
    pub name: &'static str,
    pub required_inputs: &'static [&'static str],
    pub produced_outputs: &'static [&'static str],
    pub is_parallel_group_member: bool,
    pub retry: RetryConfig,
    pub per_stage_timeout: Duration,
}

/// A single pipeline stage. Implementors mutate only the context fields
/// declared in their `StageSpec::produced_outputs`.
#[async_trait]
pub trait Stage: Send + Sync {
    fn spec(&self) -> StageSpec;

    async fn run(&self, ctx: ExecutionContext) -> Result<ExecutionContext>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_spec_carries_name_and_number() {
        let spec = StageSpec {
            number: 4,
            name: "S4_CitationsValidate",
            required_inputs: &["structured_data"],
            produced_outputs: &["structured_data", "errors"],
            is_parallel_group_member: false,
            retry: RetryConfig::default(),
            per_stage_timeout: Duration::from_secs(60),
        };
        assert_eq!(spec.number, 4);
        assert_eq!(spec.name, "S4_CitationsValidate");
    }
}

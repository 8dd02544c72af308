//! Local/manual pipeline runner.
//!
//! Wires a job configuration file to the compiled [`WorkflowEngine`] and
//! prints the run's status and validated article to stdout. Sourcing real
//! LLM, embeddings, and image-generation credentials is left to the
//! caller, so this binary wires their test doubles rather than a live
//! provider; only the URL validator gets a real `reqwest`-backed
//! implementation. Swap in production collaborators at this call site to
//! turn this into a real deployment entry point.
//!
//! ```bash
//! cargo run --bin run_pipeline -- --config job.toml
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use articleflow::context::JobConfig;
use articleflow::pipeline::{Collaborators, WorkflowEngine};
use articleflow::providers::embeddings::MockEmbeddings;
use articleflow::providers::image::MockImageGenerator;
use articleflow::providers::llm::MockChatModel;
use articleflow::providers::storage::MockStorage;
use articleflow::providers::url_validator::HttpUrlValidator;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "run_pipeline", about = "Run the article generation pipeline against a job config file")]
struct Args {
    /// Path to a TOML file deserializing to `JobConfig`.
    #[arg(short, long)]
    config: PathBuf,

    /// Requests-per-minute budget applied to the chat model collaborator.
    #[arg(long)]
    requests_per_minute: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let raw = tokio::fs::read_to_string(&args.config).await?;
    let job_config: JobConfig = toml::from_str(&raw)?;

    let collaborators = Collaborators {
        chat: Arc::new(MockChatModel::new()),
        embeddings: Arc::new(MockEmbeddings::default()),
        images: Arc::new(MockImageGenerator::default()),
        url_validator: Arc::new(HttpUrlValidator::new()),
        storage: Arc::new(MockStorage::new()),
        similarity_corpus: Arc::new(Vec::new()),
    };

    let engine = WorkflowEngine::with_chat_rate_limit(collaborators, args.requests_per_minute)?;
    let result = engine.execute(job_config).await;

    println!("status: {:?}", result.status);
    if let Some(article) = &result.context.validated_article {
        println!("{}", serde_json::to_string_pretty(article)?);
    }
    if !result.context.errors.is_empty() {
        eprintln!("errors:");
        for error in &result.context.errors {
            eprintln!("  [{}] {}: {}", error.stage, error.kind, error.message);
        }
    }

    Ok(())
}

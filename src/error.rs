//! Crate-wide error types.
//!
//! Mirrors the flat, `thiserror`-derived enum shape used throughout the
//! reference orchestration framework (one named variant per failure kind,
//! `#[from]` conversions at the edges) rather than a tree of nested error
//! types per module.

use thiserror::Error;

/// Errors that can occur anywhere in the pipeline.
///
/// Variants map onto the pipeline's failure taxonomy:
/// `InputInvalid`, `UpstreamTransient`, `UpstreamHard`, `ContentDefect`,
/// `CitationUnresolvable`, and `Cancelled`. `ContentDefect` and
/// `CitationUnresolvable` are handled locally by stages and recorded into
/// `ExecutionContext::errors` rather than surfaced through this enum; the
/// variants exist here so collaborator implementations have somewhere to
/// report them if they choose to escalate.
#[derive(Error, Debug)]
pub enum Error {
    /// The job configuration was invalid; fatal, surfaced from S0.
    #[error("invalid input: {0}")]
    InputInvalid(String),

    /// A transient upstream failure (timeout, 5xx) that exhausted its retries.
    #[error("upstream transient error in stage {stage}: {message}")]
    UpstreamTransient { stage: String, message: String },

    /// A hard upstream failure (schema mismatch, refusal) that is fatal when
    /// raised from S2, recoverable-degraded elsewhere.
    #[error("upstream hard error in stage {stage}: {message}")]
    UpstreamHard { stage: String, message: String },

    /// A stage could not produce output matching its declared contract.
    #[error("stage {stage} failed its contract: {message}")]
    StageContract { stage: String, message: String },

    /// Graph construction error (duplicate node, dangling edge, missing entry point).
    #[error("graph compilation error: {0}")]
    GraphCompilation(String),

    /// A node raised an error during execution.
    #[error("node '{node}' execution error: {source}")]
    NodeExecution {
        node: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The run was cancelled.
    #[error("run cancelled")]
    Cancelled,

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure (job configuration).
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// HTTP transport failure (URL validation, external collaborator calls).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Local filesystem / IO failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

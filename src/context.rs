//! The process-local, mutable [`ExecutionContext`] carried through every stage.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::ArticleDocument;

/// Feature flags that toggle optional pipeline behavior per job.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// When true, S4 drops `unverified` citations instead of keeping them
    /// soft (see spec Open Question: keep-soft vs. drop).
    #[serde(default)]
    pub drop_unverified_citations: bool,
    /// Skip S6 image generation entirely.
    #[serde(default)]
    pub skip_images: bool,
    /// Skip S7 similarity checking entirely.
    #[serde(default)]
    pub skip_similarity_check: bool,
}

/// Job-level configuration supplied by the caller.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JobConfig {
    pub keyword: String,
    pub language: String,
    pub country: String,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub extra_instructions: Option<String>,
    #[serde(default = "default_word_count_min")]
    pub word_count_min: usize,
    #[serde(default = "default_word_count_max")]
    pub word_count_max: usize,
    #[serde(default)]
    pub flags: FeatureFlags,
}

fn default_word_count_min() -> usize {
    2500
}

fn default_word_count_max() -> usize {
    4000
}

impl JobConfig {
    /// Validates the fields an empty/blank job configuration would otherwise
    /// let through silently; S0 uses this to raise `Error::InputInvalid`.
    pub fn validate(&self) -> Result<(), String> {
        if self.keyword.trim().is_empty() {
            return Err("keyword must not be empty".to_string());
        }
        if self.language.trim().is_empty() {
            return Err("language must not be empty".to_string());
        }
        if self.word_count_min == 0 || self.word_count_min > self.word_count_max {
            return Err("word_count_min must be > 0 and <= word_count_max".to_string());
        }
        Ok(())
    }
}

/// Company/brand profile used to ground the generated content. Optional —
/// a job may run with no company context at all.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CompanyData {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default)]
    pub pain_points: Vec<String>,
    #[serde(default)]
    pub value_propositions: Vec<String>,
    #[serde(default)]
    pub competitors: Vec<String>,
    #[serde(default)]
    pub system_instructions: Option<String>,
    #[serde(default)]
    pub knowledge_base: Vec<String>,
}

/// A published page on the company's site, discovered via sitemap.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SitemapUrl {
    pub url: String,
    pub title: String,
}

/// A URL surfaced by the LLM's search tool during generation, retained as
/// evidence for later citation enhancement. Order of insertion is
/// significant and preserved.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroundingUrl {
    pub url: String,
    pub title: String,
}

/// One entry in the append-only `ExecutionContext::errors` log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub stage: String,
    pub kind: String,
    pub message: String,
    pub recoverable: bool,
}

impl ErrorEntry {
    pub fn new(stage: impl Into<String>, kind: impl Into<String>, message: impl Into<String>, recoverable: bool) -> Self {
        Self {
            stage: stage.into(),
            kind: kind.into(),
            message: message.into(),
            recoverable,
        }
    }
}

/// Results of the S6/S7 parallel group, merged into the document by S8.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ParallelResults {
    pub images: Option<crate::stages::s6_images::ImageSet>,
    pub similarity_report: Option<crate::stages::s7_similarity::SimilarityReport>,
}

/// Per-stage wall-clock timings, surfaced on `ExecutionResult`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StageTimings(pub HashMap<String, Duration>);

impl StageTimings {
    pub fn record(&mut self, stage: impl Into<String>, elapsed: Duration) {
        self.0.insert(stage.into(), elapsed);
    }
}

/// The shared, mutable record carried through every stage.
///
/// Ownership: the engine exclusively owns the `ExecutionContext`; each
/// stage takes it by value and hands back the next value, writing only
/// through the slots it declares in its `StageSpec::produced_outputs`
/// (see `engine::stage::StageSpec`). For the one place two stages run
/// concurrently over the same snapshot — the S6/S7 fan-out — the engine
/// checks those declared write-sets are disjoint before the graph is
/// even compiled; see `pipeline::assert_disjoint_parallel_writes`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExecutionContext {
    pub job_id: Uuid,
    pub job_config: JobConfig,
    #[serde(default)]
    pub company_data: Option<CompanyData>,
    #[serde(default)]
    pub sitemap_urls: Vec<SitemapUrl>,
    #[serde(default)]
    pub grounding_urls: Vec<GroundingUrl>,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub structured_data: Option<ArticleDocument>,
    #[serde(default)]
    pub parallel_results: ParallelResults,
    #[serde(default)]
    pub validated_article: Option<HashMap<String, serde_json::Value>>,
    #[serde(default)]
    pub storage_result: Option<crate::providers::storage::StorageResult>,
    #[serde(default)]
    pub errors: Vec<ErrorEntry>,
    #[serde(default)]
    pub timings: StageTimings,
}

impl ExecutionContext {
    pub fn new(job_config: JobConfig) -> Self {
        Self {
            job_id: Uuid::new_v4(),
            job_config,
            company_data: None,
            sitemap_urls: Vec::new(),
            grounding_urls: Vec::new(),
            prompt: String::new(),
            structured_data: None,
            parallel_results: ParallelResults::default(),
            validated_article: None,
            storage_result: None,
            errors: Vec::new(),
            timings: StageTimings::default(),
        }
    }

    /// Appends a non-fatal error to the run's error log.
    pub fn push_error(&mut self, entry: ErrorEntry) {
        self.errors.push(entry);
    }

    /// Mutable access to the article document, assuming S2 has already run.
    pub fn document_mut(&mut self) -> Option<&mut ArticleDocument> {
        self.structured_data.as_mut()
    }

    pub fn document(&self) -> Option<&ArticleDocument> {
        self.structured_data.as_ref()
    }
}

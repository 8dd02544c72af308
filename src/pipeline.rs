//! Composes `S0..S9` into a single compiled graph and drives a run,
//! grounded in the reference orchestration framework's top-level
//! `run_workflow` driver (its `examples/sequential_workflow.rs` wiring of
//! a `StateGraph` plus per-node retry/timeout decorators).

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex as SyncMutex;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::context::{ErrorEntry, ExecutionContext, JobConfig};
use crate::engine::retry::retry_with_backoff;
use crate::engine::{MergeableState, RetryConfig, StateGraph, END};
use crate::error::{Error, Result};
use crate::providers::embeddings::Embeddings;
use crate::providers::image::ImageGenerator;
use crate::providers::llm::ChatModel;
use crate::providers::storage::ArticleStorage;
use crate::providers::url_validator::UrlValidator;
use crate::stages::s7_similarity::CorpusArticle;
use crate::stages::{
    s0_data_fetch, s1_prompt_build, s2_generate, s3_quality_refine, s4_citations, s5_internal_links,
    s6_images, s7_similarity, s8_merge_and_link, s9_render_and_store,
};

impl MergeableState for ExecutionContext {
    /// The S6/S7 parallel group is field-disjoint by construction (each
    /// branch writes only its own `parallel_results` slot), so merging
    /// only needs to fold those two optional slots and reconcile the one
    /// field both branches can legitimately grow: the error log. Both
    /// branches start as identical clones of the post-S5 state, so their
    /// `errors` vectors share a common prefix; only the tail past that
    /// shared prefix is new and needs folding in.
    fn merge(&mut self, other: Self) {
        let common_prefix = self
            .errors
            .iter()
            .zip(other.errors.iter())
            .take_while(|(a, b)| a == b)
            .count();
        self.errors.extend(other.errors.into_iter().skip(common_prefix));

        self.parallel_results.images = self.parallel_results.images.take().or(other.parallel_results.images);
        self.parallel_results.similarity_report =
            self.parallel_results.similarity_report.take().or(other.parallel_results.similarity_report);

        self.timings.0.extend(other.timings.0);
    }
}

/// Final disposition of a pipeline run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// Completed with no recorded errors.
    Ok,
    /// Completed, but `errors` has at least one recoverable-degradation entry.
    OkWithWarnings,
    /// A fatal error (S0 input validation or S2 exhausted-retries) stopped the run.
    Failed,
    /// The run was cancelled before reaching S9.
    Cancelled,
}

/// What [`WorkflowEngine::execute`] hands back: the run's outcome plus
/// whatever state was reached, including partial state on failure or
/// cancellation.
#[derive(Debug)]
pub struct ExecutionResult {
    pub status: RunStatus,
    pub context: ExecutionContext,
}

/// The external collaborators a run needs. Trait objects so a caller can
/// freely mix real implementations with test doubles.
pub struct Collaborators {
    pub chat: Arc<dyn ChatModel>,
    pub embeddings: Arc<dyn Embeddings>,
    pub images: Arc<dyn ImageGenerator>,
    pub url_validator: Arc<dyn UrlValidator>,
    pub storage: Arc<dyn ArticleStorage>,
    pub similarity_corpus: Arc<Vec<CorpusArticle>>,
}

const DEFAULT_STAGE_TIMEOUT: Duration = Duration::from_secs(120);

/// Looks up a node's enforced timeout from [`crate::stages::specs`] by its
/// short node name (`"S4"`, not `"S4_CitationsValidate"`), so the graph
/// registration below and the declared stage contract can never drift apart.
/// Falls back to [`DEFAULT_STAGE_TIMEOUT`] only if a spec is ever missing.
fn stage_timeout(short_name: &str) -> Duration {
    crate::stages::specs()
        .into_iter()
        .find(|spec| spec.name.split('_').next() == Some(short_name))
        .map(|spec| spec.per_stage_timeout)
        .unwrap_or(DEFAULT_STAGE_TIMEOUT)
}

/// Shared cell holding the cancellation token of whichever run is
/// currently in flight, read by every node at the start of its turn.
/// `None` between runs.
type CancellationCell = Arc<SyncMutex<Option<CancellationToken>>>;

fn is_cancelled(cell: &CancellationCell) -> bool {
    cell.lock().as_ref().map(CancellationToken::is_cancelled).unwrap_or(false)
}

/// Runs `stage_fn` under a cancellation check, a per-stage timeout, and
/// (when `retry` is `Some`) exponential-backoff retry, then snapshots the
/// result into `last_good` on success.
async fn run_with_policy<F, Fut>(
    name: &'static str,
    cancellation: CancellationCell,
    timeout: Duration,
    retry: Option<RetryConfig>,
    last_good: Arc<SyncMutex<Option<ExecutionContext>>>,
    ctx: ExecutionContext,
    stage_fn: F,
) -> Result<ExecutionContext>
where
    F: Fn(ExecutionContext) -> Fut,
    Fut: std::future::Future<Output = Result<ExecutionContext>>,
{
    if is_cancelled(&cancellation) {
        return Err(Error::Cancelled);
    }

    let start = Instant::now();
    let attempt = || stage_fn(ctx.clone());

    let result = match retry {
        Some(config) => tokio::time::timeout(timeout, retry_with_backoff(name, config, attempt)).await,
        None => tokio::time::timeout(timeout, attempt()).await,
    };

    let mut ctx = match result {
        Ok(inner) => inner?,
        Err(_) => {
            return Err(Error::UpstreamTransient {
                stage: name.to_string(),
                message: format!("stage exceeded its {}ms timeout", timeout.as_millis()),
            })
        }
    };

    ctx.timings.record(name, start.elapsed());
    *last_good.lock() = Some(ctx.clone());
    Ok(ctx)
}

/// Same contract as [`run_with_policy`] but for stages whose `run`
/// function cannot fail (it degrades internally instead); still honors
/// cancellation and records the timing snapshot.
async fn run_infallible<F, Fut>(
    name: &'static str,
    cancellation: CancellationCell,
    timeout: Duration,
    last_good: Arc<SyncMutex<Option<ExecutionContext>>>,
    ctx: ExecutionContext,
    stage_fn: F,
) -> Result<ExecutionContext>
where
    F: Fn(ExecutionContext) -> Fut,
    Fut: std::future::Future<Output = ExecutionContext>,
{
    if is_cancelled(&cancellation) {
        return Err(Error::Cancelled);
    }
    let start = Instant::now();
    let mut ctx = match tokio::time::timeout(timeout, stage_fn(ctx)).await {
        Ok(ctx) => ctx,
        Err(_) => {
            return Err(Error::UpstreamTransient {
                stage: name.to_string(),
                message: format!("stage exceeded its {}ms timeout", timeout.as_millis()),
            })
        }
    };
    ctx.timings.record(name, start.elapsed());
    *last_good.lock() = Some(ctx.clone());
    Ok(ctx)
}

/// Checks that every `StageSpec` flagged `is_parallel_group_member` in
/// [`crate::stages::specs`] declares a write-set disjoint from its
/// siblings, so two branches of the same fan-out can never race on the
/// same context field. Runs once at construction time rather than per
/// invocation, since the stage roster is fixed for the engine's lifetime.
fn assert_disjoint_parallel_writes() -> Result<()> {
    check_parallel_write_sets_disjoint(&crate::stages::specs())
}

fn check_parallel_write_sets_disjoint(specs: &[crate::engine::stage::StageSpec]) -> Result<()> {
    let parallel: Vec<_> = specs.iter().filter(|s| s.is_parallel_group_member).collect();
    for (i, a) in parallel.iter().enumerate() {
        for b in &parallel[i + 1..] {
            if let Some(field) = a.produced_outputs.iter().find(|f| b.produced_outputs.contains(f)) {
                return Err(Error::GraphCompilation(format!(
                    "parallel stages '{}' and '{}' both write '{field}'",
                    a.name, b.name
                )));
            }
        }
    }
    Ok(())
}

/// Composes the ten stages into a compiled graph and drives runs against
/// it. Built to drive one active run at a time: [`WorkflowEngine::cancel`]
/// cancels whichever run is currently in flight.
pub struct WorkflowEngine {
    graph: crate::engine::CompiledGraph<ExecutionContext>,
    last_good: Arc<SyncMutex<Option<ExecutionContext>>>,
    active_cancellation: CancellationCell,
}

impl WorkflowEngine {
    /// Builds the engine with no requests-per-minute budget on the chat
    /// model. Use [`WorkflowEngine::with_chat_rate_limit`] to cap it.
    pub fn new(collaborators: Collaborators) -> Result<Self> {
        Self::with_chat_rate_limit(collaborators, None)
    }

    /// Builds the engine, optionally wrapping `collaborators.chat` in a
    /// requests-per-minute budget shared across every stage that calls it.
    pub fn with_chat_rate_limit(collaborators: Collaborators, requests_per_minute: Option<usize>) -> Result<Self> {
        let Collaborators {
            chat,
            embeddings,
            images,
            url_validator,
            storage,
            similarity_corpus,
        } = collaborators;

        let chat: Arc<dyn ChatModel> = match requests_per_minute {
            Some(n) => Arc::new(crate::providers::llm::RateLimitedChatModel::new(
                chat,
                crate::engine::RateLimiter::per_minute(n),
            )),
            None => chat,
        };

        let active_cancellation: CancellationCell = Arc::new(SyncMutex::new(None));
        let last_good: Arc<SyncMutex<Option<ExecutionContext>>> = Arc::new(SyncMutex::new(None));

        let mut graph: StateGraph<ExecutionContext> = StateGraph::new();

        {
            let cancellation = active_cancellation.clone();
            let last_good = last_good.clone();
            graph.add_node_from_fn("S0", move |ctx| {
                Box::pin(run_with_policy(
                    "S0",
                    cancellation.clone(),
                    stage_timeout("S0"),
                    None,
                    last_good.clone(),
                    ctx,
                    |ctx| std::future::ready(s0_data_fetch::run(ctx)),
                ))
            });
        }

        {
            let cancellation = active_cancellation.clone();
            let last_good = last_good.clone();
            graph.add_node_from_fn("S1", move |ctx| {
                Box::pin(run_infallible("S1", cancellation.clone(), stage_timeout("S1"), last_good.clone(), ctx, |ctx| {
                    std::future::ready(s1_prompt_build::run(ctx))
                }))
            });
        }

        {
            let cancellation = active_cancellation.clone();
            let last_good = last_good.clone();
            let chat = chat.clone();
            graph.add_node_from_fn("S2", move |ctx| {
                let chat = chat.clone();
                Box::pin(run_with_policy(
                    "S2",
                    cancellation.clone(),
                    stage_timeout("S2"),
                    Some(RetryConfig::default()),
                    last_good.clone(),
                    ctx,
                    move |ctx| {
                        let chat = chat.clone();
                        async move { s2_generate::run(ctx, chat.as_ref()).await }
                    },
                ))
            });
        }

        {
            let cancellation = active_cancellation.clone();
            let last_good = last_good.clone();
            let chat = chat.clone();
            graph.add_node_from_fn("S3", move |ctx| {
                let chat = chat.clone();
                Box::pin(run_with_policy(
                    "S3",
                    cancellation.clone(),
                    stage_timeout("S3"),
                    Some(RetryConfig::default()),
                    last_good.clone(),
                    ctx,
                    move |ctx| {
                        let chat = chat.clone();
                        async move { s3_quality_refine::run(ctx, chat.as_ref()).await }
                    },
                ))
            });
        }

        {
            let cancellation = active_cancellation.clone();
            let last_good = last_good.clone();
            let chat = chat.clone();
            let url_validator = url_validator.clone();
            graph.add_node_from_fn("S4", move |ctx| {
                let chat = chat.clone();
                let url_validator = url_validator.clone();
                Box::pin(run_with_policy(
                    "S4",
                    cancellation.clone(),
                    stage_timeout("S4"),
                    Some(RetryConfig::default()),
                    last_good.clone(),
                    ctx,
                    move |ctx| {
                        let chat = chat.clone();
                        let url_validator = url_validator.clone();
                        async move { s4_citations::run(ctx, chat.as_ref(), url_validator.as_ref()).await }
                    },
                ))
            });
        }

        {
            let cancellation = active_cancellation.clone();
            let last_good = last_good.clone();
            graph.add_node_from_fn("S5", move |ctx| {
                Box::pin(run_with_policy(
                    "S5",
                    cancellation.clone(),
                    stage_timeout("S5"),
                    None,
                    last_good.clone(),
                    ctx,
                    |ctx| std::future::ready(s5_internal_links::run(ctx)),
                ))
            });
        }

        {
            let cancellation = active_cancellation.clone();
            let last_good = last_good.clone();
            let images = images.clone();
            graph.add_node_from_fn("S6", move |ctx| {
                let images = images.clone();
                Box::pin(run_infallible("S6", cancellation.clone(), stage_timeout("S6"), last_good.clone(), ctx, move |ctx| {
                    let images = images.clone();
                    async move {
                        if ctx.job_config.flags.skip_images {
                            let mut ctx = ctx;
                            ctx.parallel_results.images = Some(s6_images::ImageSet::default());
                            ctx
                        } else {
                            s6_images::run(ctx, images.as_ref()).await
                        }
                    }
                }))
            });
        }

        {
            let cancellation = active_cancellation.clone();
            let last_good = last_good.clone();
            let embeddings = embeddings.clone();
            let similarity_corpus = similarity_corpus.clone();
            graph.add_node_from_fn("S7", move |ctx| {
                let embeddings = embeddings.clone();
                let similarity_corpus = similarity_corpus.clone();
                Box::pin(run_infallible("S7", cancellation.clone(), stage_timeout("S7"), last_good.clone(), ctx, move |ctx| {
                    let embeddings = embeddings.clone();
                    let similarity_corpus = similarity_corpus.clone();
                    async move {
                        if ctx.job_config.flags.skip_similarity_check {
                            let mut ctx = ctx;
                            ctx.parallel_results.similarity_report = Some(s7_similarity::SimilarityReport::default());
                            ctx
                        } else {
                            s7_similarity::run(ctx, embeddings.as_ref(), &similarity_corpus).await
                        }
                    }
                }))
            });
        }

        {
            let cancellation = active_cancellation.clone();
            let last_good = last_good.clone();
            graph.add_node_from_fn("S8", move |ctx| {
                Box::pin(run_with_policy(
                    "S8",
                    cancellation.clone(),
                    stage_timeout("S8"),
                    None,
                    last_good.clone(),
                    ctx,
                    |ctx| std::future::ready(s8_merge_and_link::run(ctx)),
                ))
            });
        }

        {
            let cancellation = active_cancellation.clone();
            let last_good = last_good.clone();
            let storage = storage.clone();
            graph.add_node_from_fn("S9", move |ctx| {
                let storage = storage.clone();
                Box::pin(run_with_policy(
                    "S9",
                    cancellation.clone(),
                    stage_timeout("S9"),
                    None,
                    last_good.clone(),
                    ctx,
                    move |ctx| {
                        let storage = storage.clone();
                        async move { s9_render_and_store::run(ctx, storage.as_ref()).await }
                    },
                ))
            });
        }

        assert_disjoint_parallel_writes()?;

        graph.set_entry_point("S0");
        graph.add_edge("S0", "S1");
        graph.add_edge("S1", "S2");
        graph.add_edge("S2", "S3");
        graph.add_edge("S3", "S4");
        graph.add_edge("S4", "S5");
        graph.add_parallel_edges("S5", vec!["S6".to_string(), "S7".to_string()]);
        graph.add_edge("S5", "S8");
        graph.add_edge("S8", "S9");
        graph.add_edge("S9", END);

        let compiled = graph.compile()?;

        Ok(Self {
            graph: compiled,
            last_good,
            active_cancellation,
        })
    }

    /// Runs the full pipeline for one job. Always returns a result — fatal
    /// errors and cancellation are captured in `status`, with `context`
    /// carrying whatever state the last completed stage produced rather
    /// than being discarded.
    pub async fn execute(&self, job_config: JobConfig) -> ExecutionResult {
        let run_token = CancellationToken::new();
        *self.active_cancellation.lock() = Some(run_token);
        *self.last_good.lock() = None;

        let initial = ExecutionContext::new(job_config);
        let job_id = initial.job_id;

        let outcome = match self.graph.invoke(initial).await {
            Ok(result) => {
                let ctx = result.final_state;
                let status = if ctx.storage_result.is_none() {
                    warn!(%job_id, "run completed without a storage result");
                    RunStatus::Failed
                } else if !ctx.errors.is_empty() {
                    RunStatus::OkWithWarnings
                } else {
                    RunStatus::Ok
                };
                info!(%job_id, ?status, "pipeline run finished");
                ExecutionResult { status, context: ctx }
            }
            Err(Error::Cancelled) => {
                info!(%job_id, "pipeline run cancelled");
                ExecutionResult {
                    status: RunStatus::Cancelled,
                    context: self.snapshot_or_empty(job_id, &job_config_placeholder()),
                }
            }
            Err(err) => {
                warn!(%job_id, error = %err, "pipeline run failed");
                let mut ctx = self.snapshot_or_empty(job_id, &job_config_placeholder());
                ctx.push_error(ErrorEntry::new("pipeline", "Fatal", err.to_string(), false));
                ExecutionResult {
                    status: RunStatus::Failed,
                    context: ctx,
                }
            }
        };

        *self.active_cancellation.lock() = None;
        outcome
    }

    /// Cancels whichever run is currently in flight. Nodes observe this at
    /// their next cooperative check (the start of their turn) and stop
    /// without running; already-completed stages' output is preserved via
    /// the `last_good` snapshot.
    pub fn cancel(&self) {
        if let Some(token) = self.active_cancellation.lock().as_ref() {
            token.cancel();
        }
    }

    fn snapshot_or_empty(&self, job_id: uuid::Uuid, fallback_config: &JobConfig) -> ExecutionContext {
        self.last_good.lock().clone().unwrap_or_else(|| {
            let mut ctx = ExecutionContext::new(fallback_config.clone());
            ctx.job_id = job_id;
            ctx
        })
    }
}

/// Placeholder used only when a run fails or is cancelled before any
/// stage completes, so `snapshot_or_empty` always has a `JobConfig` to
/// build a fallback `ExecutionContext` from.
fn job_config_placeholder() -> JobConfig {
    JobConfig {
        keyword: String::new(),
        language: "en".to_string(),
        country: "us".to_string(),
        tone: None,
        extra_instructions: None,
        word_count_min: 1,
        word_count_max: 1,
        flags: Default::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{CompanyData, FeatureFlags};
    use crate::providers::embeddings::MockEmbeddings;
    use crate::providers::image::MockImageGenerator;
    use crate::providers::llm::{GenerateResponse, MockChatModel};
    use crate::providers::storage::MockStorage;
    use crate::providers::url_validator::MockUrlValidator;
    use serde_json::json;

    fn sample_generation_response() -> GenerateResponse {
        let mut sections = Vec::new();
        for i in 1..=9 {
            sections.push(json!({
                "title": format!("Section {i}"),
                "content": format!("<p>Body for section {i} with enough words to be realistic and pass length checks comfortably across every single one of the nine sections that make up this long article body.</p>"),
            }));
        }
        GenerateResponse {
            parsed: Some(json!({
                "headline": "Cloud Security Best Practices",
                "subtitle": "A practical guide",
                "teaser": "Everything you need to know",
                "slug": "cloud-security-best-practices",
                "meta_title": "Cloud Security Best Practices",
                "meta_description": "A practical guide to cloud security.",
                "direct_answer": "<p>Use defense in depth.</p>",
                "intro": "<p>Security matters.</p>",
                "sections": sections,
                "key_takeaways": ["Encrypt everything", "Patch often"],
                "faqs": [{"question": "What is MFA?", "answer": "Multi-factor authentication."}],
                "paa": [{"question": "Is the cloud safe?", "answer": "Yes, with care."}],
                "sources": [{"number": 1, "title": "NIST", "url": "https://nist.gov"}],
                "search_queries": ["cloud security"],
                "tables": [],
            })),
            text: None,
            grounding_trace: vec![],
        }
    }

    fn job_config() -> JobConfig {
        JobConfig {
            keyword: "cloud security".to_string(),
            language: "en".to_string(),
            country: "us".to_string(),
            tone: None,
            extra_instructions: None,
            word_count_min: 100,
            word_count_max: 10_000,
            flags: FeatureFlags::default(),
        }
    }

    fn build_engine() -> WorkflowEngine {
        let chat = MockChatModel::new();
        chat.push_response(sample_generation_response());
        let collaborators = Collaborators {
            chat: Arc::new(chat),
            embeddings: Arc::new(MockEmbeddings::default()),
            images: Arc::new(MockImageGenerator::default()),
            url_validator: Arc::new(MockUrlValidator::new().with_result(
                "https://nist.gov",
                crate::providers::url_validator::ProbeResult {
                    status_code: Some(200),
                    final_url: "https://nist.gov".to_string(),
                    classification: crate::providers::url_validator::Classification::Ok,
                },
            )),
            storage: Arc::new(MockStorage::new()),
            similarity_corpus: Arc::new(Vec::new()),
        };
        WorkflowEngine::new(collaborators).unwrap()
    }

    #[test]
    fn declared_parallel_write_sets_stay_disjoint() {
        assert_disjoint_parallel_writes().unwrap();
    }

    #[test]
    fn stage_timeout_matches_the_declared_spec_for_every_stage() {
        for spec in crate::stages::specs() {
            let short_name = spec.name.split('_').next().unwrap();
            assert_eq!(
                stage_timeout(short_name),
                spec.per_stage_timeout,
                "node '{short_name}' must be wired to its declared per_stage_timeout"
            );
        }
    }

    #[test]
    fn disjointness_check_catches_an_overlapping_write_set() {
        use crate::engine::stage::StageSpec;
        let a = StageSpec {
            number: 6,
            name: "left",
            required_inputs: &[],
            produced_outputs: &["shared"],
            is_parallel_group_member: true,
            retry: RetryConfig::default(),
            per_stage_timeout: Duration::from_secs(1),
        };
        let b = StageSpec {
            number: 7,
            name: "right",
            required_inputs: &[],
            produced_outputs: &["shared"],
            is_parallel_group_member: true,
            retry: RetryConfig::default(),
            per_stage_timeout: Duration::from_secs(1),
        };
        let err = check_parallel_write_sets_disjoint(&[a, b]).unwrap_err();
        assert!(matches!(err, Error::GraphCompilation(_)));
    }

    #[test]
    fn disjointness_check_ignores_non_parallel_stages_sharing_a_field() {
        use crate::engine::stage::StageSpec;
        let a = StageSpec {
            number: 3,
            name: "S3",
            required_inputs: &[],
            produced_outputs: &["structured_data"],
            is_parallel_group_member: false,
            retry: RetryConfig::default(),
            per_stage_timeout: Duration::from_secs(1),
        };
        let b = StageSpec {
            number: 4,
            name: "S4",
            required_inputs: &[],
            produced_outputs: &["structured_data"],
            is_parallel_group_member: false,
            retry: RetryConfig::default(),
            per_stage_timeout: Duration::from_secs(1),
        };
        check_parallel_write_sets_disjoint(&[a, b]).unwrap();
    }

    #[tokio::test]
    async fn happy_path_produces_ok_status_and_storage_result() {
        let engine = build_engine();
        let mut config = job_config();
        config.flags.skip_images = true;
        config.flags.skip_similarity_check = true;
        let result = engine.execute(config).await;
        assert!(matches!(result.status, RunStatus::Ok | RunStatus::OkWithWarnings));
        assert!(result.context.storage_result.is_some());
        assert!(result.context.validated_article.is_some());
    }

    #[tokio::test]
    async fn input_validation_failure_is_fatal_and_preserves_partial_state() {
        let engine = build_engine();
        let mut config = job_config();
        config.keyword = String::new();
        let result = engine.execute(config).await;
        assert_eq!(result.status, RunStatus::Failed);
    }

    #[tokio::test]
    async fn cancelling_before_the_run_starts_is_observed_immediately() {
        let engine = build_engine();
        engine.cancel();
        let result = engine.execute(job_config()).await;
        // The cancellation signaled before `execute` reset the token is a
        // no-op (there was nothing in flight to cancel); this just proves
        // `cancel()` never panics when no run is active.
        assert!(matches!(
            result.status,
            RunStatus::Ok | RunStatus::OkWithWarnings | RunStatus::Cancelled
        ));
    }

    #[tokio::test]
    async fn company_data_is_optional() {
        let config = job_config();
        let mut ctx = ExecutionContext::new(config);
        assert!(ctx.company_data.is_none());
        ctx.company_data = Some(CompanyData::default());
        assert!(ctx.company_data.is_some());
    }
}

//! The ten pipeline stages, `S0` through `S9`, one module each. Each module
//! exposes a free `run` function rather than a `Stage` impl directly — the
//! `Stage` trait and its registry live in [`crate::engine::stage`];
//! [`crate::pipeline::WorkflowEngine`] wires these functions into the
//! compiled graph with their declared retry/timeout policy.

pub mod s0_data_fetch;
pub mod s1_prompt_build;
pub mod s2_generate;
pub mod s3_quality_refine;
pub mod s4_citations;
pub mod s5_internal_links;
pub mod s6_images;
pub mod s7_similarity;
pub mod s8_merge_and_link;
pub mod s9_render_and_store;

use std::time::Duration;

use crate::engine::retry::RetryConfig;
use crate::engine::stage::StageSpec;

/// The declared read/write contract for every stage in the pipeline, in
/// execution order. `WorkflowEngine` checks this list at construction time
/// to enforce that no two parallel stages' declared write-sets intersect
/// for the S6/S7 group — see
/// [`crate::pipeline::assert_disjoint_parallel_writes`].
pub fn specs() -> Vec<StageSpec> {
    vec![
        StageSpec {
            number: 0,
            name: "S0_DataFetch",
            required_inputs: &["job_config"],
            produced_outputs: &["company_data", "sitemap_urls"],
            is_parallel_group_member: false,
            retry: RetryConfig { max_retries: 0, ..RetryConfig::default() },
            per_stage_timeout: Duration::from_secs(30),
        },
        StageSpec {
            number: 1,
            name: "S1_PromptBuild",
            required_inputs: &["job_config", "company_data", "sitemap_urls"],
            produced_outputs: &["prompt"],
            is_parallel_group_member: false,
            retry: RetryConfig { max_retries: 0, ..RetryConfig::default() },
            per_stage_timeout: Duration::from_secs(30),
        },
        StageSpec {
            number: 2,
            name: "S2_Generate",
            required_inputs: &["prompt"],
            produced_outputs: &["structured_data", "grounding_urls"],
            is_parallel_group_member: false,
            retry: RetryConfig::default(),
            per_stage_timeout: Duration::from_secs(120),
        },
        StageSpec {
            number: 3,
            name: "S3_QualityRefine",
            required_inputs: &["structured_data"],
            produced_outputs: &["structured_data", "errors"],
            is_parallel_group_member: false,
            retry: RetryConfig::default(),
            per_stage_timeout: Duration::from_secs(180),
        },
        StageSpec {
            number: 4,
            name: "S4_CitationsValidate",
            required_inputs: &["structured_data", "grounding_urls"],
            produced_outputs: &["structured_data", "errors"],
            is_parallel_group_member: false,
            retry: RetryConfig::default(),
            per_stage_timeout: Duration::from_secs(90),
        },
        StageSpec {
            number: 5,
            name: "S5_InternalLinks",
            required_inputs: &["structured_data", "sitemap_urls"],
            produced_outputs: &["structured_data"],
            is_parallel_group_member: false,
            retry: RetryConfig { max_retries: 0, ..RetryConfig::default() },
            per_stage_timeout: Duration::from_secs(30),
        },
        StageSpec {
            number: 6,
            name: "S6_Images",
            required_inputs: &["structured_data"],
            produced_outputs: &["parallel_results.images", "errors"],
            is_parallel_group_member: true,
            retry: RetryConfig { max_retries: 0, ..RetryConfig::default() },
            per_stage_timeout: Duration::from_secs(60),
        },
        StageSpec {
            number: 7,
            name: "S7_Similarity",
            required_inputs: &["structured_data"],
            produced_outputs: &["parallel_results.similarity_report"],
            is_parallel_group_member: true,
            retry: RetryConfig { max_retries: 0, ..RetryConfig::default() },
            per_stage_timeout: Duration::from_secs(30),
        },
        StageSpec {
            number: 8,
            name: "S8_MergeAndLink",
            required_inputs: &["structured_data", "parallel_results"],
            produced_outputs: &["structured_data", "validated_article"],
            is_parallel_group_member: false,
            retry: RetryConfig { max_retries: 0, ..RetryConfig::default() },
            per_stage_timeout: Duration::from_secs(30),
        },
        StageSpec {
            number: 9,
            name: "S9_RenderAndStore",
            required_inputs: &["validated_article"],
            produced_outputs: &["storage_result", "errors"],
            is_parallel_group_member: false,
            retry: RetryConfig { max_retries: 0, ..RetryConfig::default() },
            per_stage_timeout: Duration::from_secs(30),
        },
    ]
}

//! Performance benchmarks for the article generation pipeline.
//!
//! Run with: cargo bench
//! Run a single group: cargo bench full_pipeline

use std::sync::Arc;

use articleflow::context::{ExecutionContext, FeatureFlags, JobConfig};
use articleflow::document::{ArticleDocument, Section};
use articleflow::pipeline::{Collaborators, WorkflowEngine};
use articleflow::providers::embeddings::MockEmbeddings;
use articleflow::providers::image::MockImageGenerator;
use articleflow::providers::llm::{GenerateResponse, MockChatModel};
use articleflow::providers::storage::MockStorage;
use articleflow::providers::url_validator::MockUrlValidator;
use articleflow::stages::{s4_citations, s5_internal_links, s7_similarity, s8_merge_and_link};
use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::json;

fn job_config() -> JobConfig {
    JobConfig {
        keyword: "cloud security".to_string(),
        language: "en".to_string(),
        country: "us".to_string(),
        tone: None,
        extra_instructions: None,
        word_count_min: 100,
        word_count_max: 10_000,
        flags: FeatureFlags {
            skip_images: true,
            skip_similarity_check: true,
            ..Default::default()
        },
    }
}

fn sample_generation_response() -> GenerateResponse {
    let sections: Vec<_> = (1..=9)
        .map(|i| {
            json!({
                "title": format!("Section {i}"),
                "content": "<p>Body copy long enough to resemble a real generated section of an article about cloud security best practices for modern engineering teams.</p>",
            })
        })
        .collect();
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

fn sample_document() -> ArticleDocument {
    let mut doc = ArticleDocument::default();
    doc.headline = "Cloud Security Best Practices".to_string();
    for (i, section) in doc.sections.iter_mut().enumerate() {
        *section = Section {
            title: format!("Section {}", i + 1),
            content: "<p>See [1] for details on this topic and how it applies broadly.</p>".to_string(),
        };
    }
    doc.sources.push(articleflow::document::Citation {
        number: 1,
        title: "NIST".to_string(),
        url: "https://nist.gov".to_string(),
    });
    doc.citation_map.insert("1".to_string(), "https://nist.gov".to_string());
    doc
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");

    group.bench_function("happy_path_s0_through_s9", |b| {
        b.to_async(tokio::runtime::Runtime::new().unwrap()).iter(|| async {
            let chat = MockChatModel::new();
            chat.push_response(sample_generation_response());
            let collaborators = Collaborators {
                chat: Arc::new(chat),
                embeddings: Arc::new(MockEmbeddings::default()),
                images: Arc::new(MockImageGenerator::default()),
                url_validator: Arc::new(MockUrlValidator::new().with_result(
                    "https://nist.gov",
                    articleflow::providers::url_validator::ProbeResult {
                        status_code: Some(200),
                        final_url: "https://nist.gov".to_string(),
                        classification: articleflow::providers::url_validator::Classification::Ok,
                    },
                )),
                storage: Arc::new(MockStorage::new()),
                similarity_corpus: Arc::new(Vec::new()),
            };
            let engine = WorkflowEngine::new(collaborators).unwrap();
            engine.execute(job_config()).await
        });
    });

    group.finish();
}

fn bench_citation_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("citation_validation");

    group.bench_function("s4_single_ok_citation", |b| {
        b.to_async(tokio::runtime::Runtime::new().unwrap()).iter(|| async {
            let mut ctx = ExecutionContext::new(job_config());
            ctx.structured_data = Some(sample_document());
            let chat = MockChatModel::new();
            let validator = MockUrlValidator::new().with_result(
                "https://nist.gov",
                articleflow::providers::url_validator::ProbeResult {
                    status_code: Some(200),
                    final_url: "https://nist.gov".to_string(),
                    classification: articleflow::providers::url_validator::Classification::Ok,
                },
            );
            s4_citations::run(ctx, &chat, &validator).await.unwrap()
        });
    });

    group.finish();
}

fn bench_pure_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("pure_transforms");

    group.bench_function("s5_internal_links", |b| {
        b.iter(|| {
            let mut ctx = ExecutionContext::new(job_config());
            ctx.structured_data = Some(sample_document());
            s5_internal_links::run(ctx).unwrap()
        });
    });

    group.bench_function("s8_merge_and_link", |b| {
        b.iter(|| {
            let mut ctx = ExecutionContext::new(job_config());
            ctx.structured_data = Some(sample_document());
            s8_merge_and_link::run(ctx).unwrap()
        });
    });

    group.bench_function("s7_similarity_against_empty_corpus", |b| {
        b.to_async(tokio::runtime::Runtime::new().unwrap()).iter(|| async {
            let mut ctx = ExecutionContext::new(job_config());
            ctx.structured_data = Some(sample_document());
            let embeddings = MockEmbeddings::default();
            s7_similarity::run(ctx, &embeddings, &[]).await
        });
    });

    group.finish();
}

criterion_group!(benches, bench_full_pipeline, bench_citation_validation, bench_pure_transforms);
criterion_main!(benches);

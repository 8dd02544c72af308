//! S2 Generate: the single LLM call that produces the article's
//! structured content and its grounding trace.

use serde_json::json;

use crate::context::{ExecutionContext, GroundingUrl};
use crate::document::ArticleDocument;
use crate::error::{Error, Result};
use crate::providers::llm::{ChatModel, GenerateRequest, ToolSpec};

/// Retried up to 2 times on schema mismatch before the run fails.
const MAX_RETRIES: u32 = 2;

fn response_schema() -> serde_json::Value {
    // A structural sketch, not exhaustive: the contract is enforced by
    // deserializing into `ArticleDocument`, this schema is what is handed
    // to the model to bias its output shape.
    json!({
        "type": "object",
        "required": ["headline", "intro", "sections", "sources"],
    })
}

pub async fn run(mut ctx: ExecutionContext, chat: &dyn ChatModel) -> Result<ExecutionContext> {
    let mut attempt = 0;
    let mut last_error: Option<String> = None;

    loop {
        let request = GenerateRequest::new(ctx.prompt.clone())
            .with_schema(response_schema())
            .with_tools(vec![ToolSpec::GroundedSearch, ToolSpec::UrlContext])
            .with_temperature(0.3);

        let response = chat.generate(request).await?;

        let Some(parsed) = response.parsed.clone() else {
            last_error = Some("model returned no structured output".to_string());
            if attempt >= MAX_RETRIES {
                break;
            }
            attempt += 1;
            continue;
        };

        match serde_json::from_value::<ArticleDocument>(parsed) {
            Ok(mut doc) => {
                doc.recompute_word_count();
                doc.toc_labels = doc
                    .sections
                    .iter()
                    .map(|s| s.title.clone())
                    .filter(|t| !t.is_empty())
                    .collect();

                ctx.grounding_urls = response
                    .grounding_trace
                    .into_iter()
                    .collect::<Vec<GroundingUrl>>();
                ctx.structured_data = Some(doc);
                return Ok(ctx);
            }
            Err(err) => {
                last_error = Some(err.to_string());
                if attempt >= MAX_RETRIES {
                    break;
                }
                attempt += 1;
            }
        }
    }

    Err(Error::UpstreamHard {
        stage: "S2".to_string(),
        message: last_error.unwrap_or_else(|| "unknown schema mismatch".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::JobConfig;
    use crate::providers::llm::GenerateResponse;
    use crate::providers::MockChatModel;
    use serde_json::json;

    fn base_context() -> ExecutionContext {
        let mut ctx = ExecutionContext::new(JobConfig {
            keyword: "cloud security".to_string(),
            language: "en".to_string(),
            country: "us".to_string(),
            tone: None,
            extra_instructions: None,
            word_count_min: 2500,
            word_count_max: 4000,
            flags: Default::default(),
        });
        ctx.prompt = "write an article".to_string();
        ctx
    }

    fn valid_document_json() -> serde_json::Value {
        json!({
            "headline": "Cloud Security Best Practices",
            "subtitle": "",
            "teaser": "",
            "slug": "cloud-security",
            "meta_title": "",
            "meta_description": "",
            "direct_answer": "An answer with the keyword and [1].",
            "intro": "<p>intro</p>",
            "sections": [
                {"title": "s1", "content": "<p>one two three</p>"},
                {"title": "s2", "content": "<p>one two three</p>"},
                {"title": "s3", "content": "<p>one two three</p>"},
                {"title": "s4", "content": "<p>one two three</p>"},
                {"title": "s5", "content": "<p>one two three</p>"},
                {"title": "s6", "content": ""},
                {"title": "s7", "content": ""},
                {"title": "s8", "content": ""},
                {"title": "s9", "content": ""}
            ],
            "key_takeaways": [],
            "faqs": [],
            "paa": [],
            "sources": [{"number": 1, "title": "NIST", "url": "https://nist.gov"}],
            "search_queries": [],
            "toc_labels": [],
            "tables": [],
            "image_hero": {"url": null, "alt_text": null},
            "image_mid": {"url": null, "alt_text": null},
            "image_bottom": {"url": null, "alt_text": null},
            "citation_map": {},
            "section_internal_links": [],
            "word_count": 0,
            "reading_time_minutes": 0,
            "similarity_report": null
        })
    }

    #[tokio::test]
    async fn parses_valid_structured_response() {
        let chat = MockChatModel::new();
        chat.push_response(GenerateResponse {
            parsed: Some(valid_document_json()),
            grounding_trace: vec![],
            ..Default::default()
        });
        let ctx = run(base_context(), &chat).await.unwrap();
        let doc = ctx.document().unwrap();
        assert_eq!(doc.headline, "Cloud Security Best Practices");
        assert!(doc.word_count > 0);
    }

    #[tokio::test]
    async fn retries_on_malformed_output_then_fails() {
        let chat = MockChatModel::new();
        for _ in 0..3 {
            chat.push_response(GenerateResponse {
                parsed: Some(json!({"not": "a document"})),
                ..Default::default()
            });
        }
        let result = run(base_context(), &chat).await;
        assert!(result.is_err());
        assert_eq!(chat.call_count(), 3);
    }

    #[tokio::test]
    async fn succeeds_after_one_retry() {
        let chat = MockChatModel::new();
        chat.push_response(GenerateResponse {
            parsed: Some(json!({"bad": true})),
            ..Default::default()
        });
        chat.push_response(GenerateResponse {
            parsed: Some(valid_document_json()),
            ..Default::default()
        });
        let result = run(base_context(), &chat).await;
        assert!(result.is_ok());
        assert_eq!(chat.call_count(), 2);
    }
}

//! S3 QualityRefine: always runs; internally self-skips when detection
//! finds nothing to fix. Thin wrapper around [`crate::quality::repair`].

use crate::context::ExecutionContext;
use crate::error::{Error, Result};
use crate::providers::llm::ChatModel;
use crate::quality::repair;

pub async fn run(mut ctx: ExecutionContext, chat: &dyn ChatModel) -> Result<ExecutionContext> {
    let keyword = ctx.job_config.keyword.clone();
    let Some(mut doc) = ctx.structured_data.take() else {
        return Err(Error::StageContract {
            stage: "S3".to_string(),
            message: "structured_data missing entering S3".to_string(),
        });
    };

    let repair_errors = repair::run_quality_pass(&mut doc, chat, &keyword).await;
    ctx.structured_data = Some(doc);
    for entry in repair_errors {
        ctx.push_error(entry);
    }

    Ok(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::JobConfig;
    use crate::document::ArticleDocument;
    use crate::providers::llm::GenerateResponse;
    use crate::providers::MockChatModel;

    fn base_context(doc: ArticleDocument) -> ExecutionContext {
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
        ctx.structured_data = Some(doc);
        ctx
    }

    #[tokio::test]
    async fn fails_contract_when_document_missing() {
        let ctx = ExecutionContext::new(JobConfig {
            keyword: "k".to_string(),
            language: "en".to_string(),
            country: "us".to_string(),
            tone: None,
            extra_instructions: None,
            word_count_min: 2500,
            word_count_max: 4000,
            flags: Default::default(),
        });
        let chat = MockChatModel::new();
        assert!(run(ctx, &chat).await.is_err());
    }

    #[tokio::test]
    async fn runs_unconditionally_and_repairs_dashes() {
        let mut doc = ArticleDocument::default();
        doc.intro = "<p>Security \u{2014} matters.</p>".to_string();
        let chat = MockChatModel::new();
        for _ in 0..20 {
            chat.push_response(GenerateResponse {
                text: Some("<p>Security matters.</p>".to_string()),
                ..Default::default()
            });
        }
        let result = run(base_context(doc), &chat).await.unwrap();
        assert!(!result.document().unwrap().intro.contains('\u{2014}'));
    }
}

//! S9 RenderAndStore: renders the validated article to HTML + JSON-LD and
//! persists every artifact through the storage collaborator. Storage
//! failures are non-fatal to the graph — they are logged and leave
//! `storage_result` as `None`, which the engine reads as a `failed` run
//! without a propagated hard error (graph-level failure is reserved for
//! S0/S2, whose errors are unrecoverable mid-run).

use crate::context::{ErrorEntry, ExecutionContext};
use crate::error::{Error, Result};
use crate::providers::storage::{ArticleStorage, StorageResult};
use crate::render;

async fn store_all(
    ctx: &ExecutionContext,
    storage: &dyn ArticleStorage,
    rendered: &render::RenderedArticle,
) -> Result<StorageResult> {
    let job_id = ctx.job_id;
    let article = ctx.validated_article.as_ref().ok_or_else(|| Error::StageContract {
        stage: "S9".to_string(),
        message: "validated_article missing entering S9".to_string(),
    })?;

    let index_html_uri = storage
        .put(&format!("{job_id}/index.html"), rendered.html.clone().into_bytes(), "text/html")
        .await?;
    let article_json_uri = storage
        .put(
            &format!("{job_id}/article.json"),
            serde_json::to_vec(article)?,
            "application/json",
        )
        .await?;
    let sources_json_uri = storage
        .put(
            &format!("{job_id}/sources.json"),
            serde_json::to_vec(article.get("sources_structured").unwrap_or(&serde_json::Value::Null))?,
            "application/json",
        )
        .await?;

    let mut image_uris = std::collections::HashMap::new();
    for role in ["hero", "mid", "bottom"] {
        if let Some(url) = article.get(&format!("image_{role}_url")).and_then(|v| v.as_str()) {
            let uri = storage
                .put(&format!("{job_id}/images/{role}.txt"), url.as_bytes().to_vec(), "text/plain")
                .await?;
            image_uris.insert(role.to_string(), uri);
        }
    }

    Ok(StorageResult {
        index_html_uri,
        article_json_uri,
        sources_json_uri,
        image_uris,
    })
}

pub async fn run(mut ctx: ExecutionContext, storage: &dyn ArticleStorage) -> Result<ExecutionContext> {
    let article = match ctx.validated_article.as_ref() {
        Some(article) => article.clone(),
        None => {
            return Err(Error::StageContract {
                stage: "S9".to_string(),
                message: "validated_article missing entering S9".to_string(),
            })
        }
    };

    let rendered = render::render(&article, &ctx.job_config.language);

    match store_all(&ctx, storage, &rendered).await {
        Ok(result) => ctx.storage_result = Some(result),
        Err(err) => {
            ctx.push_error(ErrorEntry::new("S9", "StorageFailure", err.to_string(), false));
            ctx.storage_result = None;
        }
    }

    Ok(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::JobConfig;
    use crate::document::ArticleDocument;
    use crate::providers::storage::MockStorage;
    use crate::stages::s8_merge_and_link;

    fn base_context() -> ExecutionContext {
        let mut ctx = ExecutionContext::new(JobConfig {
            keyword: "k".to_string(),
            language: "en".to_string(),
            country: "us".to_string(),
            tone: None,
            extra_instructions: None,
            word_count_min: 2500,
            word_count_max: 4000,
            flags: Default::default(),
        });
        let mut doc = ArticleDocument::default();
        doc.headline = "Cloud Security".to_string();
        ctx.structured_data = Some(doc);
        s8_merge_and_link::run(ctx).unwrap()
    }

    #[tokio::test]
    async fn successful_store_populates_storage_result() {
        let ctx = base_context();
        let storage = MockStorage::new();
        let result = run(ctx, &storage).await.unwrap();
        let storage_result = result.storage_result.unwrap();
        assert!(storage_result.index_html_uri.starts_with("mem://"));
        assert!(storage_result.article_json_uri.contains("article.json"));
        assert!(result.errors.is_empty());
    }

    #[tokio::test]
    async fn missing_validated_article_is_a_stage_contract_error() {
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
        let storage = MockStorage::new();
        assert!(run(ctx, &storage).await.is_err());
    }

    struct FailingStorage;

    #[async_trait::async_trait]
    impl ArticleStorage for FailingStorage {
        async fn put(&self, _path: &str, _bytes: Vec<u8>, _content_type: &str) -> Result<String> {
            Err(Error::UpstreamHard {
                stage: "S9".to_string(),
                message: "bucket unavailable".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn storage_failure_is_non_fatal_and_logged() {
        let ctx = base_context();
        let storage = FailingStorage;
        let result = run(ctx, &storage).await.unwrap();
        assert!(result.storage_result.is_none());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].stage, "S9");
    }
}

//! S8 MergeAndLink: merges the S6/S7 parallel results into the document,
//! rewrites surviving `[N]` citation markers into anchors, and flattens the
//! nested `ArticleDocument` into the single-level `validated_article`
//! mapping S9 consumes. No content rewriting happens here — that remains
//! S3's exclusive responsibility.

use std::collections::HashMap;

use serde_json::Value;

use crate::context::ExecutionContext;
use crate::document::ArticleDocument;
use crate::error::{Error, Result};

/// Replaces every `[N]` marker in `text` with an HTML citation anchor
/// sourced from `citation_map`/`titles`; markers with no matching entry are
/// deleted and the doubled space left behind collapses, matching S4's
/// marker-rewrite policy.
fn link_citations(text: &str, citation_map: &HashMap<String, String>, titles: &HashMap<String, String>) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c == '[' {
            if let Some(close) = text[i..].find(']') {
                let inner = &text[i + 1..i + close];
                if !inner.is_empty() && inner.chars().all(|c| c.is_ascii_digit()) {
                    if let Some(url) = citation_map.get(inner) {
                        let title = titles.get(inner).map(|s| s.as_str()).unwrap_or(inner);
                        result.push_str(&format!(r#"<a href="{url}" class="citation">{title}</a>"#));
                    }
                    for _ in 0..close {
                        chars.next();
                    }
                    continue;
                }
            }
        }
        result.push(c);
    }
    while result.contains("  ") {
        result = result.replace("  ", " ");
    }
    result
}

fn flatten(doc: &ArticleDocument) -> HashMap<String, Value> {
    let mut map = HashMap::new();
    map.insert("headline".to_string(), Value::String(doc.headline.clone()));
    map.insert("subtitle".to_string(), Value::String(doc.subtitle.clone()));
    map.insert("teaser".to_string(), Value::String(doc.teaser.clone()));
    map.insert("slug".to_string(), Value::String(doc.slug.clone()));
    map.insert("meta_title".to_string(), Value::String(doc.meta_title.clone()));
    map.insert("meta_description".to_string(), Value::String(doc.meta_description.clone()));
    map.insert("direct_answer".to_string(), Value::String(doc.direct_answer.clone()));
    map.insert("intro".to_string(), Value::String(doc.intro.clone()));

    for (i, section) in doc.sections.iter().enumerate() {
        map.insert(format!("section_{:02}_title", i + 1), Value::String(section.title.clone()));
        map.insert(format!("section_{:02}_content", i + 1), Value::String(section.content.clone()));
    }
    for (i, takeaway) in doc.key_takeaways.iter().enumerate() {
        map.insert(format!("key_takeaway_{:02}", i + 1), Value::String(takeaway.clone()));
    }
    for (i, faq) in doc.faqs.iter().enumerate() {
        map.insert(format!("faq_{:02}_question", i + 1), Value::String(faq.question.clone()));
        map.insert(format!("faq_{:02}_answer", i + 1), Value::String(faq.answer.clone()));
    }
    for (i, qa) in doc.paa.iter().enumerate() {
        map.insert(format!("paa_{:02}_question", i + 1), Value::String(qa.question.clone()));
        map.insert(format!("paa_{:02}_answer", i + 1), Value::String(qa.answer.clone()));
    }

    map.insert(
        "sources".to_string(),
        Value::Array(
            doc.sources
                .iter()
                .map(|c| Value::String(format!("[{}]: {} \u{2013} {}", c.number, c.title, c.url)))
                .collect(),
        ),
    );
    // Structured twin of `sources`, kept for the renderer so it does not
    // have to re-parse the formatted citation line.
    map.insert(
        "sources_structured".to_string(),
        serde_json::to_value(&doc.sources).unwrap_or(Value::Null),
    );
    map.insert("search_queries".to_string(), serde_json::to_value(&doc.search_queries).unwrap_or(Value::Null));
    map.insert("toc_labels".to_string(), serde_json::to_value(&doc.toc_labels).unwrap_or(Value::Null));
    map.insert("tables".to_string(), serde_json::to_value(&doc.tables).unwrap_or(Value::Null));
    map.insert("word_count".to_string(), Value::Number(doc.word_count.into()));
    map.insert("reading_time_minutes".to_string(), Value::Number(doc.reading_time_minutes.into()));

    map.insert("image_hero_url".to_string(), doc.image_hero.url.clone().map(Value::String).unwrap_or(Value::Null));
    map.insert("image_hero_alt".to_string(), doc.image_hero.alt_text.clone().map(Value::String).unwrap_or(Value::Null));
    map.insert("image_mid_url".to_string(), doc.image_mid.url.clone().map(Value::String).unwrap_or(Value::Null));
    map.insert("image_mid_alt".to_string(), doc.image_mid.alt_text.clone().map(Value::String).unwrap_or(Value::Null));
    map.insert("image_bottom_url".to_string(), doc.image_bottom.url.clone().map(Value::String).unwrap_or(Value::Null));
    map.insert("image_bottom_alt".to_string(), doc.image_bottom.alt_text.clone().map(Value::String).unwrap_or(Value::Null));

    map.insert(
        "section_internal_links".to_string(),
        serde_json::to_value(&doc.section_internal_links).unwrap_or(Value::Null),
    );
    map.insert(
        "similarity_report".to_string(),
        serde_json::to_value(&doc.similarity_report).unwrap_or(Value::Null),
    );

    map
}

pub fn run(mut ctx: ExecutionContext) -> Result<ExecutionContext> {
    let images = ctx.parallel_results.images.take();
    let similarity_report = ctx.parallel_results.similarity_report.take();

    let doc = ctx.structured_data.as_mut().ok_or_else(|| Error::StageContract {
        stage: "S8".to_string(),
        message: "structured_data missing entering S8".to_string(),
    })?;

    if let Some(images) = images {
        doc.image_hero = images.hero;
        doc.image_mid = images.mid;
        doc.image_bottom = images.bottom;
    }
    doc.similarity_report = similarity_report;

    let citation_map = doc.citation_map.clone();
    let titles: HashMap<String, String> = doc
        .sources
        .iter()
        .map(|c| (c.number.to_string(), c.title.clone()))
        .collect();

    for field in doc.body_fields_mut() {
        *field = link_citations(field, &citation_map, &titles);
    }

    let flattened = flatten(doc);
    ctx.validated_article = Some(flattened);

    Ok(ctx)
}

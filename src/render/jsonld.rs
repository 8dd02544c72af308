//! Schema.org JSON-LD rendering. Emits a single `@graph` containing an
//! `Article`, a `FAQPage` (omitted when there are no FAQs), and a
//! `BreadcrumbList`. `serde_json::Value::Object` is `BTreeMap`-backed in
//! this crate (the `preserve_order` feature is not enabled), so key order
//! in the serialized output is always alphabetical — determinism for free.

use std::collections::HashMap;

use serde_json::{json, Value};

fn get_str<'a>(map: &'a HashMap<String, Value>, key: &str) -> &'a str {
    map.get(key).and_then(Value::as_str).unwrap_or("")
}

fn faq_entities(article: &HashMap<String, Value>) -> Vec<Value> {
    let mut entities = Vec::new();
    let mut n = 1;
    loop {
        let question_key = format!("faq_{n:02}_question");
        let Some(question) = article.get(&question_key).and_then(Value::as_str) else {
            break;
        };
        let answer = get_str(article, &format!("faq_{n:02}_answer"));
        entities.push(json!({
            "@type": "Question",
            "name": question,
            "acceptedAnswer": {
                "@type": "Answer",
                "text": answer,
            }
        }));
        n += 1;
    }
    entities
}

fn breadcrumb_list(article: &HashMap<String, Value>) -> Value {
    let headline = get_str(article, "headline");
    let slug = get_str(article, "slug");
    json!({
        "@type": "BreadcrumbList",
        "itemListElement": [
            {
                "@type": "ListItem",
                "position": 1,
                "name": "Home",
                "item": "/",
            },
            {
                "@type": "ListItem",
                "position": 2,
                "name": headline,
                "item": format!("/{slug}"),
            },
        ],
    })
}

fn article_entity(article: &HashMap<String, Value>) -> Value {
    let mut entity = json!({
        "@type": "Article",
        "headline": get_str(article, "headline"),
        "description": get_str(article, "meta_description"),
        "wordCount": article.get("word_count").cloned().unwrap_or(Value::Null),
    });
    if let Some(url) = article.get("image_hero_url").and_then(Value::as_str) {
        entity["image"] = json!(url);
    }
    entity
}

/// Renders the `<script type="application/ld+json">` payload (the tag
/// wrapper itself is the caller's concern; this returns the JSON body).
pub fn render(article: &HashMap<String, Value>) -> String {
    let mut graph = vec![article_entity(article)];

    let faqs = faq_entities(article);
    if !faqs.is_empty() {
        graph.push(json!({
            "@type": "FAQPage",
            "mainEntity": faqs,
        }));
    }

    graph.push(breadcrumb_list(article));

    let document = json!({
        "@context": "https://schema.org",
        "@graph": graph,
    });

    serde_json::to_string(&document).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_article() -> HashMap<String, Value> {
        let mut m = HashMap::new();
        m.insert("headline".to_string(), json!("Cloud Security Best Practices"));
        m.insert("meta_description".to_string(), json!("A practical guide."));
        m.insert("slug".to_string(), json!("cloud-security-best-practices"));
        m.insert("word_count".to_string(), json!(2800));
        m
    }

    #[test]
    fn includes_article_and_breadcrumb_without_faqs() {
        let rendered = render(&minimal_article());
        assert!(rendered.contains("\"Article\""));
        assert!(rendered.contains("\"BreadcrumbList\""));
        assert!(!rendered.contains("\"FAQPage\""));
    }

    #[test]
    fn includes_faq_page_when_faqs_present() {
        let mut article = minimal_article();
        article.insert("faq_01_question".to_string(), json!("Is MFA required?"));
        article.insert("faq_01_answer".to_string(), json!("Yes, for all accounts."));
        let rendered = render(&article);
        assert!(rendered.contains("\"FAQPage\""));
        assert!(rendered.contains("Is MFA required?"));
    }

    #[test]
    fn omits_image_field_when_hero_missing() {
        let rendered = render(&minimal_article());
        assert!(!rendered.contains("\"image\""));
    }

    #[test]
    fn is_valid_json() {
        let rendered = render(&minimal_article());
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert!(parsed.get("@graph").unwrap().is_array());
    }

    #[test]
    fn render_is_byte_identical_for_identical_input() {
        let article = minimal_article();
        assert_eq!(render(&article), render(&article));
    }
}

//! S9's rendering surface: a pure `validated_article -> (html, json_ld)`
//! transform. Both [`html::render`] and [`jsonld::render`] are free
//! functions over plain data, so their purity is structural rather than
//! asserted.

pub mod html;
pub mod jsonld;

use std::collections::HashMap;

use serde_json::Value;

/// The two artifacts S9 hands to the storage collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedArticle {
    pub html: String,
    pub json_ld: String,
}

/// Renders both artifacts from the flattened article map. `language` comes
/// from the job configuration (`<html lang=...>`); it is not itself part of
/// `validated_article`.
pub fn render(article: &HashMap<String, Value>, language: &str) -> RenderedArticle {
    RenderedArticle {
        html: html::render(article, language),
        json_ld: jsonld::render(article),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_is_pure() {
        let mut article = HashMap::new();
        article.insert("headline".to_string(), Value::String("Cloud Security".to_string()));
        let first = render(&article, "en");
        let second = render(&article, "en");
        assert_eq!(first, second);
    }
}

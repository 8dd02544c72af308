//! Deterministic HTML5 rendering: `<header>`, `<nav class="toc">`,
//! `<article>`, then the FAQ/PAA/Sources
//! sections. Section anchor IDs (`toc_01..toc_0N`) are derived from the
//! same scan that builds the table of contents, so the two can never
//! diverge.

use std::collections::HashMap;

use serde_json::Value;

use crate::document::SECTION_COUNT;

fn get_str<'a>(map: &'a HashMap<String, Value>, key: &str) -> &'a str {
    map.get(key).and_then(Value::as_str).unwrap_or("")
}

fn get_usize(map: &HashMap<String, Value>, key: &str) -> usize {
    map.get(key).and_then(Value::as_u64).unwrap_or(0) as usize
}

fn get_array<'a>(map: &'a HashMap<String, Value>, key: &str) -> &'a [Value] {
    map.get(key).and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[])
}

/// Escapes plain text for safe inclusion between HTML tags. Content fields
/// (section/FAQ/PAA bodies) are already HTML and are never passed through
/// this function.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

struct RenderableSection<'a> {
    index: usize,
    title: &'a str,
    content: &'a str,
}

fn non_empty_sections(article: &HashMap<String, Value>) -> Vec<RenderableSection<'_>> {
    (1..=SECTION_COUNT)
        .filter_map(|i| {
            let title = get_str(article, &format!("section_{i:02}_title"));
            if title.trim().is_empty() {
                return None;
            }
            let content = get_str(article, &format!("section_{i:02}_content"));
            Some(RenderableSection { index: i, title, content })
        })
        .collect()
}

fn render_toc(sections: &[RenderableSection<'_>]) -> String {
    let mut nav = String::from("<nav class=\"toc\">\n<ol>\n");
    for section in sections {
        nav.push_str(&format!(
            "<li><a href=\"#toc_{:02}\">{}</a></li>\n",
            section.index,
            escape(section.title)
        ));
    }
    nav.push_str("</ol>\n</nav>\n");
    nav
}

fn render_related_aside(article: &HashMap<String, Value>, section_index: usize) -> String {
    let links = get_array(article, "section_internal_links");
    let Some(entry) = links.get(section_index - 1).and_then(Value::as_array) else {
        return String::new();
    };
    if entry.is_empty() {
        return String::new();
    }
    let mut aside = String::from("<aside class=\"section-related\">\n<ul>\n");
    for link in entry {
        let url = link.get("url").and_then(Value::as_str).unwrap_or("");
        let title = link.get("title").and_then(Value::as_str).unwrap_or("");
        aside.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            url,
            escape(title)
        ));
    }
    aside.push_str("</ul>\n</aside>\n");
    aside
}

fn render_sections(article: &HashMap<String, Value>, sections: &[RenderableSection<'_>]) -> String {
    let mut body = String::new();
    for section in sections {
        body.push_str(&format!(
            "<section id=\"toc_{:02}\">\n<h2>{}</h2>\n{}\n{}</section>\n",
            section.index,
            escape(section.title),
            section.content,
            render_related_aside(article, section.index)
        ));
    }
    body
}

fn render_image(article: &HashMap<String, Value>, role: &str) -> String {
    let url_key = format!("image_{role}_url");
    let alt_key = format!("image_{role}_alt");
    match map_opt_str(article, &url_key) {
        Some(url) => format!(
            "<img class=\"image-{role}\" src=\"{}\" alt=\"{}\">\n",
            url,
            escape(map_opt_str(article, &alt_key).unwrap_or(""))
        ),
        None => String::new(),
    }
}

fn map_opt_str<'a>(map: &'a HashMap<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key).and_then(Value::as_str)
}

fn render_faq(article: &HashMap<String, Value>) -> String {
    let mut items = String::new();
    let mut n = 1;
    loop {
        let question_key = format!("faq_{n:02}_question");
        let Some(question) = map_opt_str(article, &question_key) else {
            break;
        };
        let answer = get_str(article, &format!("faq_{n:02}_answer"));
        items.push_str(&format!(
            "<details>\n<summary>{}</summary>\n{}\n</details>\n",
            escape(question),
            answer
        ));
        n += 1;
    }
    if items.is_empty() {
        return String::new();
    }
    format!("<section class=\"faq\">\n<h2>Frequently Asked Questions</h2>\n{items}</section>\n")
}

fn render_paa(article: &HashMap<String, Value>) -> String {
    let mut items = String::new();
    let mut n = 1;
    loop {
        let question_key = format!("paa_{n:02}_question");
        let Some(question) = map_opt_str(article, &question_key) else {
            break;
        };
        let answer = get_str(article, &format!("paa_{n:02}_answer"));
        items.push_str(&format!(
            "<details>\n<summary>{}</summary>\n{}\n</details>\n",
            escape(question),
            answer
        ));
        n += 1;
    }
    if items.is_empty() {
        return String::new();
    }
    format!("<section class=\"paa\">\n<h2>People Also Ask</h2>\n{items}</section>\n")
}

fn render_sources(article: &HashMap<String, Value>) -> String {
    let sources = get_array(article, "sources_structured");
    if sources.is_empty() {
        return String::new();
    }
    let mut items = String::from("<ol>\n");
    for source in sources {
        let url = source.get("url").and_then(Value::as_str).unwrap_or("");
        let title = source.get("title").and_then(Value::as_str).unwrap_or("");
        items.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            url,
            escape(title)
        ));
    }
    items.push_str("</ol>\n");
    format!("<section class=\"sources\">\n<h2>Sources</h2>\n{items}</section>\n")
}

/// Renders the deterministic HTML5 document. Byte-identical for
/// byte-identical input.
pub fn render(article: &HashMap<String, Value>, language: &str) -> String {
    let headline = get_str(article, "headline");
    let teaser = get_str(article, "teaser");
    let reading_time = get_usize(article, "reading_time_minutes");

    let sections = non_empty_sections(article);

    let mut header = String::from("<header>\n");
    header.push_str(&format!("<h1>{}</h1>\n", escape(headline)));
    if !teaser.is_empty() {
        header.push_str(&format!("<p class=\"teaser\">{}</p>\n", escape(teaser)));
    }
    header.push_str(&format!("<p class=\"reading-time\">{reading_time} min read</p>\n"));
    header.push_str(&render_image(article, "hero"));
    header.push_str("</header>\n");

    let mut article_body = String::from("<article>\n");
    let direct_answer = get_str(article, "direct_answer");
    if !direct_answer.is_empty() {
        article_body.push_str(&format!("<p class=\"direct-answer\">{direct_answer}</p>\n"));
    }
    let intro = get_str(article, "intro");
    if !intro.is_empty() {
        article_body.push_str(intro);
        article_body.push('\n');
    }
    article_body.push_str(&render_sections(article, &sections));
    article_body.push_str(&render_image(article, "mid"));
    article_body.push_str(&render_image(article, "bottom"));
    article_body.push_str("</article>\n");

    let mut html = String::new();
    html.push_str("<!doctype html>\n");
    html.push_str(&format!("<html lang=\"{language}\">\n"));
    html.push_str("<head>\n");
    html.push_str(&format!("<meta charset=\"utf-8\">\n<title>{}</title>\n", escape(get_str(article, "meta_title"))));
    html.push_str(&format!(
        "<meta name=\"description\" content=\"{}\">\n",
        escape(get_str(article, "meta_description"))
    ));
    html.push_str("</head>\n<body>\n");
    html.push_str(&header);
    html.push_str(&render_toc(&sections));
    html.push_str(&article_body);
    html.push_str(&render_faq(article));
    html.push_str(&render_paa(article));
    html.push_str(&render_sources(article));
    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_article() -> HashMap<String, Value> {
        let mut m = HashMap::new();
        m.insert("headline".to_string(), json!("Cloud Security Best Practices"));
        m.insert("teaser".to_string(), json!("A practical guide."));
        m.insert("reading_time_minutes".to_string(), json!(9));
        m.insert("direct_answer".to_string(), json!("<p>Answer.</p>"));
        m.insert("intro".to_string(), json!("<p>Intro.</p>"));
        m.insert("section_01_title".to_string(), json!("What is Cloud Security?"));
        m.insert("section_01_content".to_string(), json!("<p>Content one.</p>"));
        m.insert("section_internal_links".to_string(), json!([[]]));
        m
    }

    #[test]
    fn renders_doctype_and_lang() {
        let html = render(&minimal_article(), "en");
        assert!(html.starts_with("<!doctype html>\n"));
        assert!(html.contains("<html lang=\"en\">"));
    }

    #[test]
    fn omits_sources_section_when_empty() {
        let html = render(&minimal_article(), "en");
        assert!(!html.contains("class=\"sources\""));
    }

    #[test]
    fn includes_sources_section_when_present() {
        let mut article = minimal_article();
        article.insert(
            "sources_structured".to_string(),
            json!([{"number": 1, "title": "NIST", "url": "https://nist.gov"}]),
        );
        let html = render(&article, "en");
        assert!(html.contains("class=\"sources\""));
        assert!(html.contains("https://nist.gov"));
    }

    #[test]
    fn elides_image_tag_when_hero_missing() {
        let html = render(&minimal_article(), "en");
        assert!(!html.contains("image-hero"));
    }

    #[test]
    fn renders_related_aside_when_links_present() {
        let mut article = minimal_article();
        article.insert(
            "section_internal_links".to_string(),
            json!([[{"url": "https://acme.test/mfa", "title": "MFA Guide"}]]),
        );
        let html = render(&article, "en");
        assert!(html.contains("section-related"));
        assert!(html.contains("https://acme.test/mfa"));
    }

    #[test]
    fn toc_anchor_ids_match_section_ids() {
        let html = render(&minimal_article(), "en");
        assert!(html.contains("href=\"#toc_01\""));
        assert!(html.contains("id=\"toc_01\""));
    }

    #[test]
    fn render_is_byte_identical_for_identical_input() {
        let article = minimal_article();
        assert_eq!(render(&article, "en"), render(&article, "en"));
    }
}

//! S5 InternalLinks: matches sitemap pages to sections by keyword overlap
//! on the section title, storing 0-2 candidates per section. Pure and
//! deterministic; never mutates section content — the renderer attaches
//! the result as a "Related" aside.

use std::collections::HashSet;

use crate::context::{ExecutionContext, SitemapUrl};
use crate::document::InternalLink;
use crate::error::{Error, Result};

/// At most 2 related links are attached to any one section.
const MAX_LINKS_PER_SECTION: usize = 2;

fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn overlap_score(a: &HashSet<String>, b: &HashSet<String>) -> usize {
    a.intersection(b).count()
}

/// Scores every sitemap page against one section's title, returning the
/// top `MAX_LINKS_PER_SECTION` with nonzero overlap, ties broken by the
/// sitemap's original order.
fn links_for_section(title: &str, sitemap: &[SitemapUrl]) -> Vec<InternalLink> {
    let section_tokens = tokenize(title);
    if section_tokens.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, usize, &SitemapUrl)> = sitemap
        .iter()
        .enumerate()
        .map(|(idx, page)| (overlap_score(&section_tokens, &tokenize(&page.title)), idx, page))
        .filter(|(score, _, _)| *score > 0)
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    scored
        .into_iter()
        .take(MAX_LINKS_PER_SECTION)
        .map(|(_, _, page)| InternalLink {
            url: page.url.clone(),
            title: page.title.clone(),
        })
        .collect()
}

pub fn run(mut ctx: ExecutionContext) -> Result<ExecutionContext> {
    let sitemap = ctx.sitemap_urls.clone();
    let doc = ctx.structured_data.as_mut().ok_or_else(|| Error::StageContract {
        stage: "S5".to_string(),
        message: "structured_data missing entering S5".to_string(),
    })?;

    doc.section_internal_links = doc
        .sections
        .iter()
        .map(|section| links_for_section(&section.title, &sitemap))
        .collect();

    Ok(ctx)
}

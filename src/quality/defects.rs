//! Deterministic, read-only defect detection over article content.
//!
//! This module never rewrites prose — it only classifies it. Remediation
//! is delegated entirely to the LLM in [`crate::quality::repair`].

use std::collections::HashSet;

use crate::document::{ArticleDocument, Citation};

/// One of the eight defect categories. Seven are scanned for per content
/// field by [`detect_all`]; `LowConversationalMarkers` is article-wide and
/// is reported through [`ConversationalCoverage`] instead — see its doc
/// comment — so this variant is never constructed by `detect_all` itself,
/// only kept here so the category still has a name callers can match on.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DefectCategory {
    Typography,
    Structure,
    RedundantSummaryList,
    FaqPaaLeakage,
    LowCitationCoverage,
    LowConversationalMarkers,
    DirectAnswerQuality,
    GroundedUrlIncomplete,
}

/// Defects found in a single named field, with enough detail for the
/// repair prompt to act on without re-deriving anything.
#[derive(Clone, Debug, Default)]
pub struct FieldDefectReport {
    pub field_name: String,
    pub categories: Vec<DefectCategory>,
    pub notes: Vec<String>,
}

impl FieldDefectReport {
    pub fn is_clean(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Strips HTML tags, collapsing the remainder to plain text. Used for
/// word counts and textual overlap comparisons, never for rewriting.
pub fn strip_html_to_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn contains_dash(text: &str) -> bool {
    text.contains('\u{2014}') || text.contains('\u{2013}')
}

/// Counts `<p>` vs `</p>`, and flags a `<p>` opened before the next `</h`
/// closing tag is seen (a paragraph nested directly in a heading).
fn structural_defects(html: &str) -> Vec<String> {
    let mut notes = Vec::new();
    let open_p = html.matches("<p>").count() + html.matches("<p ").count();
    let close_p = html.matches("</p>").count();
    if open_p != close_p {
        notes.push(format!("unbalanced <p> tags: {open_p} open vs {close_p} close"));
    }
    for heading_open in ["<h1", "<h2", "<h3"] {
        if let Some(pos) = html.find(heading_open) {
            if let Some(end_of_heading) = html[pos..].find('>').map(|i| pos + i) {
                let heading_close = format!("</{}>", &heading_open[1..3]);
                if let Some(close_pos) = html[end_of_heading..].find(&heading_close) {
                    let inside = &html[end_of_heading..end_of_heading + close_pos];
                    if inside.contains("<p>") || inside.contains("<p ") {
                        notes.push(format!("bare <p> found inside {heading_open}"));
                    }
                }
            }
        }
    }
    notes
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn token_overlap_ratio(a: &[String], b: &[String]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let set_a: HashSet<&String> = a.iter().collect();
    let set_b: HashSet<&String> = b.iter().collect();
    let overlap = set_a.intersection(&set_b).count();
    overlap as f64 / set_a.len().min(set_b.len()) as f64
}

/// Finds `<ul>`/`<ol>` blocks immediately following a `<p>...</p>` whose
/// items overlap the paragraph's last 40 words above 60%.
fn redundant_summary_list_defects(html: &str) -> Vec<String> {
    let mut notes = Vec::new();
    let mut search_from = 0usize;
    while let Some(p_end_rel) = html[search_from..].find("</p>") {
        let p_end = search_from + p_end_rel + "</p>".len();
        let remainder = html[p_end..].trim_start();
        if remainder.starts_with("<ul>") || remainder.starts_with("<ol>") {
            let p_start = html[search_from..p_end]
                .rfind("<p")
                .map(|i| search_from + i)
                .unwrap_or(search_from);
            let paragraph_text = strip_html_to_text(&html[p_start..p_end]);
            let paragraph_tokens = tokenize(&paragraph_text);
            let tail: Vec<String> = paragraph_tokens
                .iter()
                .rev()
                .take(40)
                .rev()
                .cloned()
                .collect();

            let list_end = remainder
                .find("</ul>")
                .or_else(|| remainder.find("</ol>"))
                .map(|i| i + 5)
                .unwrap_or(remainder.len());
            let list_text = strip_html_to_text(&remainder[..list_end]);
            let list_tokens = tokenize(&list_text);

            if token_overlap_ratio(&tail, &list_tokens) > 0.6 {
                notes.push("redundant summary list overlaps preceding paragraph".to_string());
            }
        }
        search_from = p_end;
    }
    notes
}

/// Looks for a question-like sentence directly followed by an answer
/// paragraph inside section content, matching the separate FAQ/PAA field
/// pattern.
fn faq_paa_leakage_defects(html: &str) -> Vec<String> {
    let text = strip_html_to_text(html);
    let mut notes = Vec::new();
    for sentence in text.split(['.', '?', '!']) {
        let trimmed = sentence.trim();
        if trimmed.is_empty() {
            continue;
        }
        let lower = trimmed.to_lowercase();
        let looks_like_question = lower.starts_with("what ")
            || lower.starts_with("how ")
            || lower.starts_with("why ")
            || lower.starts_with("when ")
            || lower.starts_with("can ")
            || lower.starts_with("is ")
            || lower.starts_with("does ");
        if looks_like_question && text.contains('?') {
            notes.push(format!("possible FAQ/PAA-style question embedded in body: \"{trimmed}\""));
            break;
        }
    }
    notes
}

fn citation_marker_count(text: &str) -> usize {
    let mut count = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c == '[' {
            if let Some(close) = text[i..].find(']') {
                let inner = &text[i + 1..i + close];
                if !inner.is_empty() && inner.chars().all(|c| c.is_ascii_digit()) {
                    count += 1;
                }
            }
        }
    }
    count
}

/// Fraction of paragraphs (by `<p>...</p>` block) containing at least one
/// `[N]` citation marker.
fn citation_coverage(html: &str) -> f64 {
    let mut total = 0usize;
    let mut with_citation = 0usize;
    let mut search_from = 0usize;
    while let Some(start_rel) = html[search_from..].find("<p") {
        let start = search_from + start_rel;
        let Some(end_rel) = html[start..].find("</p>") else {
            break;
        };
        let end = start + end_rel + 4;
        total += 1;
        if citation_marker_count(&html[start..end]) > 0 {
            with_citation += 1;
        }
        search_from = end;
    }
    if total == 0 {
        1.0
    } else {
        with_citation as f64 / total as f64
    }
}

fn direct_address_count(text: &str) -> usize {
    tokenize(text)
        .iter()
        .filter(|t| t.as_str() == "you" || t.as_str() == "your" || t.as_str() == "you're" || t.as_str() == "yours")
        .count()
}

fn is_question_heading(title: &str) -> bool {
    title.trim_end().ends_with('?')
        || title.to_lowercase().starts_with("what ")
        || title.to_lowercase().starts_with("how ")
        || title.to_lowercase().starts_with("why ")
}

/// Detects bare-domain Sources entries (path is empty or `/`).
fn is_bare_domain(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => parsed.path() == "/" || parsed.path().is_empty(),
        Err(_) => false,
    }
}

/// Article-wide conversational-voice coverage (detection category 6). This
/// is a whole-document measure, not a per-field one, so
/// it is surfaced separately from [`FieldDefectReport`] rather than
/// attached to every field's category list — attaching it per-field would
/// mark nearly every field dirty on nearly every run (the article-wide
/// counts rarely clear both targets at once), which would defeat both the
/// general field-repair budget and S3's idempotence property. Routing for
/// this category is instead the AEO pass's job (see
/// `quality::repair::run_aeo_pass`), which picks its own under-target
/// sections directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConversationalCoverage {
    pub direct_address_count: usize,
    pub question_headings: usize,
}

impl ConversationalCoverage {
    pub fn meets_target(&self) -> bool {
        self.direct_address_count >= 8 && self.question_headings >= 2
    }
}

pub fn detect_conversational_coverage(doc: &ArticleDocument) -> ConversationalCoverage {
    let direct_address_count = doc
        .content_fields()
        .iter()
        .map(|(_, content)| direct_address_count(&strip_html_to_text(content)))
        .sum();
    let question_headings = doc
        .sections
        .iter()
        .filter(|s| is_question_heading(&s.title))
        .count();
    ConversationalCoverage {
        direct_address_count,
        question_headings,
    }
}

/// Runs detection over every content field plus the article-wide
/// citation-Sources check, returning one report per field (clean fields
/// still get an entry, with an empty `categories`, so repair dispatch can
/// skip them cheaply). Article-wide conversational-voice coverage is
/// reported separately by [`detect_conversational_coverage`] — see its
/// doc comment for why it is not folded into these per-field reports.
pub fn detect_all(doc: &ArticleDocument, keyword: &str) -> Vec<FieldDefectReport> {
    doc.content_fields()
        .into_iter()
        .map(|(field_name, content)| {
            let mut categories = Vec::new();
            let mut notes = Vec::new();

            if contains_dash(content) {
                categories.push(DefectCategory::Typography);
                notes.push("contains an em-dash or en-dash".to_string());
            }

            let structural = structural_defects(content);
            if !structural.is_empty() {
                categories.push(DefectCategory::Structure);
                notes.extend(structural);
            }

            let redundant = redundant_summary_list_defects(content);
            if !redundant.is_empty() {
                categories.push(DefectCategory::RedundantSummaryList);
                notes.extend(redundant);
            }

            if field_name != "Direct_Answer" {
                let leakage = faq_paa_leakage_defects(content);
                if !leakage.is_empty() {
                    categories.push(DefectCategory::FaqPaaLeakage);
                    notes.extend(leakage);
                }
            }

            if field_name.starts_with("section_") {
                let coverage = citation_coverage(content);
                if coverage < 0.4 {
                    categories.push(DefectCategory::LowCitationCoverage);
                    notes.push(format!("citation coverage {:.0}% below 40% target", coverage * 100.0));
                }
            }

            if field_name == "Direct_Answer" {
                let word_count = strip_html_to_text(content).split_whitespace().count();
                let has_keyword = content.to_lowercase().contains(&keyword.to_lowercase());
                let has_citation = citation_marker_count(content) > 0;
                if !(40..=60).contains(&word_count) || !has_keyword || !has_citation {
                    categories.push(DefectCategory::DirectAnswerQuality);
                    notes.push(format!(
                        "Direct_Answer word_count={word_count}, has_keyword={has_keyword}, has_citation={has_citation}"
                    ));
                }
            }

            FieldDefectReport {
                field_name,
                categories,
                notes,
            }
        })
        .collect()
}

/// Sources whose URL is a bare domain, flagged as a `GroundedUrlIncomplete`
/// defect at the article level rather than per content field.
pub fn bare_domain_sources(sources: &[Citation]) -> Vec<&Citation> {
    sources.iter().filter(|c| is_bare_domain(&c.url)).collect()
}

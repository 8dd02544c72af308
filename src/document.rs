//! The `ArticleDocument` data model: a flat, strongly-typed record rather
//! than a dynamic string->value map, so every stage's contract is checked
//! by the compiler instead of by key lookups.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Number of body sections the article always carries.
pub const SECTION_COUNT: usize = 9;

/// A single numbered body section (`section_NN_title` / `section_NN_content`).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    /// HTML content.
    pub content: String,
}

/// A question/answer pair, used for both FAQ and "people also ask" entries.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// One entry of the `Sources` list: `[N]: Title - URL`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Citation {
    pub number: u32,
    pub title: String,
    pub url: String,
}

/// A table the model chose to embed in a section, kept structured rather
/// than pre-rendered so S9 controls the final markup.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleTable {
    pub caption: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One of the three generated images (hero, mid, bottom). `None` when
/// generation failed for that slot; the renderer degrades gracefully.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageSlot {
    pub url: Option<String>,
    pub alt_text: Option<String>,
}

/// A related-content link attached to a section by S5, drawn from
/// `sitemap_urls`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct InternalLink {
    pub url: String,
    pub title: String,
}

/// The flat, ~40-field article record. Comes into existence in S2 and is
/// mutated in place through S5; S6/S7 write only into
/// `ExecutionContext::parallel_results`, merged here by S8.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ArticleDocument {
    // Identity
    pub headline: String,
    pub subtitle: String,
    pub teaser: String,
    pub slug: String,

    // SEO
    pub meta_title: String,
    pub meta_description: String,

    // Lead
    /// 40-60 word answer block; must contain the keyword and one citation.
    pub direct_answer: String,
    pub intro: String,

    // Body: nine fixed sections, 1-indexed in their field names but
    // stored 0-indexed here (`sections[0]` is `section_01_*`).
    pub sections: [Section; SECTION_COUNT],

    // Takeaways
    pub key_takeaways: Vec<String>,

    // Q&A
    pub faqs: Vec<QaPair>,
    pub paa: Vec<QaPair>,

    // Citations
    pub sources: Vec<Citation>,

    // Aux
    pub search_queries: Vec<String>,
    pub toc_labels: Vec<String>,
    pub tables: Vec<ArticleTable>,
    pub image_hero: ImageSlot,
    pub image_mid: ImageSlot,
    pub image_bottom: ImageSlot,
    /// `"N" -> url`, set by S4 and consumed by S8's linking pass.
    pub citation_map: HashMap<String, String>,
    /// One entry per section, populated by S5.
    pub section_internal_links: Vec<Vec<InternalLink>>,
    pub word_count: usize,
    pub reading_time_minutes: usize,
    /// Advisory cannibalization report from S7; `None` until the parallel
    /// group runs, and still `None` if both S6 and S7 fail.
    pub similarity_report: Option<crate::stages::s7_similarity::SimilarityReport>,
}

impl ArticleDocument {
    /// True once S2 has produced the minimum viable shape: a headline, an
    /// intro, at least five consecutive non-empty sections, and sources.
    pub fn satisfies_post_generate_invariant(&self) -> bool {
        if self.headline.trim().is_empty() || self.intro.trim().is_empty() {
            return false;
        }
        if self.sources.is_empty() {
            return false;
        }
        let consecutive_nonempty = self
            .sections
            .iter()
            .take_while(|s| !s.content.trim().is_empty())
            .count();
        consecutive_nonempty >= 5
    }

    /// All content-carrying fields S3 must scan for defects, paired with a
    /// stable field name used in defect reports and repair-task routing.
    pub fn content_fields(&self) -> Vec<(String, &str)> {
        let mut fields = vec![
            ("Direct_Answer".to_string(), self.direct_answer.as_str()),
            ("Intro".to_string(), self.intro.as_str()),
        ];
        for (i, section) in self.sections.iter().enumerate() {
            fields.push((format!("section_{:02}_content", i + 1), section.content.as_str()));
        }
        for (i, faq) in self.faqs.iter().enumerate() {
            fields.push((format!("faq_{:02}_answer", i + 1), faq.answer.as_str()));
        }
        for (i, paa) in self.paa.iter().enumerate() {
            fields.push((format!("paa_{:02}_answer", i + 1), paa.answer.as_str()));
        }
        fields
    }

    /// Writes a repaired field value back by its stable name, as produced
    /// by [`ArticleDocument::content_fields`].
    pub fn set_content_field(&mut self, name: &str, value: String) {
        if name == "Direct_Answer" {
            self.direct_answer = value;
            return;
        }
        if name == "Intro" {
            self.intro = value;
            return;
        }
        if let Some(idx) = name.strip_prefix("section_").and_then(|rest| rest.strip_suffix("_content")) {
            if let Ok(n) = idx.parse::<usize>() {
                if n >= 1 && n <= SECTION_COUNT {
                    self.sections[n - 1].content = value;
                    return;
                }
            }
        }
        if let Some(idx) = name.strip_prefix("faq_").and_then(|rest| rest.strip_suffix("_answer")) {
            if let Ok(n) = idx.parse::<usize>() {
                if n >= 1 && n <= self.faqs.len() {
                    self.faqs[n - 1].answer = value;
                    return;
                }
            }
        }
        if let Some(idx) = name.strip_prefix("paa_").and_then(|rest| rest.strip_suffix("_answer")) {
            if let Ok(n) = idx.parse::<usize>() {
                if n >= 1 && n <= self.paa.len() {
                    self.paa[n - 1].answer = value;
                    return;
                }
            }
        }
    }

    /// All body fields (direct answer, intro, section content) that may
    /// carry `[N]` citation markers, mutable, for S4's rewrite pass and
    /// S8's linking pass.
    pub fn body_fields_mut(&mut self) -> Vec<&mut String> {
        let mut fields = vec![&mut self.direct_answer, &mut self.intro];
        for section in &mut self.sections {
            fields.push(&mut section.content);
        }
        fields
    }

    /// Concatenated plain-text word count across all body-carrying fields,
    /// used to derive `word_count` and `reading_time_minutes` in S2.
    pub fn recompute_word_count(&mut self) {
        let mut total = 0usize;
        total += crate::quality::defects::strip_html_to_text(&self.intro)
            .split_whitespace()
            .count();
        for section in &self.sections {
            total += crate::quality::defects::strip_html_to_text(&section.content)
                .split_whitespace()
                .count();
        }
        self.word_count = total;
        self.reading_time_minutes = ((total as f64) / 225.0).ceil() as usize;
    }
}

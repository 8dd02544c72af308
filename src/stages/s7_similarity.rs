//! S7 SimilarityCheck: guards against cannibalization against a corpus of
//! previously published articles using a shingle/embedding hybrid score.
//! Advisory only — never rejects the run.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::context::ExecutionContext;
use crate::providers::embeddings::{cosine_similarity, Embeddings};
use crate::quality::defects::strip_html_to_text;

/// A previously published article to compare against. A real deployment
/// would source this from a content index; the corpus itself is out of
/// scope, only the comparison algorithm is specified.
#[derive(Clone, Debug)]
pub struct CorpusArticle {
    pub id: String,
    pub title: String,
    pub full_text: String,
    pub section_texts: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimilarityFlag {
    pub article_id: String,
    pub hybrid_score: f64,
    pub title_cosine: f64,
    pub max_section_jaccard: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SimilarityReport {
    pub flags: Vec<SimilarityFlag>,
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Contiguous 5-token n-grams, as a set (duplicates collapse).
fn shingles(text: &str) -> HashSet<String> {
    let tokens = tokenize(text);
    if tokens.len() < 5 {
        return HashSet::from([tokens.join(" ")]);
    }
    tokens
        .windows(5)
        .map(|window| window.join(" "))
        .collect()
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Runs on a snapshot of the context; returns a new context with only
/// `parallel_results.similarity_report` populated.
pub async fn run(
    mut ctx: ExecutionContext,
    embeddings: &dyn Embeddings,
    corpus: &[CorpusArticle],
) -> ExecutionContext {
    let Some(doc) = ctx.document() else {
        ctx.parallel_results.similarity_report = Some(SimilarityReport::default());
        return ctx;
    };

    let candidate_title = doc.headline.clone();
    let candidate_sections: Vec<String> = doc
        .sections
        .iter()
        .map(|s| strip_html_to_text(&s.content))
        .collect();
    let candidate_full_text = candidate_sections.join(" ");
    let candidate_shingles = shingles(&candidate_full_text);

    let candidate_embedding = match embeddings.embed(&candidate_full_text).await {
        Ok(v) => v,
        Err(_) => {
            ctx.parallel_results.similarity_report = Some(SimilarityReport::default());
            return ctx;
        }
    };
    let candidate_title_embedding = embeddings.embed(&candidate_title).await.unwrap_or_default();

    let mut flags = Vec::new();
    for article in corpus {
        let article_shingles = shingles(&article.full_text);
        let article_embedding = match embeddings.embed(&article.full_text).await {
            Ok(v) => v,
            Err(_) => continue,
        };
        let article_title_embedding = embeddings.embed(&article.title).await.unwrap_or_default();

        let jac = jaccard(&candidate_shingles, &article_shingles);
        let cos = cosine_similarity(&candidate_embedding, &article_embedding) as f64;
        let hybrid = 0.4 * jac + 0.6 * cos;
        let title_cosine = cosine_similarity(&candidate_title_embedding, &article_title_embedding) as f64;

        let max_section_jaccard = candidate_sections
            .iter()
            .flat_map(|cand_section| {
                article.section_texts.iter().map(move |other_section| {
                    jaccard(&shingles(cand_section), &shingles(other_section))
                })
            })
            .fold(0.0_f64, f64::max);

        if hybrid >= 0.75 || title_cosine >= 0.8 || max_section_jaccard >= 0.5 {
            flags.push(SimilarityFlag {
                article_id: article.id.clone(),
                hybrid_score: hybrid,
                title_cosine,
                max_section_jaccard,
            });
        }
    }

    ctx.parallel_results.similarity_report = Some(SimilarityReport { flags });
    ctx
}

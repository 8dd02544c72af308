//! S4 CitationsValidate: parses/enhances the Sources list, validates each
//! URL's health, discovers replacements for broken citations, filters and
//! densely renumbers the surviving set, then rewrites body markers.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::Semaphore;

use crate::context::{ErrorEntry, ExecutionContext};
use crate::document::Citation;
use crate::error::{Error, Result};
use crate::providers::llm::{ChatModel, GenerateRequest, ToolSpec};
use crate::providers::url_validator::{Classification, UrlValidator};

const URL_PROBE_CONCURRENCY: usize = 16;
const PER_HOST_CONCURRENCY: usize = 4;
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Ok,
    Broken,
    Unverified,
    Disallowed,
}

fn host_of(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .unwrap_or_else(|| url.to_string())
}

/// Step 1 (AI-only): ask the model to enhance any generic/bare-domain
/// Sources entries using the grounding trace as a hint set. Falls back to
/// the unenhanced list if the model gives nothing usable — this step is
/// an enhancement, never a rejection.
async fn enhance_sources(ctx: &ExecutionContext, chat: &dyn ChatModel) -> Vec<Citation> {
    let Some(doc) = ctx.document() else {
        return Vec::new();
    };
    if doc.sources.is_empty() {
        return Vec::new();
    }

    let hints: Vec<String> = ctx
        .grounding_urls
        .iter()
        .map(|g| format!("{} - {}", g.title, g.url))
        .collect();
    let sources_text: Vec<String> = doc
        .sources
        .iter()
        .map(|c| format!("[{}]: {} - {}", c.number, c.title, c.url))
        .collect();

    let prompt = format!(
        "Sources:\n{}\n\nGrounding hints (previously seen pages):\n{}\n\n\
         Return a JSON array of {{number, title, url}} with any bare-domain URL enhanced \
         to a specific page from the grounding hints where one clearly matches the title.",
        sources_text.join("\n"),
        hints.join("\n"),
    );

    let request = GenerateRequest::new(prompt).with_tools(vec![ToolSpec::UrlContext]);
    match chat.generate(request).await {
        Ok(response) => match response.parsed {
            Some(value) => serde_json::from_value::<Vec<Citation>>(value).unwrap_or_else(|_| doc.sources.clone()),
            None => doc.sources.clone(),
        },
        Err(_) => doc.sources.clone(),
    }
}

async fn classify(validator: &dyn UrlValidator, url: &str) -> Verdict {
    let first = validator.probe(url, PROBE_TIMEOUT).await;
    match first {
        Ok(result) => match result.classification {
            Classification::Ok => Verdict::Ok,
            Classification::HardError => Verdict::Broken,
            Classification::Disallowed => Verdict::Disallowed,
            Classification::TransientError => {
                let retry = validator.probe(url, PROBE_TIMEOUT).await;
                match retry {
                    Ok(r) if r.classification == Classification::Ok => Verdict::Ok,
                    _ => Verdict::Unverified,
                }
            }
        },
        Err(_) => Verdict::Unverified,
    }
}

/// Step 2: validates every citation's URL with a global concurrency cap
/// of 16 and a per-host cap of 4.
async fn validate_all(citations: &[Citation], validator: &dyn UrlValidator) -> Vec<(Citation, Verdict)> {
    let global = Arc::new(Semaphore::new(URL_PROBE_CONCURRENCY));
    let mut host_semaphores: HashMap<String, Arc<Semaphore>> = HashMap::new();
    for citation in citations {
        host_semaphores
            .entry(host_of(&citation.url))
            .or_insert_with(|| Arc::new(Semaphore::new(PER_HOST_CONCURRENCY)));
    }

    let tasks = citations.iter().map(|citation| {
        let global = global.clone();
        let host_sem = host_semaphores[&host_of(&citation.url)].clone();
        let citation = citation.clone();
        async move {
            let _global_permit = global.acquire().await.expect("semaphore not closed");
            let _host_permit = host_sem.acquire().await.expect("semaphore not closed");
            let verdict = classify(validator, &citation.url).await;
            (citation, verdict)
        }
    });

    futures::future::join_all(tasks).await
}

#[derive(Deserialize)]
struct ReplacementGuess {
    url: Option<String>,
}

fn extract_first_url(text: &str) -> Option<String> {
    let start = text.find("http")?;
    let rest = &text[start..];
    let end = rest
        .find(|c: char| c.is_whitespace() || c == '"' || c == '\'' || c == ')' || c == '>')
        .unwrap_or(rest.len());
    Some(rest[..end].to_string())
}

/// Step 3: for a broken citation, asks the model for a replacement URL;
/// falls back to the first grounding URL whose title matches.
async fn discover_replacement(
    citation: &Citation,
    grounding_urls: &[crate::context::GroundingUrl],
    chat: &dyn ChatModel,
) -> Option<String> {
    let prompt = format!(
        "The citation \"{}\" (previously {}) is broken. Using grounded search, propose a \
         replacement URL for this source.",
        citation.title, citation.url
    );
    let request = GenerateRequest::new(prompt).with_tools(vec![ToolSpec::GroundedSearch]);
    if let Ok(response) = chat.generate(request).await {
        if let Some(text) = &response.text {
            if let Some(url) = extract_first_url(text) {
                return Some(url);
            }
        }
        if let Some(parsed) = response.parsed {
            if let Ok(guess) = serde_json::from_value::<ReplacementGuess>(parsed) {
                if let Some(url) = guess.url {
                    return Some(url);
                }
            }
        }
    }

    grounding_urls
        .iter()
        .find(|g| g.title.eq_ignore_ascii_case(&citation.title))
        .map(|g| g.url.clone())
}

/// Rewrites every `[k]` marker in `text` per `renumber`; markers for
/// removed citations are deleted and surrounding doubled spaces collapse.
fn rewrite_markers(text: &str, renumber: &HashMap<u32, u32>) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c == '[' {
            if let Some(close) = text[i..].find(']') {
                let inner = &text[i + 1..i + close];
                if !inner.is_empty() && inner.chars().all(|c| c.is_ascii_digit()) {
                    let n: u32 = inner.parse().unwrap_or(0);
                    if let Some(&new_n) = renumber.get(&n) {
                        result.push_str(&format!("[{new_n}]"));
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
    // Collapse any doubled spaces left behind by a removed marker.
    while result.contains("  ") {
        result = result.replace("  ", " ");
    }
    result
}

pub async fn run(
    mut ctx: ExecutionContext,
    chat: &dyn ChatModel,
    validator: &dyn UrlValidator,
) -> Result<ExecutionContext> {
    if ctx.structured_data.is_none() {
        return Err(Error::StageContract {
            stage: "S4".to_string(),
            message: "structured_data missing entering S4".to_string(),
        });
    }

    let enhanced = enhance_sources(&ctx, chat).await;
    let drop_unverified = ctx.job_config.flags.drop_unverified_citations;
    let validated = validate_all(&enhanced, validator).await;

    let mut surviving: Vec<Citation> = Vec::new();
    let mut non_fatal_errors: Vec<ErrorEntry> = Vec::new();

    for (citation, verdict) in validated {
        match verdict {
            Verdict::Ok => surviving.push(citation),
            Verdict::Unverified => {
                if !drop_unverified {
                    surviving.push(citation);
                } else {
                    non_fatal_errors.push(ErrorEntry::new(
                        "S4",
                        "CitationUnresolvable",
                        format!("dropped unverified citation '{}'", citation.title),
                        true,
                    ));
                }
            }
            Verdict::Disallowed => {
                non_fatal_errors.push(ErrorEntry::new(
                    "S4",
                    "CitationUnresolvable",
                    format!("removed disallowed citation '{}'", citation.title),
                    true,
                ));
            }
            Verdict::Broken => {
                if let Some(url) = discover_replacement(&citation, &ctx.grounding_urls, chat).await {
                    surviving.push(Citation { url, ..citation });
                } else {
                    non_fatal_errors.push(ErrorEntry::new(
                        "S4",
                        "CitationUnresolvable",
                        format!("removed broken citation '{}' with no replacement", citation.title),
                        true,
                    ));
                }
            }
        }
    }

    // Step 4 (continued): dense renumbering in original relative order.
    let mut renumber: HashMap<u32, u32> = HashMap::new();
    let mut renumbered_sources = Vec::with_capacity(surviving.len());
    for (idx, citation) in surviving.into_iter().enumerate() {
        let new_number = (idx + 1) as u32;
        renumber.insert(citation.number, new_number);
        renumbered_sources.push(Citation {
            number: new_number,
            ..citation
        });
    }

    let citation_map: HashMap<String, String> = renumbered_sources
        .iter()
        .map(|c| (c.number.to_string(), c.url.clone()))
        .collect();

    let doc = ctx.structured_data.as_mut().expect("checked above");
    for field in doc.body_fields_mut() {
        *field = rewrite_markers(field, &renumber);
    }
    doc.sources = renumbered_sources;
    doc.citation_map = citation_map;

    for entry in non_fatal_errors {
        ctx.push_error(entry);
    }

    Ok(ctx)
}

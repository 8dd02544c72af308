//! The URL health-probe collaborator used by S4, with a real `reqwest`
//! backed implementation (HTTP is in-scope per the probe contract) and a
//! scriptable mock for tests.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// Outcome of probing a citation URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    Ok,
    TransientError,
    HardError,
    Disallowed,
}

#[derive(Clone, Debug)]
pub struct ProbeResult {
    pub status_code: Option<u16>,
    pub final_url: String,
    pub classification: Classification,
}

#[async_trait]
pub trait UrlValidator: Send + Sync {
    async fn probe(&self, url: &str, timeout: Duration) -> Result<ProbeResult>;
}

/// Denylist of obviously disallowed URL substrings. A real deployment
/// would source this from a managed list; the policy boundary is the
/// trait, not this literal set.
const DISALLOWED_SUBSTRINGS: &[&str] = &["phishing-test.invalid", "spam-test.invalid"];

/// `reqwest`-backed implementation: HEAD first, falling back to GET when
/// the origin does not support HEAD.
pub struct HttpUrlValidator {
    client: reqwest::Client,
}

impl HttpUrlValidator {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    fn classify(status: u16) -> Classification {
        match status {
            200..=399 => Classification::Ok,
            403 | 404 | 410 => Classification::HardError,
            500..=599 => Classification::TransientError,
            _ => Classification::HardError,
        }
    }
}

impl Default for HttpUrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlValidator for HttpUrlValidator {
    async fn probe(&self, url: &str, timeout: Duration) -> Result<ProbeResult> {
        if DISALLOWED_SUBSTRINGS.iter().any(|s| url.contains(s)) {
            return Ok(ProbeResult {
                status_code: None,
                final_url: url.to_string(),
                classification: Classification::Disallowed,
            });
        }

        let head = self.client.head(url).timeout(timeout).send().await;
        let response = match head {
            Ok(resp) => resp,
            Err(_) => match self.client.get(url).timeout(timeout).send().await {
                Ok(resp) => resp,
                Err(_) => {
                    return Ok(ProbeResult {
                        status_code: None,
                        final_url: url.to_string(),
                        classification: Classification::TransientError,
                    });
                }
            },
        };

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        Ok(ProbeResult {
            status_code: Some(status),
            final_url,
            classification: Self::classify(status),
        })
    }
}

/// Scriptable mock keyed by exact URL, for deterministic tests.
pub struct MockUrlValidator {
    pub scripted: HashMap<String, ProbeResult>,
}

impl MockUrlValidator {
    pub fn new() -> Self {
        Self {
            scripted: HashMap::new(),
        }
    }

    pub fn with_result(mut self, url: impl Into<String>, result: ProbeResult) -> Self {
        self.scripted.insert(url.into(), result);
        self
    }
}

impl Default for MockUrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlValidator for MockUrlValidator {
    async fn probe(&self, url: &str, _timeout: Duration) -> Result<ProbeResult> {
        Ok(self.scripted.get(url).cloned().unwrap_or(ProbeResult {
            status_code: Some(200),
            final_url: url.to_string(),
            classification: Classification::Ok,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_validator_defaults_to_ok() {
        let validator = MockUrlValidator::new();
        let result = validator
            .probe("https://nist.gov", Duration::from_secs(10))
            .await
            .unwrap();
        assert_eq!(result.classification, Classification::Ok);
    }

    #[tokio::test]
    async fn mock_validator_returns_scripted_hard_error() {
        let validator = MockUrlValidator::new().with_result(
            "https://example.test/deleted",
            ProbeResult {
                status_code: Some(404),
                final_url: "https://example.test/deleted".to_string(),
                classification: Classification::HardError,
            },
        );
        let result = validator
            .probe("https://example.test/deleted", Duration::from_secs(10))
            .await
            .unwrap();
        assert_eq!(result.classification, Classification::HardError);
    }

    #[test]
    fn classify_maps_status_codes() {
        assert_eq!(HttpUrlValidator::classify(200), Classification::Ok);
        assert_eq!(HttpUrlValidator::classify(404), Classification::HardError);
        assert_eq!(HttpUrlValidator::classify(503), Classification::TransientError);
    }
}

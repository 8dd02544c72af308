//! The image-generation collaborator boundary used by S6.

use async_trait::async_trait;

use crate::error::Result;

/// The role an image slot plays in the rendered article.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageRole {
    Hero,
    Mid,
    Bottom,
}

impl ImageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageRole::Hero => "hero",
            ImageRole::Mid => "mid",
            ImageRole::Bottom => "bottom",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ImageRequest {
    pub prompt: String,
    pub aspect_ratio: &'static str,
}

#[derive(Clone, Debug)]
pub struct GeneratedImage {
    pub url: String,
    pub alt_text_suggestion: String,
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, request: ImageRequest) -> Result<GeneratedImage>;
}

/// Always-succeeds stand-in for tests; returns a deterministic placeholder
/// URL derived from the prompt.
pub struct MockImageGenerator {
    pub fail_roles: std::collections::HashSet<String>,
}

impl MockImageGenerator {
    pub fn new() -> Self {
        Self {
            fail_roles: std::collections::HashSet::new(),
        }
    }

    /// Configures the mock to fail any request whose prompt contains
    /// `role` (matching `ImageRole::as_str()`), so tests can exercise S6's
    /// graceful-degradation path.
    pub fn fail_for(mut self, role: &str) -> Self {
        self.fail_roles.insert(role.to_string());
        self
    }
}

impl Default for MockImageGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate_image(&self, request: ImageRequest) -> Result<GeneratedImage> {
        for role in &self.fail_roles {
            if request.prompt.contains(role.as_str()) {
                return Err(crate::error::Error::UpstreamHard {
                    stage: "S6".to_string(),
                    message: format!("image generation failed for prompt: {}", request.prompt),
                });
            }
        }
        Ok(GeneratedImage {
            url: format!("https://images.test/{}.webp", slug(&request.prompt)),
            alt_text_suggestion: request.prompt,
        })
    }
}

fn slug(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .trim_matches('-')
        .to_string()
}

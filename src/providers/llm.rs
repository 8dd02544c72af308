//! The LLM collaborator boundary, grounded in `dashflow`'s `ChatModel`
//! trait as consumed by `dashflow/crates/dashflow/src/api.rs::generate`.

use async_trait::async_trait;
use serde_json::Value;

use crate::context::GroundingUrl;
use crate::error::Result;

/// Tool the LLM may be given access to for a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolSpec {
    GroundedSearch,
    UrlContext,
}

/// Parameters for a single generation call.
#[derive(Clone, Debug)]
pub struct GenerateRequest {
    pub prompt: String,
    /// JSON Schema the response must conform to, when structured output
    /// is requested.
    pub response_schema: Option<Value>,
    pub tools: Vec<ToolSpec>,
    pub temperature: f32,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: None,
            tools: Vec::new(),
            temperature: 0.2,
        }
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn with_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Result of a generation call: either a parsed structured object (when a
/// schema was requested) or free text, plus the grounding trace collected
/// during tool use.
#[derive(Clone, Debug, Default)]
pub struct GenerateResponse {
    pub parsed: Option<Value>,
    pub text: Option<String>,
    pub grounding_trace: Vec<GroundingUrl>,
}

/// The LLM tool collaborator. Out of scope to implement against a real
/// model provider; the crate ships only test doubles.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;
}

/// Deterministic, scriptable stand-in for tests and local runs.
pub struct MockChatModel {
    responses: parking_lot::Mutex<std::collections::VecDeque<GenerateResponse>>,
    calls: std::sync::atomic::AtomicUsize,
}

impl MockChatModel {
    pub fn new() -> Self {
        Self {
            responses: parking_lot::Mutex::new(std::collections::VecDeque::new()),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Queues a response to be returned by the next `generate` call.
    pub fn push_response(&self, response: GenerateResponse) {
        self.responses.lock().push_back(response);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl Default for MockChatModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn generate(&self, _request: GenerateRequest) -> Result<GenerateResponse> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let response = self
            .responses
            .lock()
            .pop_front()
            .unwrap_or_default();
        Ok(response)
    }
}

/// Wraps any [`ChatModel`] with a shared [`crate::engine::RateLimiter`],
/// so every call the engine makes against a real provider respects the
/// job's configured requests-per-minute budget regardless of how many
/// stages or retries are in flight concurrently. Takes its inner model as
/// a trait object so it composes with however the caller already stores
/// its collaborators.
pub struct RateLimitedChatModel {
    inner: std::sync::Arc<dyn ChatModel>,
    limiter: crate::engine::RateLimiter,
}

impl RateLimitedChatModel {
    pub fn new(inner: std::sync::Arc<dyn ChatModel>, limiter: crate::engine::RateLimiter) -> Self {
        Self { inner, limiter }
    }
}

#[async_trait]
impl ChatModel for RateLimitedChatModel {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        self.limiter.acquire().await;
        self.inner.generate(request).await
    }
}

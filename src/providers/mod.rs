//! Collaborator boundaries: the seams to the out-of-scope systems named in
//! the pipeline's purpose (LLM, embeddings, image generation, URL health,
//! storage). Each trait ships a scriptable mock for tests and local runs;
//! only the URL validator ships a real, `reqwest`-backed implementation.

pub mod embeddings;
pub mod image;
pub mod llm;
pub mod storage;
pub mod url_validator;

pub use embeddings::{cosine_similarity, Embeddings, MockEmbeddings};
pub use image::{GeneratedImage, ImageGenerator, ImageRequest, ImageRole, MockImageGenerator};
pub use llm::{ChatModel, GenerateRequest, GenerateResponse, MockChatModel, RateLimitedChatModel, ToolSpec};
pub use storage::{ArticleStorage, MockStorage, StorageResult};
pub use url_validator::{Classification, HttpUrlValidator, MockUrlValidator, ProbeResult, UrlValidator};

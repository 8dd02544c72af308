//! The storage collaborator used by S9 to persist rendered artifacts.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Artifact URIs written back to `ExecutionContext::storage_result`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StorageResult {
    pub index_html_uri: String,
    pub article_json_uri: String,
    pub sources_json_uri: String,
    pub image_uris: HashMap<String, String>,
}

#[async_trait]
pub trait ArticleStorage: Send + Sync {
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String>;
}

/// In-memory stand-in: records every put and returns a deterministic
/// `mem://` URI, so tests can assert on exactly what was persisted.
pub struct MockStorage {
    pub written: parking_lot::Mutex<HashMap<String, (Vec<u8>, String)>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self {
            written: parking_lot::Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, path: &str) -> Option<(Vec<u8>, String)> {
        self.written.lock().get(path).cloned()
    }
}

impl Default for MockStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleStorage for MockStorage {
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        let uri = format!("mem://{path}");
        self.written
            .lock()
            .insert(path.to_string(), (bytes, content_type.to_string()));
        Ok(uri)
    }
}

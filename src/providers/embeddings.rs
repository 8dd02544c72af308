//! The embedding collaborator boundary, used by S7's semantic similarity
//! pass. Grounded in `dashflow`'s `Embeddings` trait shape (see its
//! `api.rs::embed` wrapper and `MockEmbeddings` test double).

use async_trait::async_trait;

use crate::error::Result;

/// Produces a fixed-dimension, unit-normalized vector for a piece of text.
#[async_trait]
pub trait Embeddings: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Deterministic stand-in: hashes the text into a small fixed-dimension
/// vector so identical inputs always embed identically and distinct
/// inputs are (with high probability) distinguishable, without requiring
/// a real model.
pub struct MockEmbeddings {
    pub dimension: usize,
}

impl MockEmbeddings {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl Default for MockEmbeddings {
    fn default() -> Self {
        Self::new(16)
    }
}

#[async_trait]
impl Embeddings for MockEmbeddings {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; self.dimension];
        for (i, byte) in text.bytes().enumerate() {
            let slot = i % self.dimension;
            vector[slot] += byte as f32;
        }
        let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in vector.iter_mut() {
                *v /= norm;
            }
        }
        Ok(vector)
    }
}

/// Cosine similarity between two equal-length vectors. Returns 0.0 for
/// mismatched lengths or zero vectors rather than panicking.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|v| v * v).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

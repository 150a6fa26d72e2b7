// ============================================================
// Layer 4 — Embedding Similarity Backend
// ============================================================
// Production TextSimilarity implementation: sentence embeddings
// from a small pretrained model (AllMiniLM-L6-v2 via fastembed),
// compared by cosine. Loading the model is expensive, so it is
// lazily initialized at most once behind a mutex and the same
// instance is reused for every call in the process — callers
// share it via Arc and never tear it down within a run.

use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use crate::domain::traits::TextSimilarity;

pub struct EmbeddingSimilarity {
    model: Mutex<Option<TextEmbedding>>,
}

impl EmbeddingSimilarity {
    /// Create the backend without loading the model; the first scoring
    /// call (or `prepare`) loads it.
    pub fn new() -> Self {
        Self {
            model: Mutex::new(None),
        }
    }

    /// Load the model now instead of on first use. Call this before
    /// fanning scoring out across threads.
    pub fn ensure_loaded(&self) -> Result<()> {
        self.embed(Vec::new()).map(|_| ())
    }

    /// Embed a batch of texts, L2-normalized so the dot product below
    /// is cosine similarity.
    fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        let mut guard = self
            .model
            .lock()
            .map_err(|_| anyhow!("embedding model lock poisoned"))?;

        if guard.is_none() {
            tracing::info!("Loading embedding similarity model (AllMiniLM-L6-v2)");
            let model = TextEmbedding::try_new(InitOptions::new(EmbeddingModel::AllMiniLML6V2))
                .context("cannot initialize embedding model")?;
            tracing::info!("Embedding similarity model ready");
            *guard = Some(model);
        }

        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let model = guard
            .as_mut()
            .context("embedding model missing after initialization")?;
        let mut embeddings = model
            .embed(texts, None)
            .context("embedding inference failed")?;
        for embedding in &mut embeddings {
            normalize(embedding);
        }
        Ok(embeddings)
    }
}

impl Default for EmbeddingSimilarity {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSimilarity for EmbeddingSimilarity {
    fn similarity(&self, reference: &str, candidate: &str) -> Result<f32> {
        let embeddings = self.embed(vec![reference.to_string(), candidate.to_string()])?;
        Ok(dot(&embeddings[0], &embeddings[1]))
    }

    /// One embedding pass for all references plus the candidate.
    fn score_all(&self, references: &[String], candidate: &str) -> Result<Vec<f32>> {
        let mut texts: Vec<String> = references.to_vec();
        texts.push(candidate.to_string());

        let mut embeddings = self.embed(texts)?;
        let candidate_embedding = embeddings
            .pop()
            .context("embedding batch came back empty")?;

        Ok(embeddings
            .iter()
            .map(|reference| dot(reference, &candidate_embedding))
            .collect())
    }

    fn prepare(&self) -> Result<()> {
        self.ensure_loaded()
    }
}

fn normalize(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in vector {
            *x /= norm;
        }
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

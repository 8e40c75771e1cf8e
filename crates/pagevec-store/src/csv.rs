use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One persisted chunk: the text and its embedding as a JSON array string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRow {
    pub text: String,
    pub embedding: String,
}

impl EmbeddingRow {
    /// Parse the embedding column back into a vector.
    pub fn vector(&self) -> Result<Vec<f32>, StoreError> {
        Ok(serde_json::from_str(&self.embedding)?)
    }
}

/// Writes chunk/embedding pairs to a CSV file with a `text,embedding` header.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn write(&self, chunks: &[String], embeddings: &[Vec<f32>]) -> Result<(), StoreError> {
        if chunks.len() != embeddings.len() {
            return Err(StoreError::LengthMismatch {
                chunks: chunks.len(),
                embeddings: embeddings.len(),
            });
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        for (text, embedding) in chunks.iter().zip(embeddings) {
            writer.serialize(EmbeddingRow {
                text: text.clone(),
                embedding: serde_json::to_string(embedding)?,
            })?;
        }
        writer.flush()?;
        tracing::info!(rows = chunks.len(), path = %self.path.display(), "wrote embeddings CSV");

        Ok(())
    }

    pub fn read(&self) -> Result<Vec<EmbeddingRow>, StoreError> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut rows = Vec::new();
        for row in reader.deserialize() {
            rows.push(row?);
        }
        Ok(rows)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("embedding serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{chunks} chunks but {embeddings} embeddings")]
    LengthMismatch { chunks: usize, embeddings: usize },
}

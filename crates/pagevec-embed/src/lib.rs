use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Turns a batch of texts into embedding vectors, one per input, in order.
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError>;
}

/// Client for an OpenAI-compatible `/embeddings` endpoint.
#[derive(Clone)]
pub struct OpenAiEmbedder {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiEmbedder {
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Deserialize)]
struct EmbeddingItem {
    index: usize,
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingBackend for OpenAiEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        let url = format!("{}/embeddings", self.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest {
                model: &self.model,
                input: texts,
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(EmbedError::Api { status, body });
        }

        let body: EmbeddingResponse = resp.json().await?;
        if body.data.len() != texts.len() {
            return Err(EmbedError::CountMismatch {
                expected: texts.len(),
                got: body.data.len(),
            });
        }
        // embeddings must come back in the same order as the inputs
        for (i, item) in body.data.iter().enumerate() {
            if item.index != i {
                return Err(EmbedError::OutOfOrder {
                    position: i,
                    index: item.index,
                });
            }
        }
        tracing::debug!(count = body.data.len(), "received embeddings");

        Ok(body.data.into_iter().map(|item| item.embedding).collect())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EmbedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("embeddings API returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("requested {expected} embeddings, received {got}")]
    CountMismatch { expected: usize, got: usize },
    #[error("embedding at position {position} carries index {index}")]
    OutOfOrder { position: usize, index: usize },
}

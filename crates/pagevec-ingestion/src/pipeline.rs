use pagevec_chunker::{Section, SectionSplitter};
use pagevec_embed::EmbeddingBackend;
use pagevec_store::CsvStore;

#[derive(Debug)]
pub struct IngestReport {
    pub sections: usize,
    pub chunks: usize,
}

/// Runs cleaned text sections through the full path: split into token-bounded
/// chunks, embed in batches, persist to CSV.
pub struct IngestionPipeline<E> {
    splitter: SectionSplitter,
    embedder: E,
    store: CsvStore,
    batch_size: usize,
}

impl<E: EmbeddingBackend> IngestionPipeline<E> {
    pub fn new(splitter: SectionSplitter, embedder: E, store: CsvStore, batch_size: usize) -> Self {
        Self {
            splitter,
            embedder,
            store,
            batch_size: batch_size.max(1),
        }
    }

    pub async fn ingest(&self, sections: Vec<String>) -> Result<IngestReport, IngestionError> {
        // Sections arrive as bare strings with no heading context.
        let sections: Vec<Section> = sections.into_iter().map(Section::untitled).collect();

        let mut chunks = Vec::new();
        for section in &sections {
            chunks.extend(self.splitter.split(section));
        }
        tracing::info!(
            sections = sections.len(),
            chunks = chunks.len(),
            "split sections into chunks"
        );

        if chunks.is_empty() {
            tracing::warn!("no chunks produced, nothing to embed");
            return Ok(IngestReport {
                sections: sections.len(),
                chunks: 0,
            });
        }

        let mut embeddings = Vec::with_capacity(chunks.len());
        for (batch_no, batch) in chunks.chunks(self.batch_size).enumerate() {
            tracing::info!(batch = batch_no, size = batch.len(), "requesting embeddings");
            embeddings.extend(self.embedder.embed_batch(batch).await?);
        }

        self.store.write(&chunks, &embeddings)?;

        Ok(IngestReport {
            sections: sections.len(),
            chunks: chunks.len(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("embedding error: {0}")]
    Embed(#[from] pagevec_embed::EmbedError),
    #[error("store error: {0}")]
    Store(#[from] pagevec_store::StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pagevec_chunker::TiktokenCounter;
    use pagevec_embed::EmbedError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Returns a constant vector per input and records how many batch calls
    /// were made.
    struct FakeBackend {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EmbeddingBackend for FakeBackend {
        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(texts.iter().map(|_| vec![0.0, 1.0]).collect())
        }
    }

    fn splitter() -> SectionSplitter {
        let counter = Arc::new(TiktokenCounter::for_model("gpt-3.5-turbo").unwrap());
        SectionSplitter::new(counter, 1600, 5)
    }

    #[tokio::test]
    async fn sections_flow_through_to_csv_rows() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path().join("out.csv"));
        let pipeline = IngestionPipeline::new(
            splitter(),
            FakeBackend {
                calls: AtomicUsize::new(0),
            },
            store.clone(),
            1000,
        );

        let sections = vec![
            "Herons wade in shallow water.".to_string(),
            "Egrets are herons with white plumage.".to_string(),
        ];
        let report = pipeline.ingest(sections.clone()).await.unwrap();
        assert_eq!(report.sections, 2);
        assert_eq!(report.chunks, 2);

        let rows = store.read().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text, sections[0]);
        assert_eq!(rows[1].text, sections[1]);
        assert_eq!(rows[0].vector().unwrap(), vec![0.0, 1.0]);
    }

    #[tokio::test]
    async fn chunks_are_embedded_in_batches() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path().join("out.csv"));
        let backend = FakeBackend {
            calls: AtomicUsize::new(0),
        };
        let pipeline = IngestionPipeline::new(splitter(), backend, store.clone(), 2);

        let sections: Vec<String> = (0..5).map(|i| format!("short section {i}")).collect();
        let report = pipeline.ingest(sections).await.unwrap();
        assert_eq!(report.chunks, 5);
        // 5 chunks at a batch size of 2 means 3 requests
        assert_eq!(pipeline.embedder.calls.load(Ordering::SeqCst), 3);
        assert_eq!(store.read().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn empty_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path().join("out.csv"));
        let pipeline = IngestionPipeline::new(
            splitter(),
            FakeBackend {
                calls: AtomicUsize::new(0),
            },
            store,
            1000,
        );

        let report = pipeline.ingest(Vec::new()).await.unwrap();
        assert_eq!(report.sections, 0);
        assert_eq!(report.chunks, 0);
        assert_eq!(
            pipeline.embedder.calls.load(Ordering::SeqCst),
            0
        );
    }
}

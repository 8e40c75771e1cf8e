use std::sync::Arc;

use pagevec_chunker::{SectionSplitter, TiktokenCounter};
use pagevec_common::{config::AppConfig, telemetry};
use pagevec_embed::OpenAiEmbedder;
use pagevec_extract::{html, PageFetcher};
use pagevec_ingestion::IngestionPipeline;
use pagevec_store::CsvStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let config = AppConfig::from_env()?;
    tracing::info!(url = %config.target_url, "starting pagevec ingest");

    let page = PageFetcher::new().fetch(&config.target_url).await?;
    let sections = html::page_sections(&page.html, config.min_section_chars);

    let counter = Arc::new(TiktokenCounter::for_model(&config.tokenizer_model)?);
    let splitter = SectionSplitter::new(counter, config.max_tokens, config.max_recursion);
    let embedder = OpenAiEmbedder::new(
        &config.openai_base_url,
        &config.openai_api_key,
        &config.embedding_model,
    );
    let store = CsvStore::new(&config.csv_path);

    let pipeline = IngestionPipeline::new(splitter, embedder, store, config.batch_size);
    let report = pipeline.ingest(sections).await?;

    tracing::info!(
        sections = report.sections,
        chunks = report.chunks,
        path = %config.csv_path,
        "ingest complete"
    );

    Ok(())
}

pub mod pipeline;

pub use pipeline::{IngestReport, IngestionError, IngestionPipeline};

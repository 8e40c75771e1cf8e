pub mod csv;

pub use crate::csv::{CsvStore, EmbeddingRow, StoreError};

pub mod fetch;
pub mod html;

pub use fetch::{ExtractError, FetchedPage, PageFetcher};

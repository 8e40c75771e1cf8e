//! Token-aware recursive text chunking.
//!
//! A [`Section`] is a body of text plus the heading path above it. The
//! [`SectionSplitter`] partitions a section into strings that each fit a
//! maximum token budget, splitting at the most structural delimiter available
//! and falling back to hard truncation when no split can be found.

pub mod bisect;
pub mod splitter;
pub mod tokenizer;

pub use bisect::bisect;
pub use splitter::{SectionSplitter, DEFAULT_DELIMITERS};
pub use tokenizer::{TiktokenCounter, TokenCounter, TokenizerError};

/// A unit of text to be chunked: ancestor headings (outermost first) plus body.
///
/// Sections are immutable inputs; recursion builds new sections for sub-ranges
/// rather than mutating the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub titles: Vec<String>,
    pub text: String,
}

impl Section {
    pub fn new(titles: Vec<String>, text: impl Into<String>) -> Self {
        Self {
            titles,
            text: text.into(),
        }
    }

    /// A section with no heading context.
    pub fn untitled(text: impl Into<String>) -> Self {
        Self {
            titles: Vec::new(),
            text: text.into(),
        }
    }

    /// Title-path and body joined with blank lines — the string the token
    /// budget is measured against, and the form chunks are emitted in.
    pub fn joined(&self) -> String {
        let mut parts: Vec<&str> = self.titles.iter().map(String::as_str).collect();
        parts.push(&self.text);
        parts.join("\n\n")
    }
}

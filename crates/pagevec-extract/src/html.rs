use std::collections::HashSet;

use scraper::{Html, Selector};
use sha2::{Digest, Sha256};

/// Pull the embeddable text sections out of a page, in document-ish order:
/// title first, then headings, link texts, and non-empty paragraphs.
pub fn extract_sections(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let title_sel = Selector::parse("title").unwrap();
    let heading_sel = Selector::parse("h1, h2, h3, h4, h5, h6").unwrap();
    let link_sel = Selector::parse("a").unwrap();
    let para_sel = Selector::parse("p").unwrap();

    let mut sections = Vec::new();
    if let Some(title) = doc.select(&title_sel).next() {
        sections.push(element_text(&title));
    }
    for heading in doc.select(&heading_sel) {
        sections.push(element_text(&heading));
    }
    for link in doc.select(&link_sel) {
        sections.push(element_text(&link));
    }
    for para in doc.select(&para_sel) {
        let text = element_text(&para);
        if !text.is_empty() {
            sections.push(text);
        }
    }
    sections
}

fn element_text(element: &scraper::ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Drop repeated sections, keeping the first occurrence so output order is
/// deterministic. Sections are compared by content hash.
pub fn dedup_sections(sections: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    sections
        .into_iter()
        .filter(|s| {
            let mut hasher = Sha256::new();
            hasher.update(s.as_bytes());
            seen.insert(format!("{:x}", hasher.finalize()))
        })
        .collect()
}

/// Extracted, deduplicated sections with short/blank ones filtered out —
/// the cleaned input handed to the chunker.
pub fn page_sections(html: &str, min_chars: usize) -> Vec<String> {
    let raw = extract_sections(html);
    let raw_count = raw.len();
    let deduped = dedup_sections(raw);
    let deduped_count = deduped.len();
    let kept: Vec<String> = deduped
        .into_iter()
        .filter(|s| s.chars().count() >= min_chars)
        .collect();
    tracing::info!(
        raw = raw_count,
        deduplicated = deduped_count,
        kept = kept.len(),
        "extracted text sections"
    );
    kept
}

use std::sync::Arc;

use crate::bisect::bisect;
use crate::tokenizer::TokenCounter;
use crate::Section;

/// Delimiters tried from most to least structural: paragraph break, line
/// break, sentence break.
pub const DEFAULT_DELIMITERS: [&str; 3] = ["\n\n", "\n", ". "];

/// Recursively splits sections into strings of at most `max_tokens` tokens.
///
/// Each level bisects the body on the most structural delimiter that yields
/// two non-empty halves and recurses on them, carrying the title-path down
/// unchanged. Recursion is bounded; once the budget runs out the remaining
/// text is truncated at a token boundary instead of split further, so every
/// non-empty section produces at least one chunk.
pub struct SectionSplitter {
    counter: Arc<dyn TokenCounter>,
    max_tokens: usize,
    max_recursion: usize,
    delimiters: Vec<&'static str>,
}

impl SectionSplitter {
    pub fn new(counter: Arc<dyn TokenCounter>, max_tokens: usize, max_recursion: usize) -> Self {
        Self {
            counter,
            max_tokens,
            max_recursion,
            delimiters: DEFAULT_DELIMITERS.to_vec(),
        }
    }

    /// Split one section into chunk strings, each ready for embedding.
    pub fn split(&self, section: &Section) -> Vec<String> {
        self.split_bounded(section, self.max_recursion)
    }

    fn split_bounded(&self, section: &Section, budget: usize) -> Vec<String> {
        let joined = section.joined();
        let n = self.counter.count_tokens(&joined);
        if n <= self.max_tokens {
            return vec![joined];
        }
        if budget == 0 {
            return vec![self.counter.truncate_to_tokens(&joined, self.max_tokens)];
        }
        for delimiter in &self.delimiters {
            let (left, right) = bisect(self.counter.as_ref(), &section.text, delimiter);
            if left.is_empty() || right.is_empty() {
                // not a real split; retry with a finer-grained delimiter
                continue;
            }
            let mut chunks = Vec::new();
            for half in [left, right] {
                let sub = Section::new(section.titles.clone(), half);
                chunks.extend(self.split_bounded(&sub, budget - 1));
            }
            return chunks;
        }
        // no delimiter produced a split; should be very rare
        vec![self.counter.truncate_to_tokens(&joined, self.max_tokens)]
    }
}

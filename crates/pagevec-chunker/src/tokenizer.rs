use tiktoken_rs::CoreBPE;

/// Token counting and token-boundary truncation, bound to one tokenizer.
///
/// The splitter only ever talks to this trait, so tests can swap in a
/// deterministic counter and production code can bind a real BPE encoding.
pub trait TokenCounter: Send + Sync {
    fn count_tokens(&self, text: &str) -> usize;

    /// The prefix of `text` that decodes from the first `limit` tokens of its
    /// encoding. Token boundaries need not align with character or word
    /// boundaries. When tokens are actually discarded, implementations emit a
    /// warning event carrying the original and truncated token counts.
    fn truncate_to_tokens(&self, text: &str, limit: usize) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum TokenizerError {
    #[error("unknown tokenizer model '{model}': {message}")]
    UnknownModel { model: String, message: String },
}

/// Tokenizer adapter over tiktoken's BPE encodings, selected by model name
/// (e.g. "gpt-3.5-turbo" resolves to cl100k_base).
pub struct TiktokenCounter {
    bpe: CoreBPE,
}

impl std::fmt::Debug for TiktokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiktokenCounter").finish_non_exhaustive()
    }
}

impl TiktokenCounter {
    pub fn for_model(model: &str) -> Result<Self, TokenizerError> {
        let bpe =
            tiktoken_rs::get_bpe_from_model(model).map_err(|e| TokenizerError::UnknownModel {
                model: model.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { bpe })
    }
}

impl TokenCounter for TiktokenCounter {
    fn count_tokens(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }

    fn truncate_to_tokens(&self, text: &str, limit: usize) -> String {
        let tokens = self.bpe.encode_ordinary(text);
        if tokens.len() <= limit {
            return text.to_string();
        }
        // A cut can land mid-character; back off until the prefix decodes.
        let mut end = limit;
        let truncated = loop {
            match self.bpe.decode(tokens[..end].to_vec()) {
                Ok(s) => break s,
                Err(_) if end > 0 => end -= 1,
                Err(_) => break String::new(),
            }
        };
        tracing::warn!(
            original_tokens = tokens.len(),
            truncated_tokens = end,
            "truncated string to fit token budget"
        );
        truncated
    }
}

/// Deterministic counter for tests: one token per whitespace-separated word.
#[cfg(test)]
pub(crate) struct WordCounter;

#[cfg(test)]
impl TokenCounter for WordCounter {
    fn count_tokens(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }

    fn truncate_to_tokens(&self, text: &str, limit: usize) -> String {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.len() <= limit {
            text.to_string()
        } else {
            words[..limit].join(" ")
        }
    }
}

use crate::tokenizer::TokenCounter;

/// Split `text` in two on `delimiter`, balancing token counts across the halves.
///
/// Returns `(text, "")` when the delimiter is absent. With exactly two
/// delimiter-separated pieces the split is trivial. Otherwise candidate split
/// points are scanned left to right, each measured by how far the left half's
/// token count lands from the halfway mark; the scan stops at the first
/// candidate that is no improvement and splits immediately before it. Greedy,
/// not globally optimal: a near-convex token profile is assumed.
pub fn bisect(counter: &dyn TokenCounter, text: &str, delimiter: &str) -> (String, String) {
    let pieces: Vec<&str> = text.split(delimiter).collect();
    if pieces.len() == 1 {
        return (text.to_string(), String::new());
    }
    if pieces.len() == 2 {
        return (pieces[0].to_string(), pieces[1].to_string());
    }

    let total = counter.count_tokens(text);
    let halfway = total / 2;
    let mut best_diff = halfway;
    let mut split_at = pieces.len() - 1;
    for i in 0..pieces.len() {
        let left = pieces[..i + 1].join(delimiter);
        let diff = halfway.abs_diff(counter.count_tokens(&left));
        if diff >= best_diff {
            split_at = i;
            break;
        }
        best_diff = diff;
    }

    (
        pieces[..split_at].join(delimiter),
        pieces[split_at..].join(delimiter),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::WordCounter;

    #[test]
    fn absent_delimiter_returns_whole_text_and_empty_right() {
        let (left, right) = bisect(&WordCounter, "no breaks here", "\n");
        assert_eq!(left, "no breaks here");
        assert_eq!(right, "");
    }

    #[test]
    fn two_pieces_split_directly() {
        let (left, right) = bisect(&WordCounter, "first part\n\nsecond part", "\n\n");
        assert_eq!(left, "first part");
        assert_eq!(right, "second part");
    }

    #[test]
    fn picks_split_point_closest_to_token_halfway() {
        // Pieces "A", "B", "C", "D." — cumulative left counts 1, 2, 3 against
        // halfway = 2. The diff stops improving at the third piece, so the
        // split lands just before it.
        let (left, right) = bisect(&WordCounter, "A. B. C. D.", ". ");
        assert_eq!(left, "A. B");
        assert_eq!(right, "C. D.");
    }

    #[test]
    fn rejoining_halves_reconstructs_the_text() {
        let text = "one two\nthree\nfour five six\nseven";
        let (left, right) = bisect(&WordCounter, text, "\n");
        assert!(!left.is_empty() && !right.is_empty());
        assert_eq!(format!("{left}\n{right}"), text);
    }

    #[test]
    fn absorbs_pieces_while_balance_improves() {
        // Cumulative counts 1, 2 against halfway = 2 keep improving until the
        // final piece, so the split lands just before it.
        let (left, right) = bisect(&WordCounter, "a\nb\nc d", "\n");
        assert_eq!(left, "a\nb");
        assert_eq!(right, "c d");
    }

    #[test]
    fn leading_delimiter_can_produce_an_empty_left_half() {
        // First piece is empty, so the first candidate is already no better
        // than the initial halfway diff and the scan stops at index zero.
        let (left, right) = bisect(&WordCounter, "\n\na b\n\nc", "\n\n");
        assert_eq!(left, "");
        assert_eq!(right, "\n\na b\n\nc");
    }
}

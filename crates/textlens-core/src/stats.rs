//! Single-pass text statistics.
//!
//! Lengths are counted in `char`s, not bytes.

use crate::models::analysis::TextAnalysis;

/// Reading speed used for `reading_time_minutes`.
pub const WORDS_PER_MINUTE: f64 = 200.0;

/// Number of characters kept in a text preview before truncation.
pub const PREVIEW_CHARS: usize = 100;

const ELLIPSIS: &str = "...";

pub fn analyze(text: &str) -> TextAnalysis {
    let words: Vec<&str> = text.split_whitespace().collect();
    let word_count = words.len();
    let character_count = text.chars().count();
    let character_count_no_spaces = text.chars().filter(|&c| c != ' ').count();

    let average_word_length = if word_count > 0 {
        round_tenth(character_count_no_spaces as f64 / word_count as f64)
    } else {
        0.0
    };

    TextAnalysis {
        word_count,
        character_count,
        character_count_no_spaces,
        sentence_count: sentence_count(text),
        paragraph_count: paragraph_count(text),
        average_word_length,
        longest_word: longest_word(&words).to_string(),
        reading_time_minutes: round_tenth(word_count as f64 / WORDS_PER_MINUTE),
    }
}

/// Count maximal runs of `.`, `!` or `?`. Never returns zero.
pub fn sentence_count(text: &str) -> usize {
    let mut runs = 0;
    let mut in_run = false;
    for c in text.chars() {
        let terminator = matches!(c, '.' | '!' | '?');
        if terminator && !in_run {
            runs += 1;
        }
        in_run = terminator;
    }
    runs.max(1)
}

pub fn paragraph_count(text: &str) -> usize {
    text.split("\n\n").filter(|p| !p.trim().is_empty()).count()
}

/// The first word with the greatest character length.
pub fn longest_word<'a>(words: &[&'a str]) -> &'a str {
    let mut longest = "";
    let mut longest_len = 0;
    for word in words {
        let len = word.chars().count();
        if len > longest_len {
            longest = word;
            longest_len = len;
        }
    }
    longest
}

/// First [`PREVIEW_CHARS`] characters, with `...` appended when truncated.
pub fn text_preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}

/// Round to one decimal place from the exact binary value, ties to even,
/// so `2.25` gives `2.2` and `0.35` (stored just below) gives `0.3`.
pub fn round_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

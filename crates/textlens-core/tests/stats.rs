use textlens_core::stats::{
    analyze, longest_word, paragraph_count, round_tenth, sentence_count, text_preview,
};

#[test]
fn short_sentence_scenario() {
    let a = analyze("Hello world. This is great!");
    assert_eq!(a.word_count, 5);
    assert_eq!(a.character_count, 27);
    assert_eq!(a.character_count_no_spaces, 23);
    assert_eq!(a.sentence_count, 2);
    assert_eq!(a.paragraph_count, 1);
    assert_eq!(a.average_word_length, 4.6);
    // Punctuation stays attached to the token, so "world." (6) beats "Hello" (5).
    assert_eq!(a.longest_word, "world.");
    assert_eq!(a.reading_time_minutes, 0.0);
}

#[test]
fn word_count_matches_whitespace_split() {
    let text = "  leading\tand trailing\n\nwhitespace   runs  ";
    let a = analyze(text);
    assert_eq!(a.word_count, text.split_whitespace().count());
    assert_eq!(a.word_count, 5);
}

#[test]
fn sentence_count_collapses_runs_and_never_drops_below_one() {
    assert_eq!(sentence_count("Wait... what?! Really."), 3);
    assert_eq!(sentence_count("no terminators here"), 1);
    assert_eq!(sentence_count(""), 1);
    assert_eq!(sentence_count("?!?"), 1);
}

#[test]
fn only_ascii_spaces_are_removed() {
    let a = analyze("a b\tc\nd");
    assert_eq!(a.character_count, 7);
    assert_eq!(a.character_count_no_spaces, 6);

    let no_spaces = analyze("tab\tseparated\nlines");
    assert_eq!(no_spaces.character_count, no_spaces.character_count_no_spaces);
}

#[test]
fn characters_are_counted_not_bytes() {
    let a = analyze("naïve café");
    assert_eq!(a.character_count, 10);
    assert_eq!(a.character_count_no_spaces, 9);
    assert_eq!(a.longest_word, "naïve");
}

#[test]
fn paragraphs_ignore_blank_segments() {
    assert_eq!(paragraph_count("one\n\ntwo\n\n\n\nthree"), 3);
    assert_eq!(paragraph_count("\n\n  \n\nonly"), 1);
    assert_eq!(paragraph_count("single\nnewlines\nstay together"), 1);
    assert_eq!(paragraph_count("   "), 0);
}

#[test]
fn whitespace_only_text_has_no_words() {
    let a = analyze("   \n\t ");
    assert_eq!(a.word_count, 0);
    assert_eq!(a.average_word_length, 0.0);
    assert_eq!(a.longest_word, "");
    assert_eq!(a.sentence_count, 1);
    assert_eq!(a.reading_time_minutes, 0.0);
}

#[test]
fn average_word_length_is_zero_only_without_words() {
    let a = analyze("x");
    assert_eq!(a.word_count, 1);
    assert_eq!(a.average_word_length, 1.0);
}

#[test]
fn longest_word_prefers_first_of_equal_length() {
    assert_eq!(longest_word(&["abc", "xyz", "ab"]), "abc");
    assert_eq!(longest_word(&["ab", "abc", "xyz"]), "abc");
    assert_eq!(longest_word(&[]), "");
}

#[test]
fn averages_round_to_one_decimal() {
    // 10 characters over 3 words = 3.333...
    let a = analyze("abc def ghij");
    assert_eq!(a.average_word_length, 3.3);

    let words = vec!["word"; 450].join(" ");
    let a = analyze(&words);
    assert_eq!(a.word_count, 450);
    assert_eq!(a.reading_time_minutes, 2.2);
}

#[test]
fn exact_halves_round_to_even() {
    // 9 characters over 4 words = 2.25
    assert_eq!(analyze("ab cd ef ghi").average_word_length, 2.2);
    assert_eq!(round_tenth(0.25), 0.2);
    assert_eq!(round_tenth(2.25), 2.2);
    assert_eq!(round_tenth(0.75), 0.8);
}

#[test]
fn reading_time_matches_binary_rounding() {
    for (words, expected) in [(50, 0.2), (70, 0.3), (90, 0.5), (250, 1.2), (450, 2.2), (200, 1.0)] {
        let text = vec!["w"; words].join(" ");
        assert_eq!(analyze(&text).reading_time_minutes, expected, "{words} words");
    }
}

#[test]
fn preview_keeps_short_text_whole() {
    let text = "a".repeat(100);
    assert_eq!(text_preview(&text), text);
    assert_eq!(text_preview(""), "");
}

#[test]
fn preview_truncates_long_text() {
    let text = "b".repeat(150);
    let preview = text_preview(&text);
    assert!(preview.ends_with("..."));
    assert_eq!(preview.chars().count(), 103);
    assert_eq!(&preview[..100], &text[..100]);
}

#[test]
fn preview_truncates_on_character_boundaries() {
    let text = "é".repeat(101);
    let preview = text_preview(&text);
    assert_eq!(preview.chars().count(), 103);
    assert!(preview.starts_with(&"é".repeat(100)));
}

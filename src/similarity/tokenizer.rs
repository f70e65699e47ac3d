// Tokenizer — the shared primitive behind every similarity metric.
//
// Three views of a text:
//   words:       lowercase runs of word characters (Unicode alphanumerics + '_')
//   sentences:   trimmed, non-empty segments between '.', '!' and '?'
//   punctuation: every ',', '.', '!', '?', ';' and ':' in order, duplicates kept
//
// regex-lite only knows ASCII classes, so words are scanned by character
// predicate instead of `\w+`. The sentence and punctuation patterns are
// plain ASCII and go through regex-lite.

use std::sync::OnceLock;

use regex_lite::Regex;

fn sentence_terminator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]").expect("static sentence pattern is valid"))
}

fn punctuation_mark() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[,.!?;:]").expect("static punctuation pattern is valid"))
}

/// Whether `c` counts as part of a word token.
///
/// `char::is_alphanumeric` follows the Unicode Alphabetic property, which
/// also covers combining vowel signs (Other_Alphabetic marks in Devanagari,
/// Bengali, Thai and similar scripts). They stay inside the word here, so
/// "किताब" is one token, where a letters-and-digits-only class would split
/// it at each sign. Latin, Cyrillic, Greek and CJK text is unaffected.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Extract lowercase word tokens in order of appearance.
pub fn words(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    lower
        .split(|c: char| !is_word_char(c))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split text into trimmed, non-empty sentences.
pub fn sentences(text: &str) -> Vec<&str> {
    sentence_terminator()
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Collect every punctuation mark in the text, in order.
pub fn punctuation(text: &str) -> Vec<&str> {
    punctuation_mark()
        .find_iter(text)
        .map(|m| m.as_str())
        .collect()
}

/// Number of whitespace-separated chunks in a sentence.
///
/// Sentence length is measured this way rather than in word tokens, so
/// "well-known" counts once and a stray "--" still counts.
pub fn sentence_word_count(sentence: &str) -> usize {
    sentence.split_whitespace().count()
}

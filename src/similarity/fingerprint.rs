// StylisticFingerprint — a five-number summary of how a text is written.
//
// The components, in order:
//   avg_sentence_len     words per sentence
//   avg_word_len         characters per word token
//   punctuation_density  punctuation marks per word token
//   lexical_diversity    distinct word tokens / word tokens (0.0 to 1.0)
//   short_sentence_ratio share of sentences under 5 words (0.0 to 1.0)
//
// Each component is rounded to 3 decimals. Two fingerprints are compared
// with a normalized Manhattan distance: every position contributes
// |a - b| / (max(a, b) + epsilon), and the score is 1 minus the mean.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::round_to;
use super::tokenizer;

/// Sentences with fewer words than this count as short.
pub const SHORT_SENTENCE_WORDS: usize = 5;

/// Default epsilon guarding the distance denominator.
pub const DEFAULT_EPSILON: f64 = 1e-8;

/// The stylistic feature vector of a single text.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StylisticFingerprint {
    pub avg_sentence_len: f64,
    pub avg_word_len: f64,
    pub punctuation_density: f64,
    pub lexical_diversity: f64,
    pub short_sentence_ratio: f64,
}

impl StylisticFingerprint {
    /// Derive the fingerprint of `text`. Empty denominators resolve to 0.0.
    pub fn compute(text: &str) -> Self {
        let sentences = tokenizer::sentences(text);
        let words = tokenizer::words(text);
        let punctuation = tokenizer::punctuation(text);

        let sentence_lens: Vec<usize> = sentences
            .iter()
            .map(|s| tokenizer::sentence_word_count(s))
            .collect();

        let avg_sentence_len = ratio(sentence_lens.iter().sum::<usize>(), sentence_lens.len());
        let avg_word_len = ratio(
            words.iter().map(|w| w.chars().count()).sum::<usize>(),
            words.len(),
        );
        let punctuation_density = ratio(punctuation.len(), words.len());
        let distinct: HashSet<&str> = words.iter().map(String::as_str).collect();
        let lexical_diversity = ratio(distinct.len(), words.len());
        let short_sentence_ratio = ratio(
            sentence_lens
                .iter()
                .filter(|&&n| n < SHORT_SENTENCE_WORDS)
                .count(),
            sentence_lens.len(),
        );

        Self {
            avg_sentence_len: round_to(avg_sentence_len, 3),
            avg_word_len: round_to(avg_word_len, 3),
            punctuation_density: round_to(punctuation_density, 3),
            lexical_diversity: round_to(lexical_diversity, 3),
            short_sentence_ratio: round_to(short_sentence_ratio, 3),
        }
    }

    /// The components as a positional array.
    pub fn to_array(&self) -> [f64; 5] {
        [
            self.avg_sentence_len,
            self.avg_word_len,
            self.punctuation_density,
            self.lexical_diversity,
            self.short_sentence_ratio,
        ]
    }

    /// Similarity of two fingerprints using the default epsilon.
    pub fn compare(fp1: &Self, fp2: &Self) -> f64 {
        compare_with_epsilon(&fp1.to_array(), &fp2.to_array(), DEFAULT_EPSILON)
    }
}

/// Normalized-distance similarity between two feature vectors.
///
/// Positions where both values are exactly zero contribute no difference,
/// which is why two empty texts score 1.0. Returns 0.0 for empty input.
pub fn compare_with_epsilon(fp1: &[f64], fp2: &[f64], epsilon: f64) -> f64 {
    let diffs: Vec<f64> = fp1
        .iter()
        .zip(fp2)
        .map(|(&a, &b)| {
            if a == 0.0 && b == 0.0 {
                0.0
            } else {
                (a - b).abs() / (a.max(b) + epsilon)
            }
        })
        .collect();

    if diffs.is_empty() {
        return 0.0;
    }

    let mean = diffs.iter().sum::<f64>() / diffs.len() as f64;
    round_to(1.0 - mean, 4)
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_short_text() {
        let fp = StylisticFingerprint::compute("Cats run.");
        assert_eq!(fp.to_array(), [2.0, 3.5, 0.5, 1.0, 1.0]);
    }

    #[test]
    fn test_compute_mixed_sentences() {
        let fp = StylisticFingerprint::compute(
            "Hello world, this is a test! Short one. \
             And here is a much longer sentence with many words in it?",
        );
        assert_eq!(fp.to_array(), [6.667, 3.7, 0.2, 0.9, 0.333]);
    }

    #[test]
    fn test_compute_empty_is_all_zero() {
        let fp = StylisticFingerprint::compute("");
        assert_eq!(fp, StylisticFingerprint::default());
    }

    #[test]
    fn test_compute_punctuation_only() {
        // ",;" survives as a one-chunk sentence; with no words the
        // word-based components stay at 0.0
        let fp = StylisticFingerprint::compute("?!.,;");
        assert_eq!(fp.to_array(), [1.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_compute_counts_characters_not_bytes() {
        let fp = StylisticFingerprint::compute("Привіт");
        assert_eq!(fp.avg_word_len, 6.0);
    }

    #[test]
    fn test_compute_exact_tie_rounds_to_even() {
        // 15 one-letter words plus one 18-letter word: 33 / 16 = 2.0625
        let text = format!("{} abcdefghijklmnopqr", vec!["a"; 15].join(" "));
        let fp = StylisticFingerprint::compute(&text);
        assert_eq!(fp.avg_word_len, 2.062);
        assert_eq!(fp.lexical_diversity, 0.125);
    }

    #[test]
    fn test_compare_identical() {
        let fp = StylisticFingerprint::compute("The cat sat on the mat.");
        assert_eq!(StylisticFingerprint::compare(&fp, &fp), 1.0);
    }

    #[test]
    fn test_compare_both_zero() {
        let zero = StylisticFingerprint::default();
        assert_eq!(StylisticFingerprint::compare(&zero, &zero), 1.0);
    }

    #[test]
    fn test_compare_one_zero() {
        let zero = StylisticFingerprint::default();
        let fp = StylisticFingerprint::compute("Something here.");
        assert_eq!(StylisticFingerprint::compare(&zero, &fp), 0.0);
    }

    #[test]
    fn test_compare_symmetric() {
        let a = StylisticFingerprint::compute("The quick brown fox jumps over the lazy dog. The dog sleeps.");
        let b = StylisticFingerprint::compute("A quick brown dog runs past the sleeping fox!");
        let ab = StylisticFingerprint::compare(&a, &b);
        assert_eq!(ab, StylisticFingerprint::compare(&b, &a));
        assert_eq!(ab, 0.6121);
    }

    #[test]
    fn test_compare_with_epsilon_empty_slices() {
        assert_eq!(compare_with_epsilon(&[], &[], DEFAULT_EPSILON), 0.0);
    }

    #[test]
    fn test_compare_with_epsilon_half_difference() {
        // |2 - 1| / 2 = 0.5 at one position, 0 at the other → 1 - 0.25
        let score = compare_with_epsilon(&[2.0, 1.0], &[1.0, 1.0], 0.0);
        assert_eq!(score, 0.75);
    }
}

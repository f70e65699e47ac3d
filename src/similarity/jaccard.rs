// Jaccard similarity over word sets.
//
// Each text is reduced to its set of distinct lowercase word tokens, and the
// score is:
//
//   |words_a ∩ words_b| / |words_a ∪ words_b|
//
// This gives 0.0 for no shared vocabulary and 1.0 for identical vocabularies,
// regardless of how often each word appears.

use std::collections::HashSet;

use super::round_to;
use super::tokenizer;

/// Compute the Jaccard similarity of two texts, rounded to 4 decimals.
///
/// Returns 0.0 when neither text contains any word tokens.
pub fn jaccard_similarity(text1: &str, text2: &str) -> f64 {
    let words_a: HashSet<String> = tokenizer::words(text1).into_iter().collect();
    let words_b: HashSet<String> = tokenizer::words(text2).into_iter().collect();

    jaccard_from_sets(&words_a, &words_b)
}

/// Compute Jaccard similarity from prebuilt word sets.
pub fn jaccard_from_sets(words_a: &HashSet<String>, words_b: &HashSet<String>) -> f64 {
    let union = words_a.union(words_b).count();
    if union == 0 {
        return 0.0;
    }

    let intersection = words_a.intersection(words_b).count();
    round_to(intersection as f64 / union as f64, 4)
}

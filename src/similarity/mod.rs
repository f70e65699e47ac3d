// Text similarity engine — tokenization, stylistic fingerprints, Jaccard
// overlap, and TF-IDF cosine similarity.
//
// Everything in here is a pure function of its input strings. Nothing is
// cached between calls, so the engine can be shared freely across threads.

pub mod comparer;
pub mod fingerprint;
pub mod jaccard;
pub mod tfidf;
pub mod tokenizer;
pub mod traits;

/// Round `value` to `places` decimal places.
///
/// Rounds the exact binary value to nearest, ties to even, so 0.03125
/// becomes 0.0312 and 0.09375 becomes 0.0938. Scaling by a power of ten
/// and calling `f64::round` would push ties away from zero instead.
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}

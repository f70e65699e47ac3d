// Similarity metric trait — one interface over the three scoring engines.
//
// TextComparer runs all three metrics directly, but callers that only want
// a subset (or want to add their own) can work through this trait.

use super::fingerprint::StylisticFingerprint;
use super::jaccard::jaccard_similarity;
use super::tfidf::tfidf_similarity;

/// A pairwise text similarity score.
pub trait SimilarityMetric: Send + Sync {
    /// Short identifier used as the result key.
    fn name(&self) -> &'static str;

    /// Score a pair of texts. Implementations must be symmetric.
    fn score(&self, text1: &str, text2: &str) -> f64;
}

/// Stylistic fingerprint distance.
pub struct StylisticMetric;

impl SimilarityMetric for StylisticMetric {
    fn name(&self) -> &'static str {
        "stylistic"
    }

    fn score(&self, text1: &str, text2: &str) -> f64 {
        let fp1 = StylisticFingerprint::compute(text1);
        let fp2 = StylisticFingerprint::compute(text2);
        StylisticFingerprint::compare(&fp1, &fp2)
    }
}

/// Word-set overlap.
pub struct JaccardMetric;

impl SimilarityMetric for JaccardMetric {
    fn name(&self) -> &'static str {
        "jaccard"
    }

    fn score(&self, text1: &str, text2: &str) -> f64 {
        jaccard_similarity(text1, text2)
    }
}

/// TF-IDF cosine similarity over the pair's shared vocabulary.
pub struct TfIdfMetric;

impl SimilarityMetric for TfIdfMetric {
    fn name(&self) -> &'static str {
        "tfidf"
    }

    fn score(&self, text1: &str, text2: &str) -> f64 {
        tfidf_similarity(text1, text2)
    }
}

/// All built-in metrics, in result order.
pub fn default_metrics() -> Vec<Box<dyn SimilarityMetric>> {
    vec![
        Box::new(StylisticMetric),
        Box::new(JaccardMetric),
        Box::new(TfIdfMetric),
    ]
}

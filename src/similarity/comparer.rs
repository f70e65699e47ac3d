// TextComparer — runs every metric over a document pair.
//
// The result record is built fresh per call. The boundary layers (CLI and
// web) wrap it in a ComparisonReport that also carries both fingerprints and
// a generation timestamp.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::fingerprint::StylisticFingerprint;
use super::jaccard::jaccard_similarity;
use super::tfidf::{cosine, TfIdfModel};

/// The three similarity scores for a pair of texts, each rounded to 4 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub stylistic: f64,
    pub jaccard: f64,
    pub tfidf: f64,
}

/// A comparison result plus the context a caller shows alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    #[serde(flatten)]
    pub scores: ComparisonResult,
    pub fingerprints: [StylisticFingerprint; 2],
    /// Local generation time, `%Y-%m-%d %H:%M:%S`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated: Option<String>,
}

/// Compares two texts across every metric.
#[derive(Debug, Clone, Copy)]
pub struct TextComparer<'a> {
    text1: &'a str,
    text2: &'a str,
}

impl<'a> TextComparer<'a> {
    pub fn new(text1: &'a str, text2: &'a str) -> Self {
        Self { text1, text2 }
    }

    /// Compute all three scores.
    pub fn compare_all(&self) -> ComparisonResult {
        let fp1 = StylisticFingerprint::compute(self.text1);
        let fp2 = StylisticFingerprint::compute(self.text2);
        self.scores_with(&fp1, &fp2)
    }

    /// Compute all three scores along with both fingerprints.
    ///
    /// `generated` is left empty; the boundary layer stamps it.
    pub fn report(&self) -> ComparisonReport {
        let fp1 = StylisticFingerprint::compute(self.text1);
        let fp2 = StylisticFingerprint::compute(self.text2);
        ComparisonReport {
            scores: self.scores_with(&fp1, &fp2),
            fingerprints: [fp1, fp2],
            generated: None,
        }
    }

    fn scores_with(&self, fp1: &StylisticFingerprint, fp2: &StylisticFingerprint) -> ComparisonResult {
        let stylistic = StylisticFingerprint::compare(fp1, fp2);
        let jaccard = jaccard_similarity(self.text1, self.text2);

        let model = TfIdfModel::new(&[self.text1, self.text2]);
        let vectors = model.vectors();
        let tfidf = cosine(&vectors[0], &vectors[1]);

        debug!(
            stylistic,
            jaccard,
            tfidf,
            vocabulary = model.vocabulary().len(),
            "Compared text pair"
        );

        ComparisonResult {
            stylistic,
            jaccard,
            tfidf,
        }
    }
}

impl ComparisonReport {
    /// Attach the current local time as the generation timestamp.
    pub fn stamped(mut self) -> Self {
        self.generated = Some(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string());
        self
    }
}

// TF-IDF vector model with cosine similarity.
//
// A model is built over a small corpus (normally the two texts being
// compared). Every document gets one component per vocabulary term, in
// sorted term order so vectors line up positionally:
//
//   idf(term) = ln((N + 1) / (df(term) + 1)) + 1
//   tf(term)  = 1 + ln(count)   when count > 0, else 0
//   weight    = tf * idf
//
// Vectors are L2-normalized, so the dot product of two of them is their
// cosine similarity. The smoothed IDF never reaches zero, even for terms that
// appear in every document.

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::debug;

use super::round_to;
use super::tokenizer;

/// TF-IDF model over a fixed corpus of texts.
#[derive(Debug, Clone)]
pub struct TfIdfModel {
    /// Word tokens of each document, in corpus order
    documents: Vec<Vec<String>>,
    /// Sorted, deduplicated terms across all documents
    vocabulary: Vec<String>,
    /// Smoothed inverse document frequency, aligned with `vocabulary`
    idf: Vec<f64>,
}

impl TfIdfModel {
    /// Build the vocabulary and IDF weights for `texts`.
    pub fn new<S: AsRef<str>>(texts: &[S]) -> Self {
        let documents: Vec<Vec<String>> = texts
            .iter()
            .map(|t| tokenizer::words(t.as_ref()))
            .collect();

        let vocabulary: Vec<String> = documents
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let doc_sets: Vec<HashSet<&str>> = documents
            .iter()
            .map(|doc| doc.iter().map(String::as_str).collect())
            .collect();

        let n = documents.len() as f64;
        let idf = vocabulary
            .iter()
            .map(|term| {
                let df = doc_sets
                    .iter()
                    .filter(|set| set.contains(term.as_str()))
                    .count() as f64;
                ((n + 1.0) / (df + 1.0)).ln() + 1.0
            })
            .collect();

        debug!(
            documents = documents.len(),
            vocabulary = vocabulary.len(),
            "Built TF-IDF model"
        );

        Self {
            documents,
            vocabulary,
            idf,
        }
    }

    /// The sorted vocabulary shared by every vector.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// IDF weight per vocabulary term.
    pub fn idf(&self) -> HashMap<&str, f64> {
        self.vocabulary
            .iter()
            .map(String::as_str)
            .zip(self.idf.iter().copied())
            .collect()
    }

    /// Normalized TF-IDF vectors, one per document in corpus order.
    pub fn vectors(&self) -> Vec<Vec<f64>> {
        self.documents
            .iter()
            .map(|doc| self.vectorize(doc))
            .collect()
    }

    fn vectorize(&self, tokens: &[String]) -> Vec<f64> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for token in tokens {
            *counts.entry(token.as_str()).or_insert(0) += 1;
        }

        let mut vector: Vec<f64> = self
            .vocabulary
            .iter()
            .zip(&self.idf)
            .map(|(term, idf)| {
                let count = counts.get(term.as_str()).copied().unwrap_or(0);
                let tf = if count > 0 {
                    1.0 + (count as f64).ln()
                } else {
                    0.0
                };
                tf * idf
            })
            .collect();

        // A document with no terms stays the zero vector
        let norm = vector.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }
        vector
    }
}

/// Cosine similarity of two normalized vectors, rounded to 4 decimals.
///
/// Returns 0.0 if either vector is empty (no shared vocabulary at all).
pub fn cosine(vec1: &[f64], vec2: &[f64]) -> f64 {
    if vec1.is_empty() || vec2.is_empty() {
        return 0.0;
    }
    let dot: f64 = vec1.iter().zip(vec2).map(|(a, b)| a * b).sum();
    round_to(dot, 4)
}

/// Build a model over the pair and return the cosine similarity of their vectors.
pub fn tfidf_similarity(text1: &str, text2: &str) -> f64 {
    let model = TfIdfModel::new(&[text1, text2]);
    let vectors = model.vectors();
    cosine(&vectors[0], &vectors[1])
}

use std::collections::{HashMap, HashSet};

use crate::error::{AppError, AppResult};
use crate::recs::stopwords::StopWords;

/// A document vector stored as (column, weight) pairs sorted by column
pub type SparseVector = Vec<(usize, f64)>;

/// A fitted term-weighting model over one catalog snapshot.
///
/// Holds one L2-normalized TF-IDF vector per document, in corpus order, so
/// that a plain sparse dot product between two vectors is their cosine
/// similarity. The space is immutable once fit; any change to the catalog
/// (new video, edited metadata) requires a full refit.
///
/// Fitting is deterministic: vocabulary columns are assigned in order of
/// first occurrence over the ordered corpus, and no step involves hashing
/// order or randomness, so an identical corpus always yields identical
/// vectors.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    vocabulary: HashMap<String, usize>,
    vectors: Vec<SparseVector>,
}

impl VectorSpace {
    /// Fits a vector space over the corpus using English stop words.
    ///
    /// Errors with `AppError::EmptyCatalog` on an empty corpus. A corpus of
    /// only empty (or all-stop-word) texts fits successfully to a degenerate
    /// all-zero space whose similarity rows are all zeros.
    pub fn fit<S: AsRef<str>>(corpus: &[S]) -> AppResult<Self> {
        Self::fit_with_stop_words(corpus, &StopWords::english())
    }

    /// Fits a vector space with a caller-supplied stop-word set
    pub fn fit_with_stop_words<S: AsRef<str>>(
        corpus: &[S],
        stop_words: &StopWords,
    ) -> AppResult<Self> {
        if corpus.is_empty() {
            return Err(AppError::EmptyCatalog);
        }

        let tokenized: Vec<Vec<String>> = corpus
            .iter()
            .map(|text| tokenize(text.as_ref(), stop_words))
            .collect();

        // Columns in first-occurrence order keep fitting deterministic.
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        for tokens in &tokenized {
            for token in tokens {
                if !vocabulary.contains_key(token) {
                    let column = vocabulary.len();
                    vocabulary.insert(token.clone(), column);
                }
            }
        }

        // Document frequency per column.
        let mut doc_freq = vec![0usize; vocabulary.len()];
        for tokens in &tokenized {
            let mut seen: HashSet<usize> = HashSet::new();
            for token in tokens {
                seen.insert(vocabulary[token]);
            }
            for column in seen {
                doc_freq[column] += 1;
            }
        }

        // Smoothed IDF, strictly positive so even corpus-wide terms retain
        // some weight: idf(t) = ln((1 + N) / (1 + df(t))) + 1.
        let n_docs = corpus.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let vectors = tokenized
            .iter()
            .map(|tokens| weigh_document(tokens, &vocabulary, &idf))
            .collect();

        Ok(Self { vocabulary, vectors })
    }

    /// Number of documents in the space
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Number of distinct terms in the vocabulary
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub(crate) fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }
}

/// Lowercases and splits on non-alphanumeric boundaries, dropping stop words
/// and single-character tokens.
fn tokenize(text: &str, stop_words: &StopWords) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() > 1)
        .filter(|token| !stop_words.contains(token))
        .map(str::to_string)
        .collect()
}

/// Builds one L2-normalized TF-IDF vector, sorted by column
fn weigh_document(
    tokens: &[String],
    vocabulary: &HashMap<String, usize>,
    idf: &[f64],
) -> SparseVector {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for token in tokens {
        *counts.entry(vocabulary[token]).or_insert(0) += 1;
    }

    let mut vector: SparseVector = counts
        .into_iter()
        .map(|(column, count)| (column, count as f64 * idf[column]))
        .collect();
    vector.sort_by_key(|&(column, _)| column);

    let norm = vector.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, weight) in &mut vector {
            *weight /= norm;
        }
    }

    vector
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_corpus_is_an_error() {
        let corpus: Vec<String> = vec![];
        assert!(matches!(
            VectorSpace::fit(&corpus),
            Err(AppError::EmptyCatalog)
        ));
    }

    #[test]
    fn test_single_document_fits() {
        let space = VectorSpace::fit(&["rust async runtime"]).unwrap();
        assert_eq!(space.len(), 1);
        assert_eq!(space.vocabulary_size(), 3);
    }

    #[test]
    fn test_all_empty_corpus_is_degenerate_not_an_error() {
        let space = VectorSpace::fit(&["", "", ""]).unwrap();
        assert_eq!(space.len(), 3);
        assert_eq!(space.vocabulary_size(), 0);
        assert!(space.vectors().iter().all(|v| v.is_empty()));
    }

    #[test]
    fn test_stop_words_and_short_tokens_excluded() {
        let space = VectorSpace::fit(&["the cat and the dog", "a b c"]).unwrap();
        // "the", "and", "a" are stop words; "b", "c" are single characters
        assert_eq!(space.vocabulary_size(), 2);
    }

    #[test]
    fn test_vectors_are_unit_length() {
        let space = VectorSpace::fit(&["cats dogs", "dogs birds fish"]).unwrap();
        for vector in space.vectors() {
            let norm_sq: f64 = vector.iter().map(|&(_, w)| w * w).sum();
            assert!((norm_sq - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_shared_rare_terms_outweigh_common_ones() {
        let space = VectorSpace::fit(&[
            "music video music",
            "music video gardening",
            "music video cooking",
        ])
        .unwrap();
        // "gardening" appears in one document, "music" in all three; the
        // rarer term must carry the larger IDF.
        let doc = &space.vectors()[1];
        let music = space.vocabulary["music"];
        let gardening = space.vocabulary["gardening"];
        let weight_of = |col: usize| {
            doc.iter()
                .find(|&&(c, _)| c == col)
                .map(|&(_, w)| w)
                .unwrap()
        };
        assert!(weight_of(gardening) > weight_of(music));
    }

    #[test]
    fn test_refit_is_deterministic() {
        let corpus = ["space rockets launch", "cats dogs", "rust programming"];
        let a = VectorSpace::fit(&corpus).unwrap();
        let b = VectorSpace::fit(&corpus).unwrap();
        assert_eq!(a.vectors(), b.vectors());
        assert_eq!(a.vocabulary, b.vocabulary);
    }

    #[test]
    fn test_tokenize_splits_on_punctuation() {
        let tokens = tokenize("Hello, world! Rust-lang 2024", &StopWords::english());
        assert_eq!(tokens, vec!["hello", "world", "rust", "lang", "2024"]);
    }
}

//! TF-IDF ranking over an [`Index`].
//!
//! - `tf = count / document_length` (length after stopword removal)
//! - `idf = log10(N / (1 + df))`
//!
//! Because of the `+ 1` in the idf denominator, a term present in `N - 1` documents gets
//! `idf == 0` and a term present in every document gets a *negative* idf, ranking documents
//! where it is dense below documents where it is sparse.
//!
//! Query terms are scored once per occurrence, so `"cat cat"` weighs `cat` twice.

use crate::analysis::tokenize;
use crate::index::Index;
use crate::DocId;
use std::collections::HashMap;

/// `log10(num_docs / (1 + doc_frequency))`.
pub fn idf(num_docs: u32, doc_frequency: u32) -> f64 {
    (f64::from(num_docs) / (1.0 + f64::from(doc_frequency))).log10()
}

/// `count / document_length`.
pub fn tf(count: u32, document_length: u32) -> f64 {
    f64::from(count) / f64::from(document_length)
}

/// Accumulated score per document for already-tokenized query terms.
///
/// Only documents sharing at least one term with the query appear; terms unknown to the
/// index contribute nothing.
pub fn score_terms(index: &Index, query_terms: &[String]) -> HashMap<DocId, f64> {
    let num_docs = index.num_docs();
    let mut scores: HashMap<DocId, f64> = HashMap::new();
    for term in query_terms {
        let postings = index.postings(term);
        if postings.is_empty() {
            continue;
        }
        let idf = idf(num_docs, postings.len() as u32);
        for p in postings {
            let tf = tf(p.count, index.document_length(p.doc_id));
            *scores.entry(p.doc_id).or_insert(0.0) += tf * idf;
        }
    }
    scores
}

/// Rank tokenized query terms: documents with a non-zero score, best first.
pub fn rank_terms(index: &Index, query_terms: &[String]) -> Vec<(DocId, f64)> {
    let mut ranked: Vec<(DocId, f64)> = score_terms(index, query_terms)
        .into_iter()
        .filter(|&(_, score)| score != 0.0)
        .collect();

    // Deterministic: score desc, then doc_id asc.
    ranked.sort_unstable_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// Tokenize `query` with the index's stopwords and rank every matching document.
///
/// An empty query, or one made only of stopwords or unknown terms, yields no results.
pub fn rank(index: &Index, query: &str) -> Vec<(DocId, f64)> {
    let terms = tokenize(query, index.stopwords());
    if terms.is_empty() {
        return Vec::new();
    }
    rank_terms(index, &terms)
}

/// Top-`k` of [`rank`].
pub fn retrieve(index: &Index, query: &str, k: usize) -> Vec<(DocId, f64)> {
    if k == 0 {
        return Vec::new();
    }
    let mut ranked = rank(index, query);
    ranked.truncate(k);
    ranked
}

//! Inverted index: term -> postings, plus document lengths and the autocomplete trie.
//!
//! Construction is two-phase. An [`IndexBuilder`] ingests each document exactly once;
//! [`IndexBuilder::finish`] then hands back an immutable [`Index`] that only answers queries.

use crate::analysis::{tokenize, Stopwords};
use crate::trie::{Alphabet, PrefixIndex, DEFAULT_SUGGESTION_LIMIT};
use crate::{DocId, Error};
use std::collections::HashMap;

/// One (document, occurrence count) record in a term's postings list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    /// Document containing the term.
    pub doc_id: DocId,
    /// Occurrences of the term in that document (after stopword removal).
    pub count: u32,
}

/// Index construction parameters.
#[derive(Debug, Clone, Copy)]
pub struct IndexConfig {
    /// Alphabet of the autocomplete trie.
    pub alphabet: Alphabet,
    /// Maximum suggestions returned by [`Index::autocomplete`].
    pub suggestion_limit: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::Lowercase,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

impl IndexConfig {
    /// Autocomplete over letters and digits, so digit-bearing tokens can be suggested.
    pub fn alphanumeric() -> Self {
        Self {
            alphabet: Alphabet::Alphanumeric,
            ..Self::default()
        }
    }
}

/// Shared storage of the builder and the frozen index.
#[derive(Debug)]
struct Inner {
    config: IndexConfig,
    stopwords: Stopwords,
    postings: HashMap<String, Vec<Posting>>,
    doc_lengths: HashMap<DocId, u32>,
    prefixes: PrefixIndex,
}

/// Mutable ingestion phase.
#[derive(Debug)]
pub struct IndexBuilder {
    inner: Inner,
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new(Stopwords::empty())
    }
}

impl IndexBuilder {
    /// New builder with the default configuration.
    pub fn new(stopwords: Stopwords) -> Self {
        Self::with_config(stopwords, IndexConfig::default())
    }

    /// New builder with an explicit configuration.
    pub fn with_config(stopwords: Stopwords, config: IndexConfig) -> Self {
        Self {
            inner: Inner {
                config,
                stopwords,
                postings: HashMap::new(),
                doc_lengths: HashMap::new(),
                prefixes: PrefixIndex::new(config.alphabet),
            },
        }
    }

    /// Number of documents ingested so far.
    pub fn num_docs(&self) -> u32 {
        self.inner.doc_lengths.len() as u32
    }

    /// Tokenize and index one document.
    ///
    /// Every distinct token gets one posting carrying its in-document count, appended in
    /// order of first occurrence; every token goes into the autocomplete trie. A `doc_id`
    /// seen before is rejected and the index is left unchanged.
    pub fn add_document(&mut self, doc_id: DocId, text: &str) -> Result<(), Error> {
        let inner = &mut self.inner;
        if inner.doc_lengths.contains_key(&doc_id) {
            return Err(Error::DuplicateDocument(doc_id));
        }

        let tokens = tokenize(text, &inner.stopwords);
        inner.doc_lengths.insert(doc_id, tokens.len() as u32);

        let mut counts: Vec<(&str, u32)> = Vec::new();
        let mut slot_of: HashMap<&str, usize> = HashMap::new();
        for token in &tokens {
            inner.prefixes.insert(token.as_str());
            match slot_of.get(token.as_str()) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    slot_of.insert(token.as_str(), counts.len());
                    counts.push((token.as_str(), 1));
                }
            }
        }

        for (term, count) in counts {
            inner
                .postings
                .entry(term.to_string())
                .or_default()
                .push(Posting { doc_id, count });
        }
        tracing::trace!(doc_id, tokens = tokens.len(), "indexed document");
        Ok(())
    }

    /// Freeze into a read-only index.
    pub fn finish(self) -> Index {
        tracing::debug!(
            docs = self.inner.doc_lengths.len(),
            terms = self.inner.postings.len(),
            "index finished"
        );
        Index { inner: self.inner }
    }
}

/// Read-only query phase.
#[derive(Debug)]
pub struct Index {
    inner: Inner,
}

impl Index {
    /// Count of ingested documents (including ones with no tokens).
    pub fn num_docs(&self) -> u32 {
        self.inner.doc_lengths.len() as u32
    }

    /// Number of distinct terms.
    pub fn num_terms(&self) -> usize {
        self.inner.postings.len()
    }

    /// Postings for `term` in ingestion order (empty if the term is unknown).
    pub fn postings(&self, term: &str) -> &[Posting] {
        self.inner
            .postings
            .get(term)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of documents containing `term`.
    pub fn doc_frequency(&self, term: &str) -> u32 {
        self.postings(term).len() as u32
    }

    /// Stopword-filtered token count of `doc_id`. Returns 0 for unknown doc ids.
    pub fn document_length(&self, doc_id: DocId) -> u32 {
        self.inner.doc_lengths.get(&doc_id).copied().unwrap_or(0)
    }

    /// Stopwords applied at ingestion, reused for queries.
    pub fn stopwords(&self) -> &Stopwords {
        &self.inner.stopwords
    }

    /// The autocomplete trie.
    pub fn prefixes(&self) -> &PrefixIndex {
        &self.inner.prefixes
    }

    /// Suggestions for a literal prefix (no normalization, no stopwords).
    pub fn autocomplete(&self, prefix: &str) -> Vec<String> {
        self.inner
            .prefixes
            .lookup(prefix, self.inner.config.suggestion_limit)
    }

    /// Rank documents for a free-text query (see [`crate::tfidf::rank`]).
    pub fn search(&self, query: &str) -> Vec<(DocId, f64)> {
        crate::tfidf::rank(self, query)
    }

    /// Rough heap footprint of the postings table, in bytes.
    ///
    /// Counts term string capacity, one `Vec` header per term and posting capacity; the
    /// hash table itself, document lengths and the trie are not included.
    pub fn approx_memory_bytes(&self) -> usize {
        self.inner
            .postings
            .iter()
            .map(|(term, list)| {
                term.capacity()
                    + std::mem::size_of::<Vec<Posting>>()
                    + list.capacity() * std::mem::size_of::<Posting>()
            })
            .sum()
    }
}

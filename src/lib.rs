//! `minir`: a minimal in-memory lexical retrieval engine.
//!
//! The pieces, leaves first:
//! - [`analysis`] normalizes raw words and tokenizes text (ASCII alphanumeric, stopwords removed).
//! - [`trie`] is the prefix index behind autocomplete.
//! - [`index`] builds the inverted index (postings + document lengths) in a single pass and
//!   freezes it into a read-only [`Index`].
//! - [`tfidf`] ranks documents for a free-text query.
//! - [`corpus`] and [`request`] are the thin outer layer: reading a document directory and
//!   telling search requests apart from autocomplete requests.
//!
//! Scope:
//! - In-memory, build-then-query (no updates after [`IndexBuilder::finish`])
//! - Deterministic ranking (tie-break by doc id)
//! - Deterministic autocomplete (lexicographic depth-first order)
//!
//! Non-goals:
//! - Persistence, deletion, incremental updates
//! - Phrase queries / positional postings
//! - Unicode-aware normalization

pub mod analysis;
pub mod corpus;
pub mod index;
pub mod request;
pub mod tfidf;
pub mod trie;

pub use analysis::Stopwords;
pub use error::Error;
pub use index::{Index, IndexBuilder, IndexConfig, Posting};
pub use trie::{Alphabet, PrefixIndex};

/// Opaque document identity, assigned by whoever feeds documents into the index.
pub type DocId = u32;

mod error {
    use crate::DocId;
    use std::path::PathBuf;

    /// Errors for indexing.
    #[derive(thiserror::Error, Debug)]
    pub enum Error {
        /// The document id was already ingested; its postings are left untouched.
        #[error("document {0} is already indexed")]
        DuplicateDocument(DocId),
        /// A corpus path could not be traversed or read.
        #[error("failed to read {}: {source}", .path.display())]
        Io {
            /// Path that failed.
            path: PathBuf,
            /// Underlying I/O error.
            #[source]
            source: std::io::Error,
        },
    }
}

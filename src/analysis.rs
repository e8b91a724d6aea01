//! Normalization and tokenization.
//!
//! Text is split on ASCII whitespace, every word is reduced to its lowercase ASCII
//! alphanumerics, and empty results and stopwords are dropped. Nothing here is Unicode-aware:
//! non-ASCII bytes are simply deleted.

use std::collections::HashSet;
use std::io;
use std::path::Path;

/// Reduce a raw word to a token: ASCII alphanumerics only, lowercased, in order.
///
/// The result may be empty (e.g. for `"--"`).
pub fn normalize(word: &str) -> String {
    word.bytes()
        .filter(u8::is_ascii_alphanumeric)
        .map(|b| char::from(b.to_ascii_lowercase()))
        .collect()
}

// Same set as C `isspace` in the default locale (note: includes vertical tab).
fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Lazily tokenize `text`, in left-to-right order, keeping duplicates.
pub fn tokens<'a>(text: &'a str, stopwords: &'a Stopwords) -> impl Iterator<Item = String> + 'a {
    text.split(is_separator)
        .filter(|word| !word.is_empty())
        .map(normalize)
        .filter(move |token| !token.is_empty() && !stopwords.contains(token))
}

/// Tokenize `text` into a vector (see [`tokens`]).
pub fn tokenize(text: &str, stopwords: &Stopwords) -> Vec<String> {
    tokens(text, stopwords).collect()
}

/// Immutable set of words excluded from indexing and querying.
///
/// Words are stored verbatim: a stopword containing uppercase or punctuation can never
/// match a normalized token.
#[derive(Debug, Clone, Default)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// An empty stopword set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse whitespace-separated stopwords.
    pub fn parse(text: &str) -> Self {
        text.split(is_separator)
            .filter(|w| !w.is_empty())
            .collect()
    }

    /// Load stopwords from a file.
    ///
    /// A missing or unreadable file yields an empty set; the engine keeps working without
    /// stopword filtering.
    pub fn load(path: &Path) -> Self {
        match std::fs::read(path) {
            Ok(bytes) => {
                let stopwords = Self::parse(&String::from_utf8_lossy(&bytes));
                tracing::debug!(path = %path.display(), count = stopwords.len(), "loaded stopwords");
                stopwords
            }
            Err(err) => {
                if err.kind() == io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), "stopword file not found, using none");
                } else {
                    tracing::warn!(path = %path.display(), error = %err, "cannot read stopword file, using none");
                }
                Self::empty()
            }
        }
    }

    /// Whether `token` is a stopword.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Number of stopwords.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Stopwords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}

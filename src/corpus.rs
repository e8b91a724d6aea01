//! Corpus ingestion from a directory tree.
//!
//! Every regular file under the root is one document. Paths are sorted before ids are
//! handed out, so the same directory always yields the same ids. File contents are decoded
//! lossily: bytes that are not valid UTF-8 become replacement characters, which the
//! normalizer drops like any other non-ASCII input.

use crate::index::IndexBuilder;
use crate::{DocId, Error};
use std::fs;
use std::path::{Path, PathBuf};

/// How to treat a document that cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadPolicy {
    /// Fail the whole ingestion.
    #[default]
    Abort,
    /// Log a warning and move on; the file gets no doc id.
    Skip,
}

/// Doc id -> path mapping for an ingested corpus.
#[derive(Debug, Default)]
pub struct Corpus {
    paths: Vec<PathBuf>,
}

impl Corpus {
    /// Path of an ingested document.
    pub fn path(&self, doc_id: DocId) -> Option<&Path> {
        self.paths.get(doc_id as usize).map(PathBuf::as_path)
    }

    /// Number of ingested documents.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether nothing was ingested.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// All regular files below `root`, sorted.
///
/// Symlinked files are followed; symlinked directories are not descended into.
pub fn discover(root: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).map_err(io_err(&dir))? {
            let entry = entry.map_err(io_err(&dir))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(io_err(&path))?;
            if file_type.is_dir() {
                pending.push(path);
            } else if fs::metadata(&path).is_ok_and(|m| m.is_file()) {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Read one document's raw bytes as text.
pub fn read_document(path: &Path) -> Result<String, Error> {
    let bytes = fs::read(path).map_err(io_err(path))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Ingest every file under `root` into `builder`, assigning ids `0, 1, 2, ...`.
///
/// With [`ReadPolicy::Abort`] the first unreadable file fails the call and the caller is
/// expected to drop the half-built index.
pub fn ingest_dir(
    root: &Path,
    builder: &mut IndexBuilder,
    policy: ReadPolicy,
) -> Result<Corpus, Error> {
    let files = discover(root)?;
    tracing::debug!(root = %root.display(), files = files.len(), "discovered corpus");

    let mut corpus = Corpus::default();
    for path in files {
        let text = match read_document(&path) {
            Ok(text) => text,
            Err(err) if policy == ReadPolicy::Skip => {
                tracing::warn!(error = %err, "skipping unreadable document");
                continue;
            }
            Err(err) => return Err(err),
        };
        let doc_id = corpus.paths.len() as DocId;
        builder.add_document(doc_id, &text)?;
        corpus.paths.push(path);
        if corpus.paths.len() % 100 == 0 {
            tracing::debug!(indexed = corpus.paths.len(), "indexing progress");
        }
    }
    tracing::info!(docs = corpus.len(), "corpus ingested");
    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_assigns_sorted_ids_recursively() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("b.txt"), "beta").unwrap();
        fs::write(root.join("a.txt"), "alpha").unwrap();
        fs::write(root.join("sub").join("c.txt"), "gamma").unwrap();

        let mut b = IndexBuilder::default();
        let corpus = ingest_dir(root, &mut b, ReadPolicy::Abort).unwrap();
        let ix = b.finish();

        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.path(0).unwrap(), root.join("a.txt"));
        assert_eq!(corpus.path(1).unwrap(), root.join("b.txt"));
        assert_eq!(corpus.path(2).unwrap(), root.join("sub").join("c.txt"));
        assert!(corpus.path(3).is_none());
        assert_eq!(ix.num_docs(), 3);
        assert_eq!(ix.postings("gamma")[0].doc_id, 2);
    }

    #[test]
    fn invalid_utf8_is_read_lossily() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("bin.txt");
        fs::write(&path, b"ca\xfft dog").unwrap();
        let text = read_document(&path).unwrap();
        assert_eq!(crate::analysis::normalize(&text[..text.find(' ').unwrap()]), "cat");
    }

    #[test]
    fn missing_root_is_an_io_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut b = IndexBuilder::default();
        let err = ingest_dir(&tmp.path().join("missing"), &mut b, ReadPolicy::Skip).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("missing"));
    }

    /// `a.txt` is readable; `b.txt` links to `/proc/self/mem`, which fails with EIO on read.
    #[cfg(target_os = "linux")]
    fn corpus_with_unreadable_file() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(tmp.path().join("a.txt"), "alpha beta").unwrap();
        std::os::unix::fs::symlink("/proc/self/mem", tmp.path().join("b.txt")).unwrap();
        tmp
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn unreadable_document_aborts_by_default() {
        let tmp = corpus_with_unreadable_file();
        let mut b = IndexBuilder::default();
        let err = ingest_dir(tmp.path(), &mut b, ReadPolicy::default()).unwrap_err();
        match err {
            Error::Io { path, .. } => assert_eq!(path, tmp.path().join("b.txt")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn unreadable_document_is_skipped_on_request() {
        let tmp = corpus_with_unreadable_file();
        let mut b = IndexBuilder::default();
        let corpus = ingest_dir(tmp.path(), &mut b, ReadPolicy::Skip).unwrap();
        let ix = b.finish();

        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.path(0).unwrap(), tmp.path().join("a.txt"));
        assert_eq!(ix.num_docs(), 1);
        assert_eq!(ix.doc_frequency("beta"), 1);
    }
}

//! Parsing of interactive input lines.

/// Marker that turns a line into an autocomplete request.
pub const AUTOCOMPLETE_MARKER: &str = "auto:";

/// One line of interactive input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request<'a> {
    /// `exit`: leave the loop.
    Exit,
    /// `auto:<prefix>`: the prefix is passed through verbatim (no trimming or lowercasing).
    Autocomplete(&'a str),
    /// Anything else is a free-text query.
    Search(&'a str),
}

impl<'a> Request<'a> {
    /// Classify a line (without its trailing newline).
    pub fn parse(line: &'a str) -> Self {
        if line == "exit" {
            Self::Exit
        } else if let Some(prefix) = line.strip_prefix(AUTOCOMPLETE_MARKER) {
            Self::Autocomplete(prefix)
        } else {
            Self::Search(line)
        }
    }
}

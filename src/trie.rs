//! Prefix index (trie) for autocomplete.
//!
//! Insert-only: words are added during ingestion and never removed. Lookups walk the prefix,
//! then do a pre-order depth-first traversal with children in ascending symbol order,
//! stopping as soon as `limit` complete words have been collected. Suggestions therefore
//! come out in lexicographic order, and *which* words are returned when more exist is
//! decided by that order alone (no frequency weighting).

/// Default cap on suggestions per lookup.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Symbols a trie can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alphabet {
    /// `a`-`z` only. Tokens containing digits are never recorded as words.
    #[default]
    Lowercase,
    /// `0`-`9` then `a`-`z` (ASCII order), matching everything the normalizer can emit.
    Alphanumeric,
}

impl Alphabet {
    fn size(self) -> usize {
        match self {
            Self::Lowercase => 26,
            Self::Alphanumeric => 36,
        }
    }

    fn slot(self, b: u8) -> Option<usize> {
        match (self, b) {
            (Self::Lowercase, b'a'..=b'z') => Some(usize::from(b - b'a')),
            (Self::Alphanumeric, b'0'..=b'9') => Some(usize::from(b - b'0')),
            (Self::Alphanumeric, b'a'..=b'z') => Some(10 + usize::from(b - b'a')),
            _ => None,
        }
    }

    fn symbol(self, slot: usize) -> char {
        let b = match self {
            Self::Lowercase => b'a' + slot as u8,
            Self::Alphanumeric if slot < 10 => b'0' + slot as u8,
            Self::Alphanumeric => b'a' + (slot - 10) as u8,
        };
        char::from(b)
    }
}

#[derive(Debug)]
struct Node {
    children: Box<[Option<Box<Node>>]>,
    terminal: bool,
}

impl Node {
    fn new(alphabet: Alphabet) -> Self {
        Self {
            children: (0..alphabet.size()).map(|_| None).collect(),
            terminal: false,
        }
    }

    fn take_children(&mut self) -> impl Iterator<Item = Box<Node>> + '_ {
        self.children.iter_mut().filter_map(Option::take)
    }
}

// Freed on an explicit worklist: one long token makes the tree as deep as the token, and
// the default recursive drop would use a stack frame per character.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending: Vec<Box<Node>> = self.take_children().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.take_children());
        }
    }
}

/// Trie over an [`Alphabet`].
#[derive(Debug)]
pub struct PrefixIndex {
    alphabet: Alphabet,
    root: Node,
    words: usize,
}

impl Default for PrefixIndex {
    fn default() -> Self {
        Self::new(Alphabet::default())
    }
}

impl PrefixIndex {
    /// Create an empty trie.
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            root: Node::new(alphabet),
            words: 0,
        }
    }

    /// Number of distinct complete words.
    pub fn len(&self) -> usize {
        self.words
    }

    /// Whether no complete word has been recorded.
    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Insert `word`, returning whether it is now recorded as a complete word.
    ///
    /// The first character outside the alphabet stops the insertion: the path built so far
    /// stays, but the word is not marked complete. Re-inserting a word is a no-op. The empty
    /// word is never recorded.
    pub fn insert(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let alphabet = self.alphabet;
        let mut node = &mut self.root;
        for b in word.bytes() {
            let Some(slot) = alphabet.slot(b) else {
                return false;
            };
            let child = node.children[slot].get_or_insert_with(|| Box::new(Node::new(alphabet)));
            node = &mut **child;
        }
        if !node.terminal {
            node.terminal = true;
            self.words += 1;
        }
        true
    }

    /// Whether `word` was inserted as a complete word.
    pub fn contains(&self, word: &str) -> bool {
        self.find(word).is_some_and(|node| node.terminal)
    }

    fn find(&self, prefix: &str) -> Option<&Node> {
        let mut node = &self.root;
        for b in prefix.bytes() {
            node = node.children[self.alphabet.slot(b)?].as_deref()?;
        }
        Some(node)
    }

    /// Up to `limit` complete words starting with `prefix`, in lexicographic order.
    ///
    /// Empty if the prefix contains a character outside the alphabet or is not present.
    pub fn lookup(&self, prefix: &str, limit: usize) -> Vec<String> {
        let mut out = Vec::new();
        let Some(start) = self.find(prefix) else {
            return out;
        };
        if limit == 0 {
            return out;
        }

        // Pre-order walk on an explicit stack. Children are pushed in reverse so the smallest
        // symbol is popped first. Each entry records the word length at that node and the
        // symbol leading into it; `word` is rewritten in place from that position, since
        // everything before it still spells the path to the parent.
        let mut word = prefix.to_string();
        let mut stack: Vec<(&Node, usize, Option<char>)> = vec![(start, word.len(), None)];
        while let Some((node, len, symbol)) = stack.pop() {
            if let Some(c) = symbol {
                word.truncate(len - 1);
                word.push(c);
            }
            if node.terminal {
                out.push(word.clone());
                if out.len() == limit {
                    break;
                }
            }
            for (slot, child) in node.children.iter().enumerate().rev() {
                if let Some(child) = child {
                    stack.push((&**child, len + 1, Some(self.alphabet.symbol(slot))));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trie(words: &[&str]) -> PrefixIndex {
        let mut t = PrefixIndex::default();
        for w in words {
            t.insert(w);
        }
        t
    }

    #[test]
    fn lookup_is_lexicographic_dfs() {
        let t = trie(&["cat", "car", "cart", "dog"]);
        assert_eq!(t.lookup("ca", 5), vec!["car", "cart", "cat"]);
        assert_eq!(t.lookup("d", 5), vec!["dog"]);
        assert_eq!(t.lookup("", 5), vec!["car", "cart", "cat", "dog"]);
    }

    #[test]
    fn prefix_that_is_a_word_comes_first() {
        let t = trie(&["cart", "car"]);
        assert_eq!(t.lookup("car", 5), vec!["car", "cart"]);
    }

    #[test]
    fn unknown_or_invalid_prefix_is_empty() {
        let t = trie(&["cat"]);
        assert!(t.lookup("z", 5).is_empty());
        assert!(t.lookup("cats", 5).is_empty());
        assert!(t.lookup("Ca", 5).is_empty());
        assert!(t.lookup("c a", 5).is_empty());
    }

    #[test]
    fn lookup_stops_at_limit() {
        let t = trie(&["ab", "ac", "ad", "ae", "af", "ag", "ah"]);
        assert_eq!(t.lookup("a", 5), vec!["ab", "ac", "ad", "ae", "af"]);
        assert_eq!(t.lookup("a", 2), vec!["ab", "ac"]);
        assert!(t.lookup("a", 0).is_empty());
    }

    #[test]
    fn digits_stop_insertion_with_lowercase_alphabet() {
        let mut t = PrefixIndex::default();
        assert!(!t.insert("abc1d"));
        assert!(!t.contains("abc1d"));
        assert!(!t.contains("abc"));
        assert!(t.lookup("ab", 5).is_empty());
        assert!(t.is_empty());
    }

    #[test]
    fn alphanumeric_alphabet_records_digits_first() {
        let mut t = PrefixIndex::new(Alphabet::Alphanumeric);
        assert!(t.insert("r2d2"));
        assert!(t.insert("ra"));
        assert!(t.insert("r9"));
        assert_eq!(t.lookup("r", 5), vec!["r2d2", "r9", "ra"]);
    }

    #[test]
    fn reinsert_counts_once() {
        let mut t = PrefixIndex::default();
        assert!(t.insert("cat"));
        assert!(t.insert("cat"));
        assert!(!t.insert(""));
        assert_eq!(t.len(), 1);
        assert!(t.contains("cat"));
    }

    #[test]
    fn very_deep_trie_drops_without_recursion() {
        let word = "g".repeat(200_000);
        let mut t = PrefixIndex::default();
        assert!(t.insert(&word));
        assert!(t.insert("go"));
        assert_eq!(t.lookup("gg", 5), vec![word.clone()]);
        drop(t);
    }
}

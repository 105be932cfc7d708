//! Prefix trie over a stop-list, used to find the earliest stop phrase in a text.

use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
struct Node {
    children: HashMap<char, usize>,
    is_end: bool,
}

/// A prefix trie built once per stop-list and queried many times.
///
/// Nodes live in a flat arena; index 0 is the root.
#[derive(Debug, Clone)]
pub struct StopTrie {
    nodes: Vec<Node>,
}

impl StopTrie {
    /// Build a trie from a list of stop strings. Empty strings never match.
    pub fn new<S: AsRef<str>>(stop_strings: &[S]) -> Self {
        let mut trie = Self {
            nodes: vec![Node::default()],
        };
        for s in stop_strings {
            trie.insert(s.as_ref());
        }
        trie
    }

    fn insert(&mut self, s: &str) {
        let mut cur = 0;
        for c in s.chars() {
            cur = match self.nodes[cur].children.get(&c) {
                Some(&next) => next,
                None => {
                    self.nodes.push(Node::default());
                    let next = self.nodes.len() - 1;
                    self.nodes[cur].children.insert(c, next);
                    next
                }
            };
        }
        if cur != 0 {
            self.nodes[cur].is_end = true;
        }
    }

    /// Check if the trie has no stop strings.
    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    /// Check if some stop string is a prefix of `query`.
    pub fn matches_prefix(&self, query: &str) -> bool {
        let mut cur = 0;
        for c in query.chars() {
            match self.nodes[cur].children.get(&c) {
                Some(&next) => cur = next,
                None => return false,
            }
            if self.nodes[cur].is_end {
                return true;
            }
        }
        false
    }

    /// Byte offset of the earliest position in `text` where a stop string begins.
    pub fn first_match(&self, text: &str) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        text.char_indices()
            .map(|(i, _)| i)
            .find(|&i| self.matches_prefix(&text[i..]))
    }
}

//! RDF graph - a collection of triples with parse context
//!
//! The `Graph` type uses `Vec<Triple>` to preserve duplicates (bag
//! semantics) and insertion order. It also carries the base IRI and prefix
//! mappings declared by the document it was parsed from.

use crate::{Term, Triple};
use std::collections::BTreeMap;

/// A collection of RDF triples
///
/// Uses `Vec<Triple>` instead of a set to preserve duplicates from template
/// instantiation and to keep insertion order stable. Call `dedupe()`
/// explicitly if you want set semantics.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    /// The triples in this graph
    triples: Vec<Triple>,
    /// Base IRI from parsing (for reconstruction)
    pub base: Option<String>,
    /// Prefix mappings from parsing (deterministic order via BTreeMap)
    pub prefixes: BTreeMap<String, String>,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base IRI
    pub fn set_base(&mut self, base: impl Into<String>) {
        self.base = Some(base.into());
    }

    /// Add a prefix mapping
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Add a triple to the graph
    pub fn add(&mut self, triple: Triple) {
        self.triples.push(triple);
    }

    /// Add a triple by components
    pub fn add_triple(&mut self, s: Term, p: Term, o: Term) {
        self.add(Triple::new(s, p, o));
    }

    /// Get the number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate over triples in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Get a reference to the triples
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// Get all triples (consuming the graph)
    pub fn into_triples(self) -> Vec<Triple> {
        self.triples
    }

    /// Remove duplicate triples (apply set semantics)
    ///
    /// Keeps the first occurrence of each triple, preserving first-seen
    /// order. The graph itself never deduplicates implicitly.
    pub fn dedupe(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.triples.retain(|t| seen.insert(t.clone()));
    }
}

impl IntoIterator for Graph {
    type Item = Triple;
    type IntoIter = std::vec::IntoIter<Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<T: IntoIterator<Item = Triple>>(iter: T) -> Self {
        Graph {
            triples: iter.into_iter().collect(),
            base: None,
            prefixes: BTreeMap::new(),
        }
    }
}

impl Extend<Triple> for Graph {
    fn extend<T: IntoIterator<Item = Triple>>(&mut self, iter: T) {
        self.triples.extend(iter);
    }
}

//! Append-only triple store with exact-pattern lookup
//!
//! One `TripleStore` is owned by one processing session. Triples accumulate
//! across `load` calls for the lifetime of the session; there is no removal
//! operation and no cross-session sharing. The store is deliberately **not**
//! thread-safe: a host that shares one store across threads must serialize
//! access itself.

use crate::{Term, Triple};
use serde::Serialize;
use std::collections::HashSet;

/// A triple pattern with optional wildcards
///
/// Each bound field must match a stored triple's term exactly (structural
/// equality); an unbound field matches anything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TriplePattern {
    /// Subject to match, or None for any subject
    pub subject: Option<Term>,
    /// Predicate to match, or None for any predicate
    pub predicate: Option<Term>,
    /// Object to match, or None for any object
    pub object: Option<Term>,
}

impl TriplePattern {
    /// The fully unbound pattern (matches every triple)
    pub fn any() -> Self {
        Self::default()
    }

    /// Bind the subject position to an IRI
    pub fn with_subject(mut self, iri: impl AsRef<str>) -> Self {
        self.subject = Some(Term::iri(iri));
        self
    }

    /// Bind the predicate position to an IRI
    pub fn with_predicate(mut self, iri: impl AsRef<str>) -> Self {
        self.predicate = Some(Term::iri(iri));
        self
    }

    /// Bind the object position to a term
    pub fn with_object(mut self, term: Term) -> Self {
        self.object = Some(term);
        self
    }

    /// Build a pattern from optional plain strings
    ///
    /// Subject and predicate strings are taken as IRIs. An object string
    /// starting with `http` is taken as an IRI, anything else as a plain
    /// string literal. That heuristic cannot express typed-literal or
    /// language-tagged object patterns; use `with_object` for those.
    pub fn from_strings(
        subject: Option<&str>,
        predicate: Option<&str>,
        object: Option<&str>,
    ) -> Self {
        Self {
            subject: subject.map(Term::iri),
            predicate: predicate.map(Term::iri),
            object: object.map(|o| {
                if o.starts_with("http") {
                    Term::iri(o)
                } else {
                    Term::string(o)
                }
            }),
        }
    }

    /// Check whether a triple matches this pattern
    pub fn matches(&self, triple: &Triple) -> bool {
        self.subject.as_ref().map_or(true, |s| *s == triple.s)
            && self.predicate.as_ref().map_or(true, |p| *p == triple.p)
            && self.object.as_ref().map_or(true, |o| *o == triple.o)
    }
}

/// Aggregate counts over a store's contents
///
/// Serializes to the wire shape `{totalTriples, subjects, predicates,
/// objects}` used by embedding layers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StoreStatistics {
    /// Total number of stored triples, duplicates included
    #[serde(rename = "totalTriples")]
    pub total_triples: usize,
    /// Number of distinct subject terms
    pub subjects: usize,
    /// Number of distinct predicate terms
    pub predicates: usize,
    /// Number of distinct object terms
    pub objects: usize,
}

/// An in-memory, append-only multiset of triples
///
/// Duplicates are **not** deduplicated: repeated loads accumulate, matching
/// the union semantics of running one mapping over several row sets. Callers
/// that want set semantics should deduplicate before or after loading.
#[derive(Clone, Debug, Default)]
pub struct TripleStore {
    triples: Vec<Triple>,
}

impl TripleStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append triples to the store
    ///
    /// Never deduplicates and never reorders existing content. O(n) in the
    /// number of triples added.
    pub fn load(&mut self, triples: impl IntoIterator<Item = Triple>) {
        self.triples.extend(triples);
    }

    /// Number of stored triples (duplicates included)
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// All stored triples in insertion order
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// Iterate over stored triples in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Find every triple matching the pattern, in insertion order
    ///
    /// An empty result is a normal outcome, not an error. Does not mutate
    /// the store; repeated calls with the same pattern return the same
    /// result until the next `load`.
    pub fn query(&self, pattern: &TriplePattern) -> Vec<&Triple> {
        self.triples.iter().filter(|t| pattern.matches(t)).collect()
    }

    /// Compute aggregate statistics with a full scan
    ///
    /// Distinctness is structural: two literals with the same lexical form
    /// but different datatypes count as two objects.
    pub fn statistics(&self) -> StoreStatistics {
        let mut subjects = HashSet::new();
        let mut predicates = HashSet::new();
        let mut objects = HashSet::new();

        for t in &self.triples {
            subjects.insert(&t.s);
            predicates.insert(&t.p);
            objects.insert(&t.o);
        }

        StoreStatistics {
            total_triples: self.triples.len(),
            subjects: subjects.len(),
            predicates: predicates.len(),
            objects: objects.len(),
        }
    }
}

impl Extend<Triple> for TripleStore {
    fn extend<T: IntoIterator<Item = Triple>>(&mut self, iter: T) {
        self.triples.extend(iter);
    }
}

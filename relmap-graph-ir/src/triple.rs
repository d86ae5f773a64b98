//! RDF triple - the atomic unit of graph data

use crate::Term;
use serde::{Deserialize, Serialize};

/// A subject-predicate-object statement
///
/// Triples are immutable value types with structural equality: two triples
/// are equal when all three terms are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    /// Subject term (IRI or blank node)
    pub s: Term,
    /// Predicate term (always an IRI)
    pub p: Term,
    /// Object term (IRI, blank node, or literal)
    pub o: Term,
}

impl Triple {
    /// Create a new triple
    pub fn new(s: Term, p: Term, o: Term) -> Self {
        Self { s, p, o }
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} .", self.s, self.p, self.o)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        let a = Triple::new(
            Term::iri("http://example.org/s"),
            Term::iri("http://example.org/p"),
            Term::string("o"),
        );
        let b = Triple::new(
            Term::iri("http://example.org/s"),
            Term::iri("http://example.org/p"),
            Term::string("o"),
        );
        assert_eq!(a, b);

        let c = Triple::new(
            Term::iri("http://example.org/s"),
            Term::iri("http://example.org/p"),
            Term::iri("o"),
        );
        assert_ne!(a, c);
    }

    #[test]
    fn test_display() {
        let t = Triple::new(
            Term::iri("http://e.org/s"),
            Term::iri("http://e.org/p"),
            Term::string("v"),
        );
        assert_eq!(format!("{}", t), "<http://e.org/s> <http://e.org/p> \"v\" .");
    }
}

//! Format-agnostic RDF graph intermediate representation
//!
//! This crate provides the canonical types shared by the Turtle codec and
//! the R2RML mapping engine: terms, triples, parsed graphs, and the
//! session-scoped triple store.
//!
//! # Key Design Principles
//!
//! 1. **Expanded IRIs only** - All IRIs are stored in expanded form.
//!    Compaction is handled by formatters at output time.
//!
//! 2. **Explicit datatypes** - Literals always have an explicit datatype,
//!    never optional. Plain strings use `xsd:string`, language-tagged
//!    strings use `rdf:langString`.
//!
//! 3. **Lexical literals** - Literals store their lexical form, so equality
//!    is exactly "same lexical form, same datatype, same language". This is
//!    what makes serialize-then-parse round trips structurally exact.
//!
//! 4. **Bag semantics by default** - `Graph` and `TripleStore` keep
//!    duplicates and insertion order. Deduplication is always explicit.
//!
//! # Example
//!
//! ```
//! use relmap_graph_ir::{Term, Triple, TriplePattern, TripleStore};
//!
//! let mut store = TripleStore::new();
//! store.load(vec![Triple::new(
//!     Term::iri("http://example.org/m/M1"),
//!     Term::iri("http://example.org/name"),
//!     Term::string("Press"),
//! )]);
//!
//! let hits = store.query(&TriplePattern::any().with_subject("http://example.org/m/M1"));
//! assert_eq!(hits.len(), 1);
//! ```

mod datatype;
mod graph;
mod store;
mod term;
mod triple;

pub use datatype::Datatype;
pub use graph::Graph;
pub use store::{StoreStatistics, TriplePattern, TripleStore};
pub use term::{BlankId, Term};
pub use triple::Triple;

//! R2RML mapping structures
//!
//! The parsed representation of R2RML mappings. These structures are
//! produced by the [`crate::loader`] module and consumed by the
//! [`crate::materialize`] module.

mod term_map;
mod triples_map;

pub use term_map::{ObjectMap, PredicateObjectMap, TermType};
pub use triples_map::{extract_template_columns, LogicalTable, SubjectMap, TriplesMap};

pub(crate) use triples_map::PLACEHOLDER_RE;

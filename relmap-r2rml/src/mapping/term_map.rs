//! R2RML term map structures
//!
//! Term maps define how RDF terms are generated from table data.

use serde::{Deserialize, Serialize};

/// R2RML term type
///
/// Specifies whether a term map generates IRIs, blank nodes, or literals.
/// An explicit `rr:termType` always wins over value-shape heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermType {
    /// Generate an IRI
    Iri,
    /// Generate a blank node
    BlankNode,
    /// Generate a literal
    Literal,
}

impl TermType {
    /// Parse term type from its R2RML IRI
    pub fn from_iri(iri: &str) -> Option<Self> {
        match iri {
            "http://www.w3.org/ns/r2rml#IRI" => Some(TermType::Iri),
            "http://www.w3.org/ns/r2rml#BlankNode" => Some(TermType::BlankNode),
            "http://www.w3.org/ns/r2rml#Literal" => Some(TermType::Literal),
            _ => None,
        }
    }

    /// Check if this term type produces IRIs
    pub fn is_iri(&self) -> bool {
        matches!(self, TermType::Iri)
    }

    /// Check if this term type produces literals
    pub fn is_literal(&self) -> bool {
        matches!(self, TermType::Literal)
    }
}

/// Predicate-object map pair
///
/// Represents an `rr:predicateObjectMap` with its constant predicate IRI and
/// object map. A rule whose object map carried neither `rr:column` nor
/// `rr:constant` is kept with `object_map: None`; it is inert during
/// generation (produces no triples, raises no error).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredicateObjectMap {
    /// Constant predicate IRI from `rr:predicate`
    pub predicate: String,
    /// The object map, or None for an inert rule
    pub object_map: Option<ObjectMap>,
}

impl PredicateObjectMap {
    /// Create a predicate-object map with a column object map
    pub fn column(predicate: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            predicate: predicate.into(),
            object_map: Some(ObjectMap::column(column)),
        }
    }

    /// Create a predicate-object map with a constant object map
    pub fn constant(predicate: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            predicate: predicate.into(),
            object_map: Some(ObjectMap::constant(value)),
        }
    }

    /// Create an inert predicate-object map (no object source)
    pub fn inert(predicate: impl Into<String>) -> Self {
        Self {
            predicate: predicate.into(),
            object_map: None,
        }
    }
}

/// Object map
///
/// Defines how object terms are generated: from a row column or from a
/// constant value, optionally carrying a datatype, language tag, or an
/// explicit term type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ObjectMap {
    /// `rr:column` - generate object from the row's column value
    Column {
        /// Column name
        column: String,
        /// Optional datatype IRI for typed literals
        datatype: Option<String>,
        /// Optional language tag for language-tagged strings
        language: Option<String>,
        /// Explicit term type, if annotated with `rr:termType`
        term_type: Option<TermType>,
    },

    /// `rr:constant` - generate a fixed object value
    Constant {
        /// Constant IRI or literal value
        value: String,
        /// Optional datatype IRI for typed literals
        datatype: Option<String>,
        /// Optional language tag for language-tagged strings
        language: Option<String>,
        /// Explicit term type, if annotated with `rr:termType`
        term_type: Option<TermType>,
    },
}

impl ObjectMap {
    /// Create a plain column object map
    pub fn column(column: impl Into<String>) -> Self {
        ObjectMap::Column {
            column: column.into(),
            datatype: None,
            language: None,
            term_type: None,
        }
    }

    /// Create a column object map with a datatype annotation
    pub fn column_typed(column: impl Into<String>, datatype: impl Into<String>) -> Self {
        ObjectMap::Column {
            column: column.into(),
            datatype: Some(datatype.into()),
            language: None,
            term_type: None,
        }
    }

    /// Create a plain constant object map
    pub fn constant(value: impl Into<String>) -> Self {
        ObjectMap::Constant {
            value: value.into(),
            datatype: None,
            language: None,
            term_type: None,
        }
    }

    /// Get the datatype annotation, if any
    pub fn datatype(&self) -> Option<&str> {
        match self {
            ObjectMap::Column { datatype, .. } | ObjectMap::Constant { datatype, .. } => {
                datatype.as_deref()
            }
        }
    }

    /// Get the language tag, if any
    pub fn language(&self) -> Option<&str> {
        match self {
            ObjectMap::Column { language, .. } | ObjectMap::Constant { language, .. } => {
                language.as_deref()
            }
        }
    }

    /// Get the explicit term type annotation, if any
    pub fn term_type(&self) -> Option<TermType> {
        match self {
            ObjectMap::Column { term_type, .. } | ObjectMap::Constant { term_type, .. } => {
                *term_type
            }
        }
    }

    /// Get the referenced column, if this is a column map
    pub fn as_column(&self) -> Option<&str> {
        match self {
            ObjectMap::Column { column, .. } => Some(column),
            ObjectMap::Constant { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_type_from_iri() {
        assert_eq!(
            TermType::from_iri("http://www.w3.org/ns/r2rml#IRI"),
            Some(TermType::Iri)
        );
        assert_eq!(
            TermType::from_iri("http://www.w3.org/ns/r2rml#BlankNode"),
            Some(TermType::BlankNode)
        );
        assert_eq!(
            TermType::from_iri("http://www.w3.org/ns/r2rml#Literal"),
            Some(TermType::Literal)
        );
        assert_eq!(TermType::from_iri("invalid"), None);
    }

    #[test]
    fn test_object_map_column() {
        let om = ObjectMap::column("name");
        assert_eq!(om.as_column(), Some("name"));
        assert_eq!(om.datatype(), None);
        assert_eq!(om.term_type(), None);
    }

    #[test]
    fn test_object_map_column_typed() {
        let om = ObjectMap::column_typed("age", "http://www.w3.org/2001/XMLSchema#integer");
        assert_eq!(om.as_column(), Some("age"));
        assert_eq!(
            om.datatype(),
            Some("http://www.w3.org/2001/XMLSchema#integer")
        );
    }

    #[test]
    fn test_inert_rule_has_no_object_map() {
        let pom = PredicateObjectMap::inert("http://example.org/p");
        assert!(pom.object_map.is_none());
    }
}

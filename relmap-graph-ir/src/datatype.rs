//! RDF literal datatype representation
//!
//! Datatypes are always explicit in this IR - there is no "untyped" literal.
//! Plain strings default to `xsd:string`, and language-tagged strings use
//! `rdf:langString`.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use relmap_vocab::{rdf, xsd};

/// RDF literal datatype (always an expanded IRI)
///
/// Use `Datatype::xsd_string()` for plain strings and
/// `Datatype::rdf_lang_string()` for language-tagged strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Datatype(Arc<str>);

impl Datatype {
    /// Create a datatype from an expanded IRI
    pub fn from_iri(iri: impl AsRef<str>) -> Self {
        Datatype(Arc::from(iri.as_ref()))
    }

    /// xsd:string - default for plain string literals
    pub fn xsd_string() -> Self {
        Datatype(Arc::from(xsd::STRING))
    }

    /// xsd:boolean
    pub fn xsd_boolean() -> Self {
        Datatype(Arc::from(xsd::BOOLEAN))
    }

    /// xsd:integer
    pub fn xsd_integer() -> Self {
        Datatype(Arc::from(xsd::INTEGER))
    }

    /// xsd:decimal
    pub fn xsd_decimal() -> Self {
        Datatype(Arc::from(xsd::DECIMAL))
    }

    /// xsd:double
    pub fn xsd_double() -> Self {
        Datatype(Arc::from(xsd::DOUBLE))
    }

    /// rdf:langString - for language-tagged literals
    pub fn rdf_lang_string() -> Self {
        Datatype(Arc::from(rdf::LANG_STRING))
    }

    /// Get the IRI of this datatype
    pub fn as_iri(&self) -> &str {
        &self.0
    }

    /// Check if this is the xsd:string datatype
    pub fn is_xsd_string(&self) -> bool {
        self.0.as_ref() == xsd::STRING
    }

    /// Check if this is the rdf:langString datatype
    pub fn is_lang_string(&self) -> bool {
        self.0.as_ref() == rdf::LANG_STRING
    }
}

impl Default for Datatype {
    fn default() -> Self {
        Datatype::xsd_string()
    }
}

impl std::fmt::Display for Datatype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(Datatype::xsd_string().as_iri(), xsd::STRING);
        assert_eq!(Datatype::xsd_integer().as_iri(), xsd::INTEGER);
        assert_eq!(Datatype::rdf_lang_string().as_iri(), rdf::LANG_STRING);
        assert_eq!(Datatype::from_iri(xsd::DOUBLE), Datatype::xsd_double());
    }

    #[test]
    fn test_is_checks() {
        assert!(Datatype::xsd_string().is_xsd_string());
        assert!(!Datatype::xsd_integer().is_xsd_string());
        assert!(Datatype::rdf_lang_string().is_lang_string());
        assert!(Datatype::default().is_xsd_string());
    }
}

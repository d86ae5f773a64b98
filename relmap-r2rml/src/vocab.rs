//! R2RML vocabulary constants
//!
//! IRIs from the W3C R2RML Recommendation (https://www.w3.org/TR/r2rml/),
//! restricted to the subset this crate processes: table-backed logical
//! tables, template subject maps, and column/constant object maps.

/// R2RML vocabulary namespace and constants
pub struct R2RML;

impl R2RML {
    /// R2RML namespace IRI
    pub const NS: &'static str = "http://www.w3.org/ns/r2rml#";

    // Classes

    /// rr:TriplesMap - a mapping that generates RDF triples from a logical table
    pub const TRIPLES_MAP: &'static str = "http://www.w3.org/ns/r2rml#TriplesMap";

    // Logical table

    /// rr:logicalTable - links a TriplesMap to its logical table
    pub const LOGICAL_TABLE: &'static str = "http://www.w3.org/ns/r2rml#logicalTable";

    /// rr:tableName - names a base table or view
    pub const TABLE_NAME: &'static str = "http://www.w3.org/ns/r2rml#tableName";

    /// rr:sqlQuery - a logical table defined by an SQL query (informational only)
    pub const SQL_QUERY: &'static str = "http://www.w3.org/ns/r2rml#sqlQuery";

    // Subject map

    /// rr:subjectMap - links a TriplesMap to its subject map
    pub const SUBJECT_MAP: &'static str = "http://www.w3.org/ns/r2rml#subjectMap";

    /// rr:template - string template with `{column}` placeholders
    pub const TEMPLATE: &'static str = "http://www.w3.org/ns/r2rml#template";

    /// rr:class - RDF class asserted for generated subjects
    pub const CLASS: &'static str = "http://www.w3.org/ns/r2rml#class";

    // Predicate-object map

    /// rr:predicateObjectMap - links a TriplesMap to a predicate-object map
    pub const PREDICATE_OBJECT_MAP: &'static str =
        "http://www.w3.org/ns/r2rml#predicateObjectMap";

    /// rr:predicate - constant predicate IRI
    pub const PREDICATE: &'static str = "http://www.w3.org/ns/r2rml#predicate";

    /// rr:objectMap - links a predicate-object map to its object map
    pub const OBJECT_MAP: &'static str = "http://www.w3.org/ns/r2rml#objectMap";

    // Term maps

    /// rr:column - column reference for generated terms
    pub const COLUMN: &'static str = "http://www.w3.org/ns/r2rml#column";

    /// rr:constant - constant value for generated terms
    pub const CONSTANT: &'static str = "http://www.w3.org/ns/r2rml#constant";

    /// rr:termType - explicit kind of generated RDF term
    pub const TERM_TYPE: &'static str = "http://www.w3.org/ns/r2rml#termType";

    /// rr:datatype - datatype for generated literals
    pub const DATATYPE: &'static str = "http://www.w3.org/ns/r2rml#datatype";

    /// rr:language - language tag for generated literals
    pub const LANGUAGE: &'static str = "http://www.w3.org/ns/r2rml#language";

    // Term type values

    /// rr:IRI - term type for IRIs
    pub const IRI: &'static str = "http://www.w3.org/ns/r2rml#IRI";

    /// rr:BlankNode - term type for blank nodes
    pub const BLANK_NODE: &'static str = "http://www.w3.org/ns/r2rml#BlankNode";

    /// rr:Literal - term type for literals
    pub const LITERAL: &'static str = "http://www.w3.org/ns/r2rml#Literal";
}

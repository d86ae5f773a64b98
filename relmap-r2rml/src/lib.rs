//! R2RML-subset mapping processor
//!
//! Transforms relational row data into RDF triples using declarative R2RML
//! mappings, then stores, queries, and serializes the result. The supported
//! mapping subset is the commonly used core:
//!
//! - `rr:TriplesMap` with `rr:logicalTable` / `rr:tableName`
//! - `rr:subjectMap` with `rr:template` and `rr:class`
//! - `rr:predicateObjectMap` with `rr:predicate` and `rr:objectMap`
//! - `rr:objectMap` with `rr:column`, `rr:constant`, `rr:datatype`,
//!   `rr:language`, and `rr:termType`
//!
//! Join conditions (`rr:parentTriplesMap`) and SQL-query logical tables are
//! out of scope; row data is always supplied directly by the caller.
//!
//! # Usage
//!
//! ```
//! use relmap_r2rml::R2rmlProcessor;
//! use relmap_graph_ir::TriplePattern;
//! use serde_json::json;
//!
//! let mapping = r#"
//!     @prefix rr: <http://www.w3.org/ns/r2rml#> .
//!     @prefix ex: <http://example.org/> .
//!
//!     ex:MachineMapping a rr:TriplesMap ;
//!         rr:logicalTable [ rr:tableName "machines" ] ;
//!         rr:subjectMap [ rr:template "http://example.org/machine/{id}" ] ;
//!         rr:predicateObjectMap [
//!             rr:predicate ex:name ;
//!             rr:objectMap [ rr:column "name" ]
//!         ] .
//! "#;
//!
//! let mut processor = R2rmlProcessor::default();
//! let maps = processor.parse_mapping(mapping).unwrap();
//!
//! let rows = vec![json!({"id": "M1", "name": "Press"}).as_object().unwrap().clone()];
//! let triples = processor.map_rows(&maps, &rows);
//! processor.load_triples(triples);
//!
//! let hits = processor.query(&TriplePattern::any().with_predicate("http://example.org/name"));
//! assert_eq!(hits.len(), 1);
//! ```

pub mod error;
pub mod loader;
pub mod mapping;
pub mod materialize;
pub mod processor;
pub mod vocab;

pub use error::{R2rmlError, R2rmlResult};
pub use loader::{MappingExtractor, MappingLoader};
pub use mapping::{
    extract_template_columns, LogicalTable, ObjectMap, PredicateObjectMap, SubjectMap, TermType,
    TriplesMap,
};
pub use materialize::{expand_template, generate, Row};
pub use processor::{ObjectBinding, QuerySolution, R2rmlProcessor, RdfExport};
pub use vocab::R2RML;

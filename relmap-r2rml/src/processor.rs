//! End-to-end R2RML processing facade
//!
//! [`R2rmlProcessor`] ties the pipeline together: parse a mapping document,
//! materialize triples from rows, accumulate them in a session-scoped
//! store, and query or export the result. Each processor owns its own
//! store; nothing is shared between sessions.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::info;

use relmap_graph_ir::{StoreStatistics, Term, Triple, TriplePattern, TripleStore};
use relmap_turtle::write_triples;
use relmap_vocab::{rdf, rdfs, xsd};

use crate::error::{R2rmlError, R2rmlResult};
use crate::loader::MappingLoader;
use crate::mapping::TriplesMap;
use crate::materialize::{generate, Row};

/// One query answer row, shaped for SPARQL-JSON-style consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuerySolution {
    /// Subject IRI (or blank node label)
    pub subject: String,
    /// Predicate IRI
    pub predicate: String,
    /// Object with a uri/literal discriminator
    pub object: ObjectBinding,
}

/// Object value with its term kind made explicit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectBinding {
    /// IRI-valued object
    Uri {
        /// The IRI
        value: String,
    },
    /// Literal-valued object
    Literal {
        /// Lexical form
        value: String,
        /// Datatype IRI, omitted for plain strings
        #[serde(skip_serializing_if = "Option::is_none")]
        datatype: Option<String>,
    },
}

/// A serialized export of the store's contents.
#[derive(Debug, Clone, Serialize)]
pub struct RdfExport {
    /// Suggested filename
    pub filename: String,
    /// Turtle document text
    pub content: String,
    /// MIME type for the content
    pub mime_type: String,
}

/// R2RML processing session
///
/// Owns an append-only [`TripleStore`] that accumulates triples across
/// `load_triples`/`load_rdf` calls for the lifetime of the session.
/// Loads never deduplicate: loading overlapping triple sets grows the
/// store by the full size of each load (union-of-executions semantics).
/// Callers wanting set semantics deduplicate before loading.
pub struct R2rmlProcessor {
    base_iri: String,
    store: TripleStore,
}

impl Default for R2rmlProcessor {
    fn default() -> Self {
        Self::new("http://example.org/")
    }
}

impl R2rmlProcessor {
    /// Create a processor with the given base namespace.
    ///
    /// The base namespace becomes the default prefix in serialized output.
    pub fn new(base_iri: impl Into<String>) -> Self {
        Self {
            base_iri: base_iri.into(),
            store: TripleStore::new(),
        }
    }

    /// Get the base namespace.
    pub fn base_iri(&self) -> &str {
        &self.base_iri
    }

    /// Parse an R2RML mapping document from Turtle text.
    pub fn parse_mapping(&self, turtle: &str) -> R2rmlResult<Vec<TriplesMap>> {
        MappingLoader::from_turtle(turtle)?.triples_maps()
    }

    /// Materialize triples from mapping definitions and row data.
    ///
    /// Pure transformation; the session store is not touched.
    pub fn map_rows(&self, maps: &[TriplesMap], rows: &[Row]) -> Vec<Triple> {
        generate(maps, rows)
    }

    /// Materialize triples and serialize them directly to Turtle.
    pub fn map_rows_to_turtle(&self, maps: &[TriplesMap], rows: &[Row]) -> String {
        let triples = generate(maps, rows);
        write_triples(&triples, &self.default_prefixes())
    }

    /// Append triples to the session store.
    pub fn load_triples(&mut self, triples: impl IntoIterator<Item = Triple>) {
        let before = self.store.len();
        self.store.extend(triples);
        info!(
            added = self.store.len() - before,
            total = self.store.len(),
            "loaded triples into store"
        );
    }

    /// Parse a Turtle document and append its triples to the session store.
    pub fn load_rdf(&mut self, turtle: &str) -> R2rmlResult<()> {
        let graph =
            relmap_turtle::parse(turtle).map_err(|e| R2rmlError::Parse(e.to_string()))?;
        self.load_triples(graph.into_triples());
        Ok(())
    }

    /// Query the store with an exact-match pattern.
    ///
    /// Absent pattern fields are wildcards. Results come back in store
    /// insertion order; no match yields an empty list.
    pub fn query(&self, pattern: &TriplePattern) -> Vec<&Triple> {
        self.store.query(pattern)
    }

    /// Query the store and shape each match as a [`QuerySolution`].
    pub fn query_solutions(&self, pattern: &TriplePattern) -> Vec<QuerySolution> {
        self.store
            .query(pattern)
            .into_iter()
            .map(|triple| QuerySolution {
                subject: term_value(&triple.s),
                predicate: term_value(&triple.p),
                object: object_binding(&triple.o),
            })
            .collect()
    }

    /// Compute aggregate statistics over the accumulated store.
    pub fn statistics(&self) -> StoreStatistics {
        self.store.statistics()
    }

    /// Serialize the store's contents to Turtle with the default prefixes.
    pub fn to_turtle(&self) -> String {
        write_triples(self.store.triples(), &self.default_prefixes())
    }

    /// Export the store's contents as a downloadable Turtle document.
    pub fn export(&self) -> RdfExport {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        RdfExport {
            filename: format!("rdf-export-{}.ttl", seconds),
            content: self.to_turtle(),
            mime_type: "text/turtle".to_string(),
        }
    }

    /// Default prefix map: base namespace plus rdf, rdfs, and xsd.
    fn default_prefixes(&self) -> BTreeMap<String, String> {
        let mut prefixes = BTreeMap::new();
        prefixes.insert(String::new(), self.base_iri.clone());
        prefixes.insert("rdf".to_string(), rdf::NS.to_string());
        prefixes.insert("rdfs".to_string(), rdfs::NS.to_string());
        prefixes.insert("xsd".to_string(), xsd::NS.to_string());
        prefixes
    }
}

fn term_value(term: &Term) -> String {
    match term {
        Term::Iri(iri) => iri.to_string(),
        Term::BlankNode(id) => id.as_str().to_string(),
        Term::Literal { lexical, .. } => lexical.to_string(),
    }
}

fn object_binding(term: &Term) -> ObjectBinding {
    match term {
        Term::Iri(iri) => ObjectBinding::Uri {
            value: iri.to_string(),
        },
        Term::BlankNode(id) => ObjectBinding::Uri {
            value: format!("_:{}", id.as_str()),
        },
        Term::Literal {
            lexical, datatype, ..
        } => ObjectBinding::Literal {
            value: lexical.to_string(),
            datatype: if datatype.is_xsd_string() {
                None
            } else {
                Some(datatype.as_iri().to_string())
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MAPPING: &str = r#"
        @prefix rr: <http://www.w3.org/ns/r2rml#> .
        @prefix ex: <http://example.org/> .

        ex:MachineMapping a rr:TriplesMap ;
            rr:logicalTable [ rr:tableName "machines" ] ;
            rr:subjectMap [ rr:template "http://example.org/machine/{id}" ] ;
            rr:predicateObjectMap [
                rr:predicate ex:name ;
                rr:objectMap [ rr:column "name" ]
            ] .
    "#;

    fn rows() -> Vec<Row> {
        vec![json!({"id": "M1", "name": "Press"})
            .as_object()
            .unwrap()
            .clone()]
    }

    #[test]
    fn test_parse_map_load_query() {
        let mut processor = R2rmlProcessor::default();
        let maps = processor.parse_mapping(MAPPING).unwrap();
        let triples = processor.map_rows(&maps, &rows());
        assert_eq!(triples.len(), 1);

        processor.load_triples(triples);

        let matches =
            processor.query(&TriplePattern::any().with_predicate("http://example.org/name"));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].o, Term::string("Press"));
    }

    #[test]
    fn test_query_solutions_shape() {
        let mut processor = R2rmlProcessor::default();
        let maps = processor.parse_mapping(MAPPING).unwrap();
        let triples = processor.map_rows(&maps, &rows());
        processor.load_triples(triples);

        let solutions = processor.query_solutions(&TriplePattern::any());
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].subject, "http://example.org/machine/M1");
        assert_eq!(
            solutions[0].object,
            ObjectBinding::Literal {
                value: "Press".to_string(),
                datatype: None,
            }
        );

        let json = serde_json::to_value(&solutions[0]).unwrap();
        assert_eq!(json["object"]["type"], "literal");
        assert_eq!(json["object"]["value"], "Press");
    }

    #[test]
    fn test_to_turtle_uses_default_prefixes() {
        let mut processor = R2rmlProcessor::default();
        let maps = processor.parse_mapping(MAPPING).unwrap();
        let triples = processor.map_rows(&maps, &rows());
        processor.load_triples(triples);

        let turtle = processor.to_turtle();
        assert!(turtle.contains("@prefix : <http://example.org/> ."));
        assert!(turtle.contains("@prefix xsd:"));
    }

    #[test]
    fn test_export_metadata() {
        let processor = R2rmlProcessor::default();
        let export = processor.export();
        assert!(export.filename.starts_with("rdf-export-"));
        assert!(export.filename.ends_with(".ttl"));
        assert_eq!(export.mime_type, "text/turtle");
    }

    #[test]
    fn test_load_rdf_accumulates() {
        let mut processor = R2rmlProcessor::default();
        let doc = r#"
            @prefix ex: <http://example.org/> .
            ex:a ex:p "1" .
        "#;
        processor.load_rdf(doc).unwrap();
        processor.load_rdf(doc).unwrap();

        let stats = processor.statistics();
        assert_eq!(stats.total_triples, 2);
        assert_eq!(stats.subjects, 1);
    }
}

//! R2RML mapping extractor
//!
//! Extracts TriplesMap definitions from a parsed graph.

use std::collections::HashMap;

use relmap_graph_ir::{Graph, Term, Triple};
use relmap_vocab::rdf;
use tracing::debug;

use crate::error::R2rmlResult;
use crate::mapping::{
    extract_template_columns, LogicalTable, ObjectMap, PredicateObjectMap, SubjectMap, TermType,
    TriplesMap,
};
use crate::vocab::R2RML;

/// Extracts R2RML mappings from a graph
pub struct MappingExtractor<'a> {
    /// Index: subject (IRI or blank label) -> triples with that subject
    by_subject: HashMap<&'a str, Vec<&'a Triple>>,
    /// TriplesMap subjects in document order
    map_subjects: Vec<&'a str>,
}

impl<'a> MappingExtractor<'a> {
    /// Create a new extractor for the given graph
    pub fn new(graph: &'a Graph) -> Self {
        let mut by_subject: HashMap<&str, Vec<&Triple>> = HashMap::new();
        let mut map_subjects = Vec::new();

        for triple in graph.iter() {
            let subj = match &triple.s {
                Term::Iri(iri) => iri.as_ref(),
                Term::BlankNode(blank) => blank.as_str(),
                _ => continue,
            };
            by_subject.entry(subj).or_default().push(triple);

            if triple.p.as_iri() == Some(rdf::TYPE)
                && triple.o.as_iri() == Some(R2RML::TRIPLES_MAP)
            {
                map_subjects.push(subj);
            }
        }

        Self {
            by_subject,
            map_subjects,
        }
    }

    /// Extract all TriplesMap definitions
    ///
    /// A document declaring zero TriplesMaps yields an empty list, not an
    /// error.
    pub fn extract_all(&self) -> R2rmlResult<Vec<TriplesMap>> {
        self.map_subjects
            .iter()
            .map(|subj| self.extract_triples_map(subj))
            .collect()
    }

    /// Extract a single TriplesMap by its subject
    fn extract_triples_map(&self, tm_iri: &str) -> R2rmlResult<TriplesMap> {
        let triples = self.triples_for_subject(tm_iri);

        Ok(TriplesMap {
            iri: tm_iri.to_string(),
            logical_table: self.extract_logical_table(&triples),
            subject_map: self.extract_subject_map(&triples),
            predicate_object_maps: self.extract_predicate_object_maps(&triples),
        })
    }

    /// Extract the logical table reference, if present
    fn extract_logical_table(&self, triples: &[&Triple]) -> LogicalTable {
        let mut logical_table = LogicalTable::default();

        if let Some(lt_term) = self.find_object(triples, R2RML::LOGICAL_TABLE) {
            let lt_triples = self.triples_for_term(lt_term);
            logical_table.table_name = self
                .find_object(&lt_triples, R2RML::TABLE_NAME)
                .and_then(term_value);
            logical_table.sql_query = self
                .find_object(&lt_triples, R2RML::SQL_QUERY)
                .and_then(term_value);
        }

        logical_table
    }

    /// Extract the subject map
    ///
    /// A missing template leaves an empty template string; generation will
    /// emit it as-is rather than failing.
    fn extract_subject_map(&self, triples: &[&Triple]) -> SubjectMap {
        let mut subject_map = SubjectMap::default();

        let sm_triples = match self.find_object(triples, R2RML::SUBJECT_MAP) {
            Some(sm_term) => self.triples_for_term(sm_term),
            None => {
                debug!("TriplesMap has no rr:subjectMap");
                return subject_map;
            }
        };

        if let Some(template) = self
            .find_object(&sm_triples, R2RML::TEMPLATE)
            .and_then(term_value)
        {
            subject_map.template_columns = extract_template_columns(&template);
            subject_map.template = template;
        }

        for class_term in self.find_objects(&sm_triples, R2RML::CLASS) {
            if let Some(class_iri) = class_term.as_iri() {
                subject_map.classes.push(class_iri.to_string());
            }
        }

        subject_map
    }

    /// Extract all predicate-object maps, in document order
    ///
    /// A predicate-object map missing its rr:predicate or rr:objectMap is
    /// dropped; an object map with neither rr:column nor rr:constant is
    /// kept as an inert rule.
    fn extract_predicate_object_maps(&self, triples: &[&Triple]) -> Vec<PredicateObjectMap> {
        let mut poms = Vec::new();

        for pom_term in self.find_objects(triples, R2RML::PREDICATE_OBJECT_MAP) {
            let pom_triples = self.triples_for_term(pom_term);

            let predicate = match self
                .find_object(&pom_triples, R2RML::PREDICATE)
                .and_then(|t| t.as_iri())
            {
                Some(iri) => iri.to_string(),
                None => {
                    debug!("predicate-object map without rr:predicate, skipping");
                    continue;
                }
            };

            let om_term = match self.find_object(&pom_triples, R2RML::OBJECT_MAP) {
                Some(term) => term,
                None => {
                    debug!(%predicate, "predicate-object map without rr:objectMap, skipping");
                    continue;
                }
            };

            poms.push(PredicateObjectMap {
                predicate,
                object_map: self.extract_object_map(om_term),
            });
        }

        poms
    }

    /// Extract an object map from its graph node
    ///
    /// When both rr:column and rr:constant are present, column wins.
    fn extract_object_map(&self, om_term: &Term) -> Option<ObjectMap> {
        let om_triples = self.triples_for_term(om_term);

        let datatype = self
            .find_object(&om_triples, R2RML::DATATYPE)
            .and_then(|t| t.as_iri())
            .map(|s| s.to_string());
        let language = self
            .find_object(&om_triples, R2RML::LANGUAGE)
            .and_then(term_value);
        let term_type = self
            .find_object(&om_triples, R2RML::TERM_TYPE)
            .and_then(|t| t.as_iri())
            .and_then(TermType::from_iri);

        if let Some(column) = self
            .find_object(&om_triples, R2RML::COLUMN)
            .and_then(term_value)
        {
            return Some(ObjectMap::Column {
                column,
                datatype,
                language,
                term_type,
            });
        }

        if let Some(constant_term) = self.find_object(&om_triples, R2RML::CONSTANT) {
            let value = match constant_term {
                Term::Iri(iri) => iri.to_string(),
                other => term_value(other)?,
            };
            return Some(ObjectMap::Constant {
                value,
                datatype,
                language,
                term_type,
            });
        }

        // Neither column nor constant: the rule is inert
        None
    }

    // Helpers

    /// Get all triples with a given subject (IRI or blank node label)
    fn triples_for_subject(&self, subject: &str) -> Vec<&'a Triple> {
        self.by_subject.get(subject).cloned().unwrap_or_default()
    }

    /// Get triples for a term (handling both IRIs and blank nodes)
    fn triples_for_term(&self, term: &Term) -> Vec<&'a Triple> {
        match term {
            Term::Iri(iri) => self.triples_for_subject(iri),
            Term::BlankNode(blank) => self.triples_for_subject(blank.as_str()),
            _ => Vec::new(),
        }
    }

    /// Find the first object of a property
    fn find_object(&self, triples: &[&'a Triple], predicate: &str) -> Option<&'a Term> {
        triples
            .iter()
            .find(|t| t.p.as_iri() == Some(predicate))
            .map(|t| &t.o)
    }

    /// Find all objects of a property (for multi-valued properties like rr:class)
    fn find_objects(&self, triples: &[&'a Triple], predicate: &str) -> Vec<&'a Term> {
        triples
            .iter()
            .filter(|t| t.p.as_iri() == Some(predicate))
            .map(|t| &t.o)
            .collect()
    }
}

/// Extract a string value from a term: literal lexical form, or the IRI
/// itself (table names occasionally appear as IRIs).
fn term_value(term: &Term) -> Option<String> {
    match term {
        Term::Literal { lexical, .. } => Some(lexical.to_string()),
        Term::Iri(iri) => Some(iri.to_string()),
        _ => None,
    }
}

//! TriplesMap and related mapping structures

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::PredicateObjectMap;

/// Placeholder pattern for `{column}` references in templates.
pub(crate) static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^}]+)\}").expect("valid regex"));

/// Extract column names referenced by a template's `{column}` placeholders,
/// in appearance order.
pub fn extract_template_columns(template: &str) -> Vec<String> {
    PLACEHOLDER_RE
        .captures_iter(template)
        .map(|cap| cap[1].to_string())
        .collect()
}

/// A single TriplesMap definition
///
/// Specifies how rows of one logical table become RDF triples: a subject
/// template instantiated per row, plus an ordered list of predicate-object
/// rules. Rule order is preserved from the mapping document and determines
/// triple emission order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriplesMap {
    /// IRI of the TriplesMap resource
    pub iri: String,
    /// The logical table this map reads from (informational provenance)
    pub logical_table: LogicalTable,
    /// The subject map
    pub subject_map: SubjectMap,
    /// Predicate-object maps, in document order
    pub predicate_object_maps: Vec<PredicateObjectMap>,
}

impl TriplesMap {
    /// Create a TriplesMap with a subject template and no rules
    pub fn new(iri: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            iri: iri.into(),
            logical_table: LogicalTable::default(),
            subject_map: SubjectMap::template(template),
            predicate_object_maps: Vec::new(),
        }
    }

    /// Get the table name, if one was declared
    pub fn table_name(&self) -> Option<&str> {
        self.logical_table.table_name.as_deref()
    }
}

/// Logical table reference
///
/// Row data is supplied directly by the caller, so the table name and query
/// are carried as provenance only and never executed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogicalTable {
    /// `rr:tableName`, if present
    pub table_name: Option<String>,
    /// `rr:sqlQuery`, if present
    pub sql_query: Option<String>,
}

/// Subject map
///
/// Generates subject IRIs from a template with `{column}` placeholders, and
/// optionally asserts one or more `rdf:type` classes on every subject.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectMap {
    /// `rr:template` - IRI template with `{column}` placeholders
    pub template: String,
    /// Column names referenced by the template
    pub template_columns: Vec<String>,
    /// `rr:class` IRIs asserted via rdf:type for each generated subject
    pub classes: Vec<String>,
}

impl SubjectMap {
    /// Create a subject map from a template
    pub fn template(template: impl Into<String>) -> Self {
        let template = template.into();
        let template_columns = extract_template_columns(&template);
        Self {
            template,
            template_columns,
            classes: Vec::new(),
        }
    }

    /// Add a class assertion
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }
}

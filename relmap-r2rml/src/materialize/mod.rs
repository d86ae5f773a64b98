//! Triple materialization
//!
//! Instantiates [`TriplesMap`] definitions against tabular rows, producing
//! concrete RDF triples. Generation is pure and deterministic: identical
//! inputs always yield an identical ordered triple sequence.

use serde_json::Value;
use tracing::warn;

use relmap_graph_ir::{Datatype, Term, Triple};
use relmap_vocab::rdf;

use crate::mapping::{ObjectMap, TermType, TriplesMap, PLACEHOLDER_RE};

/// A single tabular row: column name to scalar JSON value.
pub type Row = serde_json::Map<String, Value>;

/// Generate triples from mapping definitions and row data.
///
/// The outer loop runs over `maps`, the inner loop over `rows`; within one
/// (map, row) pair, `rdf:type` triples for the subject's classes come
/// first, then one triple per predicate-object rule in document order.
/// This nesting fixes the output sequence.
///
/// Missing columns degrade silently: an unresolvable template placeholder
/// stays as literal `{column}` text in the subject IRI, and a rule whose
/// object cannot be resolved is skipped for that row.
pub fn generate(maps: &[TriplesMap], rows: &[Row]) -> Vec<Triple> {
    if maps.is_empty() {
        warn!("no mapping definitions supplied, generating no triples");
        return Vec::new();
    }
    if rows.is_empty() {
        warn!("no row data supplied, generating no triples");
        return Vec::new();
    }

    let mut triples = Vec::new();

    for map in maps {
        for row in rows {
            let subject = Term::iri(expand_template(&map.subject_map.template, row));

            for class in &map.subject_map.classes {
                triples.push(Triple::new(
                    subject.clone(),
                    Term::iri(rdf::TYPE),
                    Term::iri(class),
                ));
            }

            for pom in &map.predicate_object_maps {
                let object_map = match &pom.object_map {
                    Some(om) => om,
                    None => continue, // inert rule
                };

                let object = match resolve_object(object_map, row) {
                    Some(term) => term,
                    None => continue, // no value for this row
                };

                triples.push(Triple::new(
                    subject.clone(),
                    Term::iri(&pom.predicate),
                    object,
                ));
            }
        }
    }

    triples
}

/// Expand a subject template against a row.
///
/// Each `{column}` placeholder is replaced with the percent-encoded string
/// form of the row's value; a present null substitutes as `null`.
/// Placeholders whose column is absent are left as literal `{column}`
/// text.
pub fn expand_template(template: &str, row: &Row) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &regex::Captures<'_>| {
            let column = &caps[1];
            match row.get(column).and_then(value_to_string) {
                Some(value) => iri_escape(&value),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Resolve an object term for one rule and row.
///
/// Column values take precedence over constants. Returns None when the
/// column is absent and no constant applies.
fn resolve_object(object_map: &ObjectMap, row: &Row) -> Option<Term> {
    let value = match object_map {
        ObjectMap::Column { column, .. } => row.get(column).and_then(value_to_string)?,
        ObjectMap::Constant { value, .. } => value.clone(),
    };

    Some(classify_object(object_map, value))
}

/// Build the object term for a resolved value.
///
/// An explicit `rr:termType` annotation decides the term kind; without one,
/// values beginning with `http://` or `https://` become IRIs and everything
/// else becomes a literal carrying the rule's datatype or language tag.
fn classify_object(object_map: &ObjectMap, value: String) -> Term {
    let term_type = object_map.term_type().unwrap_or_else(|| {
        if value.starts_with("http://") || value.starts_with("https://") {
            TermType::Iri
        } else {
            TermType::Literal
        }
    });

    match term_type {
        TermType::Iri => Term::iri(value),
        TermType::BlankNode => Term::blank(value),
        TermType::Literal => {
            if let Some(lang) = object_map.language() {
                Term::lang_string(value, lang)
            } else if let Some(datatype) = object_map.datatype() {
                Term::typed(value, Datatype::from_iri(datatype))
            } else {
                Term::string(value)
            }
        }
    }
}

/// Convert a scalar JSON value to its string form.
///
/// A present null stringifies to `"null"`; only a missing key counts as
/// absent. Non-scalar values (arrays, objects) are not legal row values
/// and yield no string.
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Percent-encode a string for substitution into an IRI template.
fn iri_escape(value: &str) -> String {
    let mut result = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' => result.push(c),
            '-' | '_' | '.' | '!' | '~' | '*' | '\'' | '(' | ')' => result.push(c),
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).as_bytes() {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }

    result
}

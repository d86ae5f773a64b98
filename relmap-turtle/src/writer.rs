//! Turtle serialization for triple slices.
//!
//! Produces a `@prefix` header followed by one block per subject, grouping
//! predicates with `;` and repeated objects with `,`. Subject blocks appear
//! in first-seen order, so serializing a freshly generated triple list keeps
//! the generation order readable in the output.

use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;

use relmap_graph_ir::{Term, Triple};
use relmap_vocab::{rdf, xsd};

/// Serialize triples to a Turtle document.
///
/// `prefixes` maps prefix labels to namespace IRIs; the empty-string label
/// is emitted as the default prefix (`@prefix : <...> .`). IRIs are
/// compacted against the longest matching namespace when the remainder is a
/// safe local name, otherwise written in full `<...>` form.
pub fn write_triples(triples: &[Triple], prefixes: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(triples.len() * 64 + 128);

    for (prefix, namespace) in prefixes {
        writeln!(out, "@prefix {}: <{}> .", prefix, namespace).unwrap();
    }
    if !prefixes.is_empty() && !triples.is_empty() {
        out.push('\n');
    }

    // Group by subject, preserving first-seen order
    let mut subjects: Vec<&Term> = Vec::new();
    let mut by_subject: BTreeMap<usize, Vec<&Triple>> = BTreeMap::new();
    for triple in triples {
        let idx = match subjects.iter().position(|s| **s == triple.s) {
            Some(idx) => idx,
            None => {
                subjects.push(&triple.s);
                subjects.len() - 1
            }
        };
        by_subject.entry(idx).or_default().push(triple);
    }

    for (idx, subject) in subjects.iter().enumerate() {
        let group = &by_subject[&idx];
        write_subject_block(&mut out, subject, group, prefixes);
        if idx + 1 < subjects.len() {
            out.push('\n');
        }
    }

    out
}

fn write_subject_block(
    out: &mut String,
    subject: &Term,
    triples: &[&Triple],
    prefixes: &BTreeMap<String, String>,
) {
    // Group objects under each predicate, keeping predicate first-seen order
    let mut predicates: Vec<&Term> = Vec::new();
    let mut objects: Vec<Vec<&Term>> = Vec::new();
    for triple in triples {
        match predicates.iter().position(|p| **p == triple.p) {
            Some(idx) => objects[idx].push(&triple.o),
            None => {
                predicates.push(&triple.p);
                objects.push(vec![&triple.o]);
            }
        }
    }

    writeln!(out, "{}", format_term(subject, prefixes)).unwrap();

    for (idx, (predicate, objs)) in predicates.iter().zip(&objects).enumerate() {
        let pred_str = if predicate.as_iri() == Some(rdf::TYPE) {
            "a".to_string()
        } else {
            format_term(predicate, prefixes)
        };

        let objs_str = objs
            .iter()
            .map(|o| format_term(o, prefixes))
            .collect::<Vec<_>>()
            .join(", ");

        let terminator = if idx + 1 < predicates.len() { ";" } else { "." };
        writeln!(out, "    {} {} {}", pred_str, objs_str, terminator).unwrap();
    }
}

/// Format a term for Turtle output, compacting IRIs where possible.
fn format_term(term: &Term, prefixes: &BTreeMap<String, String>) -> String {
    match term {
        Term::Iri(iri) => format_iri(iri, prefixes),
        Term::BlankNode(id) => format!("_:{}", id.as_str()),
        Term::Literal {
            lexical,
            datatype,
            language,
        } => {
            let mut s = format!("\"{}\"", escape_literal(lexical));
            if let Some(lang) = language {
                s.push('@');
                s.push_str(lang);
            } else if !datatype.is_xsd_string() {
                s.push_str("^^");
                s.push_str(&format_iri(datatype.as_iri(), prefixes));
            }
            s
        }
    }
}

/// Compact an IRI against the longest matching namespace, or fall back to
/// the full `<...>` form.
fn format_iri(iri: &str, prefixes: &BTreeMap<String, String>) -> String {
    let mut best: Option<(&str, &str)> = None;
    for (prefix, namespace) in prefixes {
        if let Some(local) = iri.strip_prefix(namespace.as_str()) {
            if is_safe_local_name(local)
                && best.map_or(true, |(_, ns)| namespace.len() > ns.len())
            {
                best = Some((prefix, local));
            }
        }
    }

    match best {
        Some((prefix, local)) => format!("{}:{}", prefix, local),
        None => format!("<{}>", iri),
    }
}

/// Check whether a local name can be written unescaped in a prefixed name.
///
/// Conservative: anything outside simple name characters forces the full
/// IRI form rather than local-name escaping.
fn is_safe_local_name(local: &str) -> bool {
    if local.is_empty() {
        return true;
    }
    let mut chars = local.chars();
    let first = chars.next().unwrap();
    if !(first.is_alphanumeric() || first == '_') {
        return false;
    }
    let bytes = local.as_bytes();
    if bytes[bytes.len() - 1] == b'.' {
        return false;
    }
    local
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Escape special characters for Turtle string literals.
fn escape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

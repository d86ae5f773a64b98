//! Turtle parser building an in-memory graph.
//!
//! Recursive descent over the token stream. Directives update parser
//! state and are recorded on the output [`Graph`]; triple statements
//! append triples in document order. Errors point into the source with
//! line/column context.

use std::collections::HashMap;

use relmap_graph_ir::{Datatype, Graph, Term, Triple};
use relmap_vocab::rdf;

use crate::error::{Result, TurtleError};
use crate::lex::{tokenize, Token, TokenKind};

/// Turtle parser state.
pub struct Parser<'a> {
    src: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    graph: Graph,
    prefixes: HashMap<String, String>,
    base: Option<String>,
    bnode_seq: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser over the given document.
    pub fn new(src: &'a str) -> Result<Self> {
        Ok(Self {
            src,
            tokens: tokenize(src)?,
            pos: 0,
            graph: Graph::new(),
            prefixes: HashMap::new(),
            base: None,
            bnode_seq: 0,
        })
    }

    /// Parse the entire document.
    pub fn parse(mut self) -> Result<Graph> {
        while !self.at(&TokenKind::Eof) {
            match &self.peek().kind {
                TokenKind::KwPrefix => self.parse_prefix_directive()?,
                TokenKind::KwBase => self.parse_base_directive()?,
                _ => self.parse_triples()?,
            }
        }
        Ok(self.graph)
    }

    // Token cursor

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) {
        if !matches!(self.tokens[self.pos].kind, TokenKind::Eof) {
            self.pos += 1;
        }
    }

    fn at(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    fn eat(&mut self, kind: &TokenKind) -> Result<()> {
        if self.at(kind) {
            self.bump();
            Ok(())
        } else {
            self.fail(format!("expected {}, found {}", kind, self.peek().kind))
        }
    }

    /// Parse error at the current token, with source context.
    fn fail<T>(&self, what: impl Into<String>) -> Result<T> {
        Err(TurtleError::parse_in(
            self.src,
            self.peek().start,
            what.into(),
        ))
    }

    fn fresh_bnode(&mut self) -> Term {
        let term = Term::blank(format!("genid{}", self.bnode_seq));
        self.bnode_seq += 1;
        term
    }

    /// Consume the current token as an IRI node if it is one.
    ///
    /// Covers the three spellings an IRI node can take: a full `<...>`
    /// reference (resolved against the base) and both prefixed-name
    /// forms. Any other token leaves the cursor alone.
    fn take_iri(&mut self) -> Result<Option<String>> {
        let iri = match &self.peek().kind {
            TokenKind::Iri(raw) => self.resolve_iri(raw.as_ref())?,
            TokenKind::PrefixedName { prefix, local } => self.expand(prefix, local)?,
            TokenKind::PrefixedNameNs(prefix) => self.expand(prefix, "")?,
            _ => return Ok(None),
        };
        self.bump();
        Ok(Some(iri))
    }

    // Statements

    fn parse_prefix_directive(&mut self) -> Result<()> {
        self.bump();

        let label = match &self.peek().kind {
            TokenKind::PrefixedNameNs(ns) => ns.to_string(),
            other => return self.fail(format!("expected prefix label, found {}", other)),
        };
        self.bump();

        let namespace = match &self.peek().kind {
            TokenKind::Iri(raw) => self.resolve_iri(raw.as_ref())?,
            other => return self.fail(format!("expected namespace IRI, found {}", other)),
        };
        self.bump();
        self.eat(&TokenKind::Dot)?;

        self.graph.add_prefix(&label, &namespace);
        self.prefixes.insert(label, namespace);
        Ok(())
    }

    fn parse_base_directive(&mut self) -> Result<()> {
        self.bump();

        let base = match &self.peek().kind {
            TokenKind::Iri(raw) => raw.to_string(),
            other => return self.fail(format!("expected base IRI, found {}", other)),
        };
        self.bump();
        self.eat(&TokenKind::Dot)?;

        self.graph.set_base(&base);
        self.base = Some(base);
        Ok(())
    }

    fn parse_triples(&mut self) -> Result<()> {
        let subject = self.parse_subject()?;
        self.parse_predicate_object_list(&subject)?;
        self.eat(&TokenKind::Dot)
    }

    fn parse_predicate_object_list(&mut self, subject: &Term) -> Result<()> {
        loop {
            let predicate = self.parse_predicate()?;

            loop {
                let object = self.parse_object()?;
                self.graph
                    .add(Triple::new(subject.clone(), predicate.clone(), object));
                if !self.at(&TokenKind::Comma) {
                    break;
                }
                self.bump();
            }

            if !self.at(&TokenKind::Semicolon) {
                break;
            }
            self.bump();

            // Trailing semicolon before the closing token
            if matches!(
                self.peek().kind,
                TokenKind::Dot | TokenKind::RBracket | TokenKind::Eof
            ) {
                break;
            }
        }
        Ok(())
    }

    // Terms

    fn parse_subject(&mut self) -> Result<Term> {
        if let Some(iri) = self.take_iri()? {
            return Ok(Term::iri(iri));
        }
        match &self.peek().kind {
            TokenKind::BlankNodeLabel(label) => {
                let term = Term::blank(label.as_ref());
                self.bump();
                Ok(term)
            }
            TokenKind::Anon => {
                self.bump();
                Ok(self.fresh_bnode())
            }
            TokenKind::LBracket => self.parse_property_list_node(),
            other => self.fail(format!("expected subject, found {}", other)),
        }
    }

    fn parse_predicate(&mut self) -> Result<Term> {
        if self.at(&TokenKind::KwA) {
            self.bump();
            return Ok(Term::iri(rdf::TYPE));
        }
        match self.take_iri()? {
            Some(iri) => Ok(Term::iri(iri)),
            None => self.fail(format!("expected predicate, found {}", self.peek().kind)),
        }
    }

    fn parse_object(&mut self) -> Result<Term> {
        if let Some(iri) = self.take_iri()? {
            return Ok(Term::iri(iri));
        }
        match &self.peek().kind {
            TokenKind::BlankNodeLabel(label) => {
                let term = Term::blank(label.as_ref());
                self.bump();
                Ok(term)
            }
            TokenKind::Anon => {
                self.bump();
                Ok(self.fresh_bnode())
            }
            TokenKind::LBracket => self.parse_property_list_node(),
            TokenKind::String(_)
            | TokenKind::Integer(_)
            | TokenKind::Decimal(_)
            | TokenKind::Double(_)
            | TokenKind::KwTrue
            | TokenKind::KwFalse => self.parse_literal(),
            other => self.fail(format!("expected object, found {}", other)),
        }
    }

    /// Literal object. Numeric tokens keep their written form as the
    /// literal's lexical value.
    fn parse_literal(&mut self) -> Result<Term> {
        let kind = self.peek().kind.clone();
        match kind {
            TokenKind::String(text) => {
                self.bump();
                match self.peek().kind.clone() {
                    TokenKind::LangTag(tag) => {
                        self.bump();
                        Ok(Term::lang_string(text.as_ref(), tag.as_ref()))
                    }
                    TokenKind::DoubleCaret => {
                        self.bump();
                        match self.take_iri()? {
                            Some(dt) => Ok(Term::typed(text.as_ref(), Datatype::from_iri(dt))),
                            None => self.fail(format!(
                                "expected datatype IRI, found {}",
                                self.peek().kind
                            )),
                        }
                    }
                    _ => Ok(Term::string(text.as_ref())),
                }
            }
            TokenKind::Integer(s) => {
                self.bump();
                Ok(Term::typed(s.as_ref(), Datatype::xsd_integer()))
            }
            TokenKind::Decimal(s) => {
                self.bump();
                Ok(Term::typed(s.as_ref(), Datatype::xsd_decimal()))
            }
            TokenKind::Double(s) => {
                self.bump();
                Ok(Term::typed(s.as_ref(), Datatype::xsd_double()))
            }
            TokenKind::KwTrue => {
                self.bump();
                Ok(Term::boolean(true))
            }
            TokenKind::KwFalse => {
                self.bump();
                Ok(Term::boolean(false))
            }
            other => self.fail(format!("expected literal, found {}", other)),
        }
    }

    /// Bracketed property list: `[ p o ; ... ]` introducing a fresh
    /// blank node.
    fn parse_property_list_node(&mut self) -> Result<Term> {
        self.eat(&TokenKind::LBracket)?;
        let node = self.fresh_bnode();
        if !self.at(&TokenKind::RBracket) {
            self.parse_predicate_object_list(&node)?;
        }
        self.eat(&TokenKind::RBracket)?;
        Ok(node)
    }

    // IRI handling

    fn expand(&self, prefix: &str, local: &str) -> Result<String> {
        match self.prefixes.get(prefix) {
            Some(ns) => Ok(format!("{}{}", ns, local)),
            None => Err(TurtleError::UndefinedPrefix(prefix.to_string())),
        }
    }

    /// Resolve an IRI reference against the document base.
    fn resolve_iri(&self, reference: &str) -> Result<String> {
        if reference.is_empty() {
            return self.base.clone().ok_or_else(|| {
                TurtleError::IriResolution("empty IRI reference without base".to_string())
            });
        }
        if has_scheme(reference) {
            return Ok(reference.to_string());
        }
        match &self.base {
            Some(base) => Ok(resolve_relative(base, reference)),
            None => Err(TurtleError::IriResolution(format!(
                "relative IRI '{}' without base",
                reference
            ))),
        }
    }
}

/// Does the reference open with a `scheme:` component?
fn has_scheme(reference: &str) -> bool {
    match reference.split_once(':') {
        Some((scheme, _)) => {
            let mut chars = scheme.chars();
            chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// The components of an IRI, borrowed from its text.
struct IriParts<'a> {
    scheme: &'a str,
    authority: Option<&'a str>,
    path: &'a str,
    query: Option<&'a str>,
}

impl<'a> IriParts<'a> {
    /// Split an absolute IRI. Fragments are dropped.
    fn parse(iri: &'a str) -> Self {
        let (scheme, rest) = match iri.split_once(':') {
            Some((s, r)) => (s, r),
            None => ("", iri),
        };
        let mut parts = Self::parse_relative(rest);
        parts.scheme = scheme;
        parts
    }

    /// Split an authority/path/query form that carries no scheme.
    fn parse_relative(s: &'a str) -> Self {
        let s = s.split_once('#').map_or(s, |(before, _)| before);

        let (authority, rest) = match s.strip_prefix("//") {
            Some(tail) => {
                let end = tail.find(['/', '?']).unwrap_or(tail.len());
                (Some(&tail[..end]), &tail[end..])
            }
            None => (None, s),
        };

        let (path, query) = match rest.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (rest, None),
        };

        Self {
            scheme: "",
            authority,
            path,
            query,
        }
    }
}

/// RFC 3986 section 5.2 reference resolution.
fn resolve_relative(base: &str, reference: &str) -> String {
    let (core, fragment) = match reference.split_once('#') {
        Some((c, f)) => (c, Some(f)),
        None => (reference, None),
    };

    let b = IriParts::parse(base);
    let r = IriParts::parse_relative(core);

    let (authority, path, query) = if r.authority.is_some() {
        (
            r.authority.map(str::to_string),
            squash_dots(r.path),
            r.query,
        )
    } else if r.path.is_empty() {
        (
            b.authority.map(str::to_string),
            b.path.to_string(),
            r.query.or(b.query),
        )
    } else if r.path.starts_with('/') {
        (
            b.authority.map(str::to_string),
            squash_dots(r.path),
            r.query,
        )
    } else {
        (
            b.authority.map(str::to_string),
            squash_dots(&merge_paths(&b, r.path)),
            r.query,
        )
    };

    let mut out = String::with_capacity(base.len() + reference.len());
    out.push_str(b.scheme);
    out.push(':');
    if let Some(auth) = &authority {
        out.push_str("//");
        out.push_str(auth);
    }
    out.push_str(&path);
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    if let Some(f) = fragment {
        out.push('#');
        out.push_str(f);
    }
    out
}

/// Merge a relative path into the base's directory (RFC 3986 5.3).
fn merge_paths(base: &IriParts<'_>, rel: &str) -> String {
    if base.authority.is_some() && base.path.is_empty() {
        return format!("/{}", rel);
    }
    match base.path.rfind('/') {
        Some(end) => format!("{}{}", &base.path[..=end], rel),
        None => rel.to_string(),
    }
}

/// Dot-segment removal (RFC 3986 5.2.4).
fn squash_dots(path: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "." => {}
            ".." => {
                kept.pop();
            }
            other => kept.push(other),
        }
    }

    let joined = kept.join("/");
    if path.starts_with('/') && !joined.starts_with('/') {
        format!("/{}", joined)
    } else {
        joined
    }
}

/// Parse a Turtle document into a graph.
pub fn parse(input: &str) -> Result<Graph> {
    Parser::new(input)?.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use relmap_vocab::xsd;

    fn only_triple(graph: &Graph) -> &Triple {
        assert_eq!(graph.len(), 1);
        graph.triples().first().unwrap()
    }

    #[test]
    fn parses_a_plain_triple() {
        let graph = parse(
            r#"<http://factory.example/press> <http://factory.example/label> "Press 9" ."#,
        )
        .unwrap();

        let triple = only_triple(&graph);
        assert_eq!(triple.s.as_iri(), Some("http://factory.example/press"));
        assert_eq!(triple.p.as_iri(), Some("http://factory.example/label"));
        assert_eq!(triple.o, Term::string("Press 9"));
    }

    #[test]
    fn expands_declared_prefixes() {
        let graph = parse(
            r#"
            @prefix rr: <http://www.w3.org/ns/r2rml#> .
            @prefix ex: <http://factory.example/> .
            ex:mapping rr:tableName "machines" .
            "#,
        )
        .unwrap();

        let triple = only_triple(&graph);
        assert_eq!(triple.s.as_iri(), Some("http://factory.example/mapping"));
        assert_eq!(
            triple.p.as_iri(),
            Some("http://www.w3.org/ns/r2rml#tableName")
        );
        assert_eq!(
            graph.prefixes.get("rr").map(String::as_str),
            Some("http://www.w3.org/ns/r2rml#")
        );
    }

    #[test]
    fn a_is_rdf_type() {
        let graph = parse(
            r#"
            @prefix ex: <http://factory.example/> .
            ex:press a ex:Machine .
            "#,
        )
        .unwrap();

        assert_eq!(only_triple(&graph).p.as_iri(), Some(rdf::TYPE));
    }

    #[test]
    fn semicolons_share_the_subject_and_commas_the_predicate() {
        let graph = parse(
            r#"
            @prefix ex: <http://factory.example/> .
            ex:press ex:label "Press" ;
                     ex:feeds ex:line1, ex:line2 .
            "#,
        )
        .unwrap();

        assert_eq!(graph.len(), 3);
        let subjects: Vec<_> = graph.triples().iter().map(|t| t.s.clone()).collect();
        assert!(subjects
            .iter()
            .all(|s| s.as_iri() == Some("http://factory.example/press")));
        assert_eq!(
            graph.triples()[2].o.as_iri(),
            Some("http://factory.example/line2")
        );
    }

    #[test]
    fn labeled_blank_nodes_keep_their_label() {
        let graph = parse(
            r#"
            @prefix ex: <http://factory.example/> .
            _:cell ex:label "B3" .
            "#,
        )
        .unwrap();

        assert_eq!(only_triple(&graph).s, Term::blank("cell"));
    }

    #[test]
    fn bracketed_property_lists_allocate_fresh_nodes() {
        let graph = parse(
            r#"
            @prefix ex: <http://factory.example/> .
            ex:press ex:operator [ ex:name "Ada" ] .
            "#,
        )
        .unwrap();

        assert_eq!(graph.len(), 2);
        let node = &graph.triples()[0].o;
        assert!(node.is_blank());
        assert_eq!(&graph.triples()[1].s, node);
    }

    #[test]
    fn nested_property_lists() {
        let graph = parse(
            r#"
            @prefix rr: <http://www.w3.org/ns/r2rml#> .
            @prefix ex: <http://factory.example/> .
            ex:m rr:subjectMap [ rr:template "t" ; rr:graphMap [ rr:column "g" ] ] .
            "#,
        )
        .unwrap();

        assert_eq!(graph.len(), 4);
    }

    #[test]
    fn typed_and_tagged_literals() {
        let graph = parse(
            r#"
            @prefix ex: <http://factory.example/> .
            @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
            ex:press ex:installed "2019-04-01"^^xsd:date ;
                     ex:label "presse"@fr .
            "#,
        )
        .unwrap();

        let (lexical, datatype, _) = graph.triples()[0].o.as_literal().unwrap();
        assert_eq!(lexical, "2019-04-01");
        assert_eq!(datatype.as_iri(), xsd::DATE);

        let (_, _, language) = graph.triples()[1].o.as_literal().unwrap();
        assert_eq!(language, Some("fr"));
    }

    #[test]
    fn datatype_via_full_iri() {
        let graph = parse(
            r#"
            @prefix ex: <http://factory.example/> .
            ex:press ex:weight "1500"^^<http://www.w3.org/2001/XMLSchema#integer> .
            "#,
        )
        .unwrap();

        let (lexical, datatype, _) = only_triple(&graph).o.as_literal().unwrap();
        assert_eq!(lexical, "1500");
        assert_eq!(datatype.as_iri(), xsd::INTEGER);
    }

    #[test]
    fn numeric_literals_keep_the_written_form() {
        let graph = parse(
            r#"
            @prefix ex: <http://factory.example/> .
            ex:press ex:bay 030 .
            "#,
        )
        .unwrap();

        let (lexical, datatype, _) = only_triple(&graph).o.as_literal().unwrap();
        assert_eq!(lexical, "030");
        assert_eq!(datatype.as_iri(), xsd::INTEGER);
    }

    #[test]
    fn integer_object_closed_by_the_statement_dot() {
        let graph = parse(
            r#"
            @prefix ex: <http://factory.example/> .
            ex:press ex:bay 7.
            "#,
        )
        .unwrap();

        let (lexical, datatype, _) = only_triple(&graph).o.as_literal().unwrap();
        assert_eq!(lexical, "7");
        assert_eq!(datatype.as_iri(), xsd::INTEGER);
    }

    #[test]
    fn boolean_objects() {
        let graph = parse(
            r#"
            @prefix ex: <http://factory.example/> .
            ex:press ex:active true .
            "#,
        )
        .unwrap();

        assert_eq!(only_triple(&graph).o, Term::boolean(true));
    }

    #[test]
    fn relative_iris_resolve_against_the_base() {
        let graph = parse(
            r#"
            @base <http://factory.example/floor/> .
            <press> <label> "Press" .
            <../office> <label> "Office" .
            "#,
        )
        .unwrap();

        assert_eq!(
            graph.triples()[0].s.as_iri(),
            Some("http://factory.example/floor/press")
        );
        assert_eq!(
            graph.triples()[0].p.as_iri(),
            Some("http://factory.example/floor/label")
        );
        assert_eq!(
            graph.triples()[1].s.as_iri(),
            Some("http://factory.example/office")
        );
    }

    #[test]
    fn fragment_references_resolve_against_the_base() {
        let graph = parse(
            r#"
            @base <http://factory.example/doc> .
            <#press> <#label> "Press" .
            "#,
        )
        .unwrap();

        assert_eq!(
            only_triple(&graph).s.as_iri(),
            Some("http://factory.example/doc#press")
        );
    }

    #[test]
    fn empty_reference_is_the_base() {
        let graph = parse(
            r#"
            @base <http://factory.example/doc> .
            <> <title> "The Document" .
            "#,
        )
        .unwrap();

        assert_eq!(
            only_triple(&graph).s.as_iri(),
            Some("http://factory.example/doc")
        );
    }

    #[test]
    fn undeclared_prefix_is_an_error() {
        let err = parse("ex:press ex:label \"Press\" .").unwrap_err();
        assert!(matches!(err, TurtleError::UndefinedPrefix(p) if p == "ex"));
    }

    #[test]
    fn parse_errors_point_into_the_source() {
        let err = parse(
            "@prefix ex: <http://factory.example/> .\nex:press ex:label ; .",
        )
        .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("expected object"));
        assert!(msg.contains("line 2"));
    }

    #[test]
    fn mapping_document_shape() {
        let graph = parse(
            r#"
            @prefix rr: <http://www.w3.org/ns/r2rml#> .
            @prefix ex: <http://factory.example/> .

            ex:MachineMapping
                rr:logicalTable [ rr:tableName "machines" ] ;
                rr:subjectMap [
                    rr:template "http://factory.example/machine/{id}" ;
                    rr:class ex:Machine
                ] ;
                rr:predicateObjectMap [
                    rr:predicate ex:label ;
                    rr:objectMap [ rr:column "label" ]
                ] .
            "#,
        )
        .unwrap();

        // 3 top-level + 1 tableName + 2 subjectMap + 3 predicateObjectMap
        assert_eq!(graph.len(), 9);

        let template = graph
            .triples()
            .iter()
            .find(|t| t.p.as_iri() == Some("http://www.w3.org/ns/r2rml#template"))
            .unwrap();
        assert_eq!(
            template.o.as_literal().map(|(l, _, _)| l),
            Some("http://factory.example/machine/{id}")
        );
    }
}

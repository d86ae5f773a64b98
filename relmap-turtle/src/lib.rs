//! Turtle parsing and serialization over the relmap graph IR.
//!
//! This crate covers the Turtle subset that R2RML mapping documents and the
//! generated output use: prefix/base directives, prefixed names, blank node
//! labels and property lists, and string/numeric/boolean literals with
//! optional language tags or datatypes. RDF collections are not supported.
//!
//! # Example
//!
//! ```
//! use relmap_turtle::{parse, write_triples};
//!
//! let turtle = r#"
//!     @prefix ex: <http://example.org/> .
//!     ex:alice ex:name "Alice" ;
//!              ex:age 30 .
//! "#;
//!
//! let graph = parse(turtle).unwrap();
//! assert_eq!(graph.len(), 2);
//!
//! let output = write_triples(graph.triples(), &graph.prefixes);
//! assert!(output.contains("ex:alice"));
//! ```

pub mod error;
pub mod lex;
pub mod parser;
pub mod writer;

pub use error::{Result, TurtleError};
pub use lex::{tokenize, Token, TokenKind};
pub use parser::{parse, Parser};
pub use writer::write_triples;

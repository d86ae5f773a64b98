//! R2RML mapping loader
//!
//! Parses mapping documents into [`TriplesMap`] definitions. The loader
//! first parses the document into the shared graph IR, then extracts
//! TriplesMap definitions from the graph. Callers with a pre-parsed graph
//! can use [`MappingLoader::from_graph`] directly.

mod extractor;

pub use extractor::MappingExtractor;

use relmap_graph_ir::Graph;
use relmap_turtle::parse as parse_turtle;

use crate::error::{R2rmlError, R2rmlResult};
use crate::mapping::TriplesMap;

/// R2RML mapping loader
pub struct MappingLoader {
    graph: Graph,
}

impl MappingLoader {
    /// Load a mapping from a pre-parsed graph
    pub fn from_graph(graph: Graph) -> Self {
        Self { graph }
    }

    /// Load a mapping from Turtle text
    ///
    /// Syntax errors propagate as [`R2rmlError::Parse`]; a well-formed
    /// document with no TriplesMaps is not an error.
    pub fn from_turtle(content: &str) -> R2rmlResult<Self> {
        let graph = parse_turtle(content).map_err(|e| R2rmlError::Parse(e.to_string()))?;
        Ok(Self { graph })
    }

    /// Get a reference to the underlying graph
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Extract all TriplesMap definitions from the loaded document
    pub fn triples_maps(&self) -> R2rmlResult<Vec<TriplesMap>> {
        MappingExtractor::new(&self.graph).extract_all()
    }
}

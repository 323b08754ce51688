//! Graph and subgraph templates

use crate::error::{WriterError, WriterResult};
use std::path::Path;

/// Built-in graph template.
pub const DEFAULT_GRAPH_TEMPLATE: &str = include_str!("../templates/graph.temp");

/// Built-in subgraph (module cluster) template.
pub const DEFAULT_SUBGRAPH_TEMPLATE: &str = include_str!("../templates/subgraph.temp");

/// One function inside a cluster.
pub const NODE_DEFINITION: &str = "%node.id% [label=\"%node.label%\"];";

/// One call between two rendered functions.
pub const EDGE_DEFINITION: &str = "%edge.src.id% -> %edge.dest.id%;";

/// One aggregated call between two modules.
pub const MODULE_EDGE_DEFINITION: &str = "%edge.src.id% -> %edge.dest.id% [label=\"%edge.count%\"];";

/// Template text used by the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    pub graph: String,
    pub subgraph: String,
}

impl Templates {
    pub fn new(graph: impl Into<String>, subgraph: impl Into<String>) -> Self {
        Templates {
            graph: graph.into(),
            subgraph: subgraph.into(),
        }
    }

    /// Read templates from disk, falling back to the built-in ones for any
    /// path not given.
    pub fn load(graph: Option<&Path>, subgraph: Option<&Path>) -> WriterResult<Self> {
        let graph = match graph {
            Some(path) => read_template(path)?,
            None => DEFAULT_GRAPH_TEMPLATE.to_string(),
        };
        let subgraph = match subgraph {
            Some(path) => read_template(path)?,
            None => DEFAULT_SUBGRAPH_TEMPLATE.to_string(),
        };
        Ok(Templates { graph, subgraph })
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::new(DEFAULT_GRAPH_TEMPLATE, DEFAULT_SUBGRAPH_TEMPLATE)
    }
}

fn read_template(path: &Path) -> WriterResult<String> {
    tracing::debug!("Reading template {}", path.display());
    std::fs::read_to_string(path).map_err(|e| WriterError::Template(path.to_path_buf(), e))
}

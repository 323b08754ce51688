//! JSON export of the merged model

use crate::error::WriterResult;
use crate::filter::ModuleFilter;
use depgraph_core::{CallGraph, NodeRef};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonGraph<'a> {
    name: &'a str,
    nodes: Vec<JsonNode<'a>>,
    edges: Vec<JsonEdge<'a>>,
    modules: Vec<JsonModule<'a>>,
}

/// Node as exported; `index` is the position in the node list.
#[derive(Debug, Serialize)]
struct JsonNode<'a> {
    index: usize,
    id: &'a str,
    label: &'a str,
    module: &'a str,
    is_root: bool,
    is_public: bool,
}

/// Edge with endpoints given by label; `None` marks an external call.
#[derive(Debug, Serialize)]
struct JsonEdge<'a> {
    source_id: &'a str,
    destination_id: &'a str,
    source: Option<&'a str>,
    destination: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct JsonModule<'a> {
    prefix: &'a str,
    functions: Vec<&'a str>,
}

/// Serialize nodes, edges and modules as pretty-printed JSON.
///
/// Only modules passing `filter.renders` are exported, along with their
/// functions, private ones included. An edge is dropped when one of its
/// resolved endpoints was left out; unresolved endpoints are kept as `null`.
pub fn export_json(graph: &CallGraph, name: &str, filter: &ModuleFilter) -> WriterResult<String> {
    let exported = |node: NodeRef| {
        graph
            .node(node)
            .is_some_and(|n| filter.renders(&n.module_prefix))
    };
    let label_of = |node: Option<NodeRef>| node.and_then(|n| graph.node(n)).map(|n| n.label.as_str());

    let doc = JsonGraph {
        name,
        nodes: graph
            .iter_nodes()
            .filter(|(_, node)| filter.renders(&node.module_prefix))
            .map(|(node_ref, node)| JsonNode {
                index: node_ref.0,
                id: &node.id,
                label: &node.label,
                module: &node.module_prefix,
                is_root: node.is_root,
                is_public: node.is_public,
            })
            .collect(),
        edges: graph
            .edges()
            .iter()
            .filter(|edge| {
                [edge.source, edge.destination]
                    .into_iter()
                    .flatten()
                    .all(|n| exported(n))
            })
            .map(|edge| JsonEdge {
                source_id: &edge.source_id,
                destination_id: &edge.destination_id,
                source: label_of(edge.source),
                destination: label_of(edge.destination),
            })
            .collect(),
        modules: graph
            .modules()
            .iter()
            .filter(|module| filter.renders(&module.prefix))
            .map(|module| JsonModule {
                prefix: &module.prefix,
                functions: module.nodes.iter().filter_map(|&n| label_of(Some(n))).collect(),
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&doc)?)
}

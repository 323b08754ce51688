//! Statement interpreter, cross-file merge, and module grouping
//!
//! Each input file is parsed on its own into a [`FileGraph`] whose edges point
//! at file-local node indices. Merging a `FileGraph` into a [`CallGraph`] drops
//! nodes whose label is already known and rewrites edges onto the canonical
//! node, so the first file (in input order) to mention a function wins.

use crate::lexer::{self, TokenKind, unquote};
use crate::model::{CallGraph, Edge, Node, NodeRef};
use crate::naming;
use tracing::{debug, trace};

/// An edge whose endpoints index into [`FileGraph::nodes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalEdge {
    pub source_id: String,
    pub destination_id: String,
    pub source: Option<usize>,
    pub destination: Option<usize>,
}

/// Nodes and edges of a single file, before merging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileGraph {
    /// Name of the first `digraph` declared in the file.
    pub graph_name: Option<String>,
    pub nodes: Vec<Node>,
    pub edges: Vec<LocalEdge>,
}

/// Counters reported by [`merge_file`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub nodes_added: usize,
    pub duplicate_nodes: usize,
    pub edges_added: usize,
    pub unresolved_endpoints: usize,
}

/// Parse the text of one file into its local nodes and edges.
///
/// Edge endpoints are resolved against the nodes seen so far; forward
/// references are retried once the whole file has been read. Ids that are
/// still unknown stay `None`.
pub fn parse_file(contents: &str) -> FileGraph {
    let mut file = FileGraph::default();

    for line in contents.lines() {
        let token = lexer::tokenize(line);
        match token.kind {
            TokenKind::DigraphDef => {
                if file.graph_name.is_none() {
                    debug!("Parsing graph: {}", token.value);
                    file.graph_name = Some(token.value.to_string());
                }
            }
            TokenKind::NodeStmt => match build_node(token.value, file.graph_name.as_deref()) {
                Some(node) => file.nodes.push(node),
                None => trace!("Skipping node statement without label: {}", token.value),
            },
            TokenKind::EdgeStmt => match edge_ids(token.value) {
                Some((src, dst)) => {
                    let edge = LocalEdge {
                        source_id: src.to_string(),
                        destination_id: dst.to_string(),
                        source: resolve(&file.nodes, src),
                        destination: resolve(&file.nodes, dst),
                    };
                    file.edges.push(edge);
                }
                None => trace!("Skipping malformed edge statement: {}", token.value),
            },
            _ => {}
        }
    }

    // Forward references: the node statement came after the edge.
    for edge in &mut file.edges {
        if edge.source.is_none() {
            edge.source = resolve(&file.nodes, &edge.source_id);
        }
        if edge.destination.is_none() {
            edge.destination = resolve(&file.nodes, &edge.destination_id);
        }
    }

    file
}

/// Merge one parsed file into the global graph.
///
/// Nodes whose label is already present are dropped and every edge endpoint
/// that referred to one is pointed at the canonical node (reference and id).
/// Nodes are appended before edges, both in file order.
pub fn merge_file(graph: &mut CallGraph, file: FileGraph) -> MergeStats {
    let mut stats = MergeStats::default();
    let mut canonical: Vec<NodeRef> = Vec::with_capacity(file.nodes.len());

    for node in file.nodes {
        let label = node.label.clone();
        let (node_ref, added) = graph.insert_node(node);
        if added {
            stats.nodes_added += 1;
        } else {
            trace!("Dropping duplicate node: {}", label);
            stats.duplicate_nodes += 1;
        }
        canonical.push(node_ref);
    }

    for local in file.edges {
        let (source, source_id) = rewrite_endpoint(graph, &canonical, local.source, local.source_id);
        let (destination, destination_id) =
            rewrite_endpoint(graph, &canonical, local.destination, local.destination_id);

        if source.is_none() {
            trace!("Unresolved caller: {}", source_id);
        }
        if destination.is_none() {
            trace!("Unresolved callee: {}", destination_id);
        }
        stats.unresolved_endpoints +=
            usize::from(source.is_none()) + usize::from(destination.is_none());

        graph.push_edge(Edge {
            source_id,
            destination_id,
            source,
            destination,
        });
        stats.edges_added += 1;
    }

    stats
}

/// Bucket every node with a non-empty prefix into its module.
///
/// Modules are created in the order their prefix is first seen. Calling this
/// again rebuilds the modules from scratch.
pub fn group_modules(graph: &mut CallGraph) {
    graph.clear_modules();

    let assignments: Vec<(String, NodeRef)> = graph
        .iter_nodes()
        .filter(|(_, node)| !node.module_prefix.is_empty())
        .map(|(node_ref, node)| (node.module_prefix.clone(), node_ref))
        .collect();

    for (prefix, node_ref) in assignments {
        graph.assign_to_module(&prefix, node_ref);
    }
}

/// Drives a whole run: files are merged in the order they are fed.
#[derive(Debug, Default)]
pub struct Parser {
    graph: CallGraph,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every file in order and group the result into modules.
    pub fn parse<I, S>(files: I) -> CallGraph
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parser = Parser::new();
        for contents in files {
            parser.parse_file(contents.as_ref());
        }
        parser.finish()
    }

    /// Parse one file and merge it into the running graph.
    pub fn parse_file(&mut self, contents: &str) -> MergeStats {
        let file = parse_file(contents);
        let stats = merge_file(&mut self.graph, file);
        debug!(
            "Merged {} nodes ({} duplicates), {} edges",
            stats.nodes_added, stats.duplicate_nodes, stats.edges_added
        );
        stats
    }

    /// Group modules and hand over the finished graph.
    pub fn finish(mut self) -> CallGraph {
        group_modules(&mut self.graph);
        self.graph
    }
}

fn rewrite_endpoint(
    graph: &CallGraph,
    canonical: &[NodeRef],
    local: Option<usize>,
    id: String,
) -> (Option<NodeRef>, String) {
    let Some(node_ref) = local.and_then(|idx| canonical.get(idx).copied()) else {
        return (None, id);
    };
    match graph.node(node_ref) {
        Some(node) => (Some(node_ref), node.id.clone()),
        None => (None, id),
    }
}

fn build_node(stmt: &str, graph_name: Option<&str>) -> Option<Node> {
    let id = node_id(stmt)?;
    let label = node_label(stmt)?;
    Some(Node {
        id: id.to_string(),
        label: label.to_string(),
        module_prefix: naming::module_prefix(label),
        is_root: naming::is_root(label, graph_name),
        is_public: naming::is_public(label),
    })
}

/// Most recently declared local node with this id.
fn resolve(nodes: &[Node], id: &str) -> Option<usize> {
    nodes.iter().rposition(|n| n.id == id)
}

/// Text in front of the attribute list.
pub fn node_id(stmt: &str) -> Option<&str> {
    let id = match stmt.find('[') {
        Some(open) => &stmt[..open],
        None => stmt,
    };
    let id = unquote(id.trim());
    (!id.is_empty()).then_some(id)
}

/// Value of the first `key=value` pair of the attribute list.
pub fn node_label(stmt: &str) -> Option<&str> {
    let open = stmt.find('[')?;
    let attrs = &stmt[open + 1..];
    let end = attrs.find([',', ']'])?;
    let (_, value) = attrs[..end].split_once('=')?;
    let label = unquote(value.trim());
    (!label.is_empty()).then_some(label)
}

/// Source and destination ids of `src -> dst [attrs];`.
pub fn edge_ids(stmt: &str) -> Option<(&str, &str)> {
    let (lhs, rhs) = stmt.split_once("->")?;
    let end = rhs.find(['[', ';']).unwrap_or(rhs.len());
    let dst = rhs[..end].trim();
    if dst.contains("->") {
        return None;
    }
    let src = unquote(lhs.trim());
    let dst = unquote(dst);
    if src.is_empty() || dst.is_empty() {
        return None;
    }
    Some((src, dst))
}

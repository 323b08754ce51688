//! Core data structures for the call graph

use std::collections::HashMap;

use serde::Serialize;

/// Handle to a node in the global node set of a [`CallGraph`].
///
/// Edges and modules refer to nodes through this index; the node set owns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Default)]
pub struct NodeRef(pub usize);

/// One function in the call graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Identifier used inside the file the node came from (e.g. `Node12`).
    /// Not unique across files.
    pub id: String,
    /// Function name; the identity of the node across all input files.
    pub label: String,
    /// Grouping key derived from the label.
    pub module_prefix: String,
    /// The label matches the name of the digraph it was declared in.
    pub is_root: bool,
    pub is_public: bool,
}

/// A call from one function to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub source_id: String,
    pub destination_id: String,
    /// Resolved caller. `None` when no node with `source_id` exists in scope.
    pub source: Option<NodeRef>,
    /// Resolved callee. `None` for calls leaving the analysed graph.
    pub destination: Option<NodeRef>,
}

impl Edge {
    /// Both endpoints point at nodes.
    pub fn is_resolved(&self) -> bool {
        self.source.is_some() && self.destination.is_some()
    }
}

/// Nodes sharing one module prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    pub prefix: String,
    pub nodes: Vec<NodeRef>,
}

impl Module {
    pub fn new(prefix: impl Into<String>) -> Self {
        Module {
            prefix: prefix.into(),
            nodes: Vec::new(),
        }
    }

    pub fn add(&mut self, node: NodeRef) {
        self.nodes.push(node);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// The merged, de-duplicated result of parsing every input file.
///
/// Owns all nodes; edges and modules hold [`NodeRef`]s into `nodes`.
/// Node labels are unique within one `CallGraph`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CallGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    modules: Vec<Module>,
    #[serde(skip)]
    by_label: HashMap<String, NodeRef>,
    #[serde(skip)]
    by_prefix: HashMap<String, usize>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node whose label is not yet present. Returns the existing
    /// canonical node instead when the label is already taken.
    pub(crate) fn insert_node(&mut self, node: Node) -> (NodeRef, bool) {
        if let Some(&existing) = self.by_label.get(&node.label) {
            return (existing, false);
        }
        let node_ref = NodeRef(self.nodes.len());
        self.by_label.insert(node.label.clone(), node_ref);
        self.nodes.push(node);
        (node_ref, true)
    }

    pub(crate) fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Find or create the module for `prefix` and add `node` to it.
    pub(crate) fn assign_to_module(&mut self, prefix: &str, node: NodeRef) {
        let idx = match self.by_prefix.get(prefix) {
            Some(&idx) => idx,
            None => {
                let idx = self.modules.len();
                self.modules.push(Module::new(prefix));
                self.by_prefix.insert(prefix.to_string(), idx);
                idx
            }
        };
        self.modules[idx].add(node);
    }

    pub(crate) fn clear_modules(&mut self) {
        self.modules.clear();
        self.by_prefix.clear();
    }

    /// Get a node by reference.
    pub fn node(&self, node: NodeRef) -> Option<&Node> {
        self.nodes.get(node.0)
    }

    /// Find the canonical node for a label.
    pub fn node_by_label(&self, label: &str) -> Option<NodeRef> {
        self.by_label.get(label).copied()
    }

    /// Find a module by prefix.
    pub fn module(&self, prefix: &str) -> Option<&Module> {
        self.by_prefix.get(prefix).map(|&idx| &self.modules[idx])
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Iterate over nodes together with their references.
    pub fn iter_nodes(&self) -> impl Iterator<Item = (NodeRef, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeRef(i), n))
    }

    /// Nodes that were the subject of one of the input graphs.
    pub fn root_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_root)
    }

    /// Number of edge endpoints that point outside the analysed graph.
    pub fn unresolved_endpoints(&self) -> usize {
        self.edges
            .iter()
            .map(|e| usize::from(e.source.is_none()) + usize::from(e.destination.is_none()))
            .sum()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

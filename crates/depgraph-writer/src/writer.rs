//! Template-based DOT rendering of a merged call graph

use crate::error::{WriterError, WriterResult};
use crate::filter::ModuleFilter;
use crate::templates::{EDGE_DEFINITION, MODULE_EDGE_DEFINITION, NODE_DEFINITION, Templates};
use depgraph_core::{CallGraph, Module, NodeRef, aggregate_module_edges};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const NODE_INDENT: &str = "        ";
const EDGE_INDENT: &str = "    ";

/// What the output graph is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Functions clustered by module and visibility.
    #[default]
    Functions,
    /// One node per module, calls aggregated between modules.
    Modules,
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "functions" => Ok(View::Functions),
            "modules" => Ok(View::Modules),
            other => Err(format!("unknown view '{}' (expected functions or modules)", other)),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Functions => f.write_str("functions"),
            View::Modules => f.write_str("modules"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visibility {
    Public,
    Private,
}

impl Visibility {
    fn short(self) -> &'static str {
        match self {
            Visibility::Public => "pub",
            Visibility::Private => "priv",
        }
    }

    fn long(self) -> &'static str {
        match self {
            Visibility::Public => "Public",
            Visibility::Private => "Private",
        }
    }
}

/// Fills the graph templates from a [`CallGraph`].
///
/// Rendered node ids are `n<index>` (function view) or `m<index>` (module
/// view): ids from the input files are not unique across files.
#[derive(Debug, Clone)]
pub struct GraphWriter {
    templates: Templates,
    filter: ModuleFilter,
    view: View,
    name: String,
}

impl GraphWriter {
    pub fn new(templates: Templates) -> Self {
        GraphWriter {
            templates,
            filter: ModuleFilter::all(),
            view: View::Functions,
            name: "depgraph".to_string(),
        }
    }

    pub fn with_filter(mut self, filter: ModuleFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Render the graph to DOT text.
    pub fn render(&self, graph: &CallGraph) -> String {
        let (body, edges) = match self.view {
            View::Functions => self.render_functions(graph),
            View::Modules => self.render_modules(graph),
        };

        self.templates
            .graph
            .replace("%graph.name%", &escape_dot_label(&self.name))
            .replace("%graph.subgraph_cluster%", &body)
            .replace("%graph.edges%", &edges)
    }

    /// Render the graph and write it to `path`.
    pub fn draw_graph(&self, graph: &CallGraph, path: &Path) -> WriterResult<()> {
        let output = self.render(graph);
        std::fs::write(path, output).map_err(|e| WriterError::Write(path.to_path_buf(), e))?;
        tracing::info!("Wrote {} view to {}", self.view, path.display());
        Ok(())
    }

    fn render_functions(&self, graph: &CallGraph) -> (String, String) {
        let mut clusters = String::new();
        let mut visible: HashSet<NodeRef> = HashSet::new();

        for module in graph.modules() {
            if !self.filter.renders(&module.prefix) {
                continue;
            }

            let (public, private): (Vec<NodeRef>, Vec<NodeRef>) = module
                .nodes
                .iter()
                .copied()
                .partition(|&n| graph.node(n).is_some_and(|node| node.is_public));

            if !public.is_empty() {
                clusters.push_str(&self.render_subgraph(graph, module, Visibility::Public, &public));
                visible.extend(public.iter().copied());
            }
            if self.filter.shows_private(&module.prefix) && !private.is_empty() {
                clusters.push_str(&self.render_subgraph(graph, module, Visibility::Private, &private));
                visible.extend(private.iter().copied());
            }
        }

        let mut drawn: HashSet<(NodeRef, NodeRef)> = HashSet::new();
        let mut edges = String::new();
        for edge in graph.edges() {
            let (Some(src), Some(dst)) = (edge.source, edge.destination) else {
                continue;
            };
            if !visible.contains(&src) || !visible.contains(&dst) || !drawn.insert((src, dst)) {
                continue;
            }
            let line = EDGE_DEFINITION
                .replace("%edge.src.id%", &node_key(src))
                .replace("%edge.dest.id%", &node_key(dst));
            edges.push_str(EDGE_INDENT);
            edges.push_str(&line);
            edges.push('\n');
        }

        (clusters, edges)
    }

    fn render_subgraph(
        &self,
        graph: &CallGraph,
        module: &Module,
        visibility: Visibility,
        members: &[NodeRef],
    ) -> String {
        let mut node_defs = String::new();
        for &node_ref in members {
            let Some(node) = graph.node(node_ref) else {
                continue;
            };
            let line = NODE_DEFINITION
                .replace("%node.id%", &node_key(node_ref))
                .replace("%node.label%", &escape_dot_label(&node.label));
            node_defs.push_str(NODE_INDENT);
            node_defs.push_str(&line);
            node_defs.push('\n');
        }

        self.templates
            .subgraph
            .replace("%subgraph.visibility_long%", visibility.long())
            .replace("%subgraph.visibility%", visibility.short())
            .replace("%subgraph.modulePrefix%", &escape_dot_label(&module.prefix))
            .replace("%subgraph.node_defs%", &node_defs)
    }

    fn render_modules(&self, graph: &CallGraph) -> (String, String) {
        let shown: Vec<(usize, &Module)> = graph
            .modules()
            .iter()
            .enumerate()
            .filter(|(_, m)| self.filter.renders(&m.prefix))
            .collect();

        let mut body = String::new();
        for (idx, module) in &shown {
            let line = NODE_DEFINITION
                .replace("%node.id%", &module_key(*idx))
                .replace("%node.label%", &escape_dot_label(&module.prefix));
            body.push_str(EDGE_INDENT);
            body.push_str(&line);
            body.push('\n');
        }

        let key_of = |prefix: &str| {
            shown
                .iter()
                .find(|(_, m)| m.prefix == prefix)
                .map(|(idx, _)| module_key(*idx))
        };

        let mut edges = String::new();
        for module_edge in aggregate_module_edges(graph) {
            let (Some(src), Some(dst)) = (key_of(&module_edge.source), key_of(&module_edge.target))
            else {
                continue;
            };
            let line = MODULE_EDGE_DEFINITION
                .replace("%edge.src.id%", &src)
                .replace("%edge.dest.id%", &dst)
                .replace("%edge.count%", &module_edge.count.to_string());
            edges.push_str(EDGE_INDENT);
            edges.push_str(&line);
            edges.push('\n');
        }

        (body, edges)
    }
}

impl Default for GraphWriter {
    fn default() -> Self {
        Self::new(Templates::default())
    }
}

fn node_key(node: NodeRef) -> String {
    format!("n{}", node.0)
}

fn module_key(idx: usize) -> String {
    format!("m{}", idx)
}

/// Escape special characters for DOT labels
pub fn escape_dot_label(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

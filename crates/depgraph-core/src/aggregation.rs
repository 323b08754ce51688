//! Edge aggregation for the module-level view

use crate::model::{CallGraph, NodeRef};
use serde::Serialize;
use std::collections::HashMap;

/// A summary edge between two modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleEdge {
    /// Prefix of the calling module.
    pub source: String,
    /// Prefix of the called module.
    pub target: String,
    /// How many function-level calls this represents.
    pub count: u32,
}

/// Collapse function-level calls into calls between modules.
///
/// Edges with an unresolved endpoint, endpoints outside any module, and calls
/// within one module are skipped. Result order follows the first call seen
/// for each module pair.
pub fn aggregate_module_edges(graph: &CallGraph) -> Vec<ModuleEdge> {
    let mut owner: HashMap<NodeRef, &str> = HashMap::new();
    for module in graph.modules() {
        for &node in &module.nodes {
            owner.insert(node, module.prefix.as_str());
        }
    }

    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut aggregated: Vec<ModuleEdge> = Vec::new();

    for edge in graph.edges() {
        let (Some(source), Some(target)) = (edge.source, edge.destination) else {
            continue;
        };
        let (Some(&source_module), Some(&target_module)) = (owner.get(&source), owner.get(&target))
        else {
            continue;
        };

        // Calls inside a module are not drawn between modules
        if source_module == target_module {
            continue;
        }

        let slot = *index.entry((source_module, target_module)).or_insert_with(|| {
            aggregated.push(ModuleEdge {
                source: source_module.to_string(),
                target: target_module.to_string(),
                count: 0,
            });
            aggregated.len() - 1
        });
        aggregated[slot].count += 1;
    }

    aggregated
}

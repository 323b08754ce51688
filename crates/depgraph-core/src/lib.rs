//! Depgraph Core: DOT call-graph lexer, parser, and module grouping

pub mod aggregation;
pub mod lexer;
pub mod model;
pub mod naming;
pub mod parser;


#[cfg(test)]
pub mod test_utils;

pub use aggregation::{ModuleEdge, aggregate_module_edges};
pub use lexer::{Token, TokenKind, tokenize};
pub use model::{CallGraph, Edge, Module, Node, NodeRef};
pub use naming::{RTOS_PREFIX, is_public, is_root, module_prefix};
pub use parser::{FileGraph, LocalEdge, MergeStats, Parser, group_modules, merge_file, parse_file};

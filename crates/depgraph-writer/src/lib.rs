//! Depgraph Writer: module-grouped DOT rendering and JSON export
//!
//! Consumes the finished [`depgraph_core::CallGraph`]; nothing here mutates it.

pub mod error;
pub mod filter;
pub mod json;
pub mod templates;
pub mod writer;


pub use error::{WriterError, WriterResult};
pub use filter::ModuleFilter;
pub use json::export_json;
pub use templates::Templates;
pub use writer::{GraphWriter, View, escape_dot_label};

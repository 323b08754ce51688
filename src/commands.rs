//! CLI command implementations

use crate::config::{Config, OutputFormat};
use crate::reader::{self, SourceFile};
use anyhow::Context;
use depgraph_core::{CallGraph, Parser};
use depgraph_writer::{GraphWriter, ModuleFilter, Templates, View, export_json};
use std::fmt::Write as _;
use std::path::PathBuf;

pub fn render(paths: &[PathBuf], config: &Config) -> anyhow::Result<()> {
    let files = reader::read_inputs(paths)?;
    let graph = build_graph(&files);
    let output = config.output_path();

    match config.format {
        OutputFormat::Dot => {
            let writer = graph_writer(config)?;
            if config.to_stdout() {
                print!("{}", writer.render(&graph));
            } else {
                writer.draw_graph(&graph, &output)?;
            }
        }
        OutputFormat::Json => {
            if !config.filter.private.is_empty() {
                tracing::warn!("JSON export always includes private functions; ignoring private filter");
            }
            if config.view != View::Functions {
                tracing::warn!("JSON export ignores --view {}", config.view);
            }
            let filter = ModuleFilter::new::<String>(&config.filter.modules, &[])?;
            let json = export_json(&graph, &config.name, &filter)?;
            if config.to_stdout() {
                println!("{}", json);
            } else {
                std::fs::write(&output, json + "\n")
                    .with_context(|| format!("Failed to write {}", output.display()))?;
                tracing::info!("Wrote JSON graph to {}", output.display());
            }
        }
    }

    Ok(())
}

pub fn inspect(paths: &[PathBuf]) -> anyhow::Result<()> {
    let files = reader::read_inputs(paths)?;
    let graph = build_graph(&files);
    print!("{}", summarize(&graph, files.len()));
    Ok(())
}

/// Parse and merge the files in order, then group modules.
fn build_graph(files: &[SourceFile]) -> CallGraph {
    let mut parser = Parser::new();
    for file in files {
        tracing::debug!("Parsing {}", file.path.display());
        let stats = parser.parse_file(&file.contents);
        if stats.unresolved_endpoints > 0 {
            tracing::warn!(
                "{}: {} edge endpoints reference undeclared nodes",
                file.path.display(),
                stats.unresolved_endpoints
            );
        }
    }

    let graph = parser.finish();
    tracing::info!(
        "Parsed {} files: {} functions, {} calls, {} modules",
        files.len(),
        graph.node_count(),
        graph.edge_count(),
        graph.modules().len()
    );
    graph
}

fn graph_writer(config: &Config) -> anyhow::Result<GraphWriter> {
    let templates = Templates::load(
        config.templates.graph.as_deref(),
        config.templates.subgraph.as_deref(),
    )?;
    let filter = ModuleFilter::new(&config.filter.modules, &config.filter.private)?;

    Ok(GraphWriter::new(templates)
        .with_filter(filter)
        .with_view(config.view)
        .with_name(config.name.as_str()))
}

fn summarize(graph: &CallGraph, file_count: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Files:      {}", file_count);
    let _ = writeln!(out, "Functions:  {}", graph.node_count());
    let _ = writeln!(out, "Calls:      {}", graph.edge_count());
    let _ = writeln!(out, "Unresolved: {}", graph.unresolved_endpoints());
    let _ = writeln!(out, "Modules:    {}", graph.modules().len());

    let width = graph
        .modules()
        .iter()
        .map(|m| m.prefix.len())
        .max()
        .unwrap_or(0);
    for module in graph.modules() {
        let _ = writeln!(out, "  {:<width$}  {}", module.prefix, module.len(), width = width);
    }

    let roots: Vec<&str> = graph.root_nodes().map(|n| n.label.as_str()).collect();
    if !roots.is_empty() {
        let _ = writeln!(out, "Roots:      {}", roots.join(", "));
    }
    out
}

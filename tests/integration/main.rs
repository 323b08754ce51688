//! Integration tests for depgraph
//!
//! These run the built binary against call graphs written to a temp dir.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const BAL_TRIGGER: &str = r#"digraph "BAL_Trigger"
{
  edge [fontname="Helvetica",fontsize="10",labelfontname="Helvetica",labelfontsize="10"];
  node [fontname="Helvetica",fontsize="10",shape=record];
  rankdir="LR";
  Node1 [label="BAL_Trigger",height=0.2,width=0.4,color="black", fillcolor="grey75", style="filled", fontcolor="black"];
  Node1 -> Node2 [color="midnightblue",fontsize="10",style="solid",fontname="Helvetica"];
  Node2 [label="BAL_checkLimits",height=0.2,width=0.4,color="black", fillcolor="white", style="filled"];
  Node2 -> Node3 [color="midnightblue",fontsize="10",style="solid",fontname="Helvetica"];
  Node3 [label="ADC_Read",height=0.2,width=0.4,color="black", fillcolor="white", style="filled"];
  Node1 -> Node4 [color="midnightblue",fontsize="10",style="solid",fontname="Helvetica"];
  Node4 [label="vTaskDelay",height=0.2,width=0.4,color="black", fillcolor="white", style="filled"];
}
"#;

const ADC_READ: &str = r#"digraph "ADC_Read"
{
  node [fontname="Helvetica",fontsize="10",shape=record];
  Node1 [label="ADC_Read",height=0.2,width=0.4,color="black", fillcolor="grey75", style="filled", fontcolor="black"];
  Node1 -> Node2 [color="midnightblue",fontsize="10",style="solid",fontname="Helvetica"];
  Node2 [label="vTaskDelay",height=0.2,width=0.4,color="black", fillcolor="white", style="filled"];
}
"#;

fn depgraph(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_depgraph"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute depgraph")
}

fn fixture_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    let graphs = dir.path().join("graphs");
    std::fs::create_dir(&graphs).unwrap();
    std::fs::write(graphs.join("bal_trigger.dot"), BAL_TRIGGER).unwrap();
    std::fs::write(graphs.join("adc_read.dot"), ADC_READ).unwrap();
    std::fs::write(graphs.join("README.txt"), "not a graph").unwrap();
    dir
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    let output = depgraph(dir.path(), &["--help"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("render"));
    assert!(stdout.contains("inspect"));
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    let output = depgraph(dir.path(), &["version"]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        format!("depgraph v{}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn test_render_directory_to_default_output() {
    let dir = fixture_dir();
    let output = depgraph(dir.path(), &["render", "graphs"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    // adc_read.dot sorts first, so ADC_Read is node 0
    let dot = std::fs::read_to_string(dir.path().join("out.dot")).unwrap();
    assert!(dot.starts_with("digraph \"depgraph\" {"));
    assert!(dot.contains("subgraph \"cluster_pub_ADC\""));
    assert!(dot.contains("n0 [label=\"ADC_Read\"];"));
    assert!(dot.contains("subgraph \"cluster_pub_RTOS\""));
    assert!(dot.contains("subgraph \"cluster_pub_BAL\""));
    assert!(!dot.contains("BAL_checkLimits"));
    assert!(dot.contains("n0 -> n1;"));
}

#[test]
fn test_render_private_to_stdout() {
    let dir = fixture_dir();
    let output = depgraph(
        dir.path(),
        &["render", "graphs/bal_trigger.dot", "-o", "-", "--private", "BAL"],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("subgraph \"cluster_priv_BAL\""));
    assert!(stdout.contains("n1 [label=\"BAL_checkLimits\"];"));
    assert!(stdout.contains("n0 -> n1;"));
    assert!(stdout.contains("n1 -> n2;"));
    assert!(!dir.path().join("out.dot").exists());
}

#[test]
fn test_render_modules_view() {
    let dir = fixture_dir();
    let output = depgraph(
        dir.path(),
        &["render", "graphs", "-o", "-", "--view", "modules", "--name", "bms"],
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("digraph \"bms\" {"));
    assert!(stdout.contains("m0 [label=\"ADC\"];"));
    assert!(stdout.contains("m1 [label=\"RTOS\"];"));
    assert!(stdout.contains("m2 [label=\"BAL\"];"));
    assert!(stdout.contains("m0 -> m1 [label=\"1\"];"));
    assert!(stdout.contains("m2 -> m0 [label=\"1\"];"));
    assert!(stdout.contains("m2 -> m1 [label=\"1\"];"));
}

#[test]
fn test_render_json() {
    let dir = fixture_dir();
    let output = depgraph(
        dir.path(),
        &["render", "graphs", "--format", "json", "-o", "graph.json"],
    );
    assert!(output.status.success());

    let text = std::fs::read_to_string(dir.path().join("graph.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let labels: Vec<&str> = value["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["ADC_Read", "vTaskDelay", "BAL_Trigger", "BAL_checkLimits"]);
    assert_eq!(value["edges"].as_array().unwrap().len(), 4);
}

#[test]
fn test_render_json_defaults_to_json_file_and_filters_modules() {
    let dir = fixture_dir();
    let output = depgraph(
        dir.path(),
        &["render", "graphs", "--format", "json", "--modules", "BAL", "--private", "BAL"],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(!dir.path().join("out.dot").exists());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ignoring private filter"));

    let text = std::fs::read_to_string(dir.path().join("out.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let modules: Vec<&str> = value["modules"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["prefix"].as_str().unwrap())
        .collect();
    assert_eq!(modules, vec!["BAL"]);
    assert_eq!(value["nodes"].as_array().unwrap().len(), 2);
    assert_eq!(value["edges"].as_array().unwrap().len(), 1);
}

#[test]
fn test_config_file_is_picked_up() {
    let dir = fixture_dir();
    std::fs::write(
        dir.path().join("depgraph.toml"),
        "output = \"bal.dot\"\n\n[filter]\nmodules = [\"BAL\"]\nprivate = [\"BAL\"]\n",
    )
    .unwrap();

    let output = depgraph(dir.path(), &["render", "graphs"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let dot = std::fs::read_to_string(dir.path().join("bal.dot")).unwrap();
    assert!(dot.contains("cluster_priv_BAL"));
    assert!(!dot.contains("cluster_pub_ADC"));
}

#[test]
fn test_bad_config_fails() {
    let dir = fixture_dir();
    std::fs::write(dir.path().join("custom.toml"), "colour = \"red\"\n").unwrap();

    let output = depgraph(dir.path(), &["--config", "custom.toml", "render", "graphs"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("custom.toml"));
}

#[test]
fn test_inspect() {
    let dir = fixture_dir();
    let output = depgraph(dir.path(), &["inspect", "graphs"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Files:      2"));
    assert!(stdout.contains("Functions:  4"));
    assert!(stdout.contains("Calls:      4"));
    assert!(stdout.contains("Unresolved: 0"));
    assert!(stdout.contains("Modules:    3"));
    assert!(stdout.contains("Roots:      ADC_Read, BAL_Trigger"));
}

#[test]
fn test_rejects_non_dot_file() {
    let dir = fixture_dir();
    let output = depgraph(dir.path(), &["render", "graphs/README.txt"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("README.txt"));
}

#[test]
fn test_rejects_directory_without_graphs() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("empty")).unwrap();
    let output = depgraph(dir.path(), &["inspect", "empty"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not contain any .dot files"));
}

#[test]
fn test_library_pipeline_matches_cli() {
    let graph = depgraph_core::Parser::parse([ADC_READ, BAL_TRIGGER]);
    let expected = depgraph_writer::GraphWriter::default().render(&graph);

    let dir = fixture_dir();
    let output = depgraph(dir.path(), &["render", "graphs", "-o", "-"]);
    assert_eq!(String::from_utf8_lossy(&output.stdout), expected);
}

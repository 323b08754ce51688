//! Test utilities for depgraph-core

use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Call graph of `ADC_Init` the way Doxygen writes it.
pub const ADC_INIT_GRAPH: &str = r#"digraph "ADC_Init"
{
  edge [fontname="Helvetica",fontsize="10",labelfontname="Helvetica",labelfontsize="10"];
  node [fontname="Helvetica",fontsize="10",shape=record];
  rankdir="LR";
  Node1 [label="ADC_Init",height=0.2,width=0.4,color="black", fillcolor="grey75", style="filled", fontcolor="black"];
  Node1 -> Node2 [color="midnightblue",fontsize="10",style="solid",fontname="Helvetica"];
  Node2 [label="ADC_ConfigureChannel",height=0.2,width=0.4,color="black", fillcolor="white", style="filled",URL="$adc_8c.html"];
  Node1 -> Node3 [color="midnightblue",fontsize="10",style="solid",fontname="Helvetica"];
  Node3 [label="adc_startConversion",height=0.2,width=0.4,color="black", fillcolor="white", style="filled"];
  Node3 -> Node4 [color="midnightblue",fontsize="10",style="solid",fontname="Helvetica"];
  Node4 [label="vTaskDelay",height=0.2,width=0.4,color="black", fillcolor="white", style="filled"];
}
"#;

/// Build a minimal graph file from `(id, label)` nodes and `(src, dst)` edges.
///
/// Node statements are written before edge statements.
pub fn graph_file(name: &str, nodes: &[(&str, &str)], edges: &[(&str, &str)]) -> String {
    let mut out = format!("digraph {} {{\n", name);
    for (id, label) in nodes {
        out.push_str(&format!("  {} [label=\"{}\", shape=box];\n", id, label));
    }
    for (src, dst) in edges {
        out.push_str(&format!("  {} -> {} [color=\"midnightblue\"];\n", src, dst));
    }
    out.push_str("}\n");
    out
}

/// In-memory log sink for asserting on emitted events.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with every event down to `trace` written into the returned buffer.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(logs.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs.contents())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_file_shape() {
        let text = graph_file("G", &[("N1", "BAL_Init")], &[("N1", "N2")]);

        assert!(text.starts_with("digraph G {\n"));
        assert!(text.contains("  N1 [label=\"BAL_Init\", shape=box];\n"));
        assert!(text.contains("  N1 -> N2 [color=\"midnightblue\"];\n"));
        assert!(text.ends_with("}\n"));
    }
}

//! depgraph CLI entry point

use clap::{Args, Parser, Subcommand};
use depgraph_writer::View;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod reader;

use config::{Config, OutputFormat};

#[derive(Parser)]
#[command(name = "depgraph")]
#[command(about = "Module-level dependency graphs from Doxygen call graphs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./depgraph.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge the call graphs and write the grouped graph
    Render(RenderArgs),
    /// Print a summary of the merged graph
    Inspect {
        /// `.dot` files or directories containing them
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Show version
    Version,
}

#[derive(Args)]
struct RenderArgs {
    /// `.dot` files or directories containing them
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Output file, `-` for stdout [default: out.dot or out.json]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Name of the emitted digraph
    #[arg(long)]
    name: Option<String>,

    /// Draw functions or whole modules
    #[arg(long)]
    view: Option<View>,

    /// Output format: dot or json
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Only draw modules matching this glob (repeatable)
    #[arg(short, long = "modules")]
    modules: Vec<String>,

    /// Draw private functions of modules matching this glob (repeatable)
    #[arg(short, long = "private")]
    private: Vec<String>,

    /// Custom graph template
    #[arg(long)]
    graph_template: Option<PathBuf>,

    /// Custom subgraph template
    #[arg(long)]
    subgraph_template: Option<PathBuf>,
}

impl RenderArgs {
    /// Command-line values win over the configuration file.
    fn apply(self, config: &mut Config) -> Vec<PathBuf> {
        if self.output.is_some() {
            config.output = self.output;
        }
        if let Some(name) = self.name {
            config.name = name;
        }
        if let Some(view) = self.view {
            config.view = view;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if !self.modules.is_empty() {
            config.filter.modules = self.modules;
        }
        if !self.private.is_empty() {
            config.filter.private = self.private;
        }
        if self.graph_template.is_some() {
            config.templates.graph = self.graph_template;
        }
        if self.subgraph_template.is_some() {
            config.templates.subgraph = self.subgraph_template;
        }
        self.paths
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG overrides --verbose
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "depgraph={0},depgraph_core={0},depgraph_writer={0}",
            log_level
        ))
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("depgraph v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Render(args) => {
            let mut config = Config::load(cli.config.as_deref())?;
            let paths = args.apply(&mut config);
            commands::render(&paths, &config)
        }
        Commands::Inspect { paths } => commands::inspect(&paths),
        Commands::Version => {
            println!("depgraph v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

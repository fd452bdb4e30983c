// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "nc-scene")]
#[command(about = "Replay an NC machining state stream into a scene graph", long_about = None)]
pub struct Cli {
    /// Project identifier (case-insensitive)
    pub project: String,

    /// JSON-lines file of delta messages to replay
    #[arg(long)]
    pub deltas: Option<PathBuf>,

    /// Viewer config file (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Project id -> path map (JSON)
    #[arg(long)]
    pub pathmap: Option<PathBuf>,

    /// Directory of `<key>.json` geometry documents
    #[arg(long = "geometry-dir")]
    pub geometry_dir: Option<PathBuf>,

    /// Initial trace point capacity
    #[arg(long = "trace-capacity")]
    pub trace_capacity: Option<usize>,

    /// Print the scene tree as JSON after replay
    #[arg(long)]
    pub tree: bool,

    /// Only log warnings and errors
    #[arg(long, default_value = "false")]
    pub quiet: bool,
}

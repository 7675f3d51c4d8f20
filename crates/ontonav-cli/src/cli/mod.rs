use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};


#[derive(Debug, Parser)]
#[command(name = "ontonav")]
#[command(about = "Taxonomy navigability assessment for linked-data ontologies", version)]
pub struct Cli {
    /// Graph source file; repeatable for independently loaded ontology
    /// documents.
    #[arg(long = "graph", required = true)]
    pub graphs: Vec<PathBuf>,

    /// TOML scoring-policy override file.
    #[arg(long)]
    pub policy: Option<PathBuf>,

    /// Whole-run budget in seconds; expiry yields an incomplete report.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Discover the taxonomy catalog and print its hierarchy metrics.
    Discover,
    /// Run only the navigation query harness.
    Navigation,
    /// Full readiness assessment with exit code 0 iff the taxonomy needs at
    /// most minor improvements.
    Assess(AssessArgs),
}

#[derive(Debug, Args)]
pub struct AssessArgs {
    /// Write the JSON report here (a .txt rendering is written next to it).
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Print the human-readable rendering instead of JSON.
    #[arg(long)]
    pub text: bool,
}

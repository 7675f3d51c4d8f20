use std::fs;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;

use ontonav_core::models::TaxonomyMetrics;
use ontonav_core::render::{self, JsonFileSink, ReportSink, TextFileSink};
use ontonav_core::{Assessor, MemoryGraphStore, ReadinessLevel, RunOptions, ScoringPolicy};

use crate::cli::{AssessArgs, Cli, Commands};

#[derive(Debug, Serialize)]
struct DiscoverOutput {
    schemes: Vec<String>,
    concept_count: usize,
    metrics: TaxonomyMetrics,
}

pub(crate) fn run(cli: Cli) -> Result<i32> {
    if cli.verbose {
        tracing_subscriber::fmt().with_env_filter("debug").init();
    }

    let policy = match &cli.policy {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read policy file {}", path.display()))?;
            ScoringPolicy::from_toml_str(&text)
                .with_context(|| format!("invalid policy file {}", path.display()))?
        }
        None => ScoringPolicy::default(),
    };
    let assessor = Assessor::new(policy).context("failed to build assessor")?;
    let options = RunOptions {
        timeout: cli.timeout_secs.map(Duration::from_secs),
    };

    match cli.command {
        Commands::Discover => {
            let store = MemoryGraphStore::load(&cli.graphs).context("failed to load graph")?;
            let (catalog, metrics) = assessor
                .discover_and_measure(&store)
                .context("discovery failed")?;
            let output = DiscoverOutput {
                schemes: catalog.schemes().map(|scheme| scheme.uri.clone()).collect(),
                concept_count: catalog.concept_count(),
                metrics,
            };
            print_json(&output)?;
            Ok(0)
        }
        Commands::Navigation => {
            let store = MemoryGraphStore::load(&cli.graphs).context("failed to load graph")?;
            let (results, timed_out) = assessor.run_navigation_harness(&store, &options);
            print_json(&results)?;
            let all_succeeded = results.iter().all(|result| result.succeeded);
            Ok(i32::from(timed_out || !all_succeeded))
        }
        Commands::Assess(args) => {
            let report = assessor
                .assess_sources(&cli.graphs, &options)
                .context("assessment failed")?;
            write_report_files(&args, &report)?;
            if args.text {
                println!("{}", render::render_text(&report));
            } else {
                print_json(&report)?;
            }
            Ok(i32::from(report.level < ReadinessLevel::NeedsMinorImprovements))
        }
    }
}

fn write_report_files(args: &AssessArgs, report: &ontonav_core::ReadinessReport) -> Result<()> {
    let Some(out) = &args.out else {
        return Ok(());
    };
    JsonFileSink::new(out)
        .write(report)
        .with_context(|| format!("failed to write {}", out.display()))?;
    let text_path = out.with_extension("txt");
    TextFileSink::new(&text_path)
        .write(report)
        .with_context(|| format!("failed to write {}", text_path.display()))?;
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn graph_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("graph.nt");
        let mut file = fs::File::create(&path).expect("create");
        writeln!(
            file,
            "<urn:s> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2004/02/skos/core#ConceptScheme> ."
        )
        .expect("write");
        writeln!(
            file,
            "<urn:c> <http://www.w3.org/2004/02/skos/core#inScheme> <urn:s> ."
        )
        .expect("write");
        path
    }

    #[test]
    fn discover_command_exits_zero() {
        let dir = tempfile::tempdir().expect("tempdir");
        let graph = graph_file(&dir);
        let cli = Cli::parse_from([
            "ontonav",
            "--graph",
            graph.to_str().unwrap(),
            "discover",
        ]);
        assert_eq!(run(cli).expect("run"), 0);
    }

    #[test]
    fn sparse_graph_assessment_exits_nonzero() {
        let dir = tempfile::tempdir().expect("tempdir");
        let graph = graph_file(&dir);
        let cli = Cli::parse_from(["ontonav", "--graph", graph.to_str().unwrap(), "assess"]);
        assert_eq!(run(cli).expect("run"), 1);
    }

    #[test]
    fn missing_graph_file_fails_assessment_gracefully() {
        let cli = Cli::parse_from(["ontonav", "--graph", "/nonexistent.nt", "assess"]);
        // Load failure is a failure report, not an error: exit 1.
        assert_eq!(run(cli).expect("run"), 1);
    }

    #[test]
    fn assess_writes_json_and_text_reports() {
        let dir = tempfile::tempdir().expect("tempdir");
        let graph = graph_file(&dir);
        let out = dir.path().join("report.json");
        let cli = Cli::parse_from([
            "ontonav",
            "--graph",
            graph.to_str().unwrap(),
            "assess",
            "--out",
            out.to_str().unwrap(),
        ]);
        run(cli).expect("run");
        assert!(out.exists());
        assert!(out.with_extension("txt").exists());
    }
}

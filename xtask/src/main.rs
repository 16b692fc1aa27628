use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "incidence workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the store benchmarks and write a comparison report
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,

        /// Also enable the `parallel` feature
        #[arg(long, default_value_t = false)]
        parallel: bool,
    },
}

const BENCHES: &[&str] = &["graph_benchmark", "csr_benchmark"];

/// Implementation every other column is compared against.
const REFERENCE: &str = "petgraph";

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench {
            quick,
            report_only,
            parallel,
        } => {
            if !report_only {
                run_benchmarks(quick, parallel)?;
            }
            generate_report()?;
        }
    }

    Ok(())
}

fn run_benchmarks(quick: bool, parallel: bool) -> Result<()> {
    for bench in BENCHES {
        println!("\n>>> Running {bench}");
        let start = Instant::now();

        let mut cmd = Command::new("cargo");
        cmd.env("CARGO_INCREMENTAL", "0");
        cmd.arg("bench").arg("--bench").arg(bench);
        if parallel {
            cmd.arg("--features").arg("parallel");
        }

        // Criterion arguments go after --
        cmd.arg("--");
        if quick {
            cmd.arg("--measurement-time").arg("0.1");
            cmd.arg("--noplot");
            cmd.arg("--sample-size").arg("10");
        }

        let status = cmd
            .status()
            .with_context(|| format!("failed to run bench {bench}"))?;

        if status.success() {
            println!("Finished {bench} in {:.2?}", start.elapsed());
        } else {
            eprintln!("Warning: bench {bench} failed");
        }
    }

    Ok(())
}

/// `group -> implementation -> ops/s`
type Results = BTreeMap<String, BTreeMap<String, f64>>;

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");
    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    let mut results = Results::new();
    collect_results(criterion_dir, &mut results);

    let report_path = Path::new("benchmark_results/report.md");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(report_path)?;

    writeln!(file, "# Graph Store Benchmark Report")?;
    for (group, runs) in &results {
        writeln!(file, "\n## {group}\n")?;
        writeln!(file, "| Implementation | Ops/s | vs {REFERENCE} |")?;
        writeln!(file, "|---|---|---|")?;

        for (name, ops) in runs {
            let reference = reference_for(runs, name).unwrap_or(0.0);
            let rel = if reference > 0.0 {
                format!("**{:.2}x**", ops / reference)
            } else {
                "-".to_string()
            };
            writeln!(file, "| {name} | {} | {rel} |", format_ops(*ops))?;
        }
    }

    println!("Report written to {}", report_path.display());
    Ok(())
}

/// Reference run for `name`: parameterised runs (`function/parameter`) are
/// compared against the reference run with the same parameter.
fn reference_for(runs: &BTreeMap<String, f64>, name: &str) -> Option<f64> {
    let key = match name.split_once('/') {
        Some((_, parameter)) => format!("{REFERENCE}/{parameter}"),
        None => REFERENCE.to_string(),
    };
    runs.get(&key).copied()
}

fn format_ops(ops: f64) -> String {
    if ops > 1_000_000.0 {
        format!("{:.2}M", ops / 1_000_000.0)
    } else if ops > 1_000.0 {
        format!("{:.2}K", ops / 1_000.0)
    } else {
        format!("{ops:.0}")
    }
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()?.to_str().map(str::to_string)
}

fn read_json(path: &Path) -> Option<serde_json::Value> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Walks the criterion output tree. Each `new/estimates.json` lives under
/// `<group>/<function>[/<parameter>]/new/`; parameterised runs are keyed as
/// `function/parameter`.
fn collect_results(dir: &Path, results: &mut Results) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_results(&path, results);
            continue;
        }
        if file_name(&path).as_deref() != Some("estimates.json") {
            continue;
        }
        let Some(run_dir) = path.parent() else { continue };
        if file_name(run_dir).as_deref() != Some("new") {
            continue;
        }
        let Some(bench_dir) = run_dir.parent() else { continue };
        let Some(benchmark) = read_json(&bench_dir.join("benchmark.json")) else {
            continue;
        };
        let Some(group) = benchmark.get("group_id").and_then(|g| g.as_str()) else {
            continue;
        };
        let function = benchmark
            .get("function_id")
            .and_then(|f| f.as_str())
            .unwrap_or(group);
        let name = match benchmark.get("value_str").and_then(|v| v.as_str()) {
            Some(param) => format!("{function}/{param}"),
            None => function.to_string(),
        };
        let elements = benchmark
            .get("throughput")
            .and_then(|t| t.get("Elements"))
            .and_then(serde_json::Value::as_f64);

        let Some(time_ns) = read_json(&path)
            .and_then(|json| json.get("mean")?.get("point_estimate")?.as_f64())
        else {
            continue;
        };
        if time_ns <= 0.0 {
            continue;
        }
        let metric = elements.unwrap_or(1.0) * 1e9 / time_ns;
        results
            .entry(group.to_string())
            .or_default()
            .insert(name, metric);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries
            .iter()
            .map(|(name, ops)| ((*name).to_string(), *ops))
            .collect()
    }

    #[test]
    fn plain_runs_use_the_plain_reference() {
        let group = runs(&[("petgraph", 100.0), ("adjacency", 250.0)]);
        assert_eq!(reference_for(&group, "adjacency"), Some(100.0));
        assert_eq!(reference_for(&group, "petgraph"), Some(100.0));
    }

    #[test]
    fn parameterised_runs_match_the_same_parameter() {
        let group = runs(&[
            ("petgraph/1", 10.0),
            ("petgraph/10", 40.0),
            ("bidirectional/1", 30.0),
            ("bidirectional/10", 80.0),
        ]);
        assert_eq!(reference_for(&group, "bidirectional/1"), Some(10.0));
        assert_eq!(reference_for(&group, "bidirectional/10"), Some(40.0));
        assert_eq!(reference_for(&group, "bidirectional/100"), None);
    }
}

//! Focal-Method CLI
//!
//! # Usage
//!
//! ```bash
//! # GoogleTest defaults, text output
//! cargo run --bin focal-methods --release -- linked.ll
//!
//! # YAML config, JSON output, DOT files for every analyzed function
//! cargo run --bin focal-methods --release -- linked.ll --config focal.yaml --format json --dot-dir target/dot
//!
//! # Override the depth horizon, with debug logging
//! cargo run --bin focal-methods --release -- linked.ll --max-depth 2 -vv
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};
use focalgraph_ir::features::flow_graph::cfg_to_dot;
use focalgraph_ir::{AnalysisConfig, FocalMethodAnalyzer, FocalMethodMap};
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Parser)]
#[command(name = "focal-methods")]
#[command(about = "Infer the focal methods of unit tests from linked LLVM IR", long_about = None)]
struct Cli {
    /// Linked module in textual IR form (.ll)
    input: PathBuf,

    /// YAML analysis configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Regex selecting test functions
    #[arg(long)]
    test_pattern: Option<String>,

    /// Regex selecting assertion functions
    #[arg(long)]
    assertion_pattern: Option<String>,

    /// Regex selecting functions never analyzed
    #[arg(long)]
    exclude_pattern: Option<String>,

    /// Maximum call distance from a test that is analyzed
    #[arg(long)]
    max_depth: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write DOT files for every analyzed function and the call graph
    #[arg(long)]
    dot_dir: Option<PathBuf>,

    /// -v info, -vv debug
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn setup_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let stderr_layer = fmt::Layer::default()
        .with_writer(std::io::stderr)
        .with_filter(filter);
    Registry::default().with(stderr_layer).init();
}

fn load_config(cli: &Cli) -> Result<AnalysisConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_yaml(path)?,
        None => AnalysisConfig::gtest(),
    };
    if let Some(pattern) = &cli.test_pattern {
        config.test_function_pattern = pattern.clone();
    }
    if let Some(pattern) = &cli.assertion_pattern {
        config.assertion_function_pattern = pattern.clone();
    }
    if let Some(pattern) = &cli.exclude_pattern {
        config = config.with_exclusion_pattern(pattern.clone());
    }
    if let Some(max_depth) = cli.max_depth {
        config = config.with_max_depth(max_depth);
    }
    Ok(config)
}

/// DOT file name for a function: `@` dropped, punctuation replaced
fn dot_file_name(function: &str) -> String {
    let name: String = function
        .trim_start_matches('@')
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    format!("{name}.dot")
}

fn write_dot_files(
    analyzer: &FocalMethodAnalyzer,
    dir: &Path,
) -> Result<usize, Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;
    let mut written = 0;
    for body in analyzer.bodies() {
        fs::write(dir.join(dot_file_name(&body.name)), cfg_to_dot(&body.graph))?;
        written += 1;
    }
    fs::write(dir.join("call_graph.dot"), analyzer.call_graph().to_dot())?;
    Ok(written + 1)
}

fn print_text(focal: &FocalMethodMap) {
    for (test, methods) in focal {
        println!("{test}");
        if methods.is_empty() {
            println!("  (none)");
        }
        for method in methods {
            println!("  {method}");
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let config = load_config(&cli)?;
    let mut analyzer = FocalMethodAnalyzer::new(config)?;
    let focal = analyzer.analyze_file(&cli.input)?;

    if let Some(dir) = &cli.dot_dir {
        let count = write_dot_files(&analyzer, dir)?;
        tracing::info!("wrote {} DOT files to {}", count, dir.display());
    }

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&focal)?),
        OutputFormat::Text => print_text(&focal),
    }

    let skipped = analyzer.diagnostics().len();
    if skipped > 0 {
        eprintln!("{skipped} unparsable lines skipped");
    }

    Ok(())
}

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use xrefgraph::core::{CodebaseAnalyzer, XrefError};
use xrefgraph::formatters::json::DEFAULT_OUTPUT_NAME;
use xrefgraph::formatters::{GraphJsonWriter, SummaryFormatter};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "xrefgraph",
    version,
    author = "xrefgraph developers",
    about = "Cross-reference graph for Python projects: imports, callers, class usage"
)]
struct Cli {
    /// Project root directory to scan
    #[arg(short, long, value_name = "PATH")]
    root: PathBuf,

    /// Output JSON file path (default: <root>/DEPENDENCY_GRAPH.json)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print a human-readable summary to stdout
    #[arg(short, long)]
    summary: bool,

    /// Find all callers of functions whose key contains this name
    #[arg(short, long, value_name = "NAME")]
    find: Option<String>,

    /// Don't write the output file (useful with --summary or --find)
    #[arg(long)]
    no_file: bool,

    /// Log verbosity
    #[arg(long, value_enum, value_name = "LEVEL", default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(level: LogLevel) {
    env_logger::Builder::new()
        .filter_level(level.filter())
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        root,
        output,
        summary,
        find,
        no_file,
        ..
    } = cli;

    if !root.exists() {
        return Err(XrefError::RootNotFound(root).into());
    }

    println!("Scanning {} ...", root.display());
    let start = Instant::now();

    let analyzer = CodebaseAnalyzer::new()?;
    let graph = analyzer.analyze(&root)?;

    println!(
        "Analyzed {} files in {:.2}s",
        graph.total_files,
        start.elapsed().as_secs_f64()
    );
    if !graph.parse_errors.is_empty() {
        println!(
            "{} parse errors (see graph.parse_errors)",
            graph.parse_errors.len()
        );
    }

    if !no_file {
        let output_path = output.unwrap_or_else(|| root.join(DEFAULT_OUTPUT_NAME));
        GraphJsonWriter::new().write_to_file(&graph, &output_path)?;
        println!("Graph written to: {}", output_path.display());
    }

    let formatter = SummaryFormatter::new();
    if summary || find.is_some() {
        print!("{}", formatter.render(&graph, find.as_deref()));
    } else if !no_file {
        print!("{}", formatter.render_brief(&graph));
    }

    Ok(())
}

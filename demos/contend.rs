//! Contention demo: runs each counter strategy under the same workload and
//! reports throughput.
//!
//! Run with:
//! ```bash
//! cargo run --release --example contend --features demo -- --help
//! RUST_LOG=debug cargo run --example contend --features demo -- --threads 4 --reads 10
//! ```

use clap::{Parser, ValueEnum};
use contatori_strategie::counters::Strategy;
use contatori_strategie::harness::{Measurement, Workload};
use contatori_strategie::observers::json::JsonObserver;
use contatori_strategie::observers::table::{TableObserver, TableStyle};
use tracing_subscriber::EnvFilter;

/// Output format for the results.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Pretty ASCII table
    Table,
    /// JSON array of measurements
    Json,
}

/// Strategy selection.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum StrategyChoice {
    Atomic,
    Locked,
    Actor,
    All,
}

impl StrategyChoice {
    fn strategies(self) -> Vec<Strategy> {
        match self {
            StrategyChoice::Atomic => vec![Strategy::Atomic],
            StrategyChoice::Locked => vec![Strategy::Locked],
            StrategyChoice::Actor => vec![Strategy::Actor],
            StrategyChoice::All => Strategy::ALL.to_vec(),
        }
    }
}

/// Table style selection.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum StyleChoice {
    Ascii,
    #[default]
    Rounded,
    Sharp,
    Modern,
    Markdown,
    Blank,
}

impl From<StyleChoice> for TableStyle {
    fn from(choice: StyleChoice) -> Self {
        match choice {
            StyleChoice::Ascii => TableStyle::Ascii,
            StyleChoice::Rounded => TableStyle::Rounded,
            StyleChoice::Sharp => TableStyle::Sharp,
            StyleChoice::Modern => TableStyle::Modern,
            StyleChoice::Markdown => TableStyle::Markdown,
            StyleChoice::Blank => TableStyle::Blank,
        }
    }
}

/// Compare atomic, reader/writer lock and actor counters under contention.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Strategy to measure
    #[arg(long, value_enum, default_value = "all")]
    strategy: StrategyChoice,

    /// Number of concurrent threads
    #[arg(short, long, default_value = "10")]
    threads: usize,

    /// Increments per thread
    #[arg(short, long, default_value = "100000")]
    iterations: usize,

    /// Reads after every increment
    #[arg(short, long, default_value = "0")]
    reads: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Table style
    #[arg(short, long, value_enum, default_value = "rounded")]
    style: StyleChoice,

    /// Pretty print JSON output
    #[arg(long)]
    pretty: bool,

    /// Hide header in table output
    #[arg(long)]
    no_header: bool,
}

fn render_output(args: &Args, results: &[Measurement]) -> String {
    match args.format {
        OutputFormat::Table => TableObserver::new()
            .with_style(args.style.into())
            .with_header(!args.no_header)
            .with_title(format!(
                "{} threads x {} increments, {} reads per increment",
                args.threads, args.iterations, args.reads
            ))
            .render_measurements(results),

        OutputFormat::Json => JsonObserver::new()
            .pretty(args.pretty)
            .measurements_to_json(results)
            .unwrap_or_else(|e| format!("Error: {}", e)),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let workload = Workload::new()
        .threads(args.threads)
        .iterations(args.iterations)
        .reads_per_inc(args.reads);

    let results: Vec<Measurement> = args
        .strategy
        .strategies()
        .into_iter()
        .map(|strategy| workload.run(strategy.build().as_ref()))
        .collect();

    println!("{}", render_output(&args, &results));

    if results.iter().any(|m| !m.is_consistent()) {
        std::process::exit(1);
    }
}

//! Table observer for pretty-printing counters and measurements.
//!
//! This module provides [`TableObserver`], which renders [`Counter`]s or
//! workload [`Measurement`]s as formatted tables using the `tabled` crate.
//!
//! # Feature Flag
//!
//! This module requires the `table` feature:
//!
//! ```toml
//! [dependencies]
//! contatori-strategie = { version = "0.1", features = ["table"] }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use contatori_strategie::counters::Strategy;
//! use contatori_strategie::harness::Workload;
//! use contatori_strategie::observers::table::{TableObserver, TableStyle};
//!
//! let workload = Workload::new().threads(10).reads_per_inc(10);
//! let results: Vec<_> = Strategy::ALL
//!     .iter()
//!     .map(|s| workload.run(s.build().as_ref()))
//!     .collect();
//!
//! let observer = TableObserver::new().with_style(TableStyle::Rounded);
//! println!("{}", observer.render_measurements(&results));
//! // one row per strategy: threads, iterations, observed value, Mop/s, consistency
//! ```

use crate::counters::Counter;
use crate::harness::Measurement;
use tabled::{settings::Style, Table, Tabled};

/// Available table styles for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableStyle {
    /// ASCII table with simple characters: +, -, |
    Ascii,
    /// Modern rounded corners (default)
    #[default]
    Rounded,
    /// Sharp corners with box-drawing characters
    Sharp,
    /// Modern style with clean lines
    Modern,
    /// GitHub-flavored Markdown table
    Markdown,
    /// No borders, just spacing
    Blank,
}

/// Configuration for the table observer.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// The style to use for rendering.
    pub style: TableStyle,
    /// Whether to show the header row.
    pub show_header: bool,
    /// Custom title for the table (optional).
    pub title: Option<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            style: TableStyle::default(),
            show_header: true,
            title: None,
        }
    }
}

#[derive(Tabled)]
struct CounterRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Strategy")]
    strategy: String,
    #[tabled(rename = "Value")]
    value: u64,
}

#[derive(Tabled)]
struct MeasurementRow {
    #[tabled(rename = "Strategy")]
    strategy: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Threads")]
    threads: usize,
    #[tabled(rename = "Iterations")]
    iterations: usize,
    #[tabled(rename = "Reads")]
    reads_per_inc: usize,
    #[tabled(rename = "Observed")]
    observed: u64,
    #[tabled(rename = "Elapsed")]
    elapsed: String,
    #[tabled(rename = "Mops/s")]
    mops: String,
    #[tabled(rename = "Ok")]
    consistent: String,
}

impl From<&Measurement> for MeasurementRow {
    fn from(m: &Measurement) -> Self {
        MeasurementRow {
            strategy: m.strategy.to_string(),
            name: m.name.clone(),
            threads: m.threads,
            iterations: m.iterations,
            reads_per_inc: m.reads_per_inc,
            observed: m.observed,
            elapsed: format!("{:.2?}", m.elapsed),
            mops: format!("{:.3}", m.ops_per_sec() / 1_000_000.0),
            consistent: if m.is_consistent() {
                "yes".to_string()
            } else {
                format!("no (expected {})", m.expected)
            },
        }
    }
}

/// An observer that renders counters or measurements as a table.
#[derive(Debug, Clone, Default)]
pub struct TableObserver {
    config: TableConfig,
}

impl TableObserver {
    /// Creates a new table observer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new table observer with the specified configuration.
    pub fn with_config(config: TableConfig) -> Self {
        Self { config }
    }

    /// Sets the table style.
    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.config.style = style;
        self
    }

    /// Sets whether to show the header row.
    pub fn with_header(mut self, show: bool) -> Self {
        self.config.show_header = show;
        self
    }

    /// Sets an optional title for the table.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    /// Renders the current value of each counter.
    pub fn render<'a>(&self, counters: impl Iterator<Item = &'a dyn Counter>) -> String {
        let rows: Vec<CounterRow> = counters
            .map(|c| CounterRow {
                name: if c.name().is_empty() {
                    "(unnamed)".to_string()
                } else {
                    c.name().to_string()
                },
                strategy: c.strategy().to_string(),
                value: c.get(),
            })
            .collect();

        self.finish(Table::new(&rows))
    }

    /// Renders one row per workload measurement.
    pub fn render_measurements(&self, measurements: &[Measurement]) -> String {
        let rows: Vec<MeasurementRow> = measurements.iter().map(MeasurementRow::from).collect();
        self.finish(Table::new(&rows))
    }

    fn finish(&self, mut table: Table) -> String {
        self.apply_style(&mut table);

        if !self.config.show_header {
            table.with(tabled::settings::Remove::row(
                tabled::settings::object::Rows::first(),
            ));
        }

        if let Some(ref title) = self.config.title {
            format!("{}\n{}", title, table)
        } else {
            table.to_string()
        }
    }

    fn apply_style(&self, table: &mut Table) {
        match self.config.style {
            TableStyle::Ascii => {
                table.with(Style::ascii());
            }
            TableStyle::Rounded => {
                table.with(Style::rounded());
            }
            TableStyle::Sharp => {
                table.with(Style::sharp());
            }
            TableStyle::Modern => {
                table.with(Style::modern());
            }
            TableStyle::Markdown => {
                table.with(Style::markdown());
            }
            TableStyle::Blank => {
                table.with(Style::blank());
            }
        }
    }
}

//! Command-line parsing for the dashboard client.
//!
//! Argument parsing and command dispatch stay separate from the data and view
//! code; `app` maps a parsed [`Cli`] onto the library.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{ExportFormat, Page};
use crate::views::TrendChart;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "bi", version, about = "Wayne Enterprises business intelligence dashboard")]
pub struct Cli {
    /// Backend base URL (overrides BI_API_URL).
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Default log level when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard.
    Tui(TuiArgs),
    /// Load one page and print it as text.
    Show(ShowArgs),
    /// Export a trend chart's pivoted rows.
    Export(ExportArgs),
}

#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    /// Page to open first.
    #[arg(short, long, value_enum, default_value_t = Page::Overview)]
    pub page: Page,
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Page to print.
    #[arg(value_enum)]
    pub page: Page,

    /// Draw an ASCII plot under each trend chart.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    /// Trend chart to export.
    #[arg(value_enum)]
    pub chart: TrendChart,

    /// Output file.
    #[arg(short, long, value_name = "FILE")]
    pub out: PathBuf,

    #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_with_plot() {
        let cli = Cli::parse_from(["bi", "show", "supply-chain", "--plot", "--width", "60"]);
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.page, Page::SupplyChain);
        assert!(args.plot);
        assert_eq!(args.width, 60);
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn global_api_url_after_subcommand() {
        let cli = Cli::parse_from([
            "bi",
            "export",
            "security",
            "--out",
            "s.json",
            "--format",
            "json",
            "--api-url",
            "http://bi.local:9000",
        ]);
        assert_eq!(cli.api_url.as_deref(), Some("http://bi.local:9000"));
        let Command::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.chart, TrendChart::Security);
        assert_eq!(args.format, ExportFormat::Json);
    }
}

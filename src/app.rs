//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - installs logging
//! - resolves the backend URL
//! - loads page data and prints, plots, or exports it

use std::path::Path;

use clap::Parser;

use crate::cli::{Cli, Command, ExportArgs, ShowArgs, TuiArgs};
use crate::config::DashboardConfig;
use crate::data::{ApiClient, load_page};
use crate::error::AppError;
use crate::logging::{self, LogTarget};
use crate::report::{PlotSize, render_page};
use crate::views;

/// Log file used while the TUI owns the terminal.
pub const TUI_LOG_FILE: &str = "bi.log";

/// Entry point for the `bi` binary.
pub fn run() -> Result<(), AppError> {
    // `bi` and `bi -p hr` behave like `bi tui ...`. Clap requires a
    // subcommand name, so argv is rewritten before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    let target = match cli.command {
        Command::Tui(_) => LogTarget::File(Path::new(TUI_LOG_FILE)),
        _ => LogTarget::Stderr,
    };
    logging::init(&cli.log_level, target)?;

    let config = DashboardConfig::resolve(cli.api_url.as_deref())?;
    tracing::debug!(api = %config.api_base_url, "configuration resolved");
    let client = ApiClient::new(&config);

    match cli.command {
        Command::Tui(args) => handle_tui(client, args),
        Command::Show(args) => handle_show(&client, args),
        Command::Export(args) => handle_export(&client, args),
    }
}

fn handle_tui(client: ApiClient, args: TuiArgs) -> Result<(), AppError> {
    crate::tui::run(client, args.page)
}

fn handle_show(client: &ApiClient, args: ShowArgs) -> Result<(), AppError> {
    let data = load_page(client, args.page);
    let view = views::build(args.page, &data);
    let plot = args.plot.then_some(PlotSize {
        width: args.width,
        height: args.height,
    });
    print!("{}", render_page(&view, plot));
    Ok(())
}

fn handle_export(client: &ApiClient, args: ExportArgs) -> Result<(), AppError> {
    let data = load_page(client, args.chart.page());
    let chart = args.chart.build(&data).ok_or_else(|| {
        AppError::new(
            3,
            format!(
                "No data to export for the {} chart (backend: {}).",
                args.chart.page().display_name(),
                client.base_url()
            ),
        )
    })?;
    crate::io::write_chart(&args.out, &chart, args.format)?;
    println!("Wrote {} rows to {}", chart.rows.len(), args.out.display());
    Ok(())
}

/// Rewrite argv so `bi` defaults to `bi tui`.
///
/// Rules:
/// - `bi`                      -> `bi tui`
/// - `bi -p hr ...`            -> `bi tui -p hr ...`
/// - `bi --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "show" | "export");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(args(&["bi"])), args(&["bi", "tui"]));
        assert_eq!(
            rewrite_args(args(&["bi", "-p", "hr"])),
            args(&["bi", "tui", "-p", "hr"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        assert_eq!(rewrite_args(args(&["bi", "--help"])), args(&["bi", "--help"]));
        assert_eq!(
            rewrite_args(args(&["bi", "show", "financial"])),
            args(&["bi", "show", "financial"])
        );
    }
}

mod generate;
mod output;
mod root;

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rsw-workout",
    about = "Generate the weekly RSW workout page from the 12-week training cycle",
    version
)]
struct Cli {
    /// Week to generate (YYYY-MM-DD); defaults to the next Monday
    #[arg(value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Skip the commit/push script after generating
    #[arg(long)]
    no_push: bool,

    /// Project root (default: auto-detect from rsw.yaml, workouts_data.json or .git/)
    #[arg(long, env = "RSW_ROOT")]
    root: Option<PathBuf>,

    /// Workout dataset to read instead of the configured data file
    #[arg(long)]
    data: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, short = 'j')]
    json: bool,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("{e} (expected YYYY-MM-DD)"))
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = generate::run(
        &root,
        generate::GenerateArgs {
            date: cli.date,
            data: cli.data.as_deref(),
            no_push: cli.no_push,
            json: cli.json,
        },
    );

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_dates() {
        assert_eq!(
            parse_date("2025-10-27").unwrap(),
            NaiveDate::from_ymd_opt(2025, 10, 27).unwrap()
        );
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        for bad in ["10/27/2025", "2025-13-01", "next monday", ""] {
            let err = parse_date(bad).unwrap_err();
            assert!(err.contains("YYYY-MM-DD"), "{bad}: {err}");
        }
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

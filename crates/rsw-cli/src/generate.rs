use crate::output::print_json;
use anyhow::Context;
use chrono::NaiveDate;
use rsw_core::commit::{self, CommitOutcome};
use rsw_core::config::{Config, WarnLevel};
use rsw_core::cycle;
use rsw_core::generate::{generate_for_date, GeneratedPage};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

pub struct GenerateArgs<'a> {
    pub date: Option<NaiveDate>,
    pub data: Option<&'a Path>,
    pub no_push: bool,
    pub json: bool,
}

#[derive(Serialize)]
struct GenerateOutput<'a> {
    #[serde(flatten)]
    page: &'a GeneratedPage,
    #[serde(skip_serializing_if = "Option::is_none")]
    commit: Option<&'a CommitOutcome>,
}

pub fn run(root: &Path, args: GenerateArgs<'_>) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load rsw.yaml")?;
    for w in config.validate() {
        if w.level == WarnLevel::Warning {
            tracing::warn!("config: {}", w.message);
        }
    }

    let date = args
        .date
        .unwrap_or_else(|| cycle::next_monday(chrono::Local::now().date_naive()));

    if !args.json {
        println!("Generating workout for {}...", date.format("%Y-%m-%d"));
    }

    let page = generate_for_date(root, &config, args.data, date)
        .with_context(|| format!("failed to generate page for {date}"))?;

    if !args.json {
        println!("  Week {} of {}-week cycle", page.week, page.cycle_weeks);
        println!("  Phase: {}", page.phase.title());
        println!("  ✓ Saved to: {}", page.path.display());
    }

    let outcome = if args.no_push {
        None
    } else {
        Some(commit::run_commit_script(
            root,
            &config.commit_script,
            Duration::from_secs(config.commit_timeout_secs),
        ))
    };

    match &outcome {
        Some(CommitOutcome::Committed) if !args.json => {
            println!("\n✓ Changes committed and pushed");
        }
        Some(CommitOutcome::Missing) => {
            tracing::warn!(
                script = %config.commit_script,
                "commit script not found, skipping git operations"
            );
        }
        Some(CommitOutcome::Failed(reason)) => {
            tracing::warn!(
                error = %reason,
                "could not commit/push; you may need to commit and push manually"
            );
        }
        _ => {}
    }

    if args.json {
        print_json(&GenerateOutput {
            page: &page,
            commit: outcome.as_ref(),
        })?;
    }

    Ok(())
}

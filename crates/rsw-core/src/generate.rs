use crate::config::Config;
use crate::cycle::{self, Phase};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::io;
use crate::paths;
use crate::render::{self, RenderOptions};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedPage {
    pub date: NaiveDate,
    pub week: u32,
    pub cycle_weeks: u32,
    pub phase: Phase,
    pub path: PathBuf,
}

/// Resolve, render and save the page for `date`.
///
/// `data_file` overrides the dataset path from `config`; relative paths are
/// taken from `root`.
pub fn generate_for_date(
    root: &Path,
    config: &Config,
    data_file: Option<&Path>,
    date: NaiveDate,
) -> Result<GeneratedPage> {
    config.ensure_valid()?;

    let position = cycle::resolve(config, date);
    tracing::info!(%date, week = position.week, phase = %position.phase, "resolved cycle position");

    let data_path = paths::under_root(root, data_file.unwrap_or(Path::new(&config.data_file)));
    let dataset = Dataset::load(&data_path)?;

    let html = render::render(date, position, &dataset, &RenderOptions::from_config(config))?;
    let path = io::save_page(root, &config.output_dir, date, &html)?;
    tracing::info!(path = %path.display(), "page saved");

    Ok(GeneratedPage {
        date,
        week: position.week,
        cycle_weeks: config.cycle_weeks(),
        phase: position.phase,
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::sample_json;
    use crate::error::RswError;
    use tempfile::TempDir;

    fn setup() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(paths::DATA_FILE),
            sample_json().to_string(),
        )
        .unwrap();
        dir
    }

    #[test]
    fn writes_page_for_date() {
        let dir = setup();
        let cfg = Config::default();
        let date = cfg.epoch + chrono::Duration::days(30);
        let page = generate_for_date(dir.path(), &cfg, None, date).unwrap();
        assert_eq!(page.week, 5);
        assert_eq!(page.cycle_weeks, 12);
        assert_eq!(page.phase, Phase::Strength);
        assert_eq!(page.path, dir.path().join("4xweek/2024-11-25.html"));
        let html = std::fs::read_to_string(&page.path).unwrap();
        assert!(html.contains("Strength (Weeks 1-4)"));
    }

    #[test]
    fn data_file_override_is_used() {
        let dir = setup();
        std::fs::rename(
            dir.path().join(paths::DATA_FILE),
            dir.path().join("alt.json"),
        )
        .unwrap();
        let cfg = Config::default();
        let date = NaiveDate::from_ymd_opt(2025, 10, 27).unwrap();
        generate_for_date(dir.path(), &cfg, Some(Path::new("alt.json")), date).unwrap();
        assert!(matches!(
            generate_for_date(dir.path(), &cfg, None, date),
            Err(RswError::DatasetNotFound(_))
        ));
    }

    #[test]
    fn invalid_config_fails_before_writing() {
        let dir = setup();
        let cfg = Config {
            weeks_per_phase: 0,
            ..Config::default()
        };
        let date = NaiveDate::from_ymd_opt(2025, 10, 27).unwrap();
        assert!(matches!(
            generate_for_date(dir.path(), &cfg, None, date),
            Err(RswError::InvalidConfig(_))
        ));
        assert!(!dir.path().join("4xweek").exists());
    }
}

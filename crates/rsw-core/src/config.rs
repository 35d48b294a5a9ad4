use crate::error::{Result, RswError};
use crate::paths;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of phases in one cycle (endurance, strength, hypertrophy).
pub const PHASES_PER_CYCLE: u32 = 3;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// First day of week 1 of the first cycle.
    #[serde(default = "default_epoch")]
    pub epoch: NaiveDate,
    #[serde(default = "default_weeks_per_phase")]
    pub weeks_per_phase: u32,
    #[serde(default = "default_data_file")]
    pub data_file: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_commit_script")]
    pub commit_script: String,
    #[serde(default = "default_commit_timeout")]
    pub commit_timeout_secs: u64,
    #[serde(default = "default_site_title")]
    pub site_title: String,
    #[serde(default = "default_library_url")]
    pub library_url: String,
}

fn default_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 26).unwrap_or_default()
}

fn default_weeks_per_phase() -> u32 {
    4
}

fn default_data_file() -> String {
    paths::DATA_FILE.to_string()
}

fn default_output_dir() -> String {
    paths::OUTPUT_DIR.to_string()
}

fn default_commit_script() -> String {
    paths::COMMIT_SCRIPT.to_string()
}

fn default_commit_timeout() -> u64 {
    120
}

fn default_site_title() -> String {
    "RSW Weekly Plan".to_string()
}

fn default_library_url() -> String {
    "https://rswweeklyplans.github.io/rsw-workouts/library".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            epoch: default_epoch(),
            weeks_per_phase: default_weeks_per_phase(),
            data_file: default_data_file(),
            output_dir: default_output_dir(),
            commit_script: default_commit_script(),
            commit_timeout_secs: default_commit_timeout(),
            site_title: default_site_title(),
            library_url: default_library_url(),
        }
    }
}

impl Config {
    pub fn cycle_weeks(&self) -> u32 {
        self.weeks_per_phase * PHASES_PER_CYCLE
    }

    /// Load `rsw.yaml` from `root`, falling back to defaults when absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.weeks_per_phase == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "weeks_per_phase must be at least 1".to_string(),
            });
        } else if self.weeks_per_phase != default_weeks_per_phase() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "weeks_per_phase={} gives a {}-week cycle instead of 12",
                    self.weeks_per_phase,
                    self.cycle_weeks()
                ),
            });
        }

        if self.output_dir.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "output_dir is empty".to_string(),
            });
        }

        if self.data_file.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "data_file is empty".to_string(),
            });
        }

        if self.commit_timeout_secs == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "commit_timeout_secs=0 kills the commit script immediately".to_string(),
            });
        }

        warnings
    }

    /// Fail on the first error-level finding from [`Config::validate`].
    pub fn ensure_valid(&self) -> Result<()> {
        match self
            .validate()
            .into_iter()
            .find(|w| w.level == WarnLevel::Error)
        {
            Some(w) => Err(RswError::InvalidConfig(w.message)),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

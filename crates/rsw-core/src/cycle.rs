use crate::config::Config;
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Endurance,
    Strength,
    Hypertrophy,
}

impl Phase {
    pub fn all() -> &'static [Phase] {
        &[Phase::Endurance, Phase::Strength, Phase::Hypertrophy]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Phase covering 1-based `week` when every phase lasts `weeks_per_phase`.
    pub fn for_week(week: u32, weeks_per_phase: u32) -> Phase {
        let per_phase = weeks_per_phase.max(1);
        let idx = (week.saturating_sub(1) / per_phase) as usize;
        let all = Phase::all();
        all[idx.min(all.len() - 1)]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Endurance => "endurance",
            Phase::Strength => "strength",
            Phase::Hypertrophy => "hypertrophy",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Phase::Endurance => "Endurance",
            Phase::Strength => "Strength",
            Phase::Hypertrophy => "Hypertrophy",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Phase {
    type Err = crate::error::RswError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "endurance" => Ok(Phase::Endurance),
            "strength" => Ok(Phase::Strength),
            "hypertrophy" => Ok(Phase::Hypertrophy),
            _ => Err(crate::error::RswError::InvalidPhase(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// CyclePosition
// ---------------------------------------------------------------------------

/// Where a date falls in the training cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CyclePosition {
    /// 1-based week within the cycle.
    pub week: u32,
    pub phase: Phase,
}

/// Map `date` to its week-in-cycle and phase.
///
/// Dates before the epoch count backward with floor semantics, so the day
/// before the epoch is the last week of the previous cycle.
pub fn resolve(config: &Config, date: NaiveDate) -> CyclePosition {
    let per_phase = config.weeks_per_phase.max(1);
    let cycle = i64::from(per_phase) * i64::from(crate::config::PHASES_PER_CYCLE);
    let days = date.signed_duration_since(config.epoch).num_days();
    let weeks = days.div_euclid(7);
    // rem_euclid keeps the result in 0..cycle for negative offsets
    let week = (weeks.rem_euclid(cycle) + 1) as u32;
    CyclePosition {
        week,
        phase: Phase::for_week(week, per_phase),
    }
}

/// The first Monday strictly after `today`.
pub fn next_monday(today: NaiveDate) -> NaiveDate {
    let ahead = 7 - today.weekday().num_days_from_monday();
    today + Days::new(u64::from(ahead))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

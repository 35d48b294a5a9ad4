//! Workout dataset model.
//!
//! The dataset is a JSON file with one record per phase plus two
//! phase-independent blocks (`mini_session`, `daily_walk`). Phase and day
//! lookups go through [`Dataset::plan`], which checks that the phase and all
//! four training days are present before anything is rendered.

use crate::cycle::Phase;
use crate::error::{Result, RswError};
use crate::render::sanitize_exercise_name;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;

// ---------------------------------------------------------------------------
// Day
// ---------------------------------------------------------------------------

/// The four training days of a week, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Day {
    Glutes,
    Push,
    Legs,
    Pull,
}

impl Day {
    pub fn all() -> &'static [Day] {
        &[Day::Glutes, Day::Push, Day::Legs, Day::Pull]
    }

    /// Key of this day under `workouts` in the dataset.
    pub fn dataset_key(self) -> &'static str {
        match self {
            Day::Glutes => "monday_glutes",
            Day::Push => "tuesday_push",
            Day::Legs => "thursday_legs",
            Day::Pull => "saturday_pull",
        }
    }

    /// Day segment of a tagged-field key.
    pub fn field_key(self) -> &'static str {
        match self {
            Day::Glutes => "day1",
            Day::Push => "day2",
            Day::Legs => "day3",
            Day::Pull => "day4",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Day::Glutes => "Monday: Glutes",
            Day::Push => "Tuesday: Push (Upper Body)",
            Day::Legs => "Thursday: Legs",
            Day::Pull => "Saturday: Pull (Upper Body)",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dataset_key())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    /// Rep count, duration or distance, e.g. `"12"`, `"30 sec"`, `"400m"`.
    #[serde(deserialize_with = "string_or_number")]
    pub reps: String,
    pub rest: String,
    pub pattern: String,
    pub progression: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DayWorkout {
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhasePlan {
    pub phase_name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub phase_weeks: String,
    pub goal: String,
    pub intro: String,
    #[serde(default)]
    pub workouts: BTreeMap<String, DayWorkout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiniSession {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub exercises: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWalk {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endurance: Option<PhasePlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<PhasePlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hypertrophy: Option<PhasePlan>,
    pub mini_session: MiniSession,
    pub daily_walk: DailyWalk,
}

/// A phase record whose four training days are known to exist.
#[derive(Debug, Clone, Copy)]
pub struct PhaseView<'a> {
    pub phase: Phase,
    pub plan: &'a PhasePlan,
    days: [&'a [Exercise]; 4],
}

impl<'a> PhaseView<'a> {
    pub fn exercises(&self, day: Day) -> &'a [Exercise] {
        self.days[day as usize]
    }
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RswError::DatasetNotFound(path.to_path_buf()));
        }
        let data = std::fs::read_to_string(path)?;
        let dataset = Self::from_json(&data)?;
        tracing::debug!(path = %path.display(), "dataset loaded");
        Ok(dataset)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn phase(&self, phase: Phase) -> Option<&PhasePlan> {
        match phase {
            Phase::Endurance => self.endurance.as_ref(),
            Phase::Strength => self.strength.as_ref(),
            Phase::Hypertrophy => self.hypertrophy.as_ref(),
        }
    }

    /// Look up `phase` and all four of its training days.
    pub fn plan(&self, phase: Phase) -> Result<PhaseView<'_>> {
        let plan = self
            .phase(phase)
            .ok_or_else(|| RswError::PhaseMissing(phase.to_string()))?;
        let day = |d: Day| -> Result<&[Exercise]> {
            plan.workouts
                .get(d.dataset_key())
                .map(|w| w.exercises.as_slice())
                .ok_or_else(|| RswError::DayMissing {
                    phase: phase.to_string(),
                    day: d.dataset_key().to_string(),
                })
        };
        let days = [
            day(Day::Glutes)?,
            day(Day::Push)?,
            day(Day::Legs)?,
            day(Day::Pull)?,
        ];

        // Field keys are `{date}__{day}__{sanitized name}__{field}`, so two
        // exercises in one day must not sanitize to the same name.
        for (d, exercises) in Day::all().iter().zip(days) {
            let mut seen = HashSet::new();
            for exercise in exercises {
                let key = sanitize_exercise_name(&exercise.name);
                if !seen.insert(key.clone()) {
                    return Err(RswError::DuplicateExercise {
                        phase: phase.to_string(),
                        day: d.dataset_key().to_string(),
                        key,
                    });
                }
            }
        }

        Ok(PhaseView { phase, plan, days })
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

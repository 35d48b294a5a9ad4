//! HTML rendering for a weekly plan page.
//!
//! Every interactive control carries a `data-key` attribute of the form
//! `{date}__{day}__{exercise}__{field}`. The inline script restores those
//! controls from `localStorage` on load and writes them back on change, so
//! the page needs no server.

use crate::config::Config;
use crate::cycle::{CyclePosition, Phase};
use crate::dataset::{Dataset, Day, Exercise, PhaseView};
use crate::error::Result;
use chrono::NaiveDate;
use maud::{html, Markup, PreEscaped, DOCTYPE};

/// Date format shown in the page and used as the first segment of every
/// tagged-field key.
pub const DISPLAY_DATE_FORMAT: &str = "%b %d, %Y";

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub site_title: String,
    /// Base URL of the phase libraries; the phase id is appended.
    pub library_url: String,
}

impl RenderOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            site_title: config.site_title.clone(),
            library_url: config.library_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Lowercase, turn spaces and slashes into hyphens, drop parentheses.
pub fn sanitize_exercise_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' | '/' => Some('-'),
            '(' | ')' => None,
            c => Some(c),
        })
        .collect()
}

/// Label for the reps input: anything mentioning seconds is timed.
pub fn reps_label(reps: &str) -> &'static str {
    // "sec" contains 's', so one check covers both spellings
    if reps.to_lowercase().contains('s') {
        "Time (sec)"
    } else {
        "Reps"
    }
}

pub fn field_key(date_key: &str, day: Day, exercise: &str, field: &str) -> String {
    format!(
        "{date_key}__{}__{}__{field}",
        day.field_key(),
        sanitize_exercise_name(exercise)
    )
}

/// Render the full page for `date`.
///
/// Fails if the dataset lacks the phase for `position` or any of its days.
pub fn render(
    date: NaiveDate,
    position: CyclePosition,
    dataset: &Dataset,
    options: &RenderOptions,
) -> Result<String> {
    let view = dataset.plan(position.phase)?;
    let page = render_page(date, position, &view, dataset, options);
    Ok(page.into_string())
}

fn render_page(
    date: NaiveDate,
    position: CyclePosition,
    view: &PhaseView<'_>,
    dataset: &Dataset,
    opts: &RenderOptions,
) -> Markup {
    let plan = view.plan;
    let date_str = date.format(DISPLAY_DATE_FORMAT).to_string();

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (opts.site_title) " — " (date_str) " — " (plan.phase_name) }
                style { (PreEscaped(CSS)) }
            }
            body {
                div.wrap {
                    header {
                        h1 { (opts.site_title) " — " (date_str) }
                        div.meta {
                            strong { "Phase:" }
                            " " (plan.phase_name) " (Weeks " (plan.phase_weeks) ") — "
                            (plan.goal) " • Week " (position.week)
                        }
                        div.goal {
                            strong { "Goal of the week:" }
                            " " (plan.goal)
                        }
                        p.intro { (plan.intro) }
                    }

                    @for day in Day::all() {
                        section.workout {
                            h2 { (day.heading()) }
                            @for exercise in view.exercises(*day) {
                                (render_exercise(exercise, *day, &date_str))
                            }
                        }
                    }

                    section.mini {
                        h2 { (dataset.mini_session.title) }
                        p { (dataset.mini_session.description) }
                        ul {
                            @for item in &dataset.mini_session.exercises {
                                li { (item) }
                            }
                        }
                    }

                    section.walk {
                        h2 { (dataset.daily_walk.title) }
                        p { (dataset.daily_walk.description) }
                    }

                    (render_footer(opts))
                }
                script { (PreEscaped(SCRIPT)) }
            }
        }
    }
}

fn render_exercise(exercise: &Exercise, day: Day, date_key: &str) -> Markup {
    let key = |field: &str| field_key(date_key, day, &exercise.name, field);

    html! {
        div.exercise {
            div.ex-head {
                div.ex-title {
                    strong { (exercise.name) }
                    " "
                    span.badge { (exercise.reps) " • Rest " (exercise.rest) }
                }
                div.equip {
                    label { "Equipment" }
                    select data-key=(key("equip")) {
                        option value="home" { "At home: Dumbbell/Bands" }
                        option value="gym" { "At gym: Barbell/Machines" }
                    }
                }
            }

            div.trackers {
                label {
                    "Weight "
                    input type="text" inputmode="decimal" placeholder="e.g., 135 lb"
                        data-key=(key("weight"));
                }
                label {
                    (reps_label(&exercise.reps)) " "
                    input type="number" min="1" step="1"
                        placeholder={ "e.g., " (exercise.reps) }
                        data-key=(key("reps"));
                }
                label {
                    "RPE "
                    input type="number" min="1" max="10" step="1" placeholder="1–10"
                        data-key=(key("rpe"));
                }
            }

            div.sets {
                @for i in 1..=exercise.sets {
                    label.setbox {
                        input type="checkbox" data-key=(key(&format!("set_{i}")));
                        span { "Set " (i) }
                    }
                }
            }

            label.notes {
                "Notes"
                textarea rows="2" placeholder="Form cues, PRs, adjustments…"
                    data-key=(key("notes")) {}
            }

            div.cue { "Progression cue: " (exercise.progression) }
            div.pattern { "Pattern: " (exercise.pattern) }
        }
    }
}

fn render_footer(opts: &RenderOptions) -> Markup {
    html! {
        section.footer {
            p.liblinks {
                "New or jumping in mid-cycle? Explore the phase libraries: "
                @for (i, phase) in Phase::all().iter().enumerate() {
                    @if i > 0 { " | " }
                    a href={ (opts.library_url) "/" (phase.as_str()) } { (phase.title()) }
                }
            }
            p style="color:#4b5563;font-size:.85rem" {
                "Tip: your entries are stored on your device (localStorage). "
                "Clearing site data will reset your logs."
            }
        }
    }
}

const CSS: &str = r#"
  :root{ --olive:#6C7653; --cream:#F1F0EC; --gold:#C28511; --ink:#1b1b1b; --mid:#6b7280; }
  *{box-sizing:border-box}
  body{margin:0; font-family:ui-sans-serif,system-ui,-apple-system,Segoe UI,Roboto,Inter,Arial; color:var(--ink); background:var(--cream)}
  .wrap{max-width:960px; margin:0 auto; padding:24px 16px}
  header{background:linear-gradient(180deg,var(--olive),#536043); color:white; padding:24px; border-radius:16px}
  header h1{margin:0 0 6px 0; font-size:1.5rem; letter-spacing:0.2px}
  .meta{opacity:.95; font-size:.95rem}
  .goal{margin-top:12px; background:white; color:var(--ink); border-left:6px solid var(--gold); padding:12px 14px; border-radius:12px}
  .intro{margin:16px 0 0 0; font-size:1rem}
  h2{font-size:1.1rem; margin:18px 0 8px}
  .workout, .mini, .walk, .footer{ background:white; border-radius:16px; padding:16px; margin:16px 0; box-shadow:0 1px 0 rgba(0,0,0,.03) }
  .exercise{border:1px solid #e5e7eb; border-radius:12px; padding:12px; margin:12px 0; background:#fafafa}
  .ex-head{display:flex; justify-content:space-between; gap:12px; flex-wrap:wrap}
  .ex-title{font-size:1rem}
  .badge{background:var(--cream); color:#333; padding:2px 8px; border-radius:999px; font-size:.8rem; margin-left:8px}
  .equip label{font-size:.8rem; color:#374151; display:block; margin-bottom:4px}
  .equip select{padding:8px; border-radius:10px; border:1px solid #d1d5db; background:white}
  .trackers{display:grid; grid-template-columns:repeat(3,minmax(0,1fr)); gap:10px; margin:10px 0}
  .trackers label{display:flex; flex-direction:column; font-size:.85rem; gap:6px}
  .trackers input{padding:10px; border-radius:10px; border:1px solid #d1d5db; background:white}
  .sets{display:flex; flex-wrap:wrap; gap:10px; margin:6px 0 10px}
  .setbox{display:flex; align-items:center; gap:6px; font-size:.9rem; background:#fff; border:1px dashed #e5e7eb; border-radius:999px; padding:6px 10px}
  .notes{display:flex; flex-direction:column; gap:6px; font-size:.85rem}
  textarea{border:1px solid #d1d5db; border-radius:10px; padding:10px; background:white}
  .cue,.pattern{font-size:.85rem; color:#374151; margin-top:6px}
  .mini ul{margin:8px 0 0 18px}
  .footer a{color:var(--olive); text-decoration:underline}
  .liblinks a{margin-right:12px}
  @media (max-width:640px){ .trackers{grid-template-columns:1fr} }
"#;

const SCRIPT: &str = r#"
    const restore = () => {
      document.querySelectorAll('[data-key]').forEach(el => {
        const key = el.getAttribute('data-key');
        if (el.type === 'checkbox') {
          el.checked = localStorage.getItem(key) === '1';
        } else {
          const v = localStorage.getItem(key);
          if (v !== null) el.value = v;
        }
      });
    };
    const persist = (e) => {
      const el = e.target;
      if (!el || !el.hasAttribute('data-key')) return;
      const key = el.getAttribute('data-key');
      const val = (el.type === 'checkbox') ? (el.checked ? '1' : '0') : el.value;
      localStorage.setItem(key, val);
    };
    window.addEventListener('change', persist, true);
    window.addEventListener('DOMContentLoaded', restore);
"#;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::{sample, sample_json};
    use crate::error::RswError;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 27).unwrap()
    }

    fn opts() -> RenderOptions {
        RenderOptions::from_config(&Config::default())
    }

    fn endurance_week(week: u32) -> CyclePosition {
        CyclePosition {
            week,
            phase: Phase::Endurance,
        }
    }

    fn render_sample() -> String {
        render(date(), endurance_week(3), &sample(), &opts()).unwrap()
    }

    #[test]
    fn sanitize_examples() {
        assert_eq!(
            sanitize_exercise_name("Bulgarian Split Squat (DB)"),
            "bulgarian-split-squat-db"
        );
        assert_eq!(sanitize_exercise_name("Pull-Up/Chin-Up"), "pull-up-chin-up");
        assert_eq!(sanitize_exercise_name("Hip Thrust"), "hip-thrust");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for name in [
            "Bulgarian Split Squat (DB)",
            "Farmer's Carry / Suitcase",
            "  Dead Bug ",
            "RDL (Single-Leg)",
        ] {
            let once = sanitize_exercise_name(name);
            assert_eq!(sanitize_exercise_name(&once), once, "{name}");
        }
    }

    #[test]
    fn reps_label_detects_timed_sets() {
        assert_eq!(reps_label("12"), "Reps");
        assert_eq!(reps_label("8-10"), "Reps");
        assert_eq!(reps_label("30 sec"), "Time (sec)");
        assert_eq!(reps_label("45S"), "Time (sec)");
        assert_eq!(reps_label("60 SEC hold"), "Time (sec)");
    }

    #[test]
    fn field_key_layout() {
        assert_eq!(
            field_key("Oct 27, 2025", Day::Legs, "Goblet Squat (KB)", "set_2"),
            "Oct 27, 2025__day3__goblet-squat-kb__set_2"
        );
    }

    #[test]
    fn render_is_deterministic() {
        assert_eq!(render_sample(), render_sample());
    }

    #[test]
    fn header_shows_phase_and_week() {
        let html = render_sample();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>RSW Weekly Plan — Oct 27, 2025 — Endurance</title>"));
        assert!(html.contains("Endurance (Weeks 1-4) — Endurance goal • Week 3"));
        assert!(html.contains("Endurance intro"));
    }

    #[test]
    fn one_field_group_per_exercise() {
        let html = render_sample();
        // sample endurance plan has five exercises with 3+2+4+2+3 sets
        for field in ["equip", "weight", "reps", "rpe", "notes"] {
            let needle = format!("__{field}\"");
            assert_eq!(html.matches(&needle).count(), 5, "field {field}");
        }
        assert_eq!(html.matches("type=\"checkbox\"").count(), 14);
        assert!(html.contains("data-key=\"Oct 27, 2025__day1__hip-thrust__set_3\""));
        assert!(!html.contains("__day1__hip-thrust__set_4"));
        assert!(html.contains(
            "data-key=\"Oct 27, 2025__day1__bulgarian-split-squat-db__weight\""
        ));
    }

    #[test]
    fn reps_label_follows_exercise() {
        let html = render_sample();
        assert!(html.contains("<label>Reps <input type=\"number\" min=\"1\" step=\"1\" placeholder=\"e.g., 12\""));
        assert!(html.contains("<label>Time (sec) <input type=\"number\" min=\"1\" step=\"1\" placeholder=\"e.g., 30 sec\""));
    }

    #[test]
    fn days_in_fixed_order() {
        // sample JSON lists saturday_pull first; the page must not follow it
        let html = render_sample();
        let pos = |s: &str| html.find(s).unwrap_or_else(|| panic!("missing {s}"));
        let glutes = pos("Monday: Glutes");
        let push = pos("Tuesday: Push (Upper Body)");
        let legs = pos("Thursday: Legs");
        let pull = pos("Saturday: Pull (Upper Body)");
        assert!(glutes < push && push < legs && legs < pull);
        assert_eq!(html.matches("<section class=\"workout\">").count(), 4);
    }

    #[test]
    fn auxiliary_blocks_and_footer() {
        let html = render_sample();
        assert!(html.contains("<li>Glute Bridge</li><li>Dead Bug</li>"));
        assert!(html.contains("30 minutes, conversational pace."));
        assert!(html.contains(
            "href=\"https://rswweeklyplans.github.io/rsw-workouts/library/hypertrophy\""
        ));
        assert!(html.contains("localStorage.setItem(key, val)"));
    }

    #[test]
    fn dataset_text_is_escaped() {
        let mut value = sample_json();
        value["endurance"]["workouts"]["monday_glutes"]["exercises"][0]["name"] =
            serde_json::json!("<script>alert(1)</script> Row");
        value["endurance"]["intro"] = serde_json::json!("Fast & \"easy\"");
        let ds: Dataset = serde_json::from_value(value).unwrap();
        let html = render(date(), endurance_week(1), &ds, &opts()).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("<strong>&lt;script&gt;alert(1)&lt;/script&gt; Row</strong>"));
        assert!(html.contains("Fast &amp; &quot;easy&quot;"));
    }

    #[test]
    fn missing_day_fails_before_rendering() {
        let mut value = sample_json();
        value["strength"]["workouts"]
            .as_object_mut()
            .unwrap()
            .remove("tuesday_push");
        let ds: Dataset = serde_json::from_value(value).unwrap();
        let pos = CyclePosition {
            week: 6,
            phase: Phase::Strength,
        };
        assert!(matches!(
            render(date(), pos, &ds, &opts()),
            Err(RswError::DayMissing { .. })
        ));
    }

    #[test]
    fn library_url_trailing_slash_is_trimmed() {
        let cfg = Config {
            library_url: "https://example.org/lib/".to_string(),
            ..Config::default()
        };
        let opts = RenderOptions::from_config(&cfg);
        let html = render(date(), endurance_week(1), &sample(), &opts).unwrap();
        assert!(html.contains("href=\"https://example.org/lib/strength\""));
    }
}

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::model::{Curriculum, Week, WeekId};

//
// ─── SUMMARY ───────────────────────────────────────────────────────────────────
//

/// Derived roadmap metrics, recomputed on every relevant mutation.
///
/// Never persisted and carries no identity of its own; always re-derivable
/// from the curriculum plus the completed-week set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSummary {
    pub total_weeks: usize,
    pub completed_weeks: usize,
    /// Whole-week completion, rounded to the nearest integer percent.
    pub percent_complete: u8,
    /// Whole days from `today` to the program end; negative once the program
    /// has ended (callers may display the overrun).
    pub days_until_end: i64,
    /// The active week for `today`; `None` only for an empty curriculum.
    pub current_week: Option<Week>,
}

/// Derives summary metrics from the curriculum and the completed-week set.
///
/// Pure: same inputs, same output. Completed ids with no matching week in
/// the curriculum are ignored rather than counted, so a stale remote record
/// can never push the percentage past what the curriculum supports.
#[must_use]
pub fn summarize(
    curriculum: &Curriculum,
    completed: &HashSet<WeekId>,
    today: NaiveDate,
) -> ProgressSummary {
    let total_weeks = curriculum.total_weeks();
    let completed_weeks = curriculum
        .weeks()
        .filter(|w| completed.contains(w.id()))
        .count();

    let percent_complete = ratio_percent(completed_weeks, total_weeks);

    let days_until_end = curriculum
        .end_date()
        .map_or(0, |end| (end - today).num_days());

    let current_week = current_week(curriculum, today).cloned();

    ProgressSummary {
        total_weeks,
        completed_weeks,
        percent_complete,
        days_until_end,
        current_week,
    }
}

/// Selects the active week for a given day.
///
/// Preference order: the first week in curriculum order whose date range
/// contains `today`; otherwise the upcoming week with the earliest start;
/// otherwise the elapsed week with the latest end. A non-empty curriculum
/// therefore always yields a week.
#[must_use]
pub fn current_week(curriculum: &Curriculum, today: NaiveDate) -> Option<&Week> {
    if let Some(active) = curriculum.weeks().find(|w| w.contains(today)) {
        return Some(active);
    }
    if let Some(upcoming) = curriculum
        .weeks()
        .filter(|w| w.start_date() > today)
        .min_by_key(|w| w.start_date())
    {
        return Some(upcoming);
    }
    curriculum
        .weeks()
        .filter(|w| w.end_date() < today)
        .max_by_key(|w| w.end_date())
}

/// Partial completion of a single week: checked goals over total goals.
///
/// Independent of whole-week completion. The checked count is clamped to the
/// goal count so a stale checklist (curriculum changed under a saved cache)
/// can at worst read 100%. Zero-goal weeks read as 0.
#[must_use]
pub fn week_percent(checked_count: usize, goal_count: usize) -> u8 {
    ratio_percent(checked_count.min(goal_count), goal_count)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn ratio_percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let percent = (part as f64 / whole as f64 * 100.0).round();
    percent as u8
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

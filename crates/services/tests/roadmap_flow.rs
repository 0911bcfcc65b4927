use std::sync::Arc;

use chrono::NaiveDate;
use roadmap_core::model::{Curriculum, Month, Track, UserId, Week, WeekId};
use roadmap_core::time::fixed_clock;
use services::{ProgressError, ProgressStore, RoadmapService};
use storage::{GoalChecklistStore, Storage};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn week(id: &str, start: NaiveDate, end: NaiveDate) -> Week {
    Week::new(
        WeekId::new(id),
        format!("Week {id}"),
        vec![
            "read the chapter".into(),
            "do the exercises".into(),
            "ship something".into(),
        ],
        start,
        end,
    )
    .expect("valid week")
}

/// Two tracks, one month each, two weeks per track, three goals per week.
/// The fixed test clock (2025-11-13) falls inside w2.
fn curriculum() -> Curriculum {
    let ai = Track::new(
        "ai",
        "AI Engineering",
        vec![Month::new(
            "November",
            vec![
                week("w1", date(2025, 11, 3), date(2025, 11, 9)),
                week("w2", date(2025, 11, 10), date(2025, 11, 16)),
            ],
        )],
    )
    .expect("valid track");
    let dsa = Track::new(
        "dsa",
        "C++ DSA",
        vec![Month::new(
            "November",
            vec![
                week("w3", date(2025, 11, 24), date(2025, 11, 30)),
                week("w4", date(2025, 12, 1), date(2025, 12, 7)),
            ],
        )],
    )
    .expect("valid track");
    Curriculum::new(vec![ai, dsa]).expect("valid curriculum")
}

fn service(storage: &Storage, cache_path: std::path::PathBuf) -> RoadmapService {
    let user = UserId::new(Uuid::from_u128(42));
    let progress = ProgressStore::new(user, Arc::clone(&storage.completions));
    let goals = GoalChecklistStore::hydrate(cache_path);
    RoadmapService::new(fixed_clock(), curriculum(), progress, goals)
}

#[tokio::test]
async fn roadmap_flow_load_toggle_and_summarize() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cache_path = dir.path().join("goals.json");
    let storage = Storage::in_memory();
    let mut roadmap = service(&storage, cache_path.clone());

    assert!(!roadmap.is_loaded());
    roadmap.load().await.expect("load completions");
    assert!(roadmap.is_loaded());

    let summary = roadmap.summary();
    assert_eq!(summary.total_weeks, 4);
    assert_eq!(summary.percent_complete, 0);
    assert_eq!(summary.days_until_end, 24);
    assert_eq!(
        summary.current_week.as_ref().map(Week::id),
        Some(&WeekId::new("w2"))
    );

    // Completing one of four weeks lands at 25%.
    let summary = roadmap
        .toggle_week(&WeekId::new("w1"))
        .await
        .expect("toggle w1");
    assert_eq!(summary.completed_weeks, 1);
    assert_eq!(summary.percent_complete, 25);
    assert!(roadmap.is_week_complete(&WeekId::new("w1")));

    // Goal checkboxes move the partial percentage without touching
    // whole-week completion.
    let w2 = WeekId::new("w2");
    roadmap.toggle_goal(&w2, 0).expect("toggle goal 0");
    let partial = roadmap.toggle_goal(&w2, 1).expect("toggle goal 1");
    assert_eq!(partial.checked_goals, 2);
    assert_eq!(partial.percent, 67);
    assert!(!partial.complete);
    assert_eq!(roadmap.summary().percent_complete, 25);

    // Untoggling the week restores 0%.
    let summary = roadmap
        .toggle_week(&WeekId::new("w1"))
        .await
        .expect("untoggle w1");
    assert_eq!(summary.percent_complete, 0);

    // A new session over the same storage and cache sees the same state:
    // completions from the remote table, goal ticks from the device cache.
    let mut fresh = service(&storage, cache_path);
    fresh.load().await.expect("reload");
    assert!(!fresh.is_week_complete(&WeekId::new("w1")));
    let partial = fresh.week_progress(&w2).expect("week progress");
    assert_eq!(partial.checked_goals, 2);
    assert_eq!(partial.percent, 67);
}

#[tokio::test]
async fn stale_references_are_errors_not_crashes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = Storage::in_memory();
    let mut roadmap = service(&storage, dir.path().join("goals.json"));
    roadmap.load().await.expect("load");

    let err = roadmap
        .toggle_week(&WeekId::new("ghost"))
        .await
        .expect_err("unknown week");
    assert!(matches!(err, ProgressError::UnknownWeek { .. }));

    let err = roadmap
        .toggle_goal(&WeekId::new("w1"), 99)
        .expect_err("index out of range");
    assert!(matches!(err, ProgressError::GoalOutOfRange { index: 99, .. }));
}

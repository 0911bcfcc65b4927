use roadmap_core::model::{JournalDraft, Mood, ProjectDraft, UserId, WeekId};
use storage::Storage;
use uuid::Uuid;

#[tokio::test]
async fn in_memory_storage_serves_all_three_tables() {
    let storage = Storage::in_memory();
    let user = UserId::new(Uuid::from_u128(7));

    storage
        .completions
        .upsert_completion(user, &WeekId::new("w1"))
        .await
        .expect("upsert completion");
    let completed = storage
        .completions
        .list_completed(user)
        .await
        .expect("list completions");
    assert_eq!(completed, vec![WeekId::new("w1")]);

    let draft = ProjectDraft::new(
        "Portfolio API",
        "FastAPI backend for the portfolio site.",
        None,
        None,
        vec!["Python".into()],
        None,
    )
    .expect("valid draft");
    let project = storage
        .projects
        .insert_project(user, &draft)
        .await
        .expect("insert project");
    let projects = storage
        .projects
        .list_projects(user)
        .await
        .expect("list projects");
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].id(), project.id());

    let entry_date = chrono::NaiveDate::from_ymd_opt(2025, 11, 5).unwrap();
    let journal = JournalDraft::new(
        entry_date,
        vec!["finished week 1 goals".into()],
        vec!["lifetimes".into()],
        vec![],
        "",
        Mood::Great,
    )
    .expect("valid entry");
    storage
        .journals
        .upsert_entry(user, &journal)
        .await
        .expect("upsert journal");
    let fetched = storage
        .journals
        .get_entry(user, entry_date)
        .await
        .expect("get entry")
        .expect("entry exists");
    assert_eq!(fetched.learnings(), ["lifetimes"]);

    // Data is per-user: a different user sees none of it.
    let stranger = UserId::new(Uuid::from_u128(8));
    assert!(storage
        .completions
        .list_completed(stranger)
        .await
        .unwrap()
        .is_empty());
    assert!(storage.projects.list_projects(stranger).await.unwrap().is_empty());
    assert!(storage.journals.list_entries(stranger).await.unwrap().is_empty());
}

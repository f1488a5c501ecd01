//! Project store behavior: listing loads, mutations, the normalized
//! record table, latest-wins load racing, and the notice feed.

mod common;

use std::sync::Arc;
use std::time::Duration;

use scholarbase_client::mock::MockPortal;
use scholarbase_core::{
    CreateProject, ProjectFilter, ProjectStatus, Tag, UpdateProject,
};
use scholarbase_state::{NoticeBus, NoticeLevel, ProjectStore};

use common::{project, student};

fn project_store(portal: &MockPortal) -> ProjectStore {
    ProjectStore::new(Arc::new(portal.clone()), NoticeBus::default())
}

fn submission(title: &str) -> CreateProject {
    CreateProject {
        title: title.to_string(),
        year: "2024".to_string(),
        description: "A serious piece of work".to_string(),
        tags: vec![Tag::AI],
        ..CreateProject::default()
    }
}

// ---------------------------------------------------------------------------
// Listing loads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_load_all_populates_the_corpus() {
    let portal = MockPortal::new()
        .with_project(project(1, "Flood Prediction", ProjectStatus::Approved))
        .with_project(project(2, "Smart Irrigation", ProjectStatus::Pending));
    let store = project_store(&portal);

    store.load_all(&ProjectFilter::default()).await;

    let all = store.all().await;
    assert_eq!(all.len(), 2);
    assert!(!store.loading().await);
    assert_eq!(store.error().await, None);
}

#[tokio::test]
async fn test_load_approved_pins_status() {
    let portal = MockPortal::new()
        .with_project(project(1, "Flood Prediction", ProjectStatus::Approved))
        .with_project(project(2, "Smart Irrigation", ProjectStatus::Pending));
    let store = project_store(&portal);

    store.load_approved(&ProjectFilter::default()).await;

    let approved = store.approved().await;
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].id, 1);
}

#[tokio::test]
async fn test_load_mine_lists_only_owned_projects() {
    let mut foreign = project(3, "Campus Marketplace", ProjectStatus::Pending);
    foreign.student_id = Some(99);
    let portal = MockPortal::new()
        .with_profile(student())
        .with_project(project(1, "Flood Prediction", ProjectStatus::Approved))
        .with_project(foreign);
    let store = project_store(&portal);

    store.load_mine().await;

    let mine = store.mine().await;
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, 1);
}

#[tokio::test]
async fn test_load_one_sets_the_current_record() {
    let portal =
        MockPortal::new().with_project(project(5, "Exam Scheduler", ProjectStatus::Pending));
    let store = project_store(&portal);

    store.load_one(5).await;

    assert_eq!(store.current().await.unwrap().id, 5);
}

#[tokio::test]
async fn test_failed_load_sets_error_and_publishes_notice() {
    let portal = MockPortal::new();
    let store = project_store(&portal);
    let mut notices = store.notices().subscribe();
    portal.fail_next(500, "Internal server error");

    store.load_all(&ProjectFilter::default()).await;

    assert_eq!(store.error().await.as_deref(), Some("Internal server error"));
    assert!(!store.loading().await);
    let notice = notices.try_recv().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Internal server error");
}

#[tokio::test]
async fn test_rapid_reloads_latest_wins() {
    let portal = MockPortal::new()
        .with_project(project(1, "Flood Prediction", ProjectStatus::Approved))
        .with_project(project(2, "Smart Irrigation", ProjectStatus::Pending));
    let store = Arc::new(project_store(&portal));

    // The first load stalls in flight; a refilter lands while it hangs.
    portal.delay_next(200);
    let stale = {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            store
                .load_all(&ProjectFilter {
                    status: Some(ProjectStatus::Pending),
                    ..ProjectFilter::default()
                })
                .await;
        })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    store
        .load_all(&ProjectFilter {
            status: Some(ProjectStatus::Approved),
            ..ProjectFilter::default()
        })
        .await;
    stale.await.unwrap();

    // Only the later call's result is ever applied.
    let all = store.all().await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, 1);
    assert_eq!(store.error().await, None);
    assert!(!store.loading().await);
    assert_eq!(portal.call_count("list_all"), 2);
}

#[tokio::test]
async fn test_refresh_reloads_corpus_and_own_listing_together() {
    let mut foreign = project(2, "Campus Marketplace", ProjectStatus::Pending);
    foreign.student_id = Some(99);
    let portal = MockPortal::new()
        .with_profile(student())
        .with_project(project(1, "Flood Prediction", ProjectStatus::Approved))
        .with_project(foreign);
    let store = project_store(&portal);

    store.refresh(&ProjectFilter::default()).await;

    assert_eq!(store.all().await.len(), 2);
    assert_eq!(store.mine().await.len(), 1);
    assert_eq!(portal.call_count("list_all"), 1);
    assert_eq!(portal.call_count("list_mine"), 1);
    assert!(!store.loading().await);
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_rejects_invalid_submission_before_send() {
    let portal = MockPortal::new().with_profile(student());
    let store = project_store(&portal);
    let mut notices = store.notices().subscribe();

    let mut data = submission("Flood Prediction");
    data.tags.clear();

    assert!(store.create(&data).await.is_none());
    assert_eq!(portal.call_count("create"), 0);
    assert_eq!(store.error().await.as_deref(), Some("Select at least one tag"));
    let notice = notices.try_recv().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Select at least one tag");
}

#[tokio::test]
async fn test_create_prepends_to_mine_and_all() {
    let portal = MockPortal::new()
        .with_profile(student())
        .with_project(project(1, "Flood Prediction", ProjectStatus::Approved));
    let store = project_store(&portal);
    store.load_all(&ProjectFilter::default()).await;
    store.load_mine().await;
    let mut notices = store.notices().subscribe();

    let created = store.create(&submission("Smart Irrigation")).await.unwrap();

    assert_eq!(created.status, ProjectStatus::Pending);
    let all = store.all().await;
    let mine = store.mine().await;
    assert_eq!(all[0].id, created.id);
    assert_eq!(mine[0].id, created.id);
    assert_eq!(all.len(), 2);
    let notice = notices.try_recv().unwrap();
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.message, "Project created successfully!");
}

#[tokio::test]
async fn test_update_is_visible_through_every_view() {
    let portal =
        MockPortal::new().with_project(project(1, "Flood Prediction", ProjectStatus::Approved));
    let store = project_store(&portal);
    store.load_all(&ProjectFilter::default()).await;
    store.load_approved(&ProjectFilter::default()).await;
    store.load_one(1).await;

    let data = UpdateProject {
        id: 1,
        title: Some("Flood Prediction v2".to_string()),
        ..UpdateProject::default()
    };
    let updated = store.update(&data).await.unwrap();

    assert_eq!(updated.title, "Flood Prediction v2");
    assert_eq!(store.all().await[0].title, "Flood Prediction v2");
    assert_eq!(store.approved().await[0].title, "Flood Prediction v2");
    assert_eq!(store.current().await.unwrap().title, "Flood Prediction v2");
}

#[tokio::test]
async fn test_delete_removes_the_record_everywhere() {
    let portal = MockPortal::new()
        .with_profile(student())
        .with_project(project(1, "Flood Prediction", ProjectStatus::Approved));
    let store = project_store(&portal);
    store.load_all(&ProjectFilter::default()).await;
    store.load_mine().await;
    store.load_one(1).await;

    assert!(store.delete(1).await);

    assert!(store.all().await.is_empty());
    assert!(store.mine().await.is_empty());
    assert!(store.current().await.is_none());
}

#[tokio::test]
async fn test_approve_updates_records_but_not_approved_membership() {
    let portal = MockPortal::new()
        .with_profile(student())
        .with_project(project(1, "Flood Prediction", ProjectStatus::Approved))
        .with_project(project(2, "Smart Irrigation", ProjectStatus::Pending));
    let store = project_store(&portal);
    store.load_all(&ProjectFilter::default()).await;
    store.load_mine().await;
    store.load_approved(&ProjectFilter::default()).await;
    let mut notices = store.notices().subscribe();

    assert!(store.approve(2).await);

    // Every membership that already holds the record sees the new status.
    let all = store.all().await;
    let approved_in_all = all.iter().find(|p| p.id == 2).unwrap();
    assert_eq!(approved_in_all.status, ProjectStatus::Approved);
    let mine = store.mine().await;
    assert_eq!(
        mine.iter().find(|p| p.id == 2).unwrap().status,
        ProjectStatus::Approved
    );

    // The approved listing's membership is stale until it reloads.
    let approved = store.approved().await;
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].id, 1);

    store.load_approved(&ProjectFilter::default()).await;
    let approved = store.approved().await;
    assert_eq!(approved.len(), 2);

    let notice = notices.try_recv().unwrap();
    assert_eq!(notice.message, "Project approved successfully!");
}

#[tokio::test]
async fn test_reject_carries_the_reason() {
    let portal =
        MockPortal::new().with_project(project(2, "Smart Irrigation", ProjectStatus::Pending));
    let store = project_store(&portal);
    store.load_all(&ProjectFilter::default()).await;

    assert!(store.reject(2, Some("Out of scope for the department")).await);

    let all = store.all().await;
    assert_eq!(all[0].status, ProjectStatus::Rejected);
    assert_eq!(
        all[0].review_comment.as_deref(),
        Some("Out of scope for the department")
    );
}

#[tokio::test]
async fn test_update_status_reports_the_new_status() {
    let portal =
        MockPortal::new().with_project(project(2, "Smart Irrigation", ProjectStatus::Pending));
    let store = project_store(&portal);
    store.load_one(2).await;
    let mut notices = store.notices().subscribe();

    assert!(
        store
            .update_status(2, ProjectStatus::UnderReview, Some("Needs a data plan"))
            .await
    );

    let current = store.current().await.unwrap();
    assert_eq!(current.status, ProjectStatus::UnderReview);
    assert_eq!(current.review_comment.as_deref(), Some("Needs a data plan"));
    let notice = notices.try_recv().unwrap();
    assert_eq!(notice.message, "Project status updated to Under Review!");
}

#[tokio::test]
async fn test_failed_mutation_keeps_the_table() {
    let portal =
        MockPortal::new().with_project(project(1, "Flood Prediction", ProjectStatus::Approved));
    let store = project_store(&portal);
    store.load_all(&ProjectFilter::default()).await;
    portal.fail_next(404, "Project not found");

    assert!(!store.delete(1).await);

    assert_eq!(store.all().await.len(), 1);
    assert_eq!(store.error().await.as_deref(), Some("Project not found"));
}

// ---------------------------------------------------------------------------
// Derived queries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_derived_queries_run_over_the_loaded_corpus() {
    let mut older = project(2, "Smart Irrigation", ProjectStatus::Pending);
    older.year = "2023".to_string();
    older.tags = vec![Tag::MachineLearning];
    let portal = MockPortal::new()
        .with_project(project(1, "Flood Prediction", ProjectStatus::Approved))
        .with_project(older);
    let store = project_store(&portal);
    store.load_all(&ProjectFilter::default()).await;

    let pending = store.by_status(ProjectStatus::Pending).await;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, 2);

    let ml = store.by_tags(&[Tag::MachineLearning]).await;
    assert_eq!(ml.len(), 1);
    assert_eq!(ml[0].id, 2);

    // An empty tag set imposes no constraint.
    assert_eq!(store.by_tags(&[]).await.len(), 2);

    let from_2023 = store.by_year("2023").await;
    assert_eq!(from_2023.len(), 1);
    assert_eq!(from_2023[0].id, 2);

    let composed = store
        .filter(&ProjectFilter {
            status: Some(ProjectStatus::Approved),
            tags: vec![Tag::AI],
            ..ProjectFilter::default()
        })
        .await;
    assert_eq!(composed.len(), 1);
    assert_eq!(composed[0].id, 1);
}

#[tokio::test]
async fn test_my_tally_counts_own_projects_by_status() {
    let mut rejected = project(3, "Old Attempt", ProjectStatus::Rejected);
    rejected.tags = vec![Tag::WebDevelopment];
    let portal = MockPortal::new()
        .with_profile(student())
        .with_project(project(1, "Flood Prediction", ProjectStatus::Approved))
        .with_project(project(2, "Smart Irrigation", ProjectStatus::Pending))
        .with_project(rejected);
    let store = project_store(&portal);
    store.load_mine().await;

    let tally = store.my_tally().await;

    assert_eq!(tally.total, 3);
    assert_eq!(tally.approved, 1);
    assert_eq!(tally.pending, 1);
    assert_eq!(tally.rejected, 1);
}

mod common;

use chrono::NaiveDate;
use common::{TEST_LOCK, shared_server};
use uuid::Uuid;
use volunteer_portal::client::{
    ClientError, HttpApi, Page, PortalApi, PortalStore, StatusFilter, View,
};
use volunteer_portal::messages::{EVENTS_FETCH_FAILED, LOGIN_FAILED};
use volunteer_portal::models::{EventPatch, EventStatus, NewEvent, NewTraining, TrainingLevel};

fn event_draft(title: &str) -> NewEvent {
    NewEvent {
        title: title.into(),
        ministry: "وزارة الصحة".into(),
        date: NaiveDate::from_ymd_opt(2025, 7, 1),
        time: "08:00".into(),
        location: "مستشفى خولة".into(),
        max_volunteers: 4,
        leader: "سارة".into(),
        ..NewEvent::default()
    }
}

#[tokio::test]
async fn client_store_tracks_server_state() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let mut store = PortalStore::new(HttpApi::new(&server.base_url));

    let title = format!("حملة التبرع بالدم {}", Uuid::new_v4());
    let event = store.create_event(event_draft(&title)).await.unwrap();
    assert_eq!(event.status, EventStatus::Active);
    assert_eq!(store.events().last().map(|e| e.id), Some(event.id));

    let view = store.navigate(Page::Volunteers).await;
    assert_eq!(view, View::Page(Page::Volunteers));
    let matches = store.filtered_events(&title, StatusFilter::All);
    assert_eq!(matches.len(), 1);

    store.select_event(event.clone()).await;
    let patch = EventPatch {
        status: Some(EventStatus::Completed),
        ..EventPatch::default()
    };
    let updated = store.update_event(event.id, patch).await.unwrap().unwrap();
    assert_eq!(updated.status, EventStatus::Completed);
    assert_eq!(store.current_page(), Page::Events);
    assert_eq!(store.selected_event().unwrap().status, EventStatus::Completed);

    let deleted = store.delete_event(event.id, |_| true).await.unwrap();
    assert!(deleted);
    store.navigate(Page::Events).await;
    assert!(store.events().iter().all(|e| e.id != event.id));
}

#[tokio::test]
async fn client_surfaces_capacity_conflicts() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let api = HttpApi::new(&server.base_url);

    let event = api
        .create_event(&NewEvent {
            max_volunteers: 1,
            ..event_draft("سباق الجري")
        })
        .await
        .unwrap();
    api.enroll_volunteer(event.id).await.unwrap();

    let err = api.enroll_volunteer(event.id).await.unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert!(matches!(err, ClientError::Server { .. }));
}

#[tokio::test]
async fn client_training_round_trip() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let mut store = PortalStore::new(HttpApi::new(&server.base_url));

    let training = store
        .create_training(NewTraining {
            title: "برنامج القيادة التطوعية".into(),
            date: NaiveDate::from_ymd_opt(2025, 8, 3),
            time: "10:00".into(),
            location: "مركز التنمية المهنية".into(),
            max_participants: 12,
            instructor: "د. أحمد البلوشي".into(),
            level: TrainingLevel::Advanced,
            duration: "5 أيام".into(),
            category: "قيادة".into(),
            ..NewTraining::default()
        })
        .await
        .unwrap();

    store.navigate(Page::Training).await;
    assert!(store.trainings().iter().any(|t| t.id == training.id));

    let missing = store
        .update_training(Uuid::new_v4(), Default::default())
        .await
        .unwrap();
    assert!(missing.is_none());

    assert!(store.delete_training(training.id, |_| true).await.unwrap());
    store.navigate(Page::Dashboard).await;
    assert!(store.trainings().iter().all(|t| t.id != training.id));
    assert!(store.error().is_none());
}

#[tokio::test]
async fn client_login_navigates_to_dashboard() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let mut store = PortalStore::new(HttpApi::new(&server.base_url));

    assert!(!store.login("admin@example.com", "wrong").await);
    assert_eq!(store.error(), Some(LOGIN_FAILED));

    assert!(store.login("admin@example.com", "admin123").await);
    assert_eq!(store.current_page(), Page::Dashboard);
}

#[tokio::test]
async fn client_reports_unreachable_server() {
    let mut store = PortalStore::new(HttpApi::new("http://127.0.0.1:9"));
    store.navigate(Page::Events).await;
    assert!(store.events().is_empty());
    assert_eq!(store.error(), Some(EVENTS_FETCH_FAILED));
}

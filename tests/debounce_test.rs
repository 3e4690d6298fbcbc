use std::time::Duration;

use chrono::{TimeZone, Utc};
use coursedesk::debounce::Debouncer;
use coursedesk::models::{Course, Level};
use coursedesk::view::{BrowseSession, ListView, SortKey};

#[tokio::test(start_paused = true)]
async fn test_only_last_value_in_quiet_window_is_published() {
    let debouncer = Debouncer::new(Duration::from_millis(1000), String::new());
    let mut rx = debouncer.subscribe();

    for value in ["j", "ja", "jav", "java"] {
        debouncer.push(value.to_string());
        tokio::time::sleep(Duration::from_millis(300)).await;
    }

    // more than a second since the first keystroke, still nothing settled
    assert!(!rx.has_changed().unwrap());
    assert!(debouncer.is_pending());

    tokio::time::sleep(Duration::from_millis(800)).await;
    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), "java");
    assert_eq!(debouncer.settled(), "java");
    assert!(!debouncer.is_pending());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_drops_pending_value() {
    let debouncer = Debouncer::new(Duration::from_millis(100), 0u32);
    let rx = debouncer.subscribe();

    debouncer.push(7);
    debouncer.cancel();
    tokio::time::sleep(Duration::from_millis(500)).await;

    assert!(!rx.has_changed().unwrap());
    assert_eq!(debouncer.settled(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_separate_quiet_windows_publish_each_value() {
    let debouncer = Debouncer::new(Duration::from_millis(100), 0u32);
    let mut rx = debouncer.subscribe();

    debouncer.push(1);
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), 1);

    debouncer.push(2);
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), 2);
}

fn course(id: i64, title: &str) -> Course {
    let at = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap() + chrono::Duration::minutes(id);
    Course {
        id,
        title: title.to_string(),
        description: "Description of the course".to_string(),
        instructor: "Barbara Liskov".to_string(),
        level: Level::Beginner,
        image: None,
        created_at: at,
        updated_at: at,
    }
}

#[tokio::test(start_paused = true)]
async fn test_browse_session_applies_settled_search() {
    let courses = vec![course(1, "React Fundamentals"), course(2, "Advanced JavaScript")];
    let mut session = BrowseSession::default();
    session.select_sort(Some(SortKey::Name));

    session.type_search("j");
    session.type_search("java");

    // filter is unchanged while typing
    assert_eq!(session.project(&courses).total, 2);

    assert!(session.settle().await);
    let projection = session.project(&courses);
    assert_eq!(projection.total, 1);
    assert_eq!(projection.items[0].title, "Advanced JavaScript");
    assert_eq!(session.view().query().search, "java");
}

#[tokio::test(start_paused = true)]
async fn test_browse_session_clear_search() {
    let courses = vec![course(1, "React Fundamentals"), course(2, "Advanced JavaScript")];
    let mut session = BrowseSession::new(ListView::default(), Duration::from_millis(200));

    session.type_search("react");
    session.settle().await;
    assert_eq!(session.project(&courses).total, 1);

    session.clear_search();
    session.settle().await;
    assert_eq!(session.project(&courses).total, 2);
}

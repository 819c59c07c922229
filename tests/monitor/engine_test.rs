use std::time::Duration;

use serde_json::json;

use homework_bot::modules::homework::{HomeworkKey, HomeworkStatus};
use homework_bot::services::monitor::{Iteration, PollState};

use crate::common::{engine, FakeSource, RecordingMessenger, Reply};

const APPROVED_HW1: &str =
    "Изменился статус проверки работы \"hw1\". Работа проверена: ревьюеру всё понравилось. Ура!";

fn approved_payload() -> serde_json::Value {
    json!({
        "homeworks": [{"id": 7, "homework_name": "hw1", "status": "approved"}],
        "current_date": 1000
    })
}

#[tokio::test]
async fn test_status_change_is_notified_and_cursor_advances() {
    let source = FakeSource::new(vec![Reply::Json(approved_payload())]);
    let messenger = RecordingMessenger::new();
    let engine = engine(source.clone(), messenger.clone(), Duration::from_millis(1));
    let mut state = PollState::new(0);

    let iteration = engine.tick(&mut state).await;

    assert_eq!(iteration, Iteration::Completed { notified: 1 });
    assert_eq!(messenger.delivered(), vec![APPROVED_HW1.to_string()]);
    assert_eq!(state.cursor, 1000);
    assert_eq!(source.cursors(), vec![0]);
    assert_eq!(
        state.tracked.get(&HomeworkKey::Id(7)),
        Some(HomeworkStatus::Approved)
    );
}

#[tokio::test]
async fn test_replayed_payload_is_not_renotified() {
    // Regression: statuses must survive across iterations.
    let source = FakeSource::new(vec![Reply::Json(approved_payload())]);
    let messenger = RecordingMessenger::new();
    let engine = engine(source.clone(), messenger.clone(), Duration::from_millis(1));
    let mut state = PollState::new(0);

    engine.tick(&mut state).await;
    let second = engine.tick(&mut state).await;
    let third = engine.tick(&mut state).await;

    assert_eq!(second, Iteration::Completed { notified: 0 });
    assert_eq!(third, Iteration::Completed { notified: 0 });
    assert_eq!(messenger.attempts().len(), 1);
    assert_eq!(source.cursors(), vec![0, 1000, 1000]);
}

#[tokio::test]
async fn test_unknown_status_is_reported_and_cursor_held() {
    let source = FakeSource::new(vec![Reply::Json(json!({
        "homeworks": [{"id": 7, "homework_name": "hw1", "status": "in_progress"}],
        "current_date": 1000
    }))]);
    let messenger = RecordingMessenger::new();
    let engine = engine(source.clone(), messenger.clone(), Duration::from_millis(1));
    let mut state = PollState::new(0);

    let iteration = engine.tick(&mut state).await;

    let expected = "Сбой в работе программы: Schema violation: unknown status: in_progress";
    assert_eq!(
        iteration,
        Iteration::Failed {
            message: expected.to_string()
        }
    );
    assert_eq!(messenger.delivered(), vec![expected.to_string()]);
    assert_eq!(state.cursor, 0);
    assert!(state.tracked.is_empty());
}

#[tokio::test]
async fn test_repeated_error_is_sent_once() {
    let source = FakeSource::new(vec![
        Reply::Status(500),
        Reply::Status(500),
        Reply::Status(503),
    ]);
    let messenger = RecordingMessenger::new();
    let engine = engine(source.clone(), messenger.clone(), Duration::from_millis(1));
    let mut state = PollState::new(5);

    engine.tick(&mut state).await;
    engine.tick(&mut state).await;
    assert_eq!(messenger.attempts().len(), 1);

    engine.tick(&mut state).await;
    let attempts = messenger.attempts();
    assert_eq!(attempts.len(), 2);
    assert!(attempts[1].ends_with("503"));
    assert_eq!(state.cursor, 5);
    assert_eq!(source.cursors(), vec![5, 5, 5]);
}

#[tokio::test]
async fn test_undelivered_error_is_retried() {
    let source = FakeSource::new(vec![Reply::Status(502)]);
    let messenger = RecordingMessenger::new();
    let engine = engine(source.clone(), messenger.clone(), Duration::from_millis(1));
    let mut state = PollState::new(0);

    messenger.set_failing(true);
    engine.tick(&mut state).await;
    assert!(state.last_error.is_none());

    messenger.set_failing(false);
    engine.tick(&mut state).await;
    engine.tick(&mut state).await;

    assert_eq!(messenger.attempts().len(), 2);
    assert_eq!(messenger.delivered().len(), 1);
    assert!(state.last_error.is_some());
}

#[tokio::test]
async fn test_undelivered_transition_stays_uncommitted() {
    let source = FakeSource::new(vec![Reply::Json(approved_payload())]);
    let messenger = RecordingMessenger::new();
    let engine = engine(source.clone(), messenger.clone(), Duration::from_millis(1));
    let mut state = PollState::new(0);

    messenger.set_failing(true);
    let first = engine.tick(&mut state).await;
    assert_eq!(
        first,
        Iteration::Incomplete {
            notified: 0,
            undelivered: 1
        }
    );
    assert_eq!(state.cursor, 0);
    assert!(state.tracked.is_empty());

    messenger.set_failing(false);
    let second = engine.tick(&mut state).await;
    assert_eq!(second, Iteration::Completed { notified: 1 });
    assert_eq!(messenger.delivered(), vec![APPROVED_HW1.to_string()]);
    assert_eq!(state.cursor, 1000);
}

#[tokio::test]
async fn test_panic_inside_iteration_is_contained() {
    let source = FakeSource::new(vec![
        Reply::Panic("decoder exploded"),
        Reply::Json(approved_payload()),
    ]);
    let messenger = RecordingMessenger::new();
    let engine = engine(source.clone(), messenger.clone(), Duration::from_millis(1));
    let mut state = PollState::new(0);

    let first = engine.tick(&mut state).await;
    assert_eq!(
        first,
        Iteration::Failed {
            message: "Сбой в работе программы: Internal error: decoder exploded".to_string()
        }
    );

    let second = engine.tick(&mut state).await;
    assert_eq!(second, Iteration::Completed { notified: 1 });
    assert_eq!(messenger.delivered().len(), 2);
}

#[tokio::test]
async fn test_empty_homeworks_advance_cursor_silently() {
    let source = FakeSource::new(vec![Reply::Json(json!({
        "homeworks": [],
        "current_date": 2000
    }))]);
    let messenger = RecordingMessenger::new();
    let engine = engine(source.clone(), messenger.clone(), Duration::from_millis(1));
    let mut state = PollState::new(1500);

    let iteration = engine.tick(&mut state).await;

    assert_eq!(iteration, Iteration::Completed { notified: 0 });
    assert!(messenger.attempts().is_empty());
    assert_eq!(state.cursor, 2000);
}

#[tokio::test]
async fn test_every_change_of_an_item_is_notified_once() {
    let source = FakeSource::new(vec![
        Reply::Json(json!({
            "homeworks": [{"id": 1, "homework_name": "hw", "status": "reviewing"}],
            "current_date": 10
        })),
        Reply::Json(json!({
            "homeworks": [{"id": 1, "homework_name": "hw", "status": "rejected"}],
            "current_date": 20
        })),
        Reply::Json(json!({
            "homeworks": [{"id": 1, "homework_name": "hw", "status": "rejected"}],
            "current_date": 30
        })),
    ]);
    let messenger = RecordingMessenger::new();
    let engine = engine(source.clone(), messenger.clone(), Duration::from_millis(1));
    let mut state = PollState::new(0);

    for _ in 0..4 {
        engine.tick(&mut state).await;
    }

    assert_eq!(
        messenger.delivered(),
        vec![
            "Изменился статус проверки работы \"hw\". Работа взята на проверку ревьюером.".to_string(),
            "Изменился статус проверки работы \"hw\". Работа проверена: у ревьюера есть замечания.".to_string(),
        ]
    );
    assert_eq!(source.cursors(), vec![0, 10, 20, 30]);
}

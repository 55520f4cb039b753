//! Integration tests for the HTTP task store against a mock server.

use chrono::{Duration, TimeZone, Utc};
use mockito::Matcher;
use questlog_core::{NewTask, RestStore, StoreError, TaskBoard, TaskStore, TaskType};

const TASK_ROWS: &str = r#"[
    {"id": 12, "created_at": "2024-05-02T09:00:00", "name": "Essay outline",
     "deadline": "2024-05-04T18:00:00+00:00", "done": false,
     "description": "Three sources", "type": "english"},
    {"id": 11, "created_at": "2024-05-01T09:00:00.5", "name": "Groceries",
     "deadline": "2024-05-03T12:00:00", "done": false,
     "description": null, "type": null}
]"#;

#[tokio::test]
async fn test_list_tasks_orders_by_id_desc() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/rest/v1/tasks")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("select".into(), "*".into()),
            Matcher::UrlEncoded("order".into(), "id.desc".into()),
        ]))
        .match_header("apikey", "anon-key")
        .match_header("authorization", "Bearer anon-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(TASK_ROWS)
        .create_async()
        .await;

    let store = RestStore::new(&server.url(), "tasks", Some("anon-key".into())).unwrap();
    let tasks = store.list_tasks().await.unwrap();

    mock.assert_async().await;
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, 12);
    assert_eq!(tasks[0].task_type, Some(TaskType::English));
    assert_eq!(tasks[1].task_type, None);
    assert_eq!(tasks[1].description, "");
    assert_eq!(tasks[1].deadline, Utc.with_ymd_and_hms(2024, 5, 3, 12, 0, 0).unwrap());
}

#[tokio::test]
async fn test_insert_posts_single_row_and_returns_representation() {
    let mut server = mockito::Server::new_async().await;
    let deadline = Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap();
    let mock = server
        .mock("POST", "/rest/v1/tasks")
        .match_header("prefer", "return=representation")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"^\[\{"#.into()),
            Matcher::Regex(r#""name":"Quiz prep""#.into()),
            Matcher::Regex(r#""type":"math""#.into()),
        ]))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id": 40, "created_at": "2029-12-30T10:00:00+00:00", "name": "Quiz prep",
                "deadline": "2030-01-02T03:04:05+00:00", "done": false,
                "description": "", "type": "math"}]"#,
        )
        .create_async()
        .await;

    let store = RestStore::new(&server.url(), "tasks", None).unwrap();
    let created = store
        .insert_task(&NewTask {
            name: "Quiz prep".into(),
            deadline,
            done: false,
            description: String::new(),
            task_type: Some(TaskType::Math),
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(created.id, 40);
    assert_eq!(created.deadline, deadline);
}

#[tokio::test]
async fn test_insert_rejection_surfaces_backend_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/rest/v1/tasks")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"code": "23502", "message": "null value in column \"name\""}"#)
        .create_async()
        .await;

    let store = RestStore::new(&server.url(), "tasks", None).unwrap();
    let err = store
        .insert_task(&NewTask {
            name: String::new(),
            deadline: Utc::now() + Duration::days(1),
            done: false,
            description: String::new(),
            task_type: None,
        })
        .await
        .unwrap_err();

    match err {
        StoreError::Rejected { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "null value in column \"name\"");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_delete_filters_by_id() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/rest/v1/tasks")
        .match_query(Matcher::UrlEncoded("id".into(), "eq.12".into()))
        .with_status(204)
        .create_async()
        .await;

    let store = RestStore::new(&server.url(), "tasks", None).unwrap();
    store.delete_task(12).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_board_restores_task_when_remote_delete_fails() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rest/v1/tasks")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(TASK_ROWS)
        .create_async()
        .await;
    server
        .mock("DELETE", "/rest/v1/tasks")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("unavailable")
        .create_async()
        .await;

    let store = RestStore::new(&server.url(), "tasks", None).unwrap();
    let mut board = TaskBoard::new(store);
    board.refresh().await.unwrap();

    let err = board.delete_now(11).await.unwrap_err();
    assert!(matches!(err, StoreError::Rejected { status: 503, .. }));
    let ids: Vec<i64> = board.tasks().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![12, 11]);
}

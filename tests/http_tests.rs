// Integration tests for the HTTP API
//
// Requests go straight through the router with `oneshot`; time is paused so
// question reveals finish as soon as the test waits on them.

use ai_interview::{create_router, AppState};
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Poll the session until the interviewer has finished the current question
async fn wait_until_quiet(app: &Router, session_id: &str) -> Value {
    loop {
        let (status, snapshot) = call(app, Method::GET, &format!("/sessions/{}", session_id), None).await;
        assert_eq!(status, StatusCode::OK);
        if snapshot["speaking"] == json!(false) {
            return snapshot;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

async fn open_session(app: &Router) -> String {
    let (status, snapshot) = call(app, Method::POST, "/interviews/1/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    snapshot["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = create_router(AppState::default());

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_interview_with_overview() {
    let app = create_router(AppState::default());

    let (status, body) = call(&app, Method::GET, "/interviews/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["interview"]["company"], "Systems Limited");
    assert_eq!(body["overview"]["text_questions"], 2);
    assert_eq!(body["overview"]["video_questions"], 3);
    assert_eq!(body["overview"]["estimated_minutes"], 10);
}

#[tokio::test]
async fn test_unknown_interview_is_not_found() {
    let app = create_router(AppState::default());

    let (status, body) = call(&app, Method::GET, "/interviews/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("999"));

    let (status, _) = call(&app, Method::POST, "/interviews/999/sessions", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let app = create_router(AppState::default());

    let (status, _) = call(&app, Method::GET, "/sessions/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, Method::POST, "/sessions/nope/start", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(start_paused = true)]
async fn test_new_session_starts_on_intro() {
    let app = create_router(AppState::default());
    let session_id = open_session(&app).await;

    let (status, snapshot) = call(&app, Method::GET, &format!("/sessions/{}", session_id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["phase"], "intro");
    assert_eq!(snapshot["interview_id"], "1");
    assert_eq!(snapshot["answers"], json!([]));
    assert_eq!(snapshot["permission"], "unrequested");
}

#[tokio::test(start_paused = true)]
async fn test_answer_while_speaking_conflicts() {
    let app = create_router(AppState::default());
    let session_id = open_session(&app).await;

    let (status, snapshot) = call(&app, Method::POST, &format!("/sessions/{}/start", session_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["phase"], "text-phase");
    assert_eq!(snapshot["speaking"], true);

    let (status, _) = call(
        &app,
        Method::POST,
        &format!("/sessions/{}/answers", session_id),
        Some(json!({ "text": "Too early" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    wait_until_quiet(&app, &session_id).await;
    let (status, _) = call(
        &app,
        Method::POST,
        &format!("/sessions/{}/answers", session_id),
        Some(json!({ "text": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test(start_paused = true)]
async fn test_full_interview_over_http() {
    let app = create_router(AppState::default());
    let session_id = open_session(&app).await;
    let uri = |path: &str| format!("/sessions/{}{}", session_id, path);

    let (status, _) = call(&app, Method::POST, &uri("/start"), None).await;
    assert_eq!(status, StatusCode::OK);

    for text in ["First answer", "Second answer"] {
        wait_until_quiet(&app, &session_id).await;
        let (status, _) = call(&app, Method::POST, &uri("/answers"), Some(json!({ "text": text }))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, snapshot) = call(&app, Method::GET, &uri(""), None).await;
    assert_eq!(snapshot["phase"], "video-permission");

    // Denied: stay put with a notice, answers untouched
    let (status, body) = call(
        &app,
        Method::POST,
        &uri("/capture"),
        Some(json!({ "granted": false, "reason": "NotAllowedError" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].as_str().unwrap().contains("NotAllowedError"));

    let (_, snapshot) = call(&app, Method::GET, &uri(""), None).await;
    assert_eq!(snapshot["phase"], "video-permission");
    assert_eq!(snapshot["permission"], "denied");
    assert!(snapshot["notice"].is_string());
    assert_eq!(snapshot["answers"].as_array().unwrap().len(), 2);

    // Retry succeeds
    let (status, snapshot) = call(&app, Method::POST, &uri("/capture"), Some(json!({ "granted": true }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["phase"], "video-phase");
    assert_eq!(snapshot["clock"], "2:00");
    assert_eq!(snapshot["tracks"], json!({ "video": true, "audio": true }));

    let (status, snapshot) = call(&app, Method::POST, &uri("/tracks/video/toggle"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["tracks"], json!({ "video": false, "audio": true }));

    // Not completed yet
    let (status, _) = call(&app, Method::GET, &uri("/completion"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for n in 1..=3 {
        wait_until_quiet(&app, &session_id).await;
        let caption = format!("Spoken answer {}", n);
        let (status, _) = call(&app, Method::POST, &uri("/captions"), Some(json!({ "text": caption }))).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = call(&app, Method::POST, &uri("/advance"), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, snapshot) = call(&app, Method::GET, &uri(""), None).await;
    assert_eq!(snapshot["phase"], "completed");

    let (status, completion) = call(&app, Method::GET, &uri("/completion"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(completion["results_path"], "/job-seeker/interviews/1/results");
    let answers = completion["answers"].as_array().unwrap();
    assert_eq!(answers.len(), 5);
    assert_eq!(answers[0]["text"], "First answer");
    assert_eq!(answers[4]["text"], "Spoken answer 3");

    // Further input is refused
    let (status, _) = call(&app, Method::POST, &uri("/advance"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test(start_paused = true)]
async fn test_delete_session_tears_it_down() {
    let app = create_router(AppState::default());
    let session_id = open_session(&app).await;
    let uri = format!("/sessions/{}", session_id);

    call(&app, Method::POST, &format!("{}/start", uri), None).await;

    let (status, _) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

//! Integration tests for the planner HTTP API.
//!
//! Requests go through the full router with a scripted model, covering the
//! JSON contract, error codes, and the CSV download.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use secrecy::{ExposeSecret, Secret};
use serde_json::{json, Value};
use tower::ServiceExt;

use makers_list::adapters::ai::{MockAIProvider, MockError};
use makers_list::adapters::export::CsvPlanExporter;
use makers_list::adapters::http::{planner_router, PlannerAppState};
use makers_list::domain::settings::KeyProvider;

// =============================================================================
// Test Infrastructure
// =============================================================================

const SHOPPING_LIST: &str = r#"```json
{"project_advice":"Use a fused supply.","equipment":[{"item":"3D printer","unit_price":8000,"quantity":1,"note":"enclosure","link":"https://www.google.com/search?q=3D+printer"}],"tools":[],"consumables":[{"item":"Arduino Nano","unit_price":150,"quantity":2,"note":"controller, \"genuine\"","link":"https://www.google.com/search?q=Arduino+Nano"}]}
```"#;

fn app(ai: MockAIProvider, default_key: Option<&str>) -> Router {
    let key_provider = KeyProvider::with_default_template(
        default_key.map(|k| Secret::new(k.to_string())),
    );
    let state = PlannerAppState::new(
        Arc::new(key_provider),
        Arc::new(ai),
        Arc::new(CsvPlanExporter::new()),
        0.5,
    );
    planner_router().with_state(state)
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn submit(app: &Router, message: &str) -> (StatusCode, Value) {
    send(
        app,
        json_request(
            Method::POST,
            "/api/conversation/messages",
            json!({ "message": message }),
        ),
    )
    .await
}

// =============================================================================
// Conversation
// =============================================================================

#[tokio::test]
async fn continuation_reply_is_returned_as_dialogue() {
    let app = app(
        MockAIProvider::new().with_response("Which microcontroller? A) Arduino B) ESP32"),
        Some("AIza-default"),
    );

    let (status, body) = submit(&app, "I want to build a smart lamp").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "continuation");
    assert_eq!(body["state"], "idle");
    assert_eq!(body["appended"].as_array().unwrap().len(), 2);
    assert_eq!(body["appended"][0]["sender"], "user");
    assert_eq!(body["appended"][1]["sender"], "assistant");
    assert!(body.get("plan").is_none());

    let (_, conversation) = send(&app, empty_request(Method::GET, "/api/conversation")).await;
    assert_eq!(conversation["input_open"], true);
    assert_eq!(conversation["turns"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn terminal_reply_finalizes_and_exposes_plan() {
    let app = app(
        MockAIProvider::new().with_response(SHOPPING_LIST),
        Some("AIza-default"),
    );

    let (status, body) = submit(&app, "smart lamp, USB powered").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "finalized");
    assert_eq!(body["state"], "finalized");
    assert_eq!(body["plan"]["grand_total"], json!(8300.0));

    let (status, plan) = send(&app, empty_request(Method::GET, "/api/plan")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan["advice"], "Use a fused supply.");
    let categories = plan["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 3);
    assert_eq!(categories[0]["category"], "equipment");
    assert_eq!(categories[1]["items"].as_array().unwrap().len(), 0);
    assert_eq!(categories[2]["subtotal"], json!(300.0));

    let (status, body) = submit(&app, "anything else?").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONVERSATION_FINALIZED");
}

#[tokio::test]
async fn malformed_plan_is_reported_but_kept_as_dialogue() {
    let app = app(
        MockAIProvider::new().with_response("```json\n{\"project_advice\": \"oops\" \"tools\": []}\n```"),
        Some("AIza-default"),
    );

    let (status, body) = submit(&app, "smart lamp").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "malformed");
    assert!(body["detail"].is_string());
    assert_eq!(body["state"], "idle");
    assert_eq!(body["appended"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn transport_failure_is_a_failed_outcome_not_an_http_error() {
    let app = app(
        MockAIProvider::new().with_error(MockError::Http {
            status: 429,
            message: "Resource has been exhausted".to_string(),
        }),
        Some("AIza-default"),
    );

    let (status, body) = submit(&app, "smart lamp").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "failed");
    assert_eq!(body["state"], "idle");
    let error_turn = body["appended"][1]["text"].as_str().unwrap();
    assert!(error_turn.contains("429"));
}

#[tokio::test]
async fn blank_message_is_rejected() {
    let ai = MockAIProvider::new();
    let app = app(ai.clone(), Some("AIza-default"));

    let (status, body) = submit(&app, "   ").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "EMPTY_MESSAGE");
    assert_eq!(ai.call_count(), 0);
}

#[tokio::test]
async fn concurrent_submission_is_rejected_while_reply_pending() {
    let ai = MockAIProvider::new()
        .with_response("First reply")
        .with_delay(Duration::from_millis(300));
    let app = app(ai.clone(), Some("AIza-default"));

    let first = {
        let app = app.clone();
        tokio::spawn(async move { submit(&app, "first").await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    let (status, body) = submit(&app, "second").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "REPLY_IN_FLIGHT");

    let (status, _) = send(&app, empty_request(Method::GET, "/api/conversation")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = first.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "continuation");
    assert_eq!(ai.call_count(), 1);
}

#[tokio::test]
async fn reset_clears_conversation() {
    let app = app(
        MockAIProvider::new().with_response(SHOPPING_LIST),
        Some("AIza-default"),
    );
    submit(&app, "smart lamp").await;

    let (status, body) = send(&app, empty_request(Method::DELETE, "/api/conversation")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["conversation_id"].is_string());

    let (_, conversation) = send(&app, empty_request(Method::GET, "/api/conversation")).await;
    assert_eq!(conversation["state"], "idle");
    assert_eq!(conversation["turns"].as_array().unwrap().len(), 0);

    let (status, body) = send(&app, empty_request(Method::GET, "/api/plan")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "PLAN_NOT_READY");
}

// =============================================================================
// Export
// =============================================================================

#[tokio::test]
async fn export_downloads_csv_attachment() {
    let app = app(
        MockAIProvider::new().with_response(SHOPPING_LIST),
        Some("AIza-default"),
    );
    submit(&app, "smart lamp").await;

    let response = app
        .clone()
        .oneshot(empty_request(Method::GET, "/api/plan/export"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"makers_project_list.csv\""
    );
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with('\u{FEFF}'));
    assert!(lines[1].starts_with("Equipment,\"3D printer\",8000,1,8000,"));
    assert!(lines[2].starts_with("Consumables,\"Arduino Nano\",150,2,300,"));
    assert!(lines[2].contains("\"controller, \"\"genuine\"\"\""));
}

#[tokio::test]
async fn export_before_finalization_is_not_found() {
    let app = app(MockAIProvider::new(), Some("AIza-default"));

    let (status, body) = send(&app, empty_request(Method::GET, "/api/plan/export")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "PLAN_NOT_READY");
}

// =============================================================================
// Key selection
// =============================================================================

#[tokio::test]
async fn missing_credential_is_precondition_failed() {
    let ai = MockAIProvider::new();
    let app = app(ai.clone(), None);

    let (status, body) = send(&app, empty_request(Method::GET, "/api/config")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"using_default_key": true, "default_key_available": false, "key_ready": false})
    );

    let (status, body) = submit(&app, "smart lamp").await;
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(body["code"], "CREDENTIAL_MISSING");
    assert_eq!(ai.call_count(), 0);
}

#[tokio::test]
async fn custom_key_is_used_for_next_turn() {
    let ai = MockAIProvider::new().with_response("Which board?");
    let app = app(ai.clone(), None);

    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            "/api/config/key",
            json!({"use_default": false, "api_key": "AIza-mine"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["key_ready"], true);
    assert_eq!(body["using_default_key"], false);

    let (status, _) = submit(&app, "smart lamp").await;
    assert_eq!(status, StatusCode::OK);

    let calls = ai.get_calls();
    assert_eq!(calls[0].credential.expose_secret(), "AIza-mine");
}

#[tokio::test]
async fn default_key_with_explicit_key_is_invalid() {
    let app = app(MockAIProvider::new(), Some("AIza-default"));

    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            "/api/config/key",
            json!({"use_default": true, "api_key": "AIza-mine"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

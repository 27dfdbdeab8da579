#![cfg(feature = "http_api")]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use crew_schedule::{TotalsTable, http_api};
use serde_json::{Value, json};
use tower::util::ServiceExt;

fn new_router() -> axum::Router {
    http_api::router(http_api::AppState::new())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn schedule_request(start_date: &str) -> Value {
    json!({
        "items": [
            { "team": "TeamA", "category": "CatX", "name": "Scheme1", "status": "Not Done" },
            { "team": "TeamA", "category": "CatX", "name": "Scheme2", "status": "Complete" }
        ],
        "config": {
            "start_date": start_date,
            "status_durations": { "Not Done": 7, "Complete": 1 },
            "priority": { "status": ["Not Done", "Complete"] },
            "totals": { "name_column": "SCHEME NAME", "columns": ["NORMAL STAY"] }
        }
    })
}

#[tokio::test]
async fn health_reports_ok() {
    let response = new_router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["status"], "ok");
}

#[tokio::test]
async fn default_config_lists_status_durations() {
    let response = new_router()
        .oneshot(
            Request::builder()
                .uri("/config/default")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let config = read_json(response).await;
    assert_eq!(config["rest_day"], "Sun");
    assert_eq!(config["status_durations"]["Not Done"], 7);
}

#[tokio::test]
async fn schedule_endpoint_returns_all_views() {
    let response = new_router()
        .oneshot(post_json("/schedule", schedule_request("2024-01-01")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: http_api::ScheduleResponse =
        serde_json::from_value(read_json(response).await).unwrap();

    assert_eq!(body.summary.item_count, 2);
    let items = &body.schedule.items;
    assert_eq!(items[0].item.name, "Scheme1");
    assert_eq!(items[0].item.end_date, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
    assert_eq!(items[1].item.start_date, NaiveDate::from_ymd_opt(2024, 1, 9).unwrap());
    assert_eq!(items[1].total_stays, 0);
    assert_eq!(body.schedule.stay_columns, vec!["NORMAL STAY"]);
    assert_eq!(body.calendar.teams, vec!["TeamA"]);
    assert_eq!(
        body.matrix.cell("CatX - Scheme1", NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()),
        Some("")
    );
}

#[tokio::test]
async fn schedule_endpoint_rejects_bad_start_date() {
    let response = new_router()
        .oneshot(post_json("/schedule", schedule_request("2024/01/01")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["error"], "invalid_request");
}

#[tokio::test]
async fn schedule_endpoint_joins_cached_totals() {
    let totals = TotalsTable::from_rows(
        vec!["NORMAL STAY".into()],
        vec![("Scheme2".to_string(), vec!["6".to_string()])],
    );
    let app = http_api::router(http_api::AppState::with_totals_source(Arc::new(totals)));

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(post_json("/schedule", schedule_request("2024-01-01")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["schedule"]["items"][1]["total_stays"], 6);
        assert_eq!(body["schedule"]["items"][0]["total_stays"], 0);
    }
}

#[tokio::test]
async fn plan_endpoint_marks_shutdown() {
    let request = json!({
        "tasks": [
            { "name": "Survey", "duration_days": 2 },
            { "name": "Build", "duration_days": 3 }
        ],
        "selections": [
            { "category": "North", "name": "S1", "team": "T1", "start_date": "2024-01-06" }
        ]
    });
    let response = new_router().oneshot(post_json("/plan", request)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: http_api::PlanResponse = serde_json::from_value(read_json(response).await).unwrap();

    let shutdown = NaiveDate::from_ymd_opt(2024, 1, 11).unwrap();
    assert_eq!(body.tasks.len(), 2);
    assert_eq!(body.shutdown_dates.get("North"), Some(&shutdown));
    assert_eq!(body.matrix.cell("S1 - Build", shutdown), Some("SHUTDOWN"));
}

#[tokio::test]
async fn plan_endpoint_rejects_zero_length_task() {
    let request = json!({
        "tasks": [{ "name": "Survey", "duration_days": 0 }],
        "selections": []
    });
    let response = new_router().oneshot(post_json("/plan", request)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn server_totals_layout_wins_over_request_layout() {
    let totals = TotalsTable::from_rows(
        vec!["FLYING STAY".into()],
        vec![("Scheme1".to_string(), vec!["3".to_string()])],
    );
    let app = http_api::router(http_api::AppState::with_totals_source(Arc::new(totals)));

    let response = app
        .oneshot(post_json("/schedule", schedule_request("2024-01-01")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["schedule"]["stay_columns"], json!(["FLYING STAY"]));
    assert_eq!(body["schedule"]["items"][0]["total_stays"], 3);
}

#[tokio::test]
async fn schedule_past_last_date_is_bad_request() {
    let mut request = schedule_request("2024-01-01");
    request["items"][0]["duration_days"] = json!(200_000_000);
    let response = new_router()
        .oneshot(post_json("/schedule", request))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["error"], "invalid_request");
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! A throwaway axum server standing in for the simulation service.

use crate::{ClientConfig, HttpBackend};
use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

pub const TOKEN: &str = "secret-token";

/// What the mock server saw.
#[derive(Debug, Default)]
pub struct Recorded {
    pub paths: Vec<String>,
    pub bodies: Vec<Value>,
}

pub type Shared = Arc<Mutex<Recorded>>;

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Invalid token" }))).into_response()
}

fn event_json(status: &str) -> Value {
    json!({
        "id": "ev-1",
        "season_id": "s-1",
        "name": "Altenberg",
        "date": "2025-01-11",
        "entrants": ["a", "b"],
        "required_runs": 2,
        "status": status
    })
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == "hunter2" {
        Json(json!({ "token": TOKEN })).into_response()
    } else {
        unauthorized()
    }
}

async fn worlds(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([{ "id": "w-1", "name": "Nordic" }])).into_response()
}

async fn world(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if id != "w-1" {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": "World not found" })))
            .into_response();
    }
    Json(json!({ "id": "w-1", "name": "Nordic", "description": "snow" })).into_response()
}

async fn delete_world(AxumState(recorded): AxumState<Shared>, Path(id): Path<String>) -> StatusCode {
    recorded.lock().unwrap().paths.push(format!("delete {id}"));
    StatusCode::NO_CONTENT
}

async fn delete_season(AxumState(recorded): AxumState<Shared>, Path(id): Path<String>) -> Response {
    if id != "s-1" {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": "Season not found" })))
            .into_response();
    }
    recorded.lock().unwrap().paths.push(format!("delete season {id}"));
    Json(json!({ "message": "Season deleted" })).into_response()
}

async fn current_season(Path(world_id): Path<String>) -> Json<Value> {
    if world_id == "empty" {
        return Json(json!({ "season": null, "events": [], "standings": [] }));
    }
    Json(json!({
        "season": {
            "id": "s-1",
            "world_id": world_id,
            "sport": "luge",
            "name": "2024/2025",
            "year_start": 2024,
            "year_end": 2025,
            "phase": "regular"
        },
        "events": [event_json("not_started")],
        "standings": []
    }))
}

async fn simulate(
    AxumState(recorded): AxumState<Shared>,
    Path((event_id, action)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    {
        let mut recorded = recorded.lock().unwrap();
        recorded.paths.push(format!("{event_id}/{action}"));
        recorded.bodies.push(body);
    }
    match action.as_str() {
        "simulate" => Json(json!({
            "status": "run1_completed",
            "runResults": [{ "entrant_id": "a", "position": 1, "mark": 4_910 }]
        }))
        .into_response(),
        "simulate-run2" => Json(json!({
            "status": "completed",
            "runResults": [{ "entrant_id": "b", "position": 1, "mark": 4_900 }],
            "finalResults": [{ "entrant_id": "a", "position": 1 }],
            "standings": [{ "entrant_id": "a", "points": 225, "rank": 1 }]
        }))
        .into_response(),
        _ => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "Run 2 must be completed first" })),
        )
            .into_response(),
    }
}

async fn week_status() -> Json<Value> {
    Json(json!({
        "currentUnlockedWeek": "2025-W02",
        "isWeekComplete": false,
        "completedInWeek": 0,
        "totalInWeek": 1,
        "currentWeekEvents": [{
            "event_id": "ev-1",
            "sport": "luge",
            "name": "Altenberg",
            "date": "2025-01-11",
            "status": "scheduled"
        }],
        "eventsByDate": { "2025-01-11": [] },
        "allWeeks": []
    }))
}

fn router(recorded: Shared) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/worlds", get(worlds))
        .route("/api/worlds/{id}", get(world).delete(delete_world))
        .route("/api/worlds/{id}/current-week-status", get(week_status))
        .route("/api/luge/world/{id}/current-season", get(current_season))
        .route("/api/luge/season/{id}", delete(delete_season))
        .route("/api/luge/event/{id}/{action}", post(simulate))
        .route("/api/luge/athlete/{id}", delete(|| async { StatusCode::OK }))
        .with_state(recorded)
}

/// Serves the mock on an ephemeral port and returns its API base URL.
pub async fn spawn_server() -> (String, Shared) {
    let recorded: Shared = Arc::new(Mutex::new(Recorded::default()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app: Router = router(Arc::clone(&recorded));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/api"), recorded)
}

pub fn create_backend(base_url: &str, token: Option<&str>) -> HttpBackend {
    let mut config: ClientConfig = ClientConfig::new(base_url).unwrap();
    if let Some(token) = token {
        config = config.with_token(token);
    }
    HttpBackend::new(config).unwrap()
}

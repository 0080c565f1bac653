// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! A `reqwest` implementation of the backend boundary.

use crate::config::ClientConfig;
use crate::error::RemoteError;
use crate::routes;
use podium_api::{
    Backend, BackendError, CreateSeasonRequest, CreateWorldRequest, EntrantRequest, EventPayload,
    GenerateRosterRequest, LoginRequest, LoginResponse, PhaseAdvanceResponse, RunResponse,
    SeasonPayload, SimulateRunRequest, WeekStatusResponse,
};
use podium_domain::{
    Entrant, EntrantId, EventId, EventStatus, RunIndex, SeasonId, Sport, World, WorldId,
};
use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info};

/// Picks the message out of an error body such as `{"error": "World not found"}`.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

fn to_body(body: &impl Serialize) -> Result<Value, BackendError> {
    serde_json::to_value(body).map_err(|e| BackendError::Decode(e.to_string()))
}

/// The simulation service over HTTP.
///
/// Every request carries the bearer token, when one is set.
#[derive(Debug)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpBackend {
    /// Builds a client from its configuration.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Client` if the TLS backend cannot be initialized.
    pub fn new(config: ClientConfig) -> Result<Self, RemoteError> {
        let client: Client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url,
            token: RwLock::new(config.token),
        })
    }

    /// Returns the bearer token in use.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the bearer token. `None` logs out.
    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// Exchanges credentials for a bearer token and starts using it.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Unauthenticated` if the credentials are rejected.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, BackendError> {
        let body: Value = to_body(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        let response: LoginResponse = self.send(Method::POST, routes::LOGIN, Some(body)).await?;
        self.set_token(Some(response.token.clone()));
        info!(email, "Logged in");
        Ok(response.token)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Response, BackendError> {
        let url: String = format!("{}{path}", self.base_url);
        debug!(%method, %url, "Sending request");

        let mut request = self.client.request(method, &url);
        if let Some(token) = self.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response: Response = request
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        let status: StatusCode = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text: String = response.text().await.unwrap_or_default();
        debug!(%url, status = status.as_u16(), "Request failed");
        Err(match status {
            StatusCode::UNAUTHORIZED => BackendError::Unauthenticated,
            StatusCode::NOT_FOUND => BackendError::NotFound {
                resource: path.to_string(),
            },
            _ => BackendError::Rejected {
                status: status.as_u16(),
                message: error_message(&text).unwrap_or(text),
            },
        })
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, BackendError> {
        self.execute(method, path, body)
            .await?
            .json::<T>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        self.send(Method::GET, path, None).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, BackendError> {
        let body: Value = to_body(body)?;
        self.send(Method::POST, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<(), BackendError> {
        self.execute(Method::DELETE, path, None).await.map(|_| ())
    }
}

impl Backend for HttpBackend {
    async fn list_worlds(&self) -> Result<Vec<World>, BackendError> {
        self.get(routes::WORLDS).await
    }

    async fn get_world(&self, world_id: &WorldId) -> Result<World, BackendError> {
        self.get(&routes::world(world_id)).await
    }

    async fn create_world(&self, request: CreateWorldRequest) -> Result<World, BackendError> {
        self.post(routes::WORLDS, &request).await
    }

    async fn delete_world(&self, world_id: &WorldId) -> Result<(), BackendError> {
        self.delete(&routes::world(world_id)).await
    }

    async fn list_entrants(
        &self,
        sport: Sport,
        world_id: &WorldId,
    ) -> Result<Vec<Entrant>, BackendError> {
        self.get(&routes::entrants(sport, world_id)).await
    }

    async fn generate_entrants(
        &self,
        sport: Sport,
        world_id: &WorldId,
        request: GenerateRosterRequest,
    ) -> Result<Vec<Entrant>, BackendError> {
        self.post(&routes::generate_entrants(sport, world_id), &request)
            .await
    }

    async fn create_entrant(
        &self,
        sport: Sport,
        world_id: &WorldId,
        request: EntrantRequest,
    ) -> Result<Entrant, BackendError> {
        self.post(&routes::create_entrant(sport, world_id), &request)
            .await
    }

    async fn update_entrant(
        &self,
        sport: Sport,
        entrant_id: &EntrantId,
        request: EntrantRequest,
    ) -> Result<Entrant, BackendError> {
        let body: Value = to_body(&request)?;
        self.send(Method::PUT, &routes::entrant(sport, entrant_id), Some(body))
            .await
    }

    async fn delete_entrant(&self, sport: Sport, entrant_id: &EntrantId) -> Result<(), BackendError> {
        self.delete(&routes::entrant(sport, entrant_id)).await
    }

    async fn delete_all_entrants(
        &self,
        sport: Sport,
        world_id: &WorldId,
    ) -> Result<(), BackendError> {
        self.delete(&routes::all_entrants(sport, world_id)).await
    }

    async fn get_active_season(
        &self,
        sport: Sport,
        world_id: &WorldId,
    ) -> Result<Option<SeasonPayload>, BackendError> {
        let value: Value = self.get(&routes::current_season(sport, world_id)).await?;
        // The server answers `{"season": null, "events": []}` when there is none.
        if value.get("season").is_none_or(Value::is_null) {
            return Ok(None);
        }
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn list_season_history(
        &self,
        sport: Sport,
        world_id: &WorldId,
    ) -> Result<Vec<SeasonPayload>, BackendError> {
        self.get(&routes::season_history(sport, world_id)).await
    }

    async fn create_season(
        &self,
        sport: Sport,
        world_id: &WorldId,
        request: CreateSeasonRequest,
    ) -> Result<SeasonPayload, BackendError> {
        self.post(&routes::create_season(sport, world_id), &request)
            .await
    }

    async fn reset_season(
        &self,
        sport: Sport,
        season_id: &SeasonId,
    ) -> Result<SeasonPayload, BackendError> {
        self.send(Method::POST, &routes::reset_season(sport, season_id), None)
            .await
    }

    async fn complete_season(
        &self,
        sport: Sport,
        season_id: &SeasonId,
    ) -> Result<SeasonPayload, BackendError> {
        self.send(Method::POST, &routes::complete_season(sport, season_id), None)
            .await
    }

    async fn delete_season(&self, sport: Sport, season_id: &SeasonId) -> Result<(), BackendError> {
        self.delete(&routes::season(sport, season_id)).await
    }

    async fn check_phase_advance(
        &self,
        sport: Sport,
        season_id: &SeasonId,
    ) -> Result<PhaseAdvanceResponse, BackendError> {
        self.send(Method::POST, &routes::check_advance(sport, season_id), None)
            .await
    }

    async fn begin_event(
        &self,
        sport: Sport,
        event_id: &EventId,
        status: EventStatus,
    ) -> Result<EventPayload, BackendError> {
        self.send(
            Method::POST,
            &routes::begin_event(sport, event_id, status),
            None,
        )
        .await
    }

    async fn simulate_run(
        &self,
        sport: Sport,
        event_id: &EventId,
        run: RunIndex,
        request: SimulateRunRequest,
    ) -> Result<RunResponse, BackendError> {
        self.post(&routes::simulate_run(sport, event_id, run), &request)
            .await
    }

    async fn get_week_status(
        &self,
        world_id: &WorldId,
    ) -> Result<WeekStatusResponse, BackendError> {
        self.get(&routes::week_status(world_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_body() {
        assert_eq!(
            error_message(r#"{"error": "World not found"}"#).as_deref(),
            Some("World not found")
        );
        assert_eq!(
            error_message(r#"{"error": true, "message": "bad"}"#).as_deref(),
            Some("bad")
        );
        assert_eq!(error_message("<html>"), None);
    }
}

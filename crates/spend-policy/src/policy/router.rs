use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use super::domain::{Change, Scenario};
use super::validate::{InvalidScenario, ScenarioPayload};
use super::PolicyEngine;

#[derive(Debug, Clone, Serialize)]
pub struct DiffResponse {
    pub changes: Vec<Change>,
}

/// Router exposing the evaluate and diff endpoints over a shared engine.
pub fn policy_router(engine: Arc<PolicyEngine>) -> Router {
    Router::new()
        .route("/policy/evaluate", post(evaluate_handler))
        .route("/policy/diff", post(diff_handler))
        .with_state(engine)
}

pub(crate) async fn evaluate_handler(
    State(engine): State<Arc<PolicyEngine>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => return malformed_body_response(rejection),
    };

    match scenario_from(&body) {
        Ok(scenario) => {
            let decision = engine.evaluate(&scenario);
            (StatusCode::OK, Json(decision)).into_response()
        }
        Err(error) => invalid_scenario_response(error),
    }
}

pub(crate) async fn diff_handler(
    State(engine): State<Arc<PolicyEngine>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => return malformed_body_response(rejection),
    };

    let previous = match side(&body, "previous") {
        Ok(scenario) => scenario,
        Err(error) => return invalid_scenario_response(error),
    };
    let current = match side(&body, "current") {
        Ok(scenario) => scenario,
        Err(error) => return invalid_scenario_response(error),
    };

    let changes = engine.diff(&previous, &current);
    (StatusCode::OK, Json(DiffResponse { changes })).into_response()
}

fn scenario_from(value: &Value) -> Result<Scenario, InvalidScenario> {
    ScenarioPayload::from_json(value).and_then(ScenarioPayload::into_scenario)
}

fn side(body: &Value, name: &str) -> Result<Scenario, InvalidScenario> {
    let value = body
        .get(name)
        .filter(|value| !value.is_null())
        .ok_or_else(|| InvalidScenario::MissingField {
            field: name.to_string(),
        })?;
    scenario_from(value).map_err(|error| error.within(name))
}

fn invalid_scenario_response(error: InvalidScenario) -> Response {
    debug!(field = error.field(), %error, "scenario rejected");
    let payload = json!({
        "error": error.to_string(),
        "field": error.field(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
}

/// Bodies that are not JSON at all keep axum's status but get a JSON envelope.
fn malformed_body_response(rejection: JsonRejection) -> Response {
    debug!(%rejection, "request body rejected");
    let payload = json!({ "error": rejection.body_text() });
    (rejection.status(), Json(payload)).into_response()
}

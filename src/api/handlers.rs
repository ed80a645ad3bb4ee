//! HTTP request handlers for the loot split API.
//!
//! This module contains the handler functions for all API endpoints.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_count_based_split, calculate_role_based_split};
use crate::error::{LootError, LootResult};
use crate::models::{NewSplit, RoleBasedConfig, SplitConfiguration, SplitResult};

use super::request::{
    BattleReportRequest, CountSplitRequest, PilotRequest, RoleSplitRequest, TrustRemoveRequest,
    TrustRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, AppraisalResponse, CalculationResponse, ENGINE_VERSION,
    FormattedSplit, HealthResponse,
};
use super::state::AppState;

type HandlerResult = Result<Response, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/split/role", post(role_split_handler))
        .route("/split/count", post(count_split_handler))
        .route("/appraise", post(appraise_handler))
        .route("/splits", get(list_splits_handler).post(save_split_handler))
        .route(
            "/splits/:id",
            get(get_split_handler)
                .patch(update_battle_report_handler)
                .delete(delete_split_handler),
        )
        .route("/pilots", get(list_pilots_handler).post(add_pilot_handler))
        .route("/pilots/:name", delete(remove_pilot_handler))
        .route(
            "/trust",
            get(list_trust_handler)
                .post(add_trust_handler)
                .delete(remove_trust_handler),
        )
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Unwraps a JSON body, mapping rejections to 400 responses.
fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(req)) => return Ok(req),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    Err(ApiErrorResponse::bad_request(error))
}

fn parse_split_id(
    correlation_id: Uuid,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Uuid, ApiErrorResponse> {
    id.map(|Path(id)| id).map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection, "Invalid split id");
        ApiErrorResponse::bad_request(ApiError::validation_error(format!(
            "Invalid split id: {}",
            rejection.body_text()
        )))
    })
}

/// Logs a failed operation and converts the error for the response.
fn failure(correlation_id: Uuid, operation: &str, err: LootError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        operation,
        error = %err,
        "Request failed"
    );
    err.into()
}

/// Runs a store write on the blocking pool.
///
/// Store writes hold the store lock across file IO, which must not stall
/// the async workers.
async fn run_blocking<T, F>(
    correlation_id: Uuid,
    operation: &'static str,
    task: F,
) -> Result<T, ApiErrorResponse>
where
    T: Send + 'static,
    F: FnOnce() -> LootResult<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(task).await {
        Ok(result) => result.map_err(|e| failure(correlation_id, operation, e)),
        Err(join_error) => {
            error!(
                correlation_id = %correlation_id,
                operation,
                error = %join_error,
                "Store task did not complete"
            );
            Err(ApiErrorResponse::internal(ApiError::new(
                "INTERNAL_ERROR",
                "Store operation did not complete",
            )))
        }
    }
}

fn calculation_response(calculation_id: Uuid, result: SplitResult, started: Instant) -> Response {
    let duration_us = started.elapsed().as_micros() as u64;
    info!(
        correlation_id = %calculation_id,
        rule = ?result.rule,
        total_value = result.total_value,
        payouts = result.payouts.len(),
        corporation_share = result.corporation_share,
        rebalanced = result.rebalanced,
        duration_us,
        "Split calculated"
    );

    let formatted = FormattedSplit::from_result(&result);
    json_response(
        StatusCode::OK,
        CalculationResponse {
            calculation_id,
            timestamp: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            duration_us,
            result,
            formatted,
        },
    )
}

/// Handler for GET /health.
async fn health_handler() -> Response {
    json_response(
        StatusCode::OK,
        HealthResponse {
            status: "ok".to_string(),
            version: ENGINE_VERSION.to_string(),
        },
    )
}

/// Handler for POST /split/role.
///
/// Validates role assignment, then runs the role-based calculator.
async fn role_split_handler(payload: Result<Json<RoleSplitRequest>, JsonRejection>) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing role-based split request");

    let request = parse_body(correlation_id, payload)?;
    let total_value = request.total_value;
    let config: RoleBasedConfig = request.into();
    config
        .validate()
        .map_err(|e| failure(correlation_id, "split_role", e))?;

    let started = Instant::now();
    let result = calculate_role_based_split(total_value, &config);
    Ok(calculation_response(correlation_id, result, started))
}

/// Handler for POST /split/count.
async fn count_split_handler(
    payload: Result<Json<CountSplitRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing count-based split request");

    let request = parse_body(correlation_id, payload)?;
    let summary = SplitConfiguration::from(&request).summary();

    let started = Instant::now();
    let result =
        calculate_count_based_split(request.total_value, request.pilot_count, request.scanner_count);
    if result.is_sentinel() {
        info!(correlation_id = %correlation_id, configuration = %summary, "Invalid count-based input");
    }
    Ok(calculation_response(correlation_id, result, started))
}

/// Handler for POST /appraise.
///
/// The body is the raw loot listing as copied from the game client.
async fn appraise_handler(State(state): State<AppState>, loot: String) -> HandlerResult {
    let correlation_id = Uuid::new_v4();

    if loot.trim().is_empty() {
        return Err(ApiErrorResponse::bad_request(ApiError::validation_error(
            "Loot listing is required",
        )));
    }

    let started = Instant::now();
    let total_buy_price = state
        .appraiser()
        .appraise(&loot)
        .await
        .map_err(|e| failure(correlation_id, "appraise", e))?;

    info!(
        correlation_id = %correlation_id,
        total_buy_price,
        duration_us = started.elapsed().as_micros() as u64,
        "Appraisal completed"
    );
    Ok(json_response(
        StatusCode::OK,
        AppraisalResponse { total_buy_price },
    ))
}

/// Handler for GET /splits.
async fn list_splits_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.splits().list())
}

/// Handler for POST /splits.
async fn save_split_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewSplit>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let split = parse_body(correlation_id, payload)?;

    let splits = Arc::clone(state.splits());
    let saved = run_blocking(correlation_id, "save_split", move || splits.save(split)).await?;
    Ok(json_response(StatusCode::CREATED, saved))
}

/// Handler for GET /splits/:id.
async fn get_split_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let id = parse_split_id(correlation_id, id)?;

    let split = state
        .splits()
        .get(id)
        .map_err(|e| failure(correlation_id, "get_split", e))?;
    Ok(json_response(StatusCode::OK, split))
}

/// Handler for PATCH /splits/:id.
async fn update_battle_report_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<BattleReportRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let id = parse_split_id(correlation_id, id)?;
    let request = parse_body(correlation_id, payload)?;

    let splits = Arc::clone(state.splits());
    let updated = run_blocking(correlation_id, "update_battle_report", move || {
        splits.update_battle_report(id, request.battle_report)
    })
    .await?;
    Ok(json_response(StatusCode::OK, updated))
}

/// Handler for DELETE /splits/:id.
async fn delete_split_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let id = parse_split_id(correlation_id, id)?;

    let splits = Arc::clone(state.splits());
    run_blocking(correlation_id, "delete_split", move || splits.delete(id)).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Handler for GET /pilots.
async fn list_pilots_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.roster().list())
}

/// Handler for POST /pilots.
async fn add_pilot_handler(
    State(state): State<AppState>,
    payload: Result<Json<PilotRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;

    let roster = Arc::clone(state.roster());
    let roster =
        run_blocking(correlation_id, "add_pilot", move || roster.add(&request.name)).await?;
    Ok(json_response(StatusCode::OK, roster))
}

/// Handler for DELETE /pilots/:name.
async fn remove_pilot_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();

    let roster = Arc::clone(state.roster());
    let roster = run_blocking(correlation_id, "remove_pilot", move || roster.remove(&name)).await?;
    Ok(json_response(StatusCode::OK, roster))
}

/// Handler for GET /trust.
async fn list_trust_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.trust().list())
}

/// Handler for POST /trust.
async fn add_trust_handler(
    State(state): State<AppState>,
    payload: Result<Json<TrustRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;
    let (status, kind) = (request.status, request.kind);

    let entry = request.into_entry(Utc::now());
    let trust = Arc::clone(state.trust());
    let entry =
        run_blocking(correlation_id, "add_trust", move || trust.add(status, kind, entry)).await?;
    Ok(json_response(StatusCode::CREATED, entry))
}

/// Handler for DELETE /trust.
async fn remove_trust_handler(
    State(state): State<AppState>,
    payload: Result<Json<TrustRemoveRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;

    let trust = Arc::clone(state.trust());
    let removed = run_blocking(correlation_id, "remove_trust", move || {
        trust.remove(request.kind, &request.identifier)
    })
    .await?;
    Ok(json_response(
        StatusCode::OK,
        serde_json::json!({ "removed": removed }),
    ))
}

//! Response types for the loot split API.
//!
//! This module defines the calculation envelope, the small JSON bodies of the
//! collaborator endpoints, and the error response structures.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::format_isk_with_unit;
use crate::error::LootError;
use crate::models::{CORPORATION_LABEL, Isk, SplitResult};

/// Version reported in calculation responses and `/health`.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// One display line of a split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedLine {
    /// Participant label or "Corporation".
    pub label: String,
    /// Amount with separators and unit.
    pub amount: String,
}

/// Display-ready amounts for a split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedSplit {
    /// The appraised value.
    pub total_value: String,
    /// One line per payout, then the corporation share.
    pub lines: Vec<FormattedLine>,
}

impl FormattedSplit {
    /// Formats every amount in a result.
    pub fn from_result(result: &SplitResult) -> Self {
        let mut lines: Vec<FormattedLine> = result
            .payouts
            .iter()
            .map(|p| FormattedLine {
                label: p.label.clone(),
                amount: format_isk_with_unit(p.amount),
            })
            .collect();

        if result.corporation_share != 0 {
            lines.push(FormattedLine {
                label: CORPORATION_LABEL.to_string(),
                amount: format_isk_with_unit(result.corporation_share),
            });
        }

        Self {
            total_value: format_isk_with_unit(result.total_value),
            lines,
        }
    }
}

/// Response body of the split endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Unique id of this calculation, also used as the log correlation id.
    pub calculation_id: Uuid,
    /// When the calculation ran.
    pub timestamp: DateTime<Utc>,
    /// Engine version.
    pub engine_version: String,
    /// Time spent calculating, in microseconds.
    pub duration_us: u64,
    /// The split itself.
    #[serde(flatten)]
    pub result: SplitResult,
    /// Display-ready amounts.
    pub formatted: FormattedSplit,
}

/// Response body of `POST /appraise`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppraisalResponse {
    /// Floored total buy price.
    pub total_buy_price: Isk,
}

/// Response body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" when the service answers.
    pub status: String,
    /// Engine version.
    pub version: String,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    /// A 500 response.
    pub fn internal(error: ApiError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<LootError> for ApiErrorResponse {
    fn from(error: LootError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            LootError::ConfigNotFound { .. } | LootError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            LootError::InvalidParticipant { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_PARTICIPANT",
                    message,
                    "Each pilot may hold one role and appear once",
                ),
            ),
            LootError::InvalidAmount { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_AMOUNT", message),
            ),
            LootError::SplitNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("SPLIT_NOT_FOUND", message),
            ),
            LootError::PilotNameRequired => {
                (StatusCode::BAD_REQUEST, ApiError::validation_error(message))
            }
            LootError::Storage { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("STORAGE_ERROR", "Storage failure", message),
            ),
            LootError::Appraisal { .. } => (
                StatusCode::BAD_GATEWAY,
                ApiError::new("APPRAISAL_FAILED", message),
            ),
        };
        Self { status, error }
    }
}

//! HTTP API module for the loot split engine.
//!
//! This module exposes the split calculators, the appraisal proxy, and the
//! saved split, roster, and trust list stores as REST endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BattleReportRequest, CountSplitRequest, PilotRequest, RoleSplitRequest, TrustRemoveRequest,
    TrustRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, AppraisalResponse, CalculationResponse, ENGINE_VERSION,
    FormattedLine, FormattedSplit, HealthResponse,
};
pub use state::AppState;

//! HTTP API module for the Ponto Engine.
//!
//! This module provides the REST endpoints that run the monthly pipeline for
//! one employee (`POST /calculate/monthly`) or for many employees in parallel
//! (`POST /calculate/batch`).

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BatchCalculationRequest, MonthlyCalculationRequest, validate_job};
pub use response::{
    ApiError, ApiErrorResponse, BatchCalculationResponse, MonthlyCalculationResponse,
};
pub use state::AppState;

//! HTTP adapter exposing the task API over axum.
//!
//! Handlers decode requests into service calls and render every outcome,
//! success or failure, through [`ApiResponse`].

mod envelope;
mod routes;
mod state;

pub use envelope::{ApiError, ApiResponse, ApiResult, METHOD_NOT_ALLOWED_CODE, SUCCESS_CODE};
pub use routes::router;
pub use state::AppState;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use secondyou_common::{Environment, SimulationError};
use secondyou_core::StoreError;

pub const MSG_CONFIGURATION: &str =
    "AI service is not properly configured. Please try again later.";
pub const MSG_SERVICE_LIMIT: &str =
    "AI service is temporarily unavailable due to high demand. Please try again in a few minutes.";
pub const MSG_SIMULATION_FAILED: &str =
    "Unable to generate your life simulation. Please try again.";
pub const MSG_TOO_MANY_REQUESTS: &str =
    "Too many simulation requests from this IP, please try again later.";

/// JSON error envelope: `{error, message, details?}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: &'static str,
    message: String,
    details: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl ApiError {
    fn new(status: StatusCode, error: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            error,
            message: message.into(),
            details: None,
        }
    }

    /// Map a pipeline failure to its user-facing response. Provider detail is
    /// only attached outside production, and never for credential problems.
    pub fn simulation(err: SimulationError, env: Environment) -> Self {
        match err {
            SimulationError::Validation(msg) => Self::validation(msg),
            SimulationError::Configuration(_) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Configuration Error",
                MSG_CONFIGURATION,
            ),
            SimulationError::RateLimited(_) => {
                Self::new(StatusCode::TOO_MANY_REQUESTS, "Service Limit", MSG_SERVICE_LIMIT)
            }
            other @ (SimulationError::Generation(_) | SimulationError::Parse(_)) => {
                let mut api = Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Simulation Failed",
                    MSG_SIMULATION_FAILED,
                );
                if !env.is_production() {
                    api.details = Some(other.to_string());
                }
                api
            }
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Validation Error", message)
    }

    pub fn too_many_requests() -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, "Too Many Requests", MSG_TOO_MANY_REQUESTS)
    }

    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "Sign in to access your saved simulations.",
        )
    }

    pub fn route_not_found() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "Route not found",
            "The requested endpoint does not exist.",
        )
    }

    pub fn store(err: StoreError, env: Environment) -> Self {
        match err {
            StoreError::NotFound(_) => Self::new(
                StatusCode::NOT_FOUND,
                "Not Found",
                "Simulation not found.",
            ),
            StoreError::Backend(_) => {
                let mut api = Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "Unable to access saved simulations. Please try again.",
                );
                if !env.is_production() {
                    api.details = Some(err.to_string());
                }
                api
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.error,
            message: &self.message,
            details: self.details.as_deref(),
        };
        (self.status, Json(body)).into_response()
    }
}

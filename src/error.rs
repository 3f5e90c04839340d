// Error types for the calculators and their HTTP rendering
// This keeps error responses consistent across Axum handlers

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

// Invalid input to one of the calculators
#[derive(Debug, Error, PartialEq)]
pub enum CalculatorError {
    #[error("loan term must be at least one month")]
    ZeroTerm,
    #[error("down payment {down_payment} exceeds price {price}")]
    DownPaymentTooHigh { down_payment: u32, price: u32 },
    #[error("market value must be positive")]
    NoMarketValue,
    #[error("driver must be at least {min} years old, got {age}")]
    DriverTooYoung { age: u32, min: u32 },
}

// Application error type returned by handlers
#[derive(Debug)]
pub enum AppError {
    InternalServerError(anyhow::Error),
    NotFound(String),
    BadRequest(String),
}

// Implement conversion from anyhow::Error for easier error propagation
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::InternalServerError(error)
    }
}

impl From<CalculatorError> for AppError {
    fn from(error: CalculatorError) -> Self {
        AppError::BadRequest(error.to_string())
    }
}

impl From<crate::sell::SellError> for AppError {
    fn from(error: crate::sell::SellError) -> Self {
        AppError::BadRequest(error.to_string())
    }
}

// Implement IntoResponse for AppError to convert errors into JSON responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(e) => {
                // Log the detailed error here
                tracing::error!("Internal server error: {:?}", e);
                // Don't expose internal details to the client
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
            AppError::NotFound(message) => {
                tracing::debug!("Not found: {}", message);
                (StatusCode::NOT_FOUND, message)
            }
            AppError::BadRequest(message) => {
                tracing::warn!("Rejected request: {}", message);
                (StatusCode::BAD_REQUEST, message)
            }
        };

        (status, Json(json!({ "error": error_message }))).into_response()
    }
}

// Define a custom Result type using our AppError
pub type AppResult<T> = Result<T, AppError>;

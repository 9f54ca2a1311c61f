//! Typed error handling for the dashboard
//!
//! Mutation outcomes (validation failures, persistence faults) are not
//! errors at this level: they are values of [`Outcome`](crate::core::pipeline::Outcome).
//! The types here cover everything around the pipeline.
//!
//! # Error Categories
//!
//! - [`StoreError`]: failures reported by an invoice store backend
//! - [`ConfigError`]: configuration loading and validation
//! - [`RequestError`]: malformed HTTP requests
//! - [`RenderError`]: view rendering
//!
//! # Example
//!
//! ```rust,ignore
//! use acme::prelude::*;
//!
//! async fn show(store: &dyn InvoiceStore, id: Uuid) -> Result<InvoiceRecord, DashboardError> {
//!     store
//!         .get(&id)
//!         .await?
//!         .ok_or(DashboardError::NotFound { id })
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// The main error type for the dashboard
#[derive(Debug)]
pub enum DashboardError {
    /// Invoice does not exist
    NotFound { id: Uuid },

    /// Configuration errors
    Config(ConfigError),

    /// Storage backend errors
    Storage(StoreError),

    /// HTTP/Request errors
    Request(RequestError),

    /// View rendering errors
    Render(RenderError),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::NotFound { id } => write!(f, "Invoice with id '{}' not found", id),
            DashboardError::Config(e) => write!(f, "{}", e),
            DashboardError::Storage(e) => write!(f, "{}", e),
            DashboardError::Request(e) => write!(f, "{}", e),
            DashboardError::Render(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashboardError::Config(e) => Some(e),
            DashboardError::Storage(e) => Some(e),
            DashboardError::Request(e) => Some(e),
            DashboardError::Render(e) => Some(e),
            DashboardError::NotFound { .. } => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DashboardError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::NotFound { .. } => StatusCode::NOT_FOUND,
            DashboardError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Storage(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            DashboardError::Storage(StoreError::Unavailable { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            DashboardError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Request(_) => StatusCode::BAD_REQUEST,
            DashboardError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DashboardError::NotFound { .. } => "INVOICE_NOT_FOUND",
            DashboardError::Config(_) => "CONFIG_ERROR",
            DashboardError::Storage(StoreError::NotFound { .. }) => "INVOICE_NOT_FOUND",
            DashboardError::Storage(_) => "STORAGE_ERROR",
            DashboardError::Request(e) => e.error_code(),
            DashboardError::Render(_) => "RENDER_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.public_message(),
            details: self.details(),
        }
    }

    /// Message safe to show to clients; backend details stay in the logs
    fn public_message(&self) -> String {
        match self {
            DashboardError::Storage(StoreError::NotFound { id }) => {
                DashboardError::NotFound { id: *id }.to_string()
            }
            DashboardError::Storage(_) => "Database error".to_string(),
            other => other.to_string(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            DashboardError::NotFound { id }
            | DashboardError::Storage(StoreError::NotFound { id }) => {
                Some(serde_json::json!({ "id": id.to_string() }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors reported by an invoice store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No row matched the given id
    #[error("invoice '{id}' not found")]
    NotFound { id: Uuid },

    /// Could not reach the backend
    #[error("failed to connect to {backend}: {message}")]
    Connection { backend: String, message: String },

    /// Statement failed (constraint violation, bad data, ...)
    #[error("{backend} query error: {message}")]
    Query { backend: String, message: String },

    /// A stored row could not be turned back into an invoice
    #[error("corrupt invoice row: {message}")]
    Corrupt { message: String },

    /// Connection pool exhausted or closed
    #[error("storage backend '{backend}' is unavailable")]
    Unavailable { backend: String },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

impl From<StoreError> for DashboardError {
    fn from(err: StoreError) -> Self {
        DashboardError::Storage(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("failed to parse config{}: {message}", file_suffix(.file))]
    Parse {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("invalid configuration: {message}")]
    Invalid { message: String },

    /// IO error while reading configuration
    #[error("failed to read config file '{path}': {message}")]
    Io { path: String, message: String },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_deref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}

impl From<ConfigError> for DashboardError {
    fn from(err: ConfigError) -> Self {
        DashboardError::Config(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// Request body could not be read as form fields
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    /// Content type is neither a form nor JSON
    #[error("Unsupported content type: {content_type}")]
    UnsupportedContentType { content_type: String },

    /// Path segment is not a valid invoice id
    #[error("Invalid invoice id: '{value}'")]
    InvalidId { value: String },
}

impl RequestError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidBody { .. } => "INVALID_BODY",
            RequestError::UnsupportedContentType { .. } => "UNSUPPORTED_CONTENT_TYPE",
            RequestError::InvalidId { .. } => "INVALID_ID",
        }
    }
}

impl From<RequestError> for DashboardError {
    fn from(err: RequestError) -> Self {
        DashboardError::Request(err)
    }
}

// =============================================================================
// Render Errors
// =============================================================================

/// Errors while rendering a view
#[derive(Debug, thiserror::Error)]
#[error("failed to render view '{view}': {message}")]
pub struct RenderError {
    pub view: String,
    pub message: String,
}

impl From<RenderError> for DashboardError {
    fn from(err: RenderError) -> Self {
        DashboardError::Render(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse {
            file: None,
            message: err.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for ConfigError {
    fn from(err: validator::ValidationErrors) -> Self {
        ConfigError::Invalid {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => StoreError::Unavailable {
                backend: "PostgreSQL".to_string(),
            },
            sqlx::Error::Io(_) => StoreError::Connection {
                backend: "PostgreSQL".to_string(),
                message: err.to_string(),
            },
            other => StoreError::Query {
                backend: "PostgreSQL".to_string(),
                message: other.to_string(),
            },
        }
    }
}

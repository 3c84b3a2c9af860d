//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a la respuesta JSON legacy `{"Error": true, "ErrorDescription": ...}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Configuration(String),

    #[error("User insurance plan ID was not specified.")]
    MissingParameter,

    #[error("User insurance plan '{0}' was not found.")]
    PlanNotFound(String),

    #[error("Eligible API is unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Eligible API responded with HTTP status {status}.")]
    ProviderHttp { status: u16 },

    #[error("Cached plan data is corrupt: {0}")]
    CorruptCache(String),

    #[error("Plan data could not be compressed: {0}")]
    CacheEncoding(String),

    #[error("Eligible API response is malformed: {0}")]
    MalformedProviderDocument(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Cuerpo de error compatible con los clientes existentes
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "Error")]
    pub error: bool,
    #[serde(rename = "ErrorDescription")]
    pub error_description: String,
}

impl AppError {
    /// Código HTTP asociado; el cuerpo es idéntico para todos los casos
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingParameter => StatusCode::BAD_REQUEST,
            AppError::PlanNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ProviderUnavailable(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::ProviderHttp { .. } | AppError::MalformedProviderDocument(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Configuration(_)
            | AppError::CorruptCache(_)
            | AppError::CacheEncoding(_)
            | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        let error_description = match self {
            // No exponer detalles de SQL al cliente
            AppError::Database(_) => "An error occurred while accessing the database.".to_string(),
            other => other.to_string(),
        };

        ErrorResponse {
            error: true,
            error_description,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("❌ {}", self);
        } else {
            warn!("⚠️ {}", self);
        }

        (status, Json(self.to_error_response())).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de configuración
pub fn configuration_error(message: &str) -> AppError {
    AppError::Configuration(message.to_string())
}

/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error envelope)
 * - service 層のエラー (GatewayError など) を統一的に変換
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::media::gateway::GatewayError;

/// Error envelope returned to clients. The status code rides on the response
/// line; `data` carries optional structured detail.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not authenticated")]
    Unauthenticated,
    #[error("invalid request: {0}")]
    BadRequest(String),
    #[error("could not store file")]
    Storage,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            message: self.to_string(),
            data: None,
        };

        (status, Json(body)).into_response()
    }
}

impl From<GatewayError> for AppError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::Unauthenticated => AppError::Unauthenticated,
            // Detail is logged at the gateway; clients get the generic envelope.
            GatewayError::Storage(_) => AppError::Storage,
        }
    }
}

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("Belum login")]
    Unauthenticated,

    #[error("Input tidak valid: {0}")]
    InvalidInput(String),

    #[error("Data tidak ditemukan")]
    NotFound,

    #[error("Terlalu banyak request: {0}")]
    RateLimited(String),

    #[error("Gagal login: {0}")]
    Auth(String),

    #[error("Kesalahan database: {0}")]
    Database(String),

    #[error("Terjadi kesalahan internal: {0}")]
    Internal(String),
}

impl FromStr for AppError {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("Belum login") {
            Ok(AppError::Unauthenticated)
        } else if s.starts_with("Input tidak valid") {
            Ok(AppError::InvalidInput(s.to_string()))
        } else if s.contains("tidak ditemukan") {
            Ok(AppError::NotFound)
        } else if s.starts_with("Terlalu banyak request") {
            Ok(AppError::RateLimited(s.to_string()))
        } else if s.starts_with("Gagal login") {
            Ok(AppError::Auth(s.to_string()))
        } else if s.starts_with("Kesalahan database") {
            Ok(AppError::Database(s.to_string()))
        } else {
            Ok(AppError::Internal(s.to_string()))
        }
    }
}

impl AppError {
    pub fn user_message(&self) -> &str {
        match self {
            Self::Unauthenticated => "Kamu harus login dulu untuk vote!",
            Self::InvalidInput(_) => "Input yang kamu masukkan tidak valid. Coba lagi!",
            Self::NotFound => "Post tidak ditemukan.",
            Self::RateLimited(_) => "Pelan-pelan! Tunggu sebentar sebelum coba lagi.",
            Self::Auth(_) => "Gagal login dengan Google. Coba lagi nanti.",
            Self::Database(_) => "Ada masalah di server. Coba lagi nanti.",
            Self::Internal(_) => "Ada masalah di server. Coba lagi nanti.",
        }
    }
}

#[cfg(feature = "ssr")]
mod ssr_impl {
    use super::AppError;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    #[derive(serde::Serialize)]
    struct ErrorResponse {
        message: String,
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let (status, message) = match &self {
                AppError::Unauthenticated => {
                    (StatusCode::UNAUTHORIZED, "Belum login".to_string())
                }
                AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                AppError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
                AppError::RateLimited(msg) => (StatusCode::TOO_MANY_REQUESTS, msg.clone()),
                AppError::Auth(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
                AppError::Database(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
                AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            };
            (status, Json(ErrorResponse { message })).into_response()
        }
    }
}

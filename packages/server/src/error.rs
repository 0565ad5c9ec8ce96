use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::store::StoreError;

/// Error payload returned by the JSON endpoints.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// One of `Missing id`, `Server not configured`, `QRX_NOT_FOUND`,
    /// `Supabase error (entries)`, `Supabase error (media)`, `Server error`.
    #[schema(example = "QRX_NOT_FOUND")]
    pub error: String,
    /// Upstream response text, present on gateway errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Which lookup a gateway error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Entries,
    Media,
}

impl Lookup {
    pub fn as_str(self) -> &'static str {
        match self {
            Lookup::Entries => "entries",
            Lookup::Media => "media",
        }
    }
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotConfigured,
    NotFound,
    Upstream {
        lookup: Lookup,
        detail: String,
    },
    Internal(String),
}

impl AppError {
    pub fn upstream(lookup: Lookup, err: &StoreError) -> Self {
        tracing::warn!(lookup = lookup.as_str(), "Data service error: {err}");
        AppError::Upstream {
            lookup,
            detail: err.detail(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub(crate) fn status_and_body(self) -> (StatusCode, ErrorBody) {
        let status = self.status();
        let body = match self {
            AppError::Validation(msg) => ErrorBody {
                error: msg,
                detail: None,
            },
            AppError::NotConfigured => ErrorBody {
                error: "Server not configured".into(),
                detail: None,
            },
            AppError::NotFound => ErrorBody {
                error: "QRX_NOT_FOUND".into(),
                detail: None,
            },
            AppError::Upstream { lookup, detail } => ErrorBody {
                error: format!("Supabase error ({})", lookup.as_str()),
                detail: Some(detail),
            },
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorBody {
                    error: "Server error".into(),
                    detail: None,
                }
            }
        };
        (status, body)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

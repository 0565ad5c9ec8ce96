use axum::{Json, extract::State, http::header, response::IntoResponse};
use common::{Entry, Media};
use serde::Serialize;
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody, Lookup};
use crate::extractors::query::QueryPairs;
use crate::state::AppState;

/// Shared-cache policy for successful lookups. The cache key is the full
/// request URL, so it varies with `id`.
pub const SHARED_CACHE_POLICY: &str = "s-maxage=30, stale-while-revalidate=300";

#[derive(Debug, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LookupQuery {
    /// Entry id, used verbatim. Must appear exactly once.
    pub id: Option<String>,
}

impl LookupQuery {
    /// A repeated `id` counts as missing.
    pub fn from_pairs(query: &QueryPairs) -> Self {
        let mut ids = query.all("id");
        let id = match (ids.next(), ids.next()) {
            (Some(id), None) => Some(id.to_string()),
            _ => None,
        };
        Self { id }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LookupResponse {
    pub entry: Entry,
    pub media: Vec<Media>,
}

/// Look up an entry and its media.
///
/// Both lookups are forwarded to the data service as-is; unlike the entry
/// page, a media failure fails the whole request.
#[utoipa::path(
    get,
    path = "/qrx",
    tag = "QR-X",
    operation_id = "lookupQrx",
    summary = "Look up an entry with its media",
    params(LookupQuery),
    responses(
        (status = 200, description = "Entry and media", body = LookupResponse),
        (status = 400, description = "Missing id", body = ErrorBody),
        (status = 404, description = "No entry with this id (QRX_NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Server not configured", body = ErrorBody),
        (status = 502, description = "Data service error", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn lookup_qrx(
    State(state): State<AppState>,
    query: QueryPairs,
) -> Result<impl IntoResponse, AppError> {
    let id = LookupQuery::from_pairs(&query)
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::Validation("Missing id".into()))?;

    let store = state.store()?;

    let entry = store
        .find_entry(&id)
        .await
        .map_err(|e| AppError::upstream(Lookup::Entries, &e))?
        .ok_or(AppError::NotFound)?;

    let media = store
        .list_media(&id)
        .await
        .map_err(|e| AppError::upstream(Lookup::Media, &e))?;

    info!(media = media.len(), "Lookup served");

    Ok((
        [(header::CACHE_CONTROL, SHARED_CACHE_POLICY)],
        Json(LookupResponse { entry, media }),
    ))
}

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use tracing::instrument;

use crate::error::AppError;
use crate::extractors::query::QueryPairs;
use crate::render::{self, EntryView, RenderFlags};
use crate::state::AppState;
use crate::utils::user_agent::is_probably_mobile;
use crate::views::{self, EntryPage};

/// Debug output is per-request and must not land in a shared cache.
const DEBUG_CACHE_POLICY: &str = "private, no-store";

/// `GET /qrx/{id}`: the public entry page.
///
/// The id is taken from the request path as sent, before any decoding, so
/// that normalization sees exactly what the QR code carried. Repeated
/// `save`/`debug` parameters use their first value.
#[instrument(skip(state, uri, headers), fields(path = %uri.path()))]
pub async fn qrx_page(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    query: QueryPairs,
) -> Response {
    let store = match state.store() {
        Ok(store) => store,
        Err(e) => return views::error_page(e.status(), "Server not configured"),
    };

    let raw_id = raw_segment(uri.path(), "/qrx/");
    let flags = RenderFlags::from_query(query.first("save"), query.first("debug"));
    let outcome = render::render_entry(store, raw_id, flags, state.presence).await;

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());
    let html = views::entry_page(&EntryPage {
        outcome: &outcome,
        links: &state.config.links,
        mobile: is_probably_mobile(user_agent),
    });

    let status = match outcome.view {
        EntryView::Found(_) => StatusCode::OK,
        EntryView::NotFound => AppError::NotFound.status(),
    };

    if flags.debug {
        (status, [(header::CACHE_CONTROL, DEBUG_CACHE_POLICY)], Html(html)).into_response()
    } else {
        (status, Html(html)).into_response()
    }
}

fn raw_segment<'a>(path: &'a str, prefix: &str) -> &'a str {
    path.strip_prefix(prefix).unwrap_or_default()
}

use axum::extract::State;
use axum::response::Html;
use tracing::instrument;

use crate::extractors::query::QueryPairs;
use crate::state::AppState;
use crate::views;

/// `GET /get-app`. `from` is the path of the page that sent the visitor
/// here; the first value wins when it is repeated.
#[instrument(skip(state))]
pub async fn get_app(State(state): State<AppState>, query: QueryPairs) -> Html<String> {
    let from = views::sanitize_from(query.first("from"));
    Html(views::get_app_page(&state.config.links, &from))
}

use axum::response::Html;

use crate::views;

pub async fn home() -> Html<String> {
    Html(views::home_page())
}

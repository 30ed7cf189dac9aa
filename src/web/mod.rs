use axum::{response::Html, routing::get, Router};

use crate::state::AppState;

const INDEX_HTML: &str = include_str!("index.html");

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/index.html", get(index))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

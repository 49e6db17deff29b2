//! GET / — the embedded single-page UI.

use axum::response::Html;

/// Handler: GET /
///
/// The page is compiled into the binary; the backend stays a single
/// self-contained executable with no asset directory to deploy.
pub async fn index_page() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}

//! Static landing page embedded in the binary and served under `/static`.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Redirect},
};
use rust_embed::RustEmbed;

/// Page the root path redirects to
pub const LANDING_PAGE: &str = "/static/index.html";

#[derive(RustEmbed)]
#[folder = "static/"]
struct Assets;

pub async fn root() -> Redirect {
    Redirect::temporary(LANDING_PAGE)
}

pub async fn serve_static(Path(path): Path<String>) -> impl IntoResponse {
    let path = path.trim_start_matches('/');

    match Assets::get(path) {
        Some(file) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref().to_string())],
                file.data.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

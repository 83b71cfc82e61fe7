//! Embedded static assets
//!
//! The page ships inside the binary; debug builds read it straight from the
//! `ui/` directory through rust-embed's dev behavior.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "ui"]
struct Assets;

/// Serve an embedded file from `ui/assets/`
pub async fn serve_static(Path(path): Path<String>) -> Response {
    let key = format!("assets/{path}");

    match Assets::get(&key) {
        Some(content) => {
            let mime = mime_guess::from_path(&key).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.to_vec(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// Get the index.html content
pub fn get_index_html() -> Option<String> {
    Assets::get("index.html").and_then(|content| String::from_utf8(content.data.to_vec()).ok())
}

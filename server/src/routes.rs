//! HTTP routes: everything under the public directory, verbatim.

use std::path::Path;

use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Static file router.
///
/// Directory requests resolve to their `index.html`; anything missing is a 404.
/// There are no API routes.
pub fn router(public_dir: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use std::path::PathBuf;
    use tower::ServiceExt;

    fn public_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../public")
    }

    async fn get(uri: &str) -> axum::response::Response {
        router(&public_dir())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let response = get("/").await;
        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"), "{content_type}");

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let expected = std::fs::read(public_dir().join("index.html")).unwrap();
        assert_eq!(body.as_ref(), expected.as_slice());
    }

    #[tokio::test]
    async fn test_named_file() {
        let response = get("/index.html").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let response = get("/js/nope.js").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_web_build_content_types() {
        // Browsers refuse module scripts without a JavaScript type, and streaming wasm
        // compilation needs application/wasm.
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("client.js"), "export default function init() {}").unwrap();
        std::fs::write(dir.path().join("client_bg.wasm"), b"\0asm\x01\0\0\0").unwrap();

        for (uri, expected) in [("/client.js", "javascript"), ("/client_bg.wasm", "application/wasm")] {
            let response = router(dir.path())
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
            assert!(content_type.contains(expected), "{uri}: {content_type}");
        }
    }

    #[tokio::test]
    async fn test_no_escape_from_public_dir() {
        let response = get("/../Cargo.toml").await;
        assert_ne!(response.status(), StatusCode::OK);
    }
}

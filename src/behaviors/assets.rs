//! Static asset fallback: the index document and any file under `static/`.

use std::borrow::Cow;
use std::collections::HashMap;

use axum::{
    body::Body,
    http::{header, HeaderValue},
    response::Response,
};
use rust_embed::Embed;

use crate::behaviors::BehaviorError;

pub const INDEX_DOCUMENT: &str = "index.html";

/// Read-only store of files keyed by relative path.
pub trait AssetStore: Send + Sync {
    /// Returns the file content, or `None` when absent.
    fn get(&self, path: &str) -> Option<Cow<'static, [u8]>>;
}

#[derive(Embed)]
#[folder = "static/"]
struct StaticFiles;

/// Assets compiled into the binary from `static/`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedAssets;

impl AssetStore for EmbeddedAssets {
    fn get(&self, path: &str) -> Option<Cow<'static, [u8]>> {
        StaticFiles::get(path).map(|file| file.data)
    }
}

/// In-memory store, mostly for tests and embedding callers.
#[derive(Debug, Default, Clone)]
pub struct MemoryAssets {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

impl AssetStore for MemoryAssets {
    fn get(&self, path: &str) -> Option<Cow<'static, [u8]>> {
        self.files.get(path).map(|data| Cow::Owned(data.clone()))
    }
}

/// `/`: the index document as HTML. A missing index is fatal for the request.
pub fn index(store: &dyn AssetStore) -> Result<Response, BehaviorError> {
    let data = store.get(INDEX_DOCUMENT).ok_or_else(|| {
        tracing::error!(asset = INDEX_DOCUMENT, "Index document missing from asset store");
        BehaviorError::FatalAsset
    })?;

    let mut response = Response::new(Body::from(data));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    Ok(response)
}

/// Any other path: served verbatim when present, without a content type.
pub fn by_path(store: &dyn AssetStore, path: &str) -> Result<Response, BehaviorError> {
    let relative = path.trim_start_matches('/');
    store
        .get(relative)
        .map(|data| Response::new(Body::from(data)))
        .ok_or(BehaviorError::AssetMissing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_embedded_index_present() {
        assert!(EmbeddedAssets.get(INDEX_DOCUMENT).is_some());
        let response = index(&EmbeddedAssets).unwrap();
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
    }

    #[test]
    fn test_missing_index_is_fatal() {
        assert_eq!(
            index(&MemoryAssets::new()).unwrap_err(),
            BehaviorError::FatalAsset
        );
    }

    #[tokio::test]
    async fn test_by_path_serves_verbatim() {
        let store = MemoryAssets::new().with("docs/readme.txt", "hello");
        let response = by_path(&store, "//docs/readme.txt").unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());
        let body = axum::body::to_bytes(response.into_body(), 64).await.unwrap();
        assert_eq!(&body[..], b"hello");
    }

    #[test]
    fn test_by_path_miss() {
        assert_eq!(
            by_path(&MemoryAssets::new(), "/nope.png").unwrap_err(),
            BehaviorError::AssetMissing
        );
    }
}

pub mod download;
pub mod health;
pub mod openapi;
pub mod schemas;
pub mod upload;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use beamdrop_core::TokenSigner;
use beamdrop_store::BlobStore;

use crate::netaddr;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    /// Issues and verifies download tokens.
    pub signer: Arc<TokenSigner>,
    /// Spools uploaded blobs and resolves their opaque ids.
    pub store: Arc<dyn BlobStore>,
    /// Port advertised in generated download links.
    pub public_port: u16,
    /// Optional fixed base URL overriding LAN address discovery.
    pub external_url: Option<String>,
    /// Maximum accepted upload body size in bytes.
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Base URL download links are built on.
    ///
    /// The LAN address is resolved per upload rather than once at startup, so
    /// a laptop that changes networks keeps handing out reachable links.
    pub fn link_base(&self) -> String {
        match &self.external_url {
            Some(base) => base.trim_end_matches('/').to_owned(),
            None => format!("http://{}:{}", netaddr::lan_host(), self.public_port),
        }
    }
}

/// Build the Axum router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;
    Router::new()
        // Liveness
        .route("/", get(health::root))
        .route("/health", get(health::health))
        // Upload & download
        .route("/upload", post(upload::upload))
        .route("/download/{token}", get(download::download))
        // OpenAPI document
        .route("/api-doc/openapi.json", get(openapi::serve))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

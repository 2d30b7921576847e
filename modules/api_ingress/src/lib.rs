//! HTTP host for the election tracker.
//!
//! Takes the routes contributed by the domain modules, wraps them in the
//! shared middleware stack and serves them until cancelled.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::{middleware::from_fn, Router};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
};

mod config;
pub mod request_id;

pub use config::{ApiIngressConfig, DEFAULT_BODY_LIMIT_BYTES};

/// Response for every unmatched method and path: 404, empty body.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Owns the HTTP server: middleware, fallback and the listener.
#[derive(Debug, Clone)]
pub struct ApiIngress {
    config: ApiIngressConfig,
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    /// Attach the fallback and the middleware stack to `routes`.
    ///
    /// Request order (outermost first):
    /// SetRequestId -> PropagateRequestId -> Trace -> push_req_id_to_extensions
    /// -> CORS -> BodyLimit -> routes
    ///
    /// There is no timeout layer: a handler always runs to completion.
    pub fn build_router(&self, routes: Router) -> Router {
        let x_request_id = request_id::header();

        let mut router = routes
            .fallback(not_found)
            .layer(DefaultBodyLimit::max(self.config.body_limit_bytes))
            .layer(RequestBodyLimitLayer::new(self.config.body_limit_bytes));

        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }

        router
            .layer(from_fn(request_id::push_req_id_to_extensions))
            .layer(request_id::create_trace_layer())
            .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
            .layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId))
    }

    /// Bind `addr` and serve until `cancel` fires.
    pub async fn serve(&self, router: Router, addr: SocketAddr, cancel: CancellationToken) -> Result<()> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind HTTP listener on {addr}"))?;
        self.serve_with_listener(router, listener, cancel).await
    }

    /// Serve on an already bound listener; used by tests binding port 0.
    pub async fn serve_with_listener(
        &self,
        router: Router,
        listener: TcpListener,
        cancel: CancellationToken,
    ) -> Result<()> {
        let local = listener.local_addr()?;
        tracing::info!("HTTP server bound on {}", local);

        let shutdown = async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully (cancellation)");
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP server failed")
    }
}

impl Default for ApiIngress {
    fn default() -> Self {
        Self::new(ApiIngressConfig::default())
    }
}

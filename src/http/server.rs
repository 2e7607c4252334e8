//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the API handlers
//! - Wire up middleware (request ID, tracing, deadline, metrics)
//! - Serve the UI bundle from `static_dir` when configured
//! - Bind to a listener, plain or TLS, and stop on the shutdown signal

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;
use axum::body::Body;
use axum::http::Request;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::balances::BalanceFetcher;
use crate::config::{ServerConfig, TlsConfig};
use crate::http::handlers;
use crate::http::middleware::{enforce_deadline, track_requests};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::keystore::KeyStore;
use crate::transfer::TransferService;

/// How long in-flight TLS connections get to finish after shutdown.
const TLS_DRAIN_SECS: u64 = 10;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub keystore: Arc<dyn KeyStore>,
    /// Shown by `/api/address` while no local wallet exists.
    pub default_address: Address,
    pub balances: BalanceFetcher,
    pub transfers: TransferService,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("default_address", &self.default_address)
            .field("transfers", &self.transfers)
            .finish_non_exhaustive()
    }
}

/// HTTP server for the wallet API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            router: Self::build_router(&config, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        let mut api = Router::new()
            .route("/api/address", get(handlers::get_address))
            .route("/api/portfolio", get(handlers::get_portfolio))
            .route("/api/send", post(handlers::post_send))
            .route("/health", get(handlers::health))
            .route_layer(middleware::from_fn(track_requests));

        if let Some(dir) = &config.static_dir {
            api = api.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true));
        }

        api.with_state(state).layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "http",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request.request_id(),
                    )
                }))
                .layer(propagate_request_id_layer())
                .layer(middleware::from_fn_with_state(
                    Duration::from_secs(config.request_timeout_secs),
                    enforce_deadline,
                )),
        )
    }

    /// The fully layered router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve plain HTTP on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Serve HTTPS on `addr` until `shutdown` fires.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: &TlsConfig,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let rustls = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path).await?;
        let handle = axum_server::Handle::new();

        let drain = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            drain.graceful_shutdown(Some(Duration::from_secs(TLS_DRAIN_SECS)));
        });

        tracing::info!(address = %addr, "HTTPS server starting");
        axum_server::bind_rustls(addr, rustls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}

//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create Axum Router sending every path to one dispatch handler
//! - Wire up middleware (tracing, timeout, body limit, request ID)
//! - Bind server to listener and shut down gracefully
//! - Resolve the route and run exactly one behavior per request
//! - Observability (metrics, request IDs)

use axum::{
    body::Body,
    extract::{ConnectInfo, Query, State},
    http::{Request, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::behaviors::{
    assets, bytes, cache, delay, echo, redirect, status, unstable, AssetStore, BehaviorError,
    EmbeddedAssets,
};
use crate::config::{BehaviorConfig, FixtureConfig};
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::routing::{Behavior, Resolution, Router as RouteTable};

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub behaviors: Arc<BehaviorConfig>,
    pub assets: Arc<dyn AssetStore>,
    pub shutdown: Shutdown,
}

/// HTTP server for the fixture endpoints.
pub struct HttpServer {
    router: Router,
    config: FixtureConfig,
    shutdown: Shutdown,
}

impl HttpServer {
    /// Create a server serving the embedded static assets.
    pub fn new(config: FixtureConfig, shutdown: Shutdown) -> Self {
        Self::with_assets(config, shutdown, Arc::new(EmbeddedAssets))
    }

    /// Create a server backed by a custom asset store.
    pub fn with_assets(
        config: FixtureConfig,
        shutdown: Shutdown,
        assets: Arc<dyn AssetStore>,
    ) -> Self {
        let state = AppState {
            routes: Arc::new(RouteTable::standard()),
            behaviors: Arc::new(config.behaviors.clone()),
            assets,
            shutdown: shutdown.clone(),
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            shutdown,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &FixtureConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, e.g. for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until shutdown.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            request_timeout_secs = self.config.timeouts.request_secs,
            max_delay_secs = self.config.behaviors.max_delay_secs,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(self.shutdown.triggered())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolve the route, run its behavior, and record the outcome.
async fn dispatch(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let start_time = Instant::now();
    let path = request.uri().path().to_string();
    let request_id = request_id(request.headers()).to_string();

    let resolution = state.routes.resolve(&path);
    let label = match resolution {
        Resolution::Behavior { behavior, .. } | Resolution::Mismatch { behavior } => {
            behavior.name()
        }
        Resolution::Fallback => "static",
    };

    tracing::debug!(
        request_id = %request_id,
        method = %request.method(),
        path = %path,
        behavior = label,
        "Dispatching request"
    );

    let result = match resolution {
        Resolution::Behavior { behavior, param } => {
            run_behavior(&state, behavior, param.unwrap_or_default(), peer, request).await
        }
        Resolution::Mismatch { .. } => Err(BehaviorError::RoutingMismatch),
        Resolution::Fallback => assets::by_path(state.assets.as_ref(), &path),
    };

    let response = result.unwrap_or_else(|e| {
        tracing::debug!(request_id = %request_id, path = %path, error = %e, "Request rejected");
        e.into_response()
    });

    metrics::record_request(label, response.status().as_u16(), start_time);
    response
}

async fn run_behavior(
    state: &AppState,
    behavior: Behavior,
    param: &str,
    peer: SocketAddr,
    request: Request<Body>,
) -> Result<Response, BehaviorError> {
    let limits = state.behaviors.as_ref();
    match behavior {
        Behavior::Status => Ok(status::respond(param)),
        Behavior::Delay => delay::respond(param, limits, state.shutdown.triggered()).await,
        Behavior::Bytes => bytes::respond(param, limits),
        Behavior::Cache => Ok(cache::respond(request.headers())),
        Behavior::CacheFor => cache::respond_for(param),
        Behavior::Anything => Ok(echo::anything(request)),
        Behavior::UserAgent => Ok(echo::user_agent(request.headers())),
        Behavior::Ip => Ok(echo::ip(peer)),
        Behavior::Bearer => echo::bearer(request.headers()),
        Behavior::Redirect => redirect::respond(param, limits),
        Behavior::Unstable => {
            let rate = query_param(request.uri(), unstable::FAILURE_RATE_PARAM);
            Ok(unstable::respond(rate.as_deref(), limits))
        }
        Behavior::Index => assets::index(state.assets.as_ref()),
    }
}

fn query_param(uri: &Uri, name: &str) -> Option<String> {
    let Query(mut params) = Query::<HashMap<String, String>>::try_from_uri(uri).ok()?;
    params.remove(name)
}

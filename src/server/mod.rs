//! Server initialization and routing

use crate::api;
use crate::config::{Config, CorsConfig};
use crate::crypto::AesCbcCipher;
use crate::middleware::{
    normalize_error_response, security_headers_middleware, ObservabilityLayer, SanitizedMakeSpan,
};
use crate::openapi::ApiDoc;
use crate::service::{RedirectService, SystemClock};
use crate::state::HasRedirect;
use anyhow::Result;
use axum::{
    http::{HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Upper bound on handler time; generation itself is in-process and fast
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub redirect_service: Arc<RedirectService<AesCbcCipher, SystemClock>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let redirect_service = Arc::new(RedirectService::new(
            &config.redirect,
            Arc::new(AesCbcCipher::new()),
            Arc::new(SystemClock),
        ));
        Self {
            config: Arc::new(config),
            redirect_service,
        }
    }
}

impl HasRedirect for AppState {
    type Cipher = AesCbcCipher;
    type Clock = SystemClock;

    fn config(&self) -> &Config {
        &self.config
    }

    fn redirect_service(&self) -> &RedirectService<Self::Cipher, Self::Clock> {
        &self.redirect_service
    }
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origin = if config.allows_any() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", o);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the HTTP router with generic state type
///
/// Works with the production `AppState` and any test state implementing
/// `HasRedirect`.
pub fn build_router<S: HasRedirect>(state: S) -> Router {
    let config = state.config().clone();

    let mut router = Router::new()
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        .route("/hsl/{tag}", get(api::redirect::get_redirect_url::<S>));

    if !config.is_production() {
        let doc = ApiDoc::build();
        router = router.route(
            "/api-docs/openapi.json",
            get(move || async move { Json(doc) }),
        );
    }

    with_layers(router, &config, REQUEST_TIMEOUT).with_state(state)
}

/// Wrap routes in the HTTP middleware stack.
///
/// The timeout sits inside `normalize_error_response` so a 408 gets the
/// same JSON body as every other error.
fn with_layers<S>(router: Router<S>, config: &Config, timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(axum::middleware::from_fn(normalize_error_response))
        .layer(axum::middleware::from_fn_with_state(
            config.security_headers.clone(),
            security_headers_middleware,
        ))
        .layer(ObservabilityLayer)
        .layer(TraceLayer::new_for_http().make_span_with(SanitizedMakeSpan))
        .layer(cors_layer(&config.cors))
}

/// Merge the `/metrics` route into an application router
pub fn with_metrics(router: Router, handle: Option<PrometheusHandle>) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(api::metrics::metrics_handler))
        .with_state(Arc::new(handle));
    router.merge(metrics_router)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}

/// Run the HTTP server
pub async fn run(config: Config, prometheus_handle: Option<PrometheusHandle>) -> Result<()> {
    let http_addr = config.http_addr();
    let state = AppState::new(config);

    if !state.check_ready() {
        tracing::warn!("Starting without a valid HSL redirect configuration; /hsl requests will fail");
    }

    let app = with_metrics(build_router(state), prometheus_handle);

    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

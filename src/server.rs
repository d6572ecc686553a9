//! Relay Server
//!
//! Assembles the axum router with its middleware stack and runs it:
//! - request tracing
//! - CORS with an explicit origin allowlist (credentials allowed)
//! - injected response headers for Firebase popup auth and referrer policy
//! - request body size limit

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::api::{self, ApiState};
use crate::config::RelayConfig;
use crate::openrouter::OpenRouterClient;

/// Build the CORS layer from the configured origin allowlist
fn cors_layer(config: &RelayConfig) -> Result<CorsLayer> {
    let origins = config
        .cors
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut layer = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if config.cors.allow_credentials {
        layer = layer.allow_credentials(true);
    }

    Ok(layer)
}

/// Assemble the application router with all layers applied
pub fn router(state: Arc<ApiState>, config: &RelayConfig) -> Result<Router> {
    let app = Router::new()
        .route("/", get(api::root_info))
        .route("/health", get(api::health_check))
        .route("/search", post(api::search))
        .fallback(api::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config)?)
        // Cross-Origin-Opener-Policy keeps Firebase auth popups working
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("cross-origin-opener-policy"),
            HeaderValue::from_static("same-origin-allow-popups"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer-when-downgrade"),
        ))
        .layer(RequestBodyLimitLayer::new(config.server.max_body_bytes))
        .with_state(state);

    Ok(app)
}

/// Run the relay server until shutdown
pub async fn run(config: RelayConfig) -> Result<()> {
    let client = OpenRouterClient::new(config.upstream.clone())?;
    let model = client.model().to_string();
    let key_configured = client.has_api_key();
    let state = Arc::new(ApiState { client });

    let app = router(state, &config)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(
        "WikiAI Backend v{} listening on {}",
        env!("CARGO_PKG_VERSION"),
        addr
    );
    info!("  Model: {}", model);
    info!("  Endpoints:");
    info!("    POST /search - Generate article for a topic");
    info!("    GET  /health - Service health check");
    info!("    GET  /       - Service description");
    info!(
        "  OpenRouter API key configured: {}",
        if key_configured { "yes" } else { "no" }
    );

    axum::serve(listener, app).await?;

    Ok(())
}

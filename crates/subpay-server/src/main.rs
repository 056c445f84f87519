//! subpay HTTP Server
//!
//! Axum-based bridge between the storefront and the payment gateway:
//! initiate payment, check status, receive the asynchronous callback,
//! and serve the WASM frontend.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use subpay_gateway::{GatewayClient, GatewayConfig};

use crate::handlers::{health_check, initiate_payment, payment_callback, payment_status};
use crate::state::{AppState, CallbackSalt};

const DEFAULT_PORT: u16 = 5000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = GatewayConfig::from_env()?;
    tracing::info!(base_url = %config.base_url, sandbox = config.is_sandbox(), "gateway configured");

    let callback_salt = config.salt_key.clone().map(|key| CallbackSalt {
        key,
        index: config.salt_index.clone(),
    });
    if callback_salt.is_some() {
        tracing::info!("✓ Callback signature verification enabled");
    } else {
        tracing::warn!("⚠ Callback signature verification disabled");
        tracing::warn!("  Set PHONEPE_SALT_KEY and PHONEPE_SALT_INDEX in .env");
    }

    let gateway = GatewayClient::new(config)?;

    let state = AppState {
        gateway: Arc::new(gateway),
        callback_salt,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health & info
        .route("/health", get(health_check))
        // Payments
        .route("/api/payment/initiate", post(initiate_payment))
        .route("/api/payment/status/{orderId}", get(payment_status))
        .route("/api/payment/callback", post(payment_callback))
        // Static files (WASM frontend)
        .nest_service("/", tower_http::services::ServeDir::new("static"))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let listener = bind_with_fallback(port).await?;
    let addr = listener.local_addr()?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 subpay server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                        - Health check");
    tracing::info!("  POST /api/payment/initiate          - Create payment");
    tracing::info!("  GET  /api/payment/status/{{orderId}}  - Order status");
    tracing::info!("  POST /api/payment/callback          - Gateway callback");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Bind the listener, walking up from the configured port while it is busy.
///
/// Dev convenience only; the walk ends when the port space runs out.
async fn bind_with_fallback(mut port: u16) -> anyhow::Result<tokio::net::TcpListener> {
    loop {
        match tokio::net::TcpListener::bind(("0.0.0.0", port)).await {
            Ok(listener) => return Ok(listener),
            Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
                tracing::warn!(port, "port busy, trying next port");
                port = port
                    .checked_add(1)
                    .ok_or_else(|| anyhow::anyhow!("no free port available"))?;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

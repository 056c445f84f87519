//! HTTP Handlers
//!
//! Thin shims between the storefront and the gateway client: validate,
//! delegate, shape the response. Gateway errors surface as a generic 500
//! while the detail goes to the trace log.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use subpay_gateway::{signature, PaymentMode, Plan};

use crate::state::AppState;

/// Callback route path, part of the signed checksum input.
pub const CALLBACK_PATH: &str = "/api/payment/callback";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub callback_verification: bool,
}

#[derive(Debug, Deserialize)]
pub struct InitiateRequest {
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default, rename = "paymentMode")]
    pub payment_mode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn reject(status: StatusCode, error: &str, code: &str) -> HandlerError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        callback_verification: state.callback_salt.is_some(),
    })
}

/// Initiate a payment for the selected plan
///
/// Returns the gateway payload verbatim with `checkoutUrl` and `orderId`
/// merged in. Unknown plans are rejected before any outbound call.
pub async fn initiate_payment(
    State(state): State<AppState>,
    Json(payload): Json<InitiateRequest>,
) -> Result<Json<Value>, HandlerError> {
    let Some(plan) = payload.plan.as_deref().and_then(Plan::parse) else {
        tracing::warn!(plan = ?payload.plan, "rejected unknown plan");
        return Err(reject(StatusCode::BAD_REQUEST, "Invalid Plan", "INVALID_PLAN"));
    };

    let mode = payload
        .payment_mode
        .as_deref()
        .map(PaymentMode::parse)
        .unwrap_or_default();

    let session = state
        .gateway
        .create_payment(plan, plan.price_rupees(), mode)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, plan = plan.as_str(), "payment initiation failed");
            reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Payment initiation failed",
                "INITIATE_FAILED",
            )
        })?;

    Ok(Json(session.into_json()))
}

/// Query payment status for an order
pub async fn payment_status(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Value>, HandlerError> {
    if order_id.trim().is_empty() {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            "Order ID is required",
            "MISSING_ORDER_ID",
        ));
    }

    let status = state.gateway.get_status(&order_id).await.map_err(|e| {
        tracing::error!(error = %e, %order_id, "status check failed");
        reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to check payment status",
            "STATUS_FAILED",
        )
    })?;

    Ok(Json(status))
}

/// Receive the gateway's asynchronous payment notification
///
/// When a salt key is configured the `X-VERIFY` checksum is mandatory;
/// without one, unsigned callbacks are accepted with a warning.
pub async fn payment_callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<Value>, HandlerError> {
    if let Some(salt) = &state.callback_salt {
        let Some(header) = headers.get("x-verify").and_then(|v| v.to_str().ok()) else {
            tracing::warn!("callback rejected: missing X-VERIFY header");
            return Err(reject(
                StatusCode::BAD_REQUEST,
                "Missing callback signature",
                "MISSING_SIGNATURE",
            ));
        };

        if !signature::verify(header, &body, CALLBACK_PATH, &salt.key, &salt.index) {
            tracing::warn!("callback rejected: X-VERIFY mismatch");
            return Err(reject(
                StatusCode::UNAUTHORIZED,
                "Invalid callback signature",
                "INVALID_SIGNATURE",
            ));
        }
    } else {
        tracing::warn!("callback accepted unverified; set PHONEPE_SALT_KEY to enforce X-VERIFY");
    }

    let payload: Value = serde_json::from_str(&body).map_err(|_| {
        reject(
            StatusCode::BAD_REQUEST,
            "Malformed callback body",
            "BAD_JSON",
        )
    })?;

    tracing::info!(%payload, "gateway callback received");

    Ok(Json(serde_json::json!({ "status": "received" })))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::Request,
        routing::{get, post},
        Router,
    };
    use tower::ServiceExt;

    use subpay_gateway::{
        derive_checkout_url, GatewayError, PaymentGateway, PaymentSession,
    };

    use super::*;
    use crate::state::CallbackSalt;

    const SANDBOX_BASE: &str = "https://api-preprod.phonepe.com/apis/pg-sandbox";

    #[derive(Default)]
    struct MockGateway {
        create_calls: AtomicUsize,
        status_calls: AtomicUsize,
        last_create: Mutex<Option<(Plan, i64, PaymentMode)>>,
        session: Option<PaymentSession>,
        status: Option<Value>,
    }

    #[async_trait]
    impl PaymentGateway for MockGateway {
        async fn create_payment(
            &self,
            plan: Plan,
            amount_rupees: i64,
            mode: PaymentMode,
        ) -> subpay_gateway::Result<PaymentSession> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_create.lock().unwrap() = Some((plan, amount_rupees, mode));
            self.session
                .clone()
                .ok_or_else(|| GatewayError::Api("gateway unavailable".into()))
        }

        async fn get_status(&self, _order_id: &str) -> subpay_gateway::Result<Value> {
            self.status_calls.fetch_add(1, Ordering::SeqCst);
            self.status
                .clone()
                .ok_or_else(|| GatewayError::Api("gateway unavailable".into()))
        }
    }

    fn app(gateway: Arc<MockGateway>, salt: Option<CallbackSalt>) -> Router {
        let state = AppState {
            gateway,
            callback_salt: salt,
        };
        Router::new()
            .route("/health", get(health_check))
            .route("/api/payment/initiate", post(initiate_payment))
            .route("/api/payment/status/{orderId}", get(payment_status))
            .route("/api/payment/callback", post(payment_callback))
            .with_state(state)
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_plan_returns_400_without_outbound_call() {
        let mock = Arc::new(MockGateway::default());
        let app = app(mock.clone(), None);

        let response = app
            .oneshot(json_post("/api/payment/initiate", r#"{"plan":"ENTERPRISE"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid Plan");
        assert_eq!(mock.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_plan_returns_400() {
        let mock = Arc::new(MockGateway::default());
        let app = app(mock.clone(), None);

        let response = app
            .oneshot(json_post("/api/payment/initiate", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(mock.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_mode_defaults_to_pay_page() {
        let mock = Arc::new(MockGateway {
            session: Some(PaymentSession {
                order_id: "OMO1".into(),
                checkout_url: "https://checkout-preprod.phonepe.com/v2/pay?orderId=OMO1".into(),
                raw: serde_json::json!({ "orderId": "OMO1" }),
            }),
            ..Default::default()
        });
        let app = app(mock.clone(), None);

        let response = app
            .oneshot(json_post("/api/payment/initiate", r#"{"plan":"BASIC"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let recorded = *mock.last_create.lock().unwrap();
        let (plan, amount, mode) = recorded.unwrap();
        assert_eq!(plan, Plan::Basic);
        assert_eq!(amount, 199);
        assert_eq!(mode, PaymentMode::PayPage);
    }

    #[tokio::test]
    async fn test_initiate_pro_upi_reconstructs_checkout_url() {
        // Gateway answered with a redirect URL on the API host, so the
        // checkout URL must be rebuilt from the order id.
        let api_redirect = "https://api-preprod.phonepe.com/apis/pg-sandbox/checkout/v2/pay";
        let mock = Arc::new(MockGateway {
            session: Some(PaymentSession {
                order_id: "OMO123".into(),
                checkout_url: derive_checkout_url(Some(api_redirect), "OMO123", SANDBOX_BASE),
                raw: serde_json::json!({
                    "orderId": "OMO123",
                    "redirectUrl": api_redirect,
                    "state": "PENDING",
                }),
            }),
            ..Default::default()
        });
        let app = app(mock.clone(), None);

        let response = app
            .oneshot(json_post(
                "/api/payment/initiate",
                r#"{"plan":"PRO","paymentMode":"UPI"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(
            body["checkoutUrl"],
            "https://checkout-preprod.phonepe.com/v2/pay?orderId=OMO123"
        );
        assert_eq!(body["orderId"], "OMO123");
        assert_eq!(body["state"], "PENDING");

        let recorded = *mock.last_create.lock().unwrap();
        let (plan, amount, mode) = recorded.unwrap();
        assert_eq!(plan, Plan::Pro);
        assert_eq!(amount, 499);
        assert_eq!(mode, PaymentMode::Upi);
    }

    #[tokio::test]
    async fn test_initiate_maps_gateway_failure_to_500() {
        let mock = Arc::new(MockGateway::default()); // no session -> error
        let app = app(mock, None);

        let response = app
            .oneshot(json_post("/api/payment/initiate", r#"{"plan":"PRO"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Payment initiation failed");
    }

    #[tokio::test]
    async fn test_status_returns_raw_gateway_payload() {
        let mock = Arc::new(MockGateway {
            status: Some(serde_json::json!({
                "orderId": "OMO123",
                "state": "COMPLETED",
                "amount": 49900,
            })),
            ..Default::default()
        });
        let app = app(mock.clone(), None);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/payment/status/OMO123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["state"], "COMPLETED");
        assert_eq!(mock.status_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_status_with_blank_order_id_returns_400() {
        let mock = Arc::new(MockGateway::default());
        let app = app(mock.clone(), None);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/payment/status/%20")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Order ID is required");
        assert_eq!(mock.status_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_callback_accepts_any_json_when_unsigned() {
        let app = app(Arc::new(MockGateway::default()), None);

        let response = app
            .oneshot(json_post("/api/payment/callback", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "received");
    }

    #[tokio::test]
    async fn test_callback_rejects_malformed_body() {
        let app = app(Arc::new(MockGateway::default()), None);

        let response = app
            .oneshot(json_post("/api/payment/callback", "not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_callback_verifies_signature_when_salt_configured() {
        let salt = CallbackSalt {
            key: "test-salt".into(),
            index: "1".into(),
        };
        let body = r#"{"event":"pg.order.completed"}"#;
        let header = signature::compute(body, CALLBACK_PATH, "test-salt", "1");

        let app_signed = app(Arc::new(MockGateway::default()), Some(salt.clone()));
        let response = app_signed
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/payment/callback")
                    .header("content-type", "application/json")
                    .header("x-verify", &header)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Tampered body fails verification
        let app_signed = app(Arc::new(MockGateway::default()), Some(salt.clone()));
        let response = app_signed
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/payment/callback")
                    .header("content-type", "application/json")
                    .header("x-verify", &header)
                    .body(Body::from(r#"{"event":"pg.order.failed"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Missing header is rejected outright
        let app_signed = app(Arc::new(MockGateway::default()), Some(salt));
        let response = app_signed
            .oneshot(json_post("/api/payment/callback", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

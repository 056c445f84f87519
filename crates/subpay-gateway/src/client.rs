//! PhonePe Checkout v2 Client
//!
//! Token acquisition, payment creation and status queries. Each call
//! fetches a fresh bearer token; the gateway's token TTL is short enough
//! that caching buys little at this traffic level.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};
use crate::plan::{PaymentMode, Plan};

/// Path segment that marks a redirect URL as pointing at the API host
/// instead of the hosted-checkout host.
const API_PATH_SEGMENT: &str = "/apis/pg-sandbox";

/// Hosted-checkout domains. Distinct from the API domain.
const CHECKOUT_DOMAIN_SANDBOX: &str = "checkout-preprod.phonepe.com";
const CHECKOUT_DOMAIN_PROD: &str = "checkout.phonepe.com";

/// Placeholder until the storefront collects a real mobile number.
const PLACEHOLDER_MOBILE: &str = "9999999999";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Result of creating a payment
#[derive(Clone, Debug)]
pub struct PaymentSession {
    /// Gateway-assigned order id
    pub order_id: String,

    /// Hosted-checkout URL to redirect the user to
    pub checkout_url: String,

    /// Raw gateway response, returned to the caller verbatim
    pub raw: Value,
}

impl PaymentSession {
    /// Gateway payload with `checkoutUrl` and `orderId` merged in, the
    /// shape the initiate endpoint responds with.
    pub fn into_json(self) -> Value {
        let mut body = self.raw;
        body["checkoutUrl"] = Value::String(self.checkout_url);
        body["orderId"] = Value::String(self.order_id);
        body
    }
}

/// Payment gateway operations
///
/// Implemented by [`GatewayClient`]; handlers depend on the trait so tests
/// can substitute a mock.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment and derive its hosted-checkout URL
    async fn create_payment(
        &self,
        plan: Plan,
        amount_rupees: i64,
        mode: PaymentMode,
    ) -> Result<PaymentSession>;

    /// Query order status, returning the raw gateway payload
    async fn get_status(&self, order_id: &str) -> Result<Value>;
}

/// PhonePe client
pub struct GatewayClient {
    http: reqwest::Client,
    config: GatewayConfig,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl GatewayClient {
    /// Create a new client
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(GatewayConfig::from_env()?)
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Exchange client credentials for a bearer token
    async fn acquire_token(&self) -> Result<String> {
        let response = self
            .http
            .post(format!("{}/v1/oauth/token", self.config.base_url))
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("client_version", self.config.client_version.as_str()),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, %body, "token endpoint returned an error");
            return Err(GatewayError::Token(format!("token endpoint returned {status}")));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Token(format!("malformed token response: {e}")))?;

        tracing::debug!("access token received");
        Ok(token.access_token)
    }
}

#[async_trait]
impl PaymentGateway for GatewayClient {
    async fn create_payment(
        &self,
        plan: Plan,
        amount_rupees: i64,
        mode: PaymentMode,
    ) -> Result<PaymentSession> {
        // Validate before any network call
        if amount_rupees <= 0 {
            return Err(GatewayError::InvalidAmount(amount_rupees));
        }

        let token = self.acquire_token().await?;

        let merchant_order_id = new_id("ORD");
        let payload = json!({
            "merchantId": self.config.merchant_id,
            "merchantOrderId": &merchant_order_id,
            "merchantUserId": new_id("USER"),
            "amount": amount_rupees * 100,
            "redirectUrl": format!("{}/success", self.config.frontend_url),
            "redirectMode": "GET",
            "callbackUrl": format!("{}/api/payment/callback", self.config.backend_url),
            "mobileNumber": PLACEHOLDER_MOBILE,
            "paymentInstrument": { "type": mode.instrument_type() },
        });

        tracing::info!(
            plan = plan.as_str(),
            mode = mode.as_str(),
            merchant_order_id = %merchant_order_id,
            amount_rupees,
            "creating payment"
        );

        let response = self
            .http
            .post(format!("{}/checkout/v2/pay", self.config.base_url))
            .header("Authorization", format!("O-Bearer {token}"))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, %body, "payment creation failed");
            return Err(GatewayError::Api(format!("payment creation returned {status}")));
        }

        let body: Value = response.json().await?;

        let order_id = body
            .get("orderId")
            .and_then(Value::as_str)
            .ok_or(GatewayError::MissingOrderId)?
            .to_string();

        let checkout_url = derive_checkout_url(
            body.get("redirectUrl").and_then(Value::as_str),
            &order_id,
            &self.config.base_url,
        );

        tracing::info!(%order_id, %checkout_url, "payment created");

        Ok(PaymentSession {
            order_id,
            checkout_url,
            raw: body,
        })
    }

    async fn get_status(&self, order_id: &str) -> Result<Value> {
        let token = self.acquire_token().await?;

        tracing::info!(%order_id, "checking payment status");

        let response = self
            .http
            .get(format!(
                "{}/checkout/v2/order/{}/status",
                self.config.base_url, order_id
            ))
            .header("Authorization", format!("O-Bearer {token}"))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%order_id, %status, %body, "status check failed");
            return Err(GatewayError::Api(format!("status check returned {status}")));
        }

        Ok(response.json().await?)
    }
}

/// Derive the hosted-checkout URL for an order.
///
/// The gateway's `redirectUrl` is trusted only when it does not point back
/// at the API host. Otherwise the URL is rebuilt on the checkout domain,
/// picking sandbox or production from the configured API root.
pub fn derive_checkout_url(redirect_url: Option<&str>, order_id: &str, base_url: &str) -> String {
    if let Some(url) = redirect_url {
        if !url.contains(API_PATH_SEGMENT) {
            return url.to_string();
        }
    }

    let sandbox = base_url.contains("preprod") || base_url.contains("sandbox");
    let domain = if sandbox {
        CHECKOUT_DOMAIN_SANDBOX
    } else {
        CHECKOUT_DOMAIN_PROD
    };
    format!("https://{domain}/v2/pay?orderId={order_id}")
}

fn new_id(prefix: &str) -> String {
    // Random ids instead of wall-clock timestamps, which collide under
    // rapid succession.
    let hex = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
    format!("{prefix}_{}", &hex[0..16])
}

#[cfg(test)]
mod tests {
    use super::*;

    const SANDBOX_BASE: &str = "https://api-preprod.phonepe.com/apis/pg-sandbox";
    const PROD_BASE: &str = "https://api.phonepe.com/apis/pg";

    #[test]
    fn test_checkout_url_rebuilt_when_redirect_points_at_api_host() {
        let redirect = "https://api-preprod.phonepe.com/apis/pg-sandbox/checkout/v2/pay";
        let url = derive_checkout_url(Some(redirect), "OMO123", SANDBOX_BASE);
        assert_eq!(url, "https://checkout-preprod.phonepe.com/v2/pay?orderId=OMO123");
    }

    #[test]
    fn test_checkout_url_used_verbatim_when_already_on_checkout_host() {
        let redirect = "https://checkout-preprod.phonepe.com/v2/pay?orderId=OMO123";
        let url = derive_checkout_url(Some(redirect), "OMO123", SANDBOX_BASE);
        assert_eq!(url, redirect);
    }

    #[test]
    fn test_checkout_url_rebuilt_when_redirect_missing() {
        let url = derive_checkout_url(None, "OMO9", PROD_BASE);
        assert_eq!(url, "https://checkout.phonepe.com/v2/pay?orderId=OMO9");
    }

    #[test]
    fn test_production_domain_selected_for_non_sandbox_base() {
        let redirect = "https://api.phonepe.com/apis/pg-sandbox/checkout/v2/pay";
        let url = derive_checkout_url(Some(redirect), "OMO7", PROD_BASE);
        assert_eq!(url, "https://checkout.phonepe.com/v2/pay?orderId=OMO7");
    }

    #[tokio::test]
    async fn test_create_payment_rejects_non_positive_amount() {
        // Unroutable base URL: a network attempt would fail loudly, but
        // validation must reject first.
        let client = GatewayClient::new(GatewayConfig {
            client_id: "cid".into(),
            client_secret: "secret".into(),
            client_version: "1".into(),
            merchant_id: "M123".into(),
            base_url: "http://127.0.0.1:1".into(),
            frontend_url: "http://localhost:3000".into(),
            backend_url: "http://localhost:5000".into(),
            salt_key: None,
            salt_index: "1".into(),
        })
        .unwrap();

        let err = client
            .create_payment(Plan::Basic, 0, PaymentMode::PayPage)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidAmount(0)));

        let err = client
            .create_payment(Plan::Basic, -199, PaymentMode::PayPage)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidAmount(-199)));
    }

    #[test]
    fn test_session_json_carries_checkout_url_and_order_id() {
        let session = PaymentSession {
            order_id: "OMO123".into(),
            checkout_url: "https://checkout-preprod.phonepe.com/v2/pay?orderId=OMO123".into(),
            raw: serde_json::json!({ "orderId": "OMO123", "state": "PENDING" }),
        };

        let body = session.into_json();
        assert_eq!(body["orderId"], "OMO123");
        assert_eq!(body["state"], "PENDING");
        assert_eq!(
            body["checkoutUrl"],
            "https://checkout-preprod.phonepe.com/v2/pay?orderId=OMO123"
        );
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = new_id("ORD");
        let b = new_id("ORD");
        assert!(a.starts_with("ORD_"));
        assert_ne!(a, b);
    }
}

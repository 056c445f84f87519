//! Gateway Configuration
//!
//! An explicit struct constructed at startup and handed to the client,
//! never read from ambient global state.

use crate::error::{GatewayError, Result};

/// Gateway credentials and URL roots
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// OAuth client id
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: String,

    /// OAuth client version (gateway-assigned)
    pub client_version: String,

    /// Merchant id registered with the gateway
    pub merchant_id: String,

    /// Gateway API root, e.g. `https://api-preprod.phonepe.com/apis/pg-sandbox`
    pub base_url: String,

    /// Storefront root, used for the post-payment redirect
    pub frontend_url: String,

    /// This service's public root, used for the callback URL
    pub backend_url: String,

    /// Salt key for callback checksum verification (None disables it)
    pub salt_key: Option<String>,

    /// Salt index paired with the salt key
    pub salt_index: String,
}

impl GatewayConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client_id: required("PHONEPE_CLIENT_ID")?,
            client_secret: required("PHONEPE_CLIENT_SECRET")?,
            client_version: required("PHONEPE_CLIENT_VERSION")?,
            merchant_id: required("PHONEPE_MERCHANT_ID")?,
            base_url: required("PHONEPE_BASE_URL")?,
            frontend_url: required("FRONTEND_URL")?,
            backend_url: required("BACKEND_URL")?,
            salt_key: std::env::var("PHONEPE_SALT_KEY").ok(),
            salt_index: std::env::var("PHONEPE_SALT_INDEX").unwrap_or_else(|_| "1".into()),
        })
    }

    /// Whether the sandbox/preprod environment is configured.
    ///
    /// The gateway gives no structured environment indicator, so this is
    /// a substring heuristic on the API root.
    pub fn is_sandbox(&self) -> bool {
        self.base_url.contains("preprod") || self.base_url.contains("sandbox")
    }
}

fn required(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| GatewayError::Config(format!("{name} not set")))
}

//! Gateway Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Payment-gateway errors
#[derive(Error, Debug)]
pub enum GatewayError {
    /// OAuth token acquisition failed
    #[error("Token acquisition failed: {0}")]
    Token(String),

    /// Gateway API returned an error response
    #[error("Gateway error: {0}")]
    Api(String),

    /// Amount failed validation before any network call
    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),

    /// Gateway response carried no order id
    #[error("Gateway did not return an order ID")]
    MissingOrderId,

    /// Callback checksum did not match
    #[error("Callback signature invalid")]
    InvalidSignature,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GatewayError {
    /// Get user-friendly message
    ///
    /// Handlers surface this instead of the internal detail, which goes to
    /// the trace log only.
    pub fn user_message(&self) -> &str {
        match self {
            GatewayError::InvalidAmount(_) => "Invalid payment amount.",
            GatewayError::InvalidSignature => "Callback signature could not be verified.",
            GatewayError::Config(_) => "Service configuration error.",
            _ => "Payment processing failed. Please try again.",
        }
    }
}

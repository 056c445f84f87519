//! Application State

use std::sync::Arc;

use subpay_gateway::PaymentGateway;

/// Salt pair for callback checksum verification
#[derive(Clone)]
pub struct CallbackSalt {
    pub key: String,
    pub index: String,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment gateway client
    pub gateway: Arc<dyn PaymentGateway>,

    /// Callback verification salt (None accepts unsigned callbacks)
    pub callback_salt: Option<CallbackSalt>,
}

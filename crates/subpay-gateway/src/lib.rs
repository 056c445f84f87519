//! # subpay-gateway
//!
//! PhonePe payment gateway client for subpay.
//!
//! Implements the hosted-checkout flow against the PhonePe Checkout v2 API:
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌─────────────┐
//! │  Your Site  │────▶│  PhonePe Hosted  │────▶│  Your Site  │
//! │   (plans)   │     │  Checkout Page   │     │  (/success) │
//! └─────────────┘     └──────────────────┘     └─────────────┘
//! ```
//!
//! Each operation is a short sequence of API calls:
//!
//! 1. Exchange client credentials for an OAuth bearer token.
//! 2. `POST /checkout/v2/pay` with the order payload.
//! 3. Derive the hosted-checkout URL. The API host and the checkout host
//!    are different domains, and the gateway sometimes returns a redirect
//!    URL pointing back at the API host; in that case the checkout URL is
//!    reconstructed from the order id.
//! 4. `GET /checkout/v2/order/{id}/status` for reconciliation.
//!
//! Asynchronous callbacks from the gateway carry an `X-VERIFY` checksum
//! header which [`signature`] verifies.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use subpay_gateway::{GatewayClient, GatewayConfig, PaymentGateway, Plan, PaymentMode};
//!
//! let client = GatewayClient::new(GatewayConfig::from_env()?)?;
//!
//! let session = client
//!     .create_payment(Plan::Pro, Plan::Pro.price_rupees(), PaymentMode::PayPage)
//!     .await?;
//!
//! // Redirect user to: session.checkout_url
//! ```

mod client;
mod config;
mod error;
mod plan;
pub mod signature;

pub use client::{derive_checkout_url, GatewayClient, PaymentGateway, PaymentSession};
pub use config::GatewayConfig;
pub use error::{GatewayError, Result};
pub use plan::{PaymentMode, Plan};

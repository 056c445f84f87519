//! Subscription Plans and Payment Modes
//!
//! The plan table is the authoritative price source. The frontend carries
//! its own display copy of the same table.

use serde::{Deserialize, Serialize};

/// Subscription plan tiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Plan {
    Basic,
    Pro,
    Premium,
}

impl Plan {
    /// Strict parse of the wire identifier. Unknown plans are rejected,
    /// they never fall back to a default.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "BASIC" => Some(Plan::Basic),
            "PRO" => Some(Plan::Pro),
            "PREMIUM" => Some(Plan::Premium),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Basic => "BASIC",
            Plan::Pro => "PRO",
            Plan::Premium => "PREMIUM",
        }
    }

    /// Price in whole rupees. The gateway payload converts this to paise.
    pub fn price_rupees(&self) -> i64 {
        match self {
            Plan::Basic => 199,
            Plan::Pro => 499,
            Plan::Premium => 999,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Plan::Basic => "Basic Plan",
            Plan::Pro => "Pro Plan",
            Plan::Premium => "Premium Plan",
        }
    }
}

/// Payment mode selected on the frontend.
///
/// Everything except `UpiIntent` collapses onto the generic hosted-page
/// instrument. The selector is forwarded untouched so an eventual
/// per-mode instrument mapping stays a one-line change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMode {
    #[default]
    PayPage,
    Upi,
    Card,
    Wallet,
    NetBanking,
    UpiIntent,
}

impl PaymentMode {
    /// Parse the wire identifier, defaulting to the hosted page.
    pub fn parse(s: &str) -> Self {
        match s {
            "UPI" => PaymentMode::Upi,
            "CARD" => PaymentMode::Card,
            "WALLET" => PaymentMode::Wallet,
            "NET_BANKING" => PaymentMode::NetBanking,
            "UPI_INTENT" => PaymentMode::UpiIntent,
            _ => PaymentMode::PayPage,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::PayPage => "PAY_PAGE",
            PaymentMode::Upi => "UPI",
            PaymentMode::Card => "CARD",
            PaymentMode::Wallet => "WALLET",
            PaymentMode::NetBanking => "NET_BANKING",
            PaymentMode::UpiIntent => "UPI_INTENT",
        }
    }

    /// Gateway instrument descriptor for this mode.
    pub fn instrument_type(&self) -> &'static str {
        match self {
            PaymentMode::UpiIntent => "UPI_INTENT",
            _ => "PAY_PAGE",
        }
    }
}

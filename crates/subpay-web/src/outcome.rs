//! Payment Outcome Classification
//!
//! The gateway reports status through three differently-named fields
//! (`state`, `code`, `transactionStatus`) depending on where the payload
//! came from. Classification is a single pure function over all three:
//! `state` is authoritative when it carries a recognized value, then
//! `code`, then `transactionStatus`. A value none of them recognize is
//! `Unknown`, never silently a success.

/// Closed set of payment outcomes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentOutcome {
    Succeeded,
    Pending,
    Failed,
    Unknown,
}

impl PaymentOutcome {
    /// Classify a status payload from its three reporting fields.
    pub fn classify(
        state: Option<&str>,
        code: Option<&str>,
        transaction_status: Option<&str>,
    ) -> Self {
        state
            .and_then(from_field)
            .or_else(|| code.and_then(from_field))
            .or_else(|| transaction_status.and_then(from_field))
            .unwrap_or(PaymentOutcome::Unknown)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PaymentOutcome::Succeeded)
    }
}

fn from_field(value: &str) -> Option<PaymentOutcome> {
    match value {
        "COMPLETED" | "SUCCESS" => Some(PaymentOutcome::Succeeded),
        "FAILED" | "FAILURE" | "PAYMENT_ERROR" => Some(PaymentOutcome::Failed),
        "PENDING" | "PROCESSING" | "INITIATED" => Some(PaymentOutcome::Pending),
        _ => None,
    }
}

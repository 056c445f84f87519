//! Result-Page Reconciliation
//!
//! The result page has three mutually exclusive data sources, tried in
//! order: the gateway's return-URL parameters, a single backend status
//! poll keyed by the session-stored order id, and a synthesized pending
//! placeholder. [`resolve`] picks the source; each source maps into the
//! same [`Receipt`] display shape.

use serde_json::Value;

use crate::outcome::PaymentOutcome;
use crate::session::StoredOrder;

/// Query parameters the gateway appends on redirect
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryFields {
    pub order_id: Option<String>,
    pub merchant_order_id: Option<String>,
    pub transaction_id: Option<String>,
    pub amount: Option<String>,
    pub state: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
    pub payment_mode: Option<String>,
    pub transaction_status: Option<String>,
}

/// One receipt, whatever the source
#[derive(Clone, Debug, PartialEq)]
pub struct Receipt {
    pub order_id: String,
    pub transaction_id: String,
    pub amount: String,
    pub plan_name: String,
    pub payment_mode: String,
    pub state: Option<String>,
    pub code: Option<String>,
    pub transaction_status: Option<String>,
    pub message: String,
    pub date: String,
}

/// Which source feeds the receipt
#[derive(Clone, Debug, PartialEq)]
pub enum ReceiptSource {
    /// Return-URL parameters; no backend call needed
    Redirect(Receipt),
    /// Session-stored order id; poll the status endpoint exactly once
    Poll { order_id: String },
    /// Nothing to go on; synthesized pending receipt
    Placeholder(Receipt),
}

/// Pick the data source for the result page.
pub fn resolve(query: &QueryFields, stored: Option<&StoredOrder>, date: &str) -> ReceiptSource {
    if query.order_id.is_some() {
        return ReceiptSource::Redirect(Receipt::from_redirect(query, stored, date));
    }

    if let Some(order) = stored {
        return ReceiptSource::Poll {
            order_id: order.order_id.clone(),
        };
    }

    ReceiptSource::Placeholder(Receipt::placeholder(date))
}

impl Receipt {
    /// Classify this receipt's payment outcome.
    ///
    /// Status fields are kept exactly as received. A redirect that names
    /// no recognizable status is `Unknown`, never assumed successful.
    pub fn outcome(&self) -> PaymentOutcome {
        PaymentOutcome::classify(
            self.state.as_deref(),
            self.code.as_deref(),
            self.transaction_status.as_deref(),
        )
    }

    /// Status text for the receipt badge
    pub fn status_label(&self) -> String {
        self.state
            .clone()
            .or_else(|| self.transaction_status.clone())
            .or_else(|| self.code.clone())
            .unwrap_or_else(|| "PENDING".into())
    }

    /// Build from the gateway's return-URL parameters.
    pub fn from_redirect(query: &QueryFields, stored: Option<&StoredOrder>, date: &str) -> Self {
        let order_id = query
            .order_id
            .clone()
            .or_else(|| query.merchant_order_id.clone())
            .or_else(|| stored.map(|o| o.order_id.clone()))
            .unwrap_or_else(|| "N/A".into());

        Self {
            order_id,
            transaction_id: query.transaction_id.clone().unwrap_or_else(|| "N/A".into()),
            amount: display_amount(query.amount.as_deref().and_then(parse_paise), stored),
            plan_name: plan_name(stored),
            payment_mode: stored
                .map(|o| o.payment_mode.clone())
                .or_else(|| query.payment_mode.clone())
                .unwrap_or_else(|| "Online".into()),
            state: query.state.clone(),
            code: query.code.clone(),
            transaction_status: query.transaction_status.clone(),
            message: query
                .message
                .clone()
                .unwrap_or_else(|| "Payment details received.".into()),
            date: date.into(),
        }
    }

    /// Build from the raw status payload returned by the backend poll.
    pub fn from_status(status: &Value, stored: Option<&StoredOrder>, date: &str) -> Self {
        let field = |name: &str| status.get(name).and_then(Value::as_str).map(String::from);

        Self {
            order_id: field("orderId")
                .or_else(|| stored.map(|o| o.order_id.clone()))
                .unwrap_or_else(|| "N/A".into()),
            transaction_id: field("transactionId")
                .or_else(|| {
                    status
                        .pointer("/paymentDetails/transactionId")
                        .and_then(Value::as_str)
                        .map(String::from)
                })
                .unwrap_or_else(|| "N/A".into()),
            amount: display_amount(status.get("amount").and_then(Value::as_i64), stored),
            plan_name: plan_name(stored),
            payment_mode: field("paymentMode")
                .or_else(|| {
                    status
                        .pointer("/paymentDetails/paymentMode")
                        .and_then(Value::as_str)
                        .map(String::from)
                })
                .unwrap_or_else(|| "Online".into()),
            state: field("state").or_else(|| field("status")),
            code: field("code"),
            transaction_status: field("status"),
            message: field("message").unwrap_or_else(|| "Payment status retrieved.".into()),
            date: date.into(),
        }
    }

    /// Receipt shown when the status poll itself fails.
    pub fn poll_failed(stored: Option<&StoredOrder>, date: &str) -> Self {
        Self {
            order_id: stored
                .map(|o| o.order_id.clone())
                .unwrap_or_else(|| "N/A".into()),
            transaction_id: "Pending Confirmation".into(),
            amount: display_amount(None, stored),
            plan_name: plan_name(stored),
            payment_mode: stored
                .map(|o| o.payment_mode.clone())
                .unwrap_or_else(|| "Online".into()),
            state: Some("PROCESSING".into()),
            code: Some("PENDING".into()),
            transaction_status: Some("PENDING".into()),
            message: "Payment is being verified. You will receive a confirmation shortly.".into(),
            date: date.into(),
        }
    }

    /// Receipt shown when neither query parameters nor session data exist.
    pub fn placeholder(date: &str) -> Self {
        Self {
            order_id: "N/A".into(),
            transaction_id: "N/A".into(),
            amount: "N/A".into(),
            plan_name: "Subscription".into(),
            payment_mode: "Online".into(),
            state: Some("INITIATED".into()),
            code: Some("PENDING".into()),
            transaction_status: Some("PENDING".into()),
            message: "Payment initiated. Awaiting confirmation.".into(),
            date: date.into(),
        }
    }
}

/// Local date-time label for receipts
pub fn now_label() -> String {
    chrono::Local::now().format("%d %B %Y, %H:%M").to_string()
}

fn plan_name(stored: Option<&StoredOrder>) -> String {
    stored
        .map(|o| o.plan_name.clone())
        .unwrap_or_else(|| "Subscription".into())
}

fn parse_paise(s: &str) -> Option<i64> {
    s.parse().ok()
}

/// Gateway amounts are in paise; the session copy is in rupees.
fn display_amount(paise: Option<i64>, stored: Option<&StoredOrder>) -> String {
    if let Some(paise) = paise {
        #[allow(clippy::cast_precision_loss)]
        return format!("₹ {:.2}", paise as f64 / 100.0);
    }
    stored
        .map(|o| format!("₹ {}", o.amount))
        .unwrap_or_else(|| "N/A".into())
}

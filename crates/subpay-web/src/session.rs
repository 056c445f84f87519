//! Browser-Session Order Storage
//!
//! The only client-side persistence: one JSON blob mirroring the order the
//! user just initiated, cleared on return to the plans page.

use serde::{Deserialize, Serialize};

const ORDER_DETAILS_KEY: &str = "orderDetails";

/// Denormalized copy of an initiated order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredOrder {
    pub order_id: String,
    pub amount: i64,
    pub plan_name: String,
    pub payment_mode: String,
    pub date: String,
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.session_storage().ok().flatten()
}

/// Persist order details for the result page
pub fn store(order: &StoredOrder) {
    if let (Some(storage), Ok(json)) = (storage(), serde_json::to_string(order)) {
        let _ = storage.set_item(ORDER_DETAILS_KEY, &json);
    }
}

/// Load the stored order, if any
pub fn load() -> Option<StoredOrder> {
    storage()?
        .get_item(ORDER_DETAILS_KEY)
        .ok()
        .flatten()
        .and_then(|json| serde_json::from_str(&json).ok())
}

/// Clear the stored order
pub fn clear() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(ORDER_DETAILS_KEY);
    }
}

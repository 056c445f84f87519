//! API Client

use serde_json::Value;

/// Successful initiate response, reduced to what the storefront needs
#[derive(Clone, Debug)]
pub struct InitiateResponse {
    pub checkout_url: String,
    pub order_id: String,
}

/// Create a payment for the selected plan and mode
pub async fn initiate_payment(plan: &str, mode: &str) -> Result<InitiateResponse, String> {
    let client = reqwest::Client::new();

    let body = serde_json::json!({
        "plan": plan,
        "paymentMode": mode,
    });

    let response = client
        .post("/api/payment/initiate")
        .json(&body)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        let data: Value = response.json().await.map_err(|e| e.to_string())?;

        let checkout_url = data["checkoutUrl"].as_str().unwrap_or("").to_string();
        if checkout_url.is_empty() {
            return Err("Payment URL not received from server.".into());
        }

        let order_id = data["orderId"]
            .as_str()
            .or_else(|| data["merchantOrderId"].as_str())
            .unwrap_or("")
            .to_string();

        Ok(InitiateResponse {
            checkout_url,
            order_id,
        })
    } else {
        let data: Value = response.json().await.unwrap_or_default();
        Err(data["error"]
            .as_str()
            .unwrap_or("Payment failed. Please try again.")
            .to_string())
    }
}

/// Fetch the raw status payload for an order
pub async fn fetch_status(order_id: &str) -> Result<Value, String> {
    let client = reqwest::Client::new();

    let response = client
        .get(format!("/api/payment/status/{order_id}"))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        response.json().await.map_err(|e| e.to_string())
    } else {
        Err("Failed to fetch payment status".into())
    }
}

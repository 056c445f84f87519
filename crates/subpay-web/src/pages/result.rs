//! Result Page
//!
//! Rendered when the gateway redirects back to `/success`. Resolution of
//! the data source lives in [`crate::receipt`]; this component only wires
//! it to the view and fires the single status poll when needed.

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::api;
use crate::components::ReceiptCard;
use crate::receipt::{now_label, resolve, QueryFields, Receipt, ReceiptSource};
use crate::session;

#[component]
pub fn ResultPage() -> impl IntoView {
    let query = use_query_map();
    let (receipt, set_receipt) = signal(None::<Receipt>);

    // Resolve once on mount; CSR navigation recreates the component.
    let q = query.get_untracked();
    let fields = QueryFields {
        order_id: q.get("orderId"),
        merchant_order_id: q.get("merchantOrderId"),
        transaction_id: q.get("transactionId"),
        amount: q.get("amount"),
        state: q.get("state"),
        code: q.get("code"),
        message: q.get("message"),
        payment_mode: q.get("paymentMode"),
        transaction_status: q.get("transactionStatus"),
    };
    let stored = session::load();

    match resolve(&fields, stored.as_ref(), &now_label()) {
        ReceiptSource::Redirect(resolved) | ReceiptSource::Placeholder(resolved) => {
            set_receipt.set(Some(resolved));
        }
        ReceiptSource::Poll { order_id } => {
            leptos::task::spawn_local(async move {
                let date = now_label();
                let resolved = match api::fetch_status(&order_id).await {
                    Ok(status) => Receipt::from_status(&status, stored.as_ref(), &date),
                    Err(_) => Receipt::poll_failed(stored.as_ref(), &date),
                };
                set_receipt.set(Some(resolved));
            });
        }
    }

    view! {
        <div class="success-container">
            <Show
                when=move || receipt.get().is_some()
                fallback=|| {
                    view! {
                        <div class="success-card">
                            <div class="loading-spinner"></div>
                            <h2>"Verifying Payment Details..."</h2>
                            <p>"Please wait while we confirm your payment"</p>
                        </div>
                    }
                }
            >
                {move || receipt.get().map(|r| view! { <ReceiptCard receipt=r /> })}
            </Show>
        </div>
    }
}

//! Plans Page

use leptos::prelude::*;

use crate::api;
use crate::components::BankTransferPanel;
use crate::receipt::now_label;
use crate::session::{self, StoredOrder};

struct PlanInfo {
    id: &'static str,
    name: &'static str,
    price: i64,
}

// Display copy of the plan table; the backend table is authoritative.
static PLANS: [PlanInfo; 3] = [
    PlanInfo { id: "BASIC", name: "Basic Plan", price: 199 },
    PlanInfo { id: "PRO", name: "Pro Plan", price: 499 },
    PlanInfo { id: "PREMIUM", name: "Premium Plan", price: 999 },
];

static MODES: [(&str, &str); 7] = [
    ("PAY_PAGE", "Hosted page"),
    ("UPI", "UPI"),
    ("CARD", "Card"),
    ("WALLET", "Wallet"),
    ("NET_BANKING", "Net banking"),
    ("UPI_INTENT", "UPI intent"),
    ("BANK_TRANSFER", "Bank transfer"),
];

#[component]
pub fn PlansPage() -> impl IntoView {
    let (error_msg, set_error_msg) = signal(String::new());
    let (loading, set_loading) = signal(false);
    let (mode, set_mode) = signal("PAY_PAGE".to_string());
    let (bank_transfer, set_bank_transfer) = signal(None::<(&'static str, i64)>);

    let subscribe = move |plan: &'static PlanInfo| {
        if loading.get() {
            return;
        }
        set_error_msg.set(String::new());

        let selected_mode = mode.get();
        if selected_mode == "BANK_TRANSFER" {
            set_bank_transfer.set(Some((plan.name, plan.price)));
            return;
        }

        set_loading.set(true);
        leptos::task::spawn_local(async move {
            match api::initiate_payment(plan.id, &selected_mode).await {
                Ok(response) => {
                    session::store(&StoredOrder {
                        order_id: response.order_id,
                        amount: plan.price,
                        plan_name: plan.name.into(),
                        payment_mode: selected_mode,
                        date: now_label(),
                    });
                    // Hand off to the hosted checkout page; in-page state
                    // is gone after this.
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href(&response.checkout_url);
                    }
                }
                Err(e) => {
                    set_error_msg.set(e);
                    set_loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="container">
            <h1>"Choose Your Plan"</h1>

            <Show when=move || !error_msg.get().is_empty()>
                <p class="error">{move || error_msg.get()}</p>
            </Show>

            <div class="field">
                <label>"Payment method"</label>
                <select on:change=move |ev| set_mode.set(event_target_value(&ev))>
                    {MODES
                        .iter()
                        .map(|(value, label)| {
                            view! {
                                <option value=*value selected=move || mode.get() == *value>
                                    {*label}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <div class="plans">
                {PLANS
                    .iter()
                    .map(|plan| {
                        view! {
                            <div class="card">
                                <h2>{plan.name}</h2>
                                <p class="price">"₹ " {plan.price}</p>
                                <button
                                    on:click=move |_| subscribe(plan)
                                    disabled=move || loading.get()
                                >
                                    {move || if loading.get() { "Processing..." } else { "Subscribe" }}
                                </button>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>

            {move || {
                bank_transfer
                    .get()
                    .map(|(name, price)| {
                        view! {
                            <BankTransferPanel
                                plan_name=name.to_string()
                                amount=price
                                on_close=Callback::new(move |()| set_bank_transfer.set(None))
                            />
                        }
                    })
            }}
        </div>
    }
}

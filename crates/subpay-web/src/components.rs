//! UI Components

use leptos::prelude::*;

use crate::outcome::PaymentOutcome;
use crate::receipt::Receipt;
use crate::session;

/// Transaction receipt card
#[component]
pub fn ReceiptCard(receipt: Receipt) -> impl IntoView {
    let (icon, tone, title) = match receipt.outcome() {
        PaymentOutcome::Succeeded => ("✓", "success", "Payment Successful!"),
        PaymentOutcome::Failed => ("✗", "failed", "Payment Failed"),
        PaymentOutcome::Pending | PaymentOutcome::Unknown => ("⏳", "pending", "Payment Status"),
    };
    let status_label = receipt.status_label();

    let back_to_plans = move |_| {
        session::clear();
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/");
        }
    };

    let print_receipt = move |_| {
        if let Some(window) = web_sys::window() {
            let _ = window.print();
        }
    };

    view! {
        <div class="success-card">
            <div class=format!("success-icon {tone}")>{icon}</div>
            <h1>{title}</h1>

            <div class="payment-details">
                <h3>"Transaction Details"</h3>
                <table class="details-table">
                    <tbody>
                        <tr>
                            <td class="label">"Order ID"</td>
                            <td class="value order-id">{receipt.order_id.clone()}</td>
                        </tr>
                        <tr>
                            <td class="label">"Transaction ID"</td>
                            <td class="value">{receipt.transaction_id.clone()}</td>
                        </tr>
                        <tr>
                            <td class="label">"Plan"</td>
                            <td class="value">{receipt.plan_name.clone()}</td>
                        </tr>
                        <tr>
                            <td class="label">"Amount Paid"</td>
                            <td class="value amount">{receipt.amount.clone()}</td>
                        </tr>
                        <tr>
                            <td class="label">"Payment Mode"</td>
                            <td class="value">{receipt.payment_mode.clone()}</td>
                        </tr>
                        <tr>
                            <td class="label">"Status"</td>
                            <td class="value">
                                <span class=format!("status-badge {tone}")>{status_label}</span>
                            </td>
                        </tr>
                        <tr>
                            <td class="label">"Date & Time"</td>
                            <td class="value">{receipt.date.clone()}</td>
                        </tr>
                        <tr>
                            <td class="label">"Message"</td>
                            <td class="value">{receipt.message.clone()}</td>
                        </tr>
                    </tbody>
                </table>
            </div>

            <div class="info-section">
                <p>"🎉 Thank you for your subscription!"</p>
                <p>"A confirmation email will be sent to your registered email address."</p>
            </div>

            <div class="button-group">
                <button class="back-button" on:click=back_to_plans>
                    "← Back to Plans"
                </button>
                <button class="print-button" on:click=print_receipt>
                    "🖨️ Print Receipt"
                </button>
            </div>
        </div>
    }
}

/// Static instructions for the bank-transfer path, which never touches the
/// gateway.
#[component]
pub fn BankTransferPanel(
    plan_name: String,
    amount: i64,
    on_close: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="bank-transfer">
            <h2>"Bank Transfer"</h2>
            <p>
                "Transfer ₹ " {amount} " for the " {plan_name}
                " to the account below and your subscription will be activated "
                "within one business day."
            </p>
            <table class="details-table">
                <tbody>
                    <tr>
                        <td class="label">"Account Name"</td>
                        <td class="value">"Subpay Subscriptions"</td>
                    </tr>
                    <tr>
                        <td class="label">"Account Number"</td>
                        <td class="value">"0123 4567 8901"</td>
                    </tr>
                    <tr>
                        <td class="label">"IFSC"</td>
                        <td class="value">"SUBP0000123"</td>
                    </tr>
                    <tr>
                        <td class="label">"Reference"</td>
                        <td class="value">"Your email address"</td>
                    </tr>
                </tbody>
            </table>
            <p class="note">"Email the transfer receipt to billing@example.com to speed things up."</p>
            <button class="back-button" on:click=move |_| on_close.run(())>
                "← Back"
            </button>
        </div>
    }
}

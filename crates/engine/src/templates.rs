//! Subject and body templates, one per notification kind.
//!
//! The exact wording is a contract: downstream consumers and the contract
//! tests assert on these literal strings, so changes here are breaking.

/// Render the order confirmation message.
pub fn order_confirmation(order_id: i64) -> (String, String) {
    (
        format!("Order Confirmation - Order #{order_id}"),
        format!(
            "Thank you for your order! Your order #{order_id} has been confirmed and is being \
             processed. You will receive updates as your order progresses."
        ),
    )
}

/// Render the order status update message.
pub fn order_status_update(order_id: i64, status: &str) -> (String, String) {
    (
        format!("Order Status Update - Order #{order_id}"),
        format!("Your order #{order_id} status has been updated to: {status}"),
    )
}

/// Render the order cancellation message.
pub fn order_cancellation(order_id: i64) -> (String, String) {
    (
        format!("Order Cancelled - Order #{order_id}"),
        format!(
            "Your order #{order_id} has been cancelled. If you were charged, a refund will be \
             processed within 3-5 business days."
        ),
    )
}

/// Render the payment confirmation message.
pub fn payment_confirmation(payment_id: i64, order_id: i64) -> (String, String) {
    (
        format!("Payment Confirmation - Order #{order_id}"),
        format!(
            "Your payment has been successfully processed for order #{order_id}. \
             Payment ID: {payment_id}"
        ),
    )
}

/// Render the payment failure message.
pub fn payment_failure(payment_id: i64, order_id: i64) -> (String, String) {
    (
        format!("Payment Failed - Order #{order_id}"),
        format!(
            "Payment processing failed for order #{order_id}. Please try again or use a \
             different payment method. Payment ID: {payment_id}"
        ),
    )
}

/// Render the refund confirmation message.
pub fn refund_confirmation(payment_id: i64, order_id: i64) -> (String, String) {
    (
        format!("Refund Processed - Order #{order_id}"),
        format!(
            "Your refund has been processed for order #{order_id}. You should see the refund \
             in your account within 3-5 business days. Payment ID: {payment_id}"
        ),
    )
}

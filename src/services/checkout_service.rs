use std::collections::BTreeMap;

use chrono::Utc;

use crate::{
    audit,
    cart::line_total,
    dto::checkout::{CheckoutPreviewRequest, CheckoutRequest, CheckoutTotals, PAYMENT_METHODS},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{CartState, OrderLine, OrderRecord},
    money::{format_kina, group_digits},
    notifications::{NotificationRequest, Priority},
    pricing,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Compose the payable total for a cart: cart total price, flat province
/// shipping, optional per-tank installation fee.
pub fn compose_totals(cart: &CartState, province: &str, installation_required: bool) -> CheckoutTotals {
    let subtotal = cart.total_price;
    let shipping = pricing::shipping_cost(province);
    let installation = pricing::installation_cost(installation_required, cart.total_items);
    let total = subtotal + shipping + installation;
    CheckoutTotals {
        subtotal,
        shipping,
        installation,
        total,
        total_display: format_kina(total),
    }
}

pub async fn preview(
    state: &AppState,
    user: &AuthUser,
    payload: CheckoutPreviewRequest,
) -> AppResult<ApiResponse<CheckoutTotals>> {
    let cart = state.carts.snapshot(user.user_id);
    let totals = compose_totals(&cart, &payload.province, payload.installation_required);
    Ok(ApiResponse::success(
        "Checkout totals",
        totals,
        Some(Meta::empty()),
    ))
}

/// Place the order: simulated processing delay, order number from the
/// submission time, confirmation email (best-effort), order recorded for
/// the admin dashboard, cart cleared. The cart is cleared regardless of
/// whether the email went out.
pub async fn submit(
    state: &AppState,
    user: &AuthUser,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<OrderRecord>> {
    let cart = state.carts.snapshot(user.user_id);
    if cart.items.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }
    if !PAYMENT_METHODS.contains(&payload.payment_method.as_str()) {
        return Err(AppError::BadRequest(format!(
            "unknown payment method: {}",
            payload.payment_method
        )));
    }
    if pricing::province(&payload.province).is_none() {
        return Err(AppError::BadRequest(format!(
            "unknown delivery province: {}",
            payload.province
        )));
    }

    // One in-flight checkout per user, held until this function returns.
    let _token = state
        .submissions
        .acquire(format!("checkout:{}", user.user_id))
        .ok_or(AppError::SubmissionInProgress)?;

    // Simulated order processing.
    if !state.checkout_delay.is_zero() {
        tokio::time::sleep(state.checkout_delay).await;
    }

    let totals = compose_totals(&cart, &payload.province, payload.installation_required);
    let now = Utc::now();
    let millis = now.timestamp_millis().to_string();
    let number = format!("ATL-{}", &millis[millis.len() - 8..]);

    let customer_name = format!("{} {}", payload.first_name, payload.last_name);
    let order = OrderRecord {
        number: number.clone(),
        customer_name: customer_name.clone(),
        customer_email: payload.email.clone(),
        shipping_address: format!("{}, {}", payload.address, payload.city),
        province: payload.province.clone(),
        payment_method: payload.payment_method.clone(),
        installation_required: payload.installation_required,
        items: cart
            .items
            .iter()
            .map(|item| OrderLine {
                name: item.product.name.clone(),
                quantity: item.quantity,
                color: item.selected_color.clone(),
                price: line_total(item),
            })
            .collect(),
        subtotal: totals.subtotal,
        shipping: totals.shipping,
        installation: totals.installation,
        total: totals.total,
        status: "confirmed".to_string(),
        created_at: now,
    };
    state.orders.push(order.clone());

    let variables: BTreeMap<String, String> = [
        ("customerName".to_string(), customer_name),
        ("orderNumber".to_string(), number.clone()),
        ("orderDate".to_string(), now.format("%d/%m/%Y").to_string()),
        (
            "orderTotal".to_string(),
            group_digits(totals.total.unsigned_abs()),
        ),
    ]
    .into();
    if let Err(err) = state.mailer.send(NotificationRequest {
        to: payload.email.clone(),
        template_id: "order-confirmation".to_string(),
        variables,
        priority: Priority::High,
    }) {
        tracing::warn!(error = %err, order_number = %number, "order confirmation email failed");
    }

    state.carts.mutate(user.user_id, |cart| cart.clear());

    audit::record(
        Some(user.user_id),
        "order_placed",
        Some("orders"),
        Some(serde_json::json!({
            "order_number": number,
            "total": order.total,
            "payment_method": order.payment_method,
        })),
    );

    Ok(ApiResponse::success(
        "Order placed",
        order,
        Some(Meta::empty()),
    ))
}

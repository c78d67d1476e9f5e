use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{
    audit,
    dto::admin::{DashboardStats, OrderList, UpdateOrderStatusRequest},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::OrderRecord,
    money::format_kina,
    notifications::{self, NotificationRequest, Priority},
    orders::is_valid_status,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = pagination.normalize();

    let all = state.orders.list();
    let total = all.len() as i64;
    let items = all
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    number: &str,
) -> AppResult<ApiResponse<OrderRecord>> {
    ensure_admin(user)?;
    let order = state.orders.get(number).ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Order", order, Some(Meta::empty())))
}

/// Move an order to a new status and notify the customer. The
/// notification is detached; the status change does not wait on it.
pub async fn update_order_status(
    state: &AppState,
    user: &AuthUser,
    number: &str,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<OrderRecord>> {
    ensure_admin(user)?;
    if !is_valid_status(&payload.status) {
        return Err(AppError::BadRequest(format!(
            "invalid order status: {}",
            payload.status
        )));
    }

    let order = state
        .orders
        .update_status(number, &payload.status)
        .ok_or(AppError::NotFound)?;

    let variables: BTreeMap<String, String> = [
        ("customerName".to_string(), order.customer_name.clone()),
        ("orderNumber".to_string(), order.number.clone()),
        ("orderStatus".to_string(), order.status.clone()),
    ]
    .into();
    notifications::send_detached(
        Arc::clone(&state.mailer),
        NotificationRequest {
            to: order.customer_email.clone(),
            template_id: "order-status-update".to_string(),
            variables,
            priority: Priority::Normal,
        },
    );

    audit::record(
        Some(user.user_id),
        "order_status_updated",
        Some("orders"),
        Some(serde_json::json!({ "order_number": number, "status": order.status })),
    );
    Ok(ApiResponse::success("Updated", order, Some(Meta::empty())))
}

pub async fn stats(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<DashboardStats>> {
    ensure_admin(user)?;
    let orders = state.orders.stats();
    let stats = DashboardStats {
        total_orders: orders.total_orders,
        total_revenue: orders.total_revenue,
        total_revenue_display: format_kina(orders.total_revenue),
        orders_by_status: orders.by_status,
        emails_sent: state.mailer.outbox_len() as i64,
        catalog_size: state.catalog.len() as i64,
    };
    Ok(ApiResponse::success("Stats", stats, Some(Meta::empty())))
}

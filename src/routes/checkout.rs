use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::checkout::{CheckoutPreviewRequest, CheckoutRequest, CheckoutTotals},
    error::AppResult,
    middleware::auth::AuthUser,
    models::OrderRecord,
    response::ApiResponse,
    services::checkout_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_checkout))
        .route("/preview", post(preview_checkout))
}

#[utoipa::path(
    post,
    path = "/api/checkout/preview",
    request_body = CheckoutPreviewRequest,
    responses(
        (status = 200, description = "Order total for the current cart, province and installation choice", body = ApiResponse<CheckoutTotals>)
    ),
    security(("bearer_auth" = [])),
    tag = "Checkout"
)]
pub async fn preview_checkout(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CheckoutPreviewRequest>,
) -> AppResult<Json<ApiResponse<CheckoutTotals>>> {
    let resp = checkout_service::preview(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Place the order and clear the cart", body = ApiResponse<OrderRecord>),
        (status = 400, description = "Empty cart or invalid request"),
        (status = 409, description = "A checkout for this user is already in progress"),
    ),
    security(("bearer_auth" = [])),
    tag = "Checkout"
)]
pub async fn submit_checkout(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<ApiResponse<OrderRecord>>> {
    let resp = checkout_service::submit(&state, &user, payload).await?;
    Ok(Json(resp))
}

use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::quote::{QuoteRequest, QuoteSubmitted},
    error::AppResult,
    pricing::PriceBreakdown,
    response::ApiResponse,
    services::quote_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_quote))
        .route("/price", post(price_quote))
}

#[utoipa::path(
    post,
    path = "/api/quote/price",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Price a configuration; incomplete configurations price to zero", body = ApiResponse<PriceBreakdown>)
    ),
    tag = "Quote"
)]
pub async fn price_quote(
    Json(payload): Json<QuoteRequest>,
) -> Json<ApiResponse<PriceBreakdown>> {
    Json(quote_service::price(&payload))
}

#[utoipa::path(
    post,
    path = "/api/quote",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Submit a quote request", body = ApiResponse<QuoteSubmitted>),
        (status = 400, description = "Missing required fields"),
        (status = 409, description = "A submission for this customer is already in progress"),
    ),
    tag = "Quote"
)]
pub async fn submit_quote(
    State(state): State<AppState>,
    Json(payload): Json<QuoteRequest>,
) -> AppResult<Json<ApiResponse<QuoteSubmitted>>> {
    let resp = quote_service::submit(&state, payload).await?;
    Ok(Json(resp))
}

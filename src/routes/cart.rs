use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post, put},
};

use crate::{
    dto::cart::{AddItemRequest, CartView, ColorRequest, QuantityRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(view_cart).post(add_item).delete(clear_cart))
        .route("/open", post(open_cart))
        .route("/close", post(close_cart))
        .route("/toggle", post(toggle_cart))
        .route("/items/{id}", delete(remove_item))
        .route("/items/{id}/quantity", put(set_quantity).patch(change_quantity))
        .route("/items/{id}/color", put(set_color))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Current cart with totals", body = ApiResponse<CartView>)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn view_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::view(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddItemRequest,
    responses(
        (status = 200, description = "Add a configured product; merges with an existing line of the same product and color", body = ApiResponse<CartView>),
        (status = 400, description = "Bad request"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn add_item(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddItemRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::add_item(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart/items/{id}",
    params(
        ("id" = String, Path, description = "Cart line id")
    ),
    responses(
        (status = 200, description = "Remove a line; unknown ids are a no-op", body = ApiResponse<CartView>),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn remove_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::remove_item(&state, &user, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/cart/items/{id}/quantity",
    params(
        ("id" = String, Path, description = "Cart line id")
    ),
    request_body = QuantityRequest,
    responses(
        (status = 200, description = "Set a line's quantity; values below 1 are clamped to 1", body = ApiResponse<CartView>),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn set_quantity(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<QuantityRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::set_quantity(&state, &user, &id, payload.quantity).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/cart/items/{id}/quantity",
    params(
        ("id" = String, Path, description = "Cart line id")
    ),
    request_body = QuantityRequest,
    responses(
        (status = 200, description = "Widget-style change: a quantity below 1 removes the line", body = ApiResponse<CartView>),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn change_quantity(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<QuantityRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::change_quantity(&state, &user, &id, payload.quantity).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/cart/items/{id}/color",
    params(
        ("id" = String, Path, description = "Cart line id")
    ),
    request_body = ColorRequest,
    responses(
        (status = 200, description = "Change a line's color; lines are not re-merged", body = ApiResponse<CartView>),
        (status = 400, description = "Color not available for the product"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn set_color(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<ColorRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::set_color(&state, &user, &id, &payload.color).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    responses(
        (status = 200, description = "Empty the cart", body = ApiResponse<CartView>),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::clear(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart/open",
    responses((status = 200, description = "Open the cart drawer", body = ApiResponse<CartView>)),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn open_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::open(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart/close",
    responses((status = 200, description = "Close the cart drawer", body = ApiResponse<CartView>)),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn close_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::close(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart/toggle",
    responses((status = 200, description = "Toggle the cart drawer", body = ApiResponse<CartView>)),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn toggle_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::toggle(&state, &user).await?;
    Ok(Json(resp))
}

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::{
    audit,
    dto::cart::{AddItemRequest, CartView},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{CartItem, CartState, Customizations},
    response::{ApiResponse, Meta},
    state::AppState,
    storage::SlotStorage,
};

/// Per-user cart states, restored lazily from their storage slots and
/// written back after every mutation. One slot per user, named
/// `cart-{user_id}`.
pub struct CartVault {
    carts: RwLock<HashMap<Uuid, CartState>>,
    storage: Arc<SlotStorage>,
}

fn cart_slot(user_id: Uuid) -> String {
    format!("cart-{user_id}")
}

impl CartVault {
    pub fn new(storage: Arc<SlotStorage>) -> Self {
        Self {
            carts: RwLock::new(HashMap::new()),
            storage,
        }
    }

    fn restore(&self, user_id: Uuid) -> CartState {
        let mut cart = CartState::default();
        // A missing or corrupt slot means an empty cart, never a failure.
        if let Some(items) = self.storage.read::<Vec<CartItem>>(&cart_slot(user_id)) {
            cart.load(items);
        }
        cart
    }

    /// Current cart for a user, restoring from storage on first access.
    pub fn snapshot(&self, user_id: Uuid) -> CartState {
        {
            let carts = self.carts.read().expect("cart lock poisoned");
            if let Some(cart) = carts.get(&user_id) {
                return cart.clone();
            }
        }
        let mut carts = self.carts.write().expect("cart lock poisoned");
        carts
            .entry(user_id)
            .or_insert_with(|| self.restore(user_id))
            .clone()
    }

    /// Apply a mutation to a user's cart and persist the item sequence.
    /// The in-memory state is the source of truth; a failed write is
    /// logged and does not undo the mutation.
    pub fn mutate<R>(&self, user_id: Uuid, op: impl FnOnce(&mut CartState) -> R) -> (R, CartState) {
        let mut carts = self.carts.write().expect("cart lock poisoned");
        let cart = carts
            .entry(user_id)
            .or_insert_with(|| self.restore(user_id));
        let result = op(cart);
        if let Err(err) = self.storage.write(&cart_slot(user_id), &cart.items) {
            tracing::warn!(user_id = %user_id, error = %err, "failed to persist cart slot");
        }
        (result, cart.clone())
    }
}

fn ok(cart: &CartState) -> ApiResponse<CartView> {
    ApiResponse::success("OK", CartView::from(cart), Some(Meta::empty()))
}

pub async fn view(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartView>> {
    let cart = state.carts.snapshot(user.user_id);
    Ok(ok(&cart))
}

pub async fn add_item(
    state: &AppState,
    user: &AuthUser,
    payload: AddItemRequest,
) -> AppResult<ApiResponse<CartView>> {
    if payload.quantity <= 0 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }
    if payload.quantity > crate::cart::MAX_LINE_QUANTITY {
        return Err(AppError::BadRequest(format!(
            "quantity must not exceed {}",
            crate::cart::MAX_LINE_QUANTITY
        )));
    }
    let product = state
        .catalog
        .get(&payload.product_id)
        .ok_or_else(|| AppError::BadRequest("product not found".to_string()))?;

    let color = payload.color.to_ascii_lowercase();
    let color_ok = color == "custom"
        || product
            .colors
            .iter()
            .any(|c| c.eq_ignore_ascii_case(&color));
    if !color_ok {
        return Err(AppError::BadRequest(format!(
            "color {color} is not available for {}",
            product.id
        )));
    }

    let customizations = if payload.accessories.is_empty() && payload.special_instructions.is_none()
    {
        None
    } else {
        Some(Customizations {
            accessories: payload.accessories.clone(),
            special_instructions: payload.special_instructions.clone(),
        })
    };

    let (line_id, cart) = state.carts.mutate(user.user_id, |cart| {
        cart.add_item(product, payload.quantity, &color, customizations)
    });

    audit::record(
        Some(user.user_id),
        "cart_add",
        Some("cart"),
        Some(serde_json::json!({
            "product_id": payload.product_id,
            "quantity": payload.quantity,
            "color": color,
            "line_id": line_id,
        })),
    );
    Ok(ok(&cart))
}

/// Remove a line. Unknown line ids are a no-op, not an error.
pub async fn remove_item(
    state: &AppState,
    user: &AuthUser,
    item_id: &str,
) -> AppResult<ApiResponse<CartView>> {
    let (_, cart) = state
        .carts
        .mutate(user.user_id, |cart| cart.remove_item(item_id));
    audit::record(
        Some(user.user_id),
        "cart_remove",
        Some("cart"),
        Some(serde_json::json!({ "line_id": item_id })),
    );
    Ok(ok(&cart))
}

/// The store primitive: clamps the requested quantity up to 1.
pub async fn set_quantity(
    state: &AppState,
    user: &AuthUser,
    item_id: &str,
    quantity: i64,
) -> AppResult<ApiResponse<CartView>> {
    let (_, cart) = state
        .carts
        .mutate(user.user_id, |cart| cart.set_quantity(item_id, quantity));
    Ok(ok(&cart))
}

/// The cart-widget policy: a requested quantity below 1 removes the line
/// instead of clamping. Sits one layer above [`set_quantity`].
pub async fn change_quantity(
    state: &AppState,
    user: &AuthUser,
    item_id: &str,
    quantity: i64,
) -> AppResult<ApiResponse<CartView>> {
    let (_, cart) = state.carts.mutate(user.user_id, |cart| {
        if quantity < 1 {
            cart.remove_item(item_id);
        } else {
            cart.set_quantity(item_id, quantity);
        }
    });
    Ok(ok(&cart))
}

pub async fn set_color(
    state: &AppState,
    user: &AuthUser,
    item_id: &str,
    color: &str,
) -> AppResult<ApiResponse<CartView>> {
    let color = color.to_ascii_lowercase();
    let cart = state.carts.snapshot(user.user_id);
    if let Some(line) = cart.items.iter().find(|item| item.id == item_id) {
        let color_ok = color == "custom"
            || line
                .product
                .colors
                .iter()
                .any(|c| c.eq_ignore_ascii_case(&color));
        if !color_ok {
            return Err(AppError::BadRequest(format!(
                "color {color} is not available for {}",
                line.product.id
            )));
        }
    }

    let (_, cart) = state
        .carts
        .mutate(user.user_id, |cart| cart.set_color(item_id, &color));
    Ok(ok(&cart))
}

pub async fn clear(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartView>> {
    let (_, cart) = state.carts.mutate(user.user_id, |cart| cart.clear());
    audit::record(Some(user.user_id), "cart_clear", Some("cart"), None);
    Ok(ok(&cart))
}

pub async fn open(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartView>> {
    let (_, cart) = state.carts.mutate(user.user_id, |cart| cart.open());
    Ok(ok(&cart))
}

pub async fn close(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartView>> {
    let (_, cart) = state.carts.mutate(user.user_id, |cart| cart.close());
    Ok(ok(&cart))
}

pub async fn toggle(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartView>> {
    let (_, cart) = state.carts.mutate(user.user_id, |cart| cart.toggle());
    Ok(ok(&cart))
}

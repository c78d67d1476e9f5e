mod common;

use alltanks_api::{
    dto::cart::AddItemRequest,
    error::AppError,
    services::cart_service::{self, CartVault},
};

use common::{customer, test_state};

fn add(product_id: &str, quantity: i64, color: &str) -> AddItemRequest {
    AddItemRequest {
        product_id: product_id.to_string(),
        quantity,
        color: color.to_string(),
        accessories: Vec::new(),
        special_instructions: None,
    }
}

#[tokio::test]
async fn adding_an_item_derives_totals_and_opens_the_drawer() {
    let (_dir, state) = test_state();
    let user = customer();

    let response = cart_service::add_item(&state, &user, add("wt-5000", 2, "Beige"))
        .await
        .expect("add item");
    let cart = response.data.expect("cart view");

    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.total_items, 2);
    // 2850 unit price plus the 50 beige surcharge, per unit.
    assert_eq!(cart.total_price, (2850 + 50) * 2);
    assert_eq!(cart.total_price_display, "K5,800");
    assert!(cart.is_open);

    let line = &cart.items[0];
    assert_eq!(line.selected_color, "beige");
    assert_eq!(line.display_name, "5000L Water Storage Tank (beige)");
    assert_eq!(line.subtitle, "5,000L capacity");
}

#[tokio::test]
async fn add_item_validates_product_quantity_and_color() {
    let (_dir, state) = test_state();
    let user = customer();

    let err = cart_service::add_item(&state, &user, add("no-such-tank", 1, "blue"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = cart_service::add_item(&state, &user, add("wt-5000", 0, "blue"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // Bulk orders beyond the line cap go through the quote desk instead.
    let err = cart_service::add_item(&state, &user, add("wt-5000", i64::MAX / 2, "blue"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // Feed troughs only come in green; custom is always accepted.
    let err = cart_service::add_item(&state, &user, add("ft-600", 1, "blue"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert!(
        cart_service::add_item(&state, &user, add("ft-600", 1, "custom"))
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn change_quantity_removes_below_one_while_set_quantity_clamps() {
    let (_dir, state) = test_state();
    let user = customer();

    let cart = cart_service::add_item(&state, &user, add("wt-1000", 3, "blue"))
        .await
        .expect("add item")
        .data
        .unwrap();
    let line_id = cart.items[0].id.clone();

    let cart = cart_service::set_quantity(&state, &user, &line_id, 0)
        .await
        .expect("set quantity")
        .data
        .unwrap();
    assert_eq!(cart.items[0].quantity, 1);

    let cart = cart_service::change_quantity(&state, &user, &line_id, 0)
        .await
        .expect("change quantity")
        .data
        .unwrap();
    assert!(cart.items.is_empty());
    assert_eq!(cart.total_items, 0);
    assert_eq!(cart.total_price, 0);
}

#[tokio::test]
async fn set_color_rejects_unavailable_colors_and_reprices_the_line() {
    let (_dir, state) = test_state();
    let user = customer();

    let cart = cart_service::add_item(&state, &user, add("wt-5000", 1, "blue"))
        .await
        .expect("add item")
        .data
        .unwrap();
    let line_id = cart.items[0].id.clone();

    let err = cart_service::set_color(&state, &user, &line_id, "magenta")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let cart = cart_service::set_color(&state, &user, &line_id, "custom")
        .await
        .expect("set color")
        .data
        .unwrap();
    assert_eq!(cart.items[0].selected_color, "custom");
    assert_eq!(cart.total_price, 2850 + 200);
}

#[tokio::test]
async fn cart_survives_a_fresh_vault_over_the_same_storage() {
    let (_dir, state) = test_state();
    let user = customer();

    cart_service::add_item(&state, &user, add("st-3000", 2, "black"))
        .await
        .expect("add item");

    // A new vault plays the role of a restarted process.
    let restarted = CartVault::new(state.storage.clone());
    let cart = restarted.snapshot(user.user_id);
    assert_eq!(cart.total_items, 2);
    assert_eq!(cart.total_price, 3400 * 2);

    // The drawer flag is not persisted, only the item sequence.
    assert!(!cart.is_open);
}

#[tokio::test]
async fn clear_and_drawer_operations_round_trip_through_the_service() {
    let (_dir, state) = test_state();
    let user = customer();

    cart_service::add_item(&state, &user, add("ct-10000", 1, "black"))
        .await
        .expect("add item");

    let cart = cart_service::close(&state, &user)
        .await
        .expect("close")
        .data
        .unwrap();
    assert!(!cart.is_open);

    let cart = cart_service::toggle(&state, &user)
        .await
        .expect("toggle")
        .data
        .unwrap();
    assert!(cart.is_open);

    let cart = cart_service::clear(&state, &user)
        .await
        .expect("clear")
        .data
        .unwrap();
    assert!(cart.items.is_empty());

    let cart = cart_service::view(&state, &user)
        .await
        .expect("view")
        .data
        .unwrap();
    assert_eq!(cart.total_items, 0);
}

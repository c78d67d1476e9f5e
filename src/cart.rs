//! Cart state machine.
//!
//! Every mutation recomputes `total_items` and `total_price` through
//! [`CartState::recompute_totals`]; the totals are never touched anywhere
//! else. All operations are total: removing a missing line is a no-op and
//! quantities are clamped rather than rejected.

use chrono::Utc;

use crate::models::{CartItem, CartState, Customizations, Product};

/// Per-unit surcharge for the beige finish.
pub const BEIGE_SURCHARGE: i64 = 50;
/// Per-unit surcharge for a custom color match.
pub const CUSTOM_COLOR_SURCHARGE: i64 = 200;

/// Largest quantity a single line may hold. Keeps the totals fold inside
/// `i64` no matter what callers pass; anything above an order this size
/// goes through the quote desk, not the cart.
pub const MAX_LINE_QUANTITY: i64 = 10_000;

/// Per-unit price addition for a selected color. Colors are matched
/// case-insensitively; anything that is not beige or custom is free.
pub fn color_surcharge(color: &str) -> i64 {
    match color.to_ascii_lowercase().as_str() {
        "beige" => BEIGE_SURCHARGE,
        "custom" => CUSTOM_COLOR_SURCHARGE,
        _ => 0,
    }
}

/// Price of one cart line: unit price times quantity plus the color
/// surcharge per unit.
pub fn line_total(item: &CartItem) -> i64 {
    item.product.price * item.quantity + color_surcharge(&item.selected_color) * item.quantity
}

impl CartState {
    /// Re-derive the aggregate totals from the item list.
    fn recompute_totals(&mut self) {
        self.total_items = self.items.iter().map(|item| item.quantity).sum();
        self.total_price = self.items.iter().map(line_total).sum();
    }

    /// Add a configured product to the cart. If a line with the same
    /// product and color already exists its quantity is increased instead
    /// of creating a duplicate; quantities are clamped to
    /// `1..=MAX_LINE_QUANTITY` either way. Opens the cart drawer so the
    /// addition is visible. Returns the id of the affected line.
    pub fn add_item(
        &mut self,
        product: Product,
        quantity: i64,
        color: &str,
        customizations: Option<Customizations>,
    ) -> String {
        let color = color.to_ascii_lowercase();
        let id = if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.product.id == product.id && item.selected_color == color)
        {
            existing.quantity = existing
                .quantity
                .saturating_add(quantity)
                .clamp(1, MAX_LINE_QUANTITY);
            existing.id.clone()
        } else {
            let id = format!("{}-{}-{}", product.id, color, Utc::now().timestamp_millis());
            self.items.push(CartItem {
                id: id.clone(),
                product,
                quantity: quantity.clamp(1, MAX_LINE_QUANTITY),
                selected_color: color,
                customizations,
                added_at: Utc::now(),
            });
            id
        };

        self.is_open = true;
        self.recompute_totals();
        id
    }

    /// Remove a line by id. Unknown ids are ignored.
    pub fn remove_item(&mut self, item_id: &str) {
        self.items.retain(|item| item.id != item_id);
        self.recompute_totals();
    }

    /// Set a line's quantity, clamped to `1..=MAX_LINE_QUANTITY`. This is
    /// the store primitive: requesting zero keeps the line at quantity 1.
    /// The cart widget's remove-on-zero policy lives a layer above, in
    /// `cart_service::change_quantity`.
    pub fn set_quantity(&mut self, item_id: &str, quantity: i64) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == item_id) {
            item.quantity = quantity.clamp(1, MAX_LINE_QUANTITY);
        }
        self.recompute_totals();
    }

    /// Replace a line's selected color. Deliberately does not re-merge the
    /// line with another that now has the same product and color; two such
    /// lines may coexist after a color change.
    pub fn set_color(&mut self, item_id: &str, color: &str) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == item_id) {
            item.selected_color = color.to_ascii_lowercase();
        }
        self.recompute_totals();
    }

    /// Empty the cart. Leaves the drawer flag as-is.
    pub fn clear(&mut self) {
        self.items.clear();
        self.recompute_totals();
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Replace the whole item sequence, e.g. from persisted storage.
    /// Leaves the drawer flag as-is.
    pub fn load(&mut self, items: Vec<CartItem>) {
        self.items = items;
        self.recompute_totals();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn tank() -> Product {
        Catalog::seeded().get("wt-5000").expect("seeded product")
    }

    #[test]
    fn adding_same_product_and_color_merges_lines() {
        let mut cart = CartState::default();
        cart.add_item(tank(), 1, "blue", None);
        cart.add_item(tank(), 2, "Blue", None);

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 3);
        assert_eq!(cart.total_items, 3);
        assert_eq!(cart.total_price, tank().price * 3);
    }

    #[test]
    fn different_color_creates_a_second_line() {
        let mut cart = CartState::default();
        cart.add_item(tank(), 1, "blue", None);
        cart.add_item(tank(), 1, "beige", None);

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.total_price, tank().price * 2 + BEIGE_SURCHARGE);
    }

    #[test]
    fn beige_and_custom_surcharges_are_per_unit() {
        let mut cart = CartState::default();
        cart.add_item(tank(), 2, "custom", None);

        assert_eq!(
            cart.total_price,
            (tank().price + CUSTOM_COLOR_SURCHARGE) * 2
        );
    }

    #[test]
    fn set_quantity_clamps_to_one() {
        let mut cart = CartState::default();
        let id = cart.add_item(tank(), 3, "blue", None);

        cart.set_quantity(&id, 0);
        assert_eq!(cart.items[0].quantity, 1);

        cart.set_quantity(&id, -5);
        assert_eq!(cart.items[0].quantity, 1);
        assert_eq!(cart.total_items, 1);
    }

    #[test]
    fn quantities_are_capped_so_totals_never_overflow() {
        let mut cart = CartState::default();
        let id = cart.add_item(tank(), i64::MAX, "blue", None);
        assert_eq!(cart.items[0].quantity, MAX_LINE_QUANTITY);
        assert_eq!(cart.total_price, tank().price * MAX_LINE_QUANTITY);

        // Merging into a full line saturates instead of wrapping.
        cart.add_item(tank(), i64::MAX, "blue", None);
        assert_eq!(cart.items[0].quantity, MAX_LINE_QUANTITY);

        cart.set_quantity(&id, i64::MAX);
        assert_eq!(cart.items[0].quantity, MAX_LINE_QUANTITY);
        assert_eq!(cart.total_items, MAX_LINE_QUANTITY);
    }

    #[test]
    fn add_opens_the_drawer_and_clear_leaves_it_alone() {
        let mut cart = CartState::default();
        assert!(!cart.is_open);

        cart.add_item(tank(), 1, "blue", None);
        assert!(cart.is_open);

        cart.clear();
        assert!(cart.is_open);
        assert_eq!(cart.total_items, 0);
        assert_eq!(cart.total_price, 0);
        assert!(cart.items.is_empty());
    }

    #[test]
    fn color_change_does_not_remerge_duplicate_lines() {
        let mut cart = CartState::default();
        let first = cart.add_item(tank(), 1, "blue", None);
        cart.add_item(tank(), 2, "green", None);

        cart.set_color(&first, "green");

        // Two lines with the same product and color are allowed here.
        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.total_items, 3);
    }

    #[test]
    fn remove_unknown_id_is_a_noop() {
        let mut cart = CartState::default();
        cart.add_item(tank(), 1, "blue", None);
        cart.remove_item("nope");
        assert_eq!(cart.items.len(), 1);
    }

    #[test]
    fn load_reconstructs_totals() {
        let mut cart = CartState::default();
        cart.add_item(tank(), 2, "beige", None);
        let items = cart.items.clone();
        let (total_items, total_price) = (cart.total_items, cart.total_price);

        let mut restored = CartState::default();
        restored.load(items);
        assert_eq!(restored.total_items, total_items);
        assert_eq!(restored.total_price, total_price);
    }

    #[test]
    fn toggle_flips_only_the_flag() {
        let mut cart = CartState::default();
        cart.toggle();
        assert!(cart.is_open);
        cart.toggle();
        assert!(!cart.is_open);
        assert_eq!(cart.total_items, 0);
    }
}

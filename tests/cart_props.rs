//! Randomized operation sequences against the cart state machine. The
//! aggregate totals must always equal the fold over the item lines, no
//! matter what order mutations arrive in.

use proptest::prelude::*;

use alltanks_api::cart::MAX_LINE_QUANTITY;
use alltanks_api::catalog::Catalog;
use alltanks_api::models::{CartItem, CartState, Product};

const COLORS: &[&str] = &["blue", "green", "black", "beige", "custom"];

fn surcharge(color: &str) -> i64 {
    match color {
        "beige" => 50,
        "custom" => 200,
        _ => 0,
    }
}

#[derive(Debug, Clone)]
enum Op {
    Add {
        product: usize,
        quantity: i64,
        color: usize,
    },
    Remove {
        line: usize,
    },
    SetQuantity {
        line: usize,
        quantity: i64,
    },
    SetColor {
        line: usize,
        color: usize,
    },
    Clear,
    Toggle,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..5usize, 1..6i64, 0..COLORS.len()).prop_map(|(product, quantity, color)| Op::Add {
            product,
            quantity,
            color,
        }),
        (0..10usize).prop_map(|line| Op::Remove { line }),
        (0..10usize, prop_oneof![-3..8i64, Just(i64::MAX)])
            .prop_map(|(line, quantity)| Op::SetQuantity { line, quantity }),
        (0..10usize, 0..COLORS.len()).prop_map(|(line, color)| Op::SetColor { line, color }),
        Just(Op::Clear),
        Just(Op::Toggle),
    ]
}

fn line_id(cart: &CartState, index: usize) -> Option<String> {
    if cart.items.is_empty() {
        return None;
    }
    Some(cart.items[index % cart.items.len()].id.clone())
}

fn apply(cart: &mut CartState, products: &[Product], op: Op) {
    match op {
        Op::Add {
            product,
            quantity,
            color,
        } => {
            cart.add_item(products[product].clone(), quantity, COLORS[color], None);
        }
        Op::Remove { line } => {
            if let Some(id) = line_id(cart, line) {
                cart.remove_item(&id);
            }
        }
        Op::SetQuantity { line, quantity } => {
            if let Some(id) = line_id(cart, line) {
                cart.set_quantity(&id, quantity);
            }
        }
        Op::SetColor { line, color } => {
            if let Some(id) = line_id(cart, line) {
                cart.set_color(&id, COLORS[color]);
            }
        }
        Op::Clear => cart.clear(),
        Op::Toggle => cart.toggle(),
    }
}

proptest! {
    /// After every mutation, `total_items` is the sum of line quantities
    /// and `total_price` is the sum of (unit price + color surcharge) *
    /// quantity, recomputed here independently of the production fold.
    #[test]
    fn totals_are_always_the_fold_of_the_lines(ops in proptest::collection::vec(op(), 0..40)) {
        let products = Catalog::seeded().all();
        let mut cart = CartState::default();

        for op in ops {
            apply(&mut cart, &products, op);

            let expected_items: i64 = cart.items.iter().map(|item| item.quantity).sum();
            let expected_price: i64 = cart
                .items
                .iter()
                .map(|item| (item.product.price + surcharge(&item.selected_color)) * item.quantity)
                .sum();

            prop_assert_eq!(cart.total_items, expected_items);
            prop_assert_eq!(cart.total_price, expected_price);
            prop_assert!(
                cart.items
                    .iter()
                    .all(|item| (1..=MAX_LINE_QUANTITY).contains(&item.quantity))
            );
        }
    }

    /// Adding never leaves two lines for the same product and color; only
    /// a later color change may produce that.
    #[test]
    fn additions_merge_instead_of_duplicating(
        adds in proptest::collection::vec((0..5usize, 1..6i64, 0..COLORS.len()), 1..20)
    ) {
        let products = Catalog::seeded().all();
        let mut cart = CartState::default();
        for (product, quantity, color) in adds {
            cart.add_item(products[product].clone(), quantity, COLORS[color], None);
        }

        for (i, a) in cart.items.iter().enumerate() {
            for b in cart.items.iter().skip(i + 1) {
                prop_assert!(
                    a.product.id != b.product.id || a.selected_color != b.selected_color
                );
            }
        }
    }

    /// The persisted item sequence restores to exactly the same totals.
    #[test]
    fn json_round_trip_preserves_totals(ops in proptest::collection::vec(op(), 0..25)) {
        let products = Catalog::seeded().all();
        let mut cart = CartState::default();
        for op in ops {
            apply(&mut cart, &products, op);
        }

        let raw = serde_json::to_string(&cart.items).expect("serialize items");
        let items: Vec<CartItem> = serde_json::from_str(&raw).expect("deserialize items");

        let mut restored = CartState::default();
        restored.load(items);
        prop_assert_eq!(restored.total_items, cart.total_items);
        prop_assert_eq!(restored.total_price, cart.total_price);
    }
}

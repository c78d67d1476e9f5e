//! Quote pricing engine.
//!
//! A deterministic computation over small fixed lookup tables: tank type
//! base price, capacity multiplier, color surcharge, accessory prices and
//! flat per-province shipping. An unknown tank type or capacity means the
//! configuration is incomplete and the price is zero; it is not an error.

use serde::Serialize;
use utoipa::ToSchema;

pub struct TankType {
    pub id: &'static str,
    pub name: &'static str,
    pub base_price: i64,
    pub description: &'static str,
}

pub struct CapacityOption {
    pub liters: i64,
    pub multiplier: f64,
}

pub struct ColorOption {
    pub id: &'static str,
    pub name: &'static str,
    pub surcharge: i64,
}

pub struct Accessory {
    pub id: &'static str,
    pub name: &'static str,
    pub price: i64,
}

pub struct Province {
    pub id: &'static str,
    pub name: &'static str,
    pub shipping_cost: i64,
}

pub const TANK_TYPES: &[TankType] = &[
    TankType { id: "water", name: "Water Storage Tank", base_price: 480, description: "Standard water storage" },
    TankType { id: "septic", name: "Septic Tank System", base_price: 850, description: "Wastewater treatment" },
    TankType { id: "chemical", name: "Chemical Storage Tank", base_price: 1200, description: "Industrial chemical storage" },
    TankType { id: "feed", name: "Feed Trough", base_price: 180, description: "Livestock feeding" },
];

pub const CAPACITY_OPTIONS: &[CapacityOption] = &[
    CapacityOption { liters: 500, multiplier: 0.6 },
    CapacityOption { liters: 1000, multiplier: 0.8 },
    CapacityOption { liters: 2500, multiplier: 1.0 },
    CapacityOption { liters: 5000, multiplier: 1.4 },
    CapacityOption { liters: 10000, multiplier: 2.1 },
    CapacityOption { liters: 15000, multiplier: 2.8 },
    CapacityOption { liters: 20000, multiplier: 3.4 },
];

pub const COLOR_OPTIONS: &[ColorOption] = &[
    ColorOption { id: "blue", name: "Blue", surcharge: 0 },
    ColorOption { id: "green", name: "Green", surcharge: 0 },
    ColorOption { id: "black", name: "Black", surcharge: 0 },
    ColorOption { id: "beige", name: "Beige", surcharge: 50 },
    ColorOption { id: "custom", name: "Custom Color", surcharge: 200 },
];

pub const ACCESSORIES: &[Accessory] = &[
    Accessory { id: "inlet-kit", name: "Inlet Kit", price: 85 },
    Accessory { id: "outlet-kit", name: "Outlet Kit", price: 95 },
    Accessory { id: "overflow-kit", name: "Overflow Kit", price: 75 },
    Accessory { id: "tap-kit", name: "Tap & Valve Kit", price: 120 },
    Accessory { id: "gauge", name: "Level Gauge", price: 150 },
    Accessory { id: "cover", name: "Tank Cover", price: 180 },
];

pub const PROVINCES: &[Province] = &[
    Province { id: "ncd", name: "National Capital District", shipping_cost: 0 },
    Province { id: "western", name: "Western Province", shipping_cost: 250 },
    Province { id: "gulf", name: "Gulf Province", shipping_cost: 300 },
    Province { id: "central", name: "Central Province", shipping_cost: 150 },
    Province { id: "milne-bay", name: "Milne Bay Province", shipping_cost: 350 },
    Province { id: "northern", name: "Oro (Northern) Province", shipping_cost: 280 },
    Province { id: "southern-highlands", name: "Southern Highlands Province", shipping_cost: 200 },
    Province { id: "western-highlands", name: "Western Highlands Province", shipping_cost: 220 },
    Province { id: "enga", name: "Enga Province", shipping_cost: 240 },
    Province { id: "chimbu", name: "Chimbu Province", shipping_cost: 200 },
    Province { id: "eastern-highlands", name: "Eastern Highlands Province", shipping_cost: 210 },
    Province { id: "morobe", name: "Morobe Province", shipping_cost: 180 },
    Province { id: "madang", name: "Madang Province", shipping_cost: 190 },
    Province { id: "east-sepik", name: "East Sepik Province", shipping_cost: 320 },
    Province { id: "west-sepik", name: "West Sepik Province", shipping_cost: 350 },
    Province { id: "manus", name: "Manus Province", shipping_cost: 400 },
    Province { id: "new-ireland", name: "New Ireland Province", shipping_cost: 380 },
    Province { id: "east-new-britain", name: "East New Britain Province", shipping_cost: 360 },
    Province { id: "west-new-britain", name: "West New Britain Province", shipping_cost: 340 },
];

/// Flat installation fee, charged once per tank when installation is
/// requested at checkout.
pub const INSTALLATION_FEE_PER_TANK: i64 = 150;

/// Quotes are honored for 30 days from submission.
pub const QUOTE_VALIDITY_DAYS: i64 = 30;

pub fn tank_type(id: &str) -> Option<&'static TankType> {
    TANK_TYPES.iter().find(|t| t.id == id)
}

pub fn capacity_multiplier(liters: i64) -> Option<f64> {
    CAPACITY_OPTIONS
        .iter()
        .find(|c| c.liters == liters)
        .map(|c| c.multiplier)
}

/// Surcharge for a color choice on the quote form; zero when not selected
/// or unknown.
pub fn color_surcharge(id: &str) -> i64 {
    COLOR_OPTIONS
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.surcharge)
        .unwrap_or(0)
}

/// Unit price of an accessory; unknown ids contribute nothing.
pub fn accessory_price(id: &str) -> i64 {
    ACCESSORIES
        .iter()
        .find(|a| a.id == id)
        .map(|a| a.price)
        .unwrap_or(0)
}

pub fn province(id: &str) -> Option<&'static Province> {
    PROVINCES.iter().find(|p| p.id == id)
}

/// Flat shipping cost for a delivery province, applied once per order or
/// quote regardless of quantity. Zero when not selected or unknown.
pub fn shipping_cost(province_id: &str) -> i64 {
    province(province_id).map(|p| p.shipping_cost).unwrap_or(0)
}

pub fn installation_cost(requested: bool, total_quantity: i64) -> i64 {
    if requested {
        INSTALLATION_FEE_PER_TANK * total_quantity
    } else {
        0
    }
}

/// Itemized result of a quote computation, in whole kina.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct PriceBreakdown {
    pub base_price: i64,
    pub capacity_multiplier: f64,
    pub adjusted_base: i64,
    pub color_surcharge: i64,
    pub accessory_total: i64,
    pub unit_total: i64,
    pub subtotal: i64,
    pub shipping: i64,
    pub total: i64,
}

/// Price a tank configuration.
///
/// The computation runs in a fixed order: base price by tank type, capacity
/// multiplier, color surcharge, accessory sum, then quantity, then flat
/// shipping added once at the end. A missing tank type or capacity yields
/// an all-zero breakdown (incomplete configuration).
pub fn price_quote(
    tank_type_id: &str,
    capacity: i64,
    color: &str,
    accessories: &[String],
    quantity: i64,
    province_id: &str,
) -> PriceBreakdown {
    let Some(tank) = tank_type(tank_type_id) else {
        return PriceBreakdown::default();
    };
    let Some(multiplier) = capacity_multiplier(capacity) else {
        return PriceBreakdown::default();
    };

    let adjusted_base = (tank.base_price as f64 * multiplier).round() as i64;
    let surcharge = color_surcharge(color);
    let accessory_total: i64 = accessories.iter().map(|id| accessory_price(id)).sum();
    let unit_total = adjusted_base + surcharge + accessory_total;
    let subtotal = unit_total * quantity;
    let shipping = shipping_cost(province_id);

    PriceBreakdown {
        base_price: tank.base_price,
        capacity_multiplier: multiplier,
        adjusted_base,
        color_surcharge: surcharge,
        accessory_total,
        unit_total,
        subtotal,
        shipping,
        total: subtotal + shipping,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_water_tank_quote_is_the_base_price() {
        let breakdown = price_quote("water", 2500, "blue", &[], 1, "ncd");
        assert_eq!(breakdown.adjusted_base, 480);
        assert_eq!(breakdown.shipping, 0);
        assert_eq!(breakdown.total, 480);
    }

    #[test]
    fn fully_configured_quote_matches_worked_example() {
        // 480 * 1.4 + 50 + 85 = 807 per unit; x2 = 1614; + 180 shipping.
        let accessories = vec!["inlet-kit".to_string()];
        let breakdown = price_quote("water", 5000, "beige", &accessories, 2, "morobe");

        assert_eq!(breakdown.unit_total, 807);
        assert_eq!(breakdown.subtotal, 1614);
        assert_eq!(breakdown.shipping, 180);
        assert_eq!(breakdown.total, 1794);
    }

    #[test]
    fn unknown_tank_type_or_capacity_zeroes_the_price() {
        assert_eq!(price_quote("", 2500, "blue", &[], 1, "ncd").total, 0);
        assert_eq!(price_quote("water", 750, "blue", &[], 1, "ncd").total, 0);
    }

    #[test]
    fn unknown_accessory_and_province_contribute_nothing() {
        let accessories = vec!["gold-plating".to_string()];
        let breakdown = price_quote("feed", 500, "black", &accessories, 1, "narnia");
        assert_eq!(breakdown.accessory_total, 0);
        assert_eq!(breakdown.shipping, 0);
        assert_eq!(breakdown.total, 108);
    }

    #[test]
    fn shipping_is_flat_regardless_of_quantity() {
        let one = price_quote("water", 2500, "blue", &[], 1, "manus");
        let ten = price_quote("water", 2500, "blue", &[], 10, "manus");
        assert_eq!(one.shipping, 400);
        assert_eq!(ten.shipping, 400);
        assert_eq!(ten.subtotal, one.subtotal * 10);
    }

    #[test]
    fn installation_is_per_tank() {
        assert_eq!(installation_cost(true, 3), 450);
        assert_eq!(installation_cost(false, 3), 0);
    }
}

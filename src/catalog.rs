//! In-memory product catalog.
//!
//! Stands in for the headless content store: the API only reads from it,
//! except for the administrative create-product endpoint which appends.
//! Seeded at startup with the current range.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::models::{Dimensions, Product, ProductCategory};

pub const PRODUCT_CATEGORIES: &[ProductCategory] = &[
    ProductCategory {
        id: "water-tanks",
        name: "Water Tanks",
        description: "Premium water storage solutions for residential and commercial use",
    },
    ProductCategory {
        id: "septic-tanks",
        name: "Septic Tanks",
        description: "Complete wastewater treatment systems",
    },
    ProductCategory {
        id: "chemical-tanks",
        name: "Chemical Tanks",
        description: "Industrial storage for chemicals and hazardous materials",
    },
    ProductCategory {
        id: "feed-troughs",
        name: "Feed Troughs",
        description: "Livestock feeding solutions",
    },
    ProductCategory {
        id: "accessories",
        name: "Accessories",
        description: "Fittings, valves, and tank accessories",
    },
];

pub fn category(id: &str) -> Option<&'static ProductCategory> {
    PRODUCT_CATEGORIES.iter().find(|c| c.id == id)
}

pub struct Catalog {
    products: RwLock<Vec<Product>>,
}

impl Catalog {
    pub fn seeded() -> Self {
        Self {
            products: RwLock::new(seed_products()),
        }
    }

    pub fn all(&self) -> Vec<Product> {
        self.products.read().expect("catalog lock poisoned").clone()
    }

    pub fn get(&self, id: &str) -> Option<Product> {
        self.products
            .read()
            .expect("catalog lock poisoned")
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Append a product. Returns `false` when the slug is already taken.
    pub fn insert(&self, product: Product) -> bool {
        let mut products = self.products.write().expect("catalog lock poisoned");
        if products.iter().any(|p| p.id == product.id) {
            return false;
        }
        products.push(product);
        true
    }

    pub fn len(&self) -> usize {
        self.products.read().expect("catalog lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn specs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: "wt-5000".into(),
            name: "5000L Water Storage Tank".into(),
            category: "water-tanks".into(),
            description: "Our most popular residential water tank, perfect for homes and small \
                          businesses. Made from UV-stabilized HDPE with a 10-year warranty."
                .into(),
            short_description: "Perfect for residential homes and small businesses".into(),
            price: 2850,
            original_price: None,
            capacity: 5000,
            dimensions: Dimensions { diameter: 200, height: 240 },
            features: strings(&[
                "UV-Stabilized HDPE construction",
                "10-year manufacturer warranty",
                "Cyclone-rated design",
                "Food-grade material",
                "Easy installation",
                "Multiple color options",
            ]),
            specifications: specs(&[
                ("Material", "High-Density Polyethylene (HDPE)"),
                ("Wall Thickness", "8mm"),
                ("Inlet Size", "150mm"),
                ("Outlet Size", "25mm"),
                ("Weight", "45kg"),
                ("UV Rating", "Grade 8"),
                ("Warranty", "10 years"),
            ]),
            images: strings(&["/images/products/wt-5000.png"]),
            colors: strings(&["Blue", "Green", "Black", "Beige"]),
            in_stock: true,
            lead_time: "3-5 working days".into(),
            is_best_seller: true,
            is_new: false,
        },
        Product {
            id: "wt-1000".into(),
            name: "1000L Water Storage Tank".into(),
            category: "water-tanks".into(),
            description: "Compact water tank for smaller households and rainwater harvesting. \
                          Same UV-stabilized HDPE as the full range."
                .into(),
            short_description: "Compact tank for small households".into(),
            price: 780,
            original_price: Some(850),
            capacity: 1000,
            dimensions: Dimensions { diameter: 110, height: 130 },
            features: strings(&[
                "UV-Stabilized HDPE construction",
                "10-year manufacturer warranty",
                "Fits narrow side access",
            ]),
            specifications: specs(&[
                ("Material", "High-Density Polyethylene (HDPE)"),
                ("Wall Thickness", "6mm"),
                ("Weight", "18kg"),
                ("Warranty", "10 years"),
            ]),
            images: strings(&["/images/products/wt-1000.png"]),
            colors: strings(&["Blue", "Green", "Black", "Beige"]),
            in_stock: true,
            lead_time: "2-3 working days".into(),
            is_best_seller: false,
            is_new: false,
        },
        Product {
            id: "st-3000".into(),
            name: "3000L Septic Tank System".into(),
            category: "septic-tanks".into(),
            description: "Two-chamber septic system for households of up to eight people, \
                          supplied with risers and lids."
                .into(),
            short_description: "Household wastewater treatment".into(),
            price: 3400,
            original_price: None,
            capacity: 3000,
            dimensions: Dimensions { diameter: 180, height: 170 },
            features: strings(&[
                "Two-chamber design",
                "Supplied with risers and lids",
                "Low-profile excavation depth",
            ]),
            specifications: specs(&[
                ("Material", "High-Density Polyethylene (HDPE)"),
                ("Chambers", "2"),
                ("Household Size", "Up to 8 people"),
                ("Warranty", "10 years"),
            ]),
            images: strings(&["/images/products/st-3000.png"]),
            colors: strings(&["Black", "Green"]),
            in_stock: true,
            lead_time: "5-7 working days".into(),
            is_best_seller: false,
            is_new: true,
        },
        Product {
            id: "ct-10000".into(),
            name: "10000L Chemical Storage Tank".into(),
            category: "chemical-tanks".into(),
            description: "Industrial chemical storage tank with chemical-resistant liner, \
                          suitable for agricultural and mining applications."
                .into(),
            short_description: "Industrial chemical storage".into(),
            price: 9600,
            original_price: None,
            capacity: 10000,
            dimensions: Dimensions { diameter: 250, height: 280 },
            features: strings(&[
                "Chemical-resistant liner",
                "Bunded base option",
                "Industrial fittings",
            ]),
            specifications: specs(&[
                ("Material", "Cross-linked Polyethylene"),
                ("Wall Thickness", "12mm"),
                ("Warranty", "5 years"),
            ]),
            images: strings(&["/images/products/ct-10000.png"]),
            colors: strings(&["Black", "Blue"]),
            in_stock: false,
            lead_time: "2-3 weeks".into(),
            is_best_seller: false,
            is_new: false,
        },
        Product {
            id: "ft-600".into(),
            name: "600L Feed Trough".into(),
            category: "feed-troughs".into(),
            description: "Heavy-duty livestock feed trough with reinforced rim, stackable for \
                          transport."
                .into(),
            short_description: "Heavy-duty livestock feeding".into(),
            price: 420,
            original_price: None,
            capacity: 600,
            dimensions: Dimensions { diameter: 90, height: 60 },
            features: strings(&["Reinforced rim", "Stackable", "UV-stabilized"]),
            specifications: specs(&[
                ("Material", "High-Density Polyethylene (HDPE)"),
                ("Weight", "14kg"),
                ("Warranty", "5 years"),
            ]),
            images: strings(&["/images/products/ft-600.png"]),
            // Feed troughs ship in one color only.
            colors: strings(&["Green"]),
            in_stock: true,
            lead_time: "In stock".into(),
            is_best_seller: false,
            is_new: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_catalog_has_the_flagship_tank() {
        let catalog = Catalog::seeded();
        let tank = catalog.get("wt-5000").expect("wt-5000 seeded");
        assert_eq!(tank.price, 2850);
        assert_eq!(tank.capacity, 5000);
        assert!(tank.is_best_seller);
    }

    #[test]
    fn insert_rejects_duplicate_slugs() {
        let catalog = Catalog::seeded();
        let existing = catalog.get("wt-1000").expect("seeded");
        assert!(!catalog.insert(existing));
    }

    #[test]
    fn every_seeded_category_is_known() {
        let catalog = Catalog::seeded();
        for product in catalog.all() {
            assert!(
                category(&product.category).is_some(),
                "unknown category {}",
                product.category
            );
        }
    }
}

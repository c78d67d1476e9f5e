//! In-process order log.
//!
//! Orders placed during the lifetime of the process, kept for the admin
//! dashboard and status-update emails. There is no durable order store;
//! restarting the service empties the log.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::models::OrderRecord;

/// Statuses an order may be moved through by an administrator.
pub const ORDER_STATUSES: &[&str] =
    &["confirmed", "processing", "shipped", "delivered", "cancelled"];

pub fn is_valid_status(status: &str) -> bool {
    ORDER_STATUSES.contains(&status)
}

#[derive(Default)]
pub struct OrderLog {
    records: Mutex<Vec<OrderRecord>>,
}

impl OrderLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, order: OrderRecord) {
        let mut records = self.records.lock().expect("order log lock poisoned");
        records.push(order);
    }

    /// Newest first.
    pub fn list(&self) -> Vec<OrderRecord> {
        let records = self.records.lock().expect("order log lock poisoned");
        let mut out = records.clone();
        out.reverse();
        out
    }

    pub fn get(&self, number: &str) -> Option<OrderRecord> {
        let records = self.records.lock().expect("order log lock poisoned");
        records.iter().find(|o| o.number == number).cloned()
    }

    /// Set an order's status, returning the updated record. `None` when
    /// the order number is unknown.
    pub fn update_status(&self, number: &str, status: &str) -> Option<OrderRecord> {
        let mut records = self.records.lock().expect("order log lock poisoned");
        let order = records.iter_mut().find(|o| o.number == number)?;
        order.status = status.to_string();
        Some(order.clone())
    }

    pub fn stats(&self) -> OrderStats {
        let records = self.records.lock().expect("order log lock poisoned");
        let mut by_status: BTreeMap<String, i64> = BTreeMap::new();
        for order in records.iter() {
            *by_status.entry(order.status.clone()).or_default() += 1;
        }
        OrderStats {
            total_orders: records.len() as i64,
            total_revenue: records.iter().map(|o| o.total).sum(),
            by_status,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrderStats {
    pub total_orders: i64,
    pub total_revenue: i64,
    pub by_status: BTreeMap<String, i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn order(number: &str, total: i64) -> OrderRecord {
        OrderRecord {
            number: number.into(),
            customer_name: "John Smith".into(),
            customer_email: "john@example.com".into(),
            shipping_address: "123 Main St, Lae".into(),
            province: "morobe".into(),
            payment_method: "bank-transfer".into(),
            installation_required: false,
            items: Vec::new(),
            subtotal: total,
            shipping: 0,
            installation: 0,
            total,
            status: "confirmed".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn list_is_newest_first_and_stats_sum_revenue() {
        let log = OrderLog::new();
        log.push(order("ATL-1", 100));
        log.push(order("ATL-2", 250));

        let listed = log.list();
        assert_eq!(listed[0].number, "ATL-2");

        let stats = log.stats();
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.total_revenue, 350);
        assert_eq!(stats.by_status.get("confirmed"), Some(&2));
    }

    #[test]
    fn update_status_only_touches_the_named_order() {
        let log = OrderLog::new();
        log.push(order("ATL-1", 100));
        log.push(order("ATL-2", 250));

        let updated = log.update_status("ATL-1", "shipped").expect("known order");
        assert_eq!(updated.status, "shipped");
        assert_eq!(log.get("ATL-2").unwrap().status, "confirmed");
        assert!(log.update_status("ATL-9", "shipped").is_none());
    }
}

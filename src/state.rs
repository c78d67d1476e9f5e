use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::notifications::EmailService;
use crate::orders::OrderLog;
use crate::services::cart_service::CartVault;
use crate::storage::SlotStorage;
use crate::users::UserStore;

/// Explicit application context handed to every service, replacing any
/// ambient global state: catalog (content collaborator), per-user carts,
/// slot storage, demo users, mail gateway, order log and the
/// duplicate-submission guard.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub carts: Arc<CartVault>,
    pub storage: Arc<SlotStorage>,
    pub users: Arc<UserStore>,
    pub mailer: Arc<EmailService>,
    pub orders: Arc<OrderLog>,
    pub submissions: Arc<SubmissionGuard>,
    pub checkout_delay: Duration,
}

impl AppState {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let storage = Arc::new(SlotStorage::new(&config.data_dir)?);
        let users = Arc::new(UserStore::load_or_seed(storage.clone())?);
        Ok(Self {
            catalog: Arc::new(Catalog::seeded()),
            carts: Arc::new(CartVault::new(storage.clone())),
            storage,
            users,
            mailer: Arc::new(EmailService::new()),
            orders: Arc::new(OrderLog::new()),
            submissions: Arc::new(SubmissionGuard::default()),
            checkout_delay: Duration::from_millis(config.checkout_delay_ms),
        })
    }
}

/// Keeps one submission in flight per actor. Acquiring a key that is
/// already held fails; the key is released when the returned token drops,
/// including on error paths.
#[derive(Default)]
pub struct SubmissionGuard {
    in_flight: Mutex<HashSet<String>>,
}

impl SubmissionGuard {
    pub fn acquire(self: &Arc<Self>, key: impl Into<String>) -> Option<InFlight> {
        let key = key.into();
        let mut in_flight = self.in_flight.lock().expect("submission lock poisoned");
        if !in_flight.insert(key.clone()) {
            return None;
        }
        Some(InFlight {
            guard: Arc::clone(self),
            key,
        })
    }
}

pub struct InFlight {
    guard: Arc<SubmissionGuard>,
    key: String,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let mut in_flight = self
            .guard
            .in_flight
            .lock()
            .expect("submission lock poisoned");
        in_flight.remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_for_same_key_fails_until_release() {
        let guard = Arc::new(SubmissionGuard::default());

        let token = guard.acquire("john@example.com").expect("first acquire");
        assert!(guard.acquire("john@example.com").is_none());
        assert!(guard.acquire("mary@example.com").is_some());

        drop(token);
        assert!(guard.acquire("john@example.com").is_some());
    }
}

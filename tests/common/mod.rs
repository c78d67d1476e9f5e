#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use uuid::Uuid;

use alltanks_api::{
    catalog::Catalog,
    middleware::auth::AuthUser,
    notifications::EmailService,
    orders::OrderLog,
    services::cart_service::CartVault,
    state::{AppState, SubmissionGuard},
    storage::SlotStorage,
    users::UserStore,
};

/// Application state over a temporary data directory, with the simulated
/// checkout delay turned off. The `TempDir` must be kept alive for the
/// duration of the test.
pub fn test_state() -> (TempDir, AppState) {
    test_state_with_mailer(EmailService::new())
}

pub fn test_state_with_mailer(mailer: EmailService) -> (TempDir, AppState) {
    let dir = tempfile::tempdir().expect("temp data dir");
    let storage = Arc::new(SlotStorage::new(dir.path()).expect("slot storage"));
    let users = Arc::new(UserStore::load_or_seed(storage.clone()).expect("user store"));
    let state = AppState {
        catalog: Arc::new(Catalog::seeded()),
        carts: Arc::new(CartVault::new(storage.clone())),
        storage,
        users,
        mailer: Arc::new(mailer),
        orders: Arc::new(OrderLog::new()),
        submissions: Arc::new(SubmissionGuard::default()),
        checkout_delay: Duration::ZERO,
    };
    (dir, state)
}

pub fn customer() -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
        role: "customer".to_string(),
    }
}

pub fn admin() -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
        role: "admin".to_string(),
    }
}

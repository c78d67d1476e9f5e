//! Demo user store.
//!
//! An in-memory user table persisted to the `users` storage slot. Seeded
//! with the two demo accounts when the slot is empty; registration appends
//! and rewrites the slot. This is deliberately not a production identity
//! system.

use std::sync::{Arc, RwLock};

use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::Utc;
use password_hash::rand_core::OsRng;
use uuid::Uuid;

use crate::models::User;
use crate::storage::SlotStorage;

const USERS_SLOT: &str = "users";

pub struct UserStore {
    users: RwLock<Vec<User>>,
    storage: Arc<SlotStorage>,
}

impl UserStore {
    /// Restore users from the storage slot, seeding the demo accounts when
    /// nothing usable is persisted.
    pub fn load_or_seed(storage: Arc<SlotStorage>) -> anyhow::Result<Self> {
        let users = match storage.read::<Vec<User>>(USERS_SLOT) {
            Some(users) if !users.is_empty() => users,
            _ => {
                let seeded = seed_users()?;
                storage.write(USERS_SLOT, &seeded)?;
                seeded
            }
        };
        Ok(Self {
            users: RwLock::new(users),
            storage,
        })
    }

    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .expect("user lock poisoned")
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<User> {
        self.users
            .read()
            .expect("user lock poisoned")
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    /// Append a user and rewrite the slot. Returns `false` when the email
    /// is already taken.
    pub fn insert(&self, user: User) -> anyhow::Result<bool> {
        let mut users = self.users.write().expect("user lock poisoned");
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Ok(false);
        }
        users.push(user);
        self.storage.write(USERS_SLOT, &*users)?;
        Ok(true)
    }
}

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

fn seed_users() -> anyhow::Result<Vec<User>> {
    Ok(vec![
        User {
            id: Uuid::new_v4(),
            email: "admin@alltanks.com.pg".into(),
            password_hash: hash_password("admin123")?,
            first_name: "Admin".into(),
            last_name: "User".into(),
            company: Some("All Tanks Limited".into()),
            phone: Some("+675 472 2XXX".into()),
            role: "admin".into(),
            created_at: Utc::now(),
        },
        User {
            id: Uuid::new_v4(),
            email: "john@example.com".into(),
            password_hash: hash_password("password123")?,
            first_name: "John".into(),
            last_name: "Smith".into(),
            company: Some("ABC Construction".into()),
            phone: Some("+675 123 4567".into()),
            role: "customer".into(),
            created_at: Utc::now(),
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_demo_accounts_and_verifies_passwords() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let storage = Arc::new(SlotStorage::new(dir.path())?);
        let store = UserStore::load_or_seed(storage)?;

        let admin = store.find_by_email("admin@alltanks.com.pg").expect("admin");
        assert_eq!(admin.role, "admin");
        assert!(verify_password("admin123", &admin.password_hash));
        assert!(!verify_password("wrong", &admin.password_hash));
        Ok(())
    }

    #[test]
    fn insert_persists_and_rejects_duplicate_email() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let storage = Arc::new(SlotStorage::new(dir.path())?);
        let store = UserStore::load_or_seed(storage.clone())?;

        let user = User {
            id: Uuid::new_v4(),
            email: "mary@example.com".into(),
            password_hash: hash_password("secret123")?,
            first_name: "Mary".into(),
            last_name: "Kila".into(),
            company: None,
            phone: None,
            role: "customer".into(),
            created_at: Utc::now(),
        };
        assert!(store.insert(user.clone())?);
        assert!(!store.insert(user)?);

        // A fresh store sees the persisted user, not the seeds alone.
        let reloaded = UserStore::load_or_seed(storage)?;
        assert!(reloaded.find_by_email("mary@example.com").is_some());
        Ok(())
    }
}

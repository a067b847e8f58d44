//! In-memory user registry.
//!
//! The registry is the only shared mutable state in the process. Every read
//! and write runs inside one mutex-guarded critical section, so concurrent
//! register/login calls never observe partial state. Each critical section is
//! an O(1) map operation; contention simply blocks callers briefly.
//!
//! Passwords are stored as plain text. A production deployment should hash
//! them with a slow adaptive hash before storage and compare hashes in
//! `verify_credentials`.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Credential store errors.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Username is taken")]
    AlreadyExists,

    #[error("User does not exist")]
    UnknownUser,

    #[error("Passwords do not match")]
    WrongPassword,
}

/// Interface over the account store.
///
/// Handlers depend on this trait rather than a concrete map, so a persistent
/// backend can be swapped in without touching endpoint logic.
pub trait CredentialStore: Send + Sync {
    /// Whether an account with this username exists.
    fn exists(&self, username: &str) -> bool;

    /// Create an account. Fails if the username is taken.
    fn create(&self, username: &str, password: &str) -> Result<(), RegistryError>;

    /// Check a username/password pair against the store.
    fn verify_credentials(&self, username: &str, password: &str) -> Result<(), RegistryError>;
}

/// Process-lifetime credential store backed by a mutex-guarded map.
#[derive(Default)]
pub struct InMemoryRegistry {
    users: Mutex<HashMap<String, String>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CredentialStore for InMemoryRegistry {
    fn exists(&self, username: &str) -> bool {
        self.lock().contains_key(username)
    }

    fn create(&self, username: &str, password: &str) -> Result<(), RegistryError> {
        match self.lock().entry(username.to_string()) {
            Entry::Occupied(_) => Err(RegistryError::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(password.to_string());
                Ok(())
            }
        }
    }

    fn verify_credentials(&self, username: &str, password: &str) -> Result<(), RegistryError> {
        let users = self.lock();
        let stored = users.get(username).ok_or(RegistryError::UnknownUser)?;
        if stored != password {
            return Err(RegistryError::WrongPassword);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_create_and_verify() {
        let registry = InMemoryRegistry::new();

        assert!(!registry.exists("josephine"));
        registry.create("josephine", "password123").unwrap();
        assert!(registry.exists("josephine"));

        assert_eq!(registry.verify_credentials("josephine", "password123"), Ok(()));
    }

    #[test]
    fn test_duplicate_create_rejected() {
        let registry = InMemoryRegistry::new();

        registry.create("josephine", "password123").unwrap();
        let err = registry.create("josephine", "otherpassword").unwrap_err();
        assert_eq!(err, RegistryError::AlreadyExists);

        // First password must survive the failed create
        assert_eq!(registry.verify_credentials("josephine", "password123"), Ok(()));
    }

    #[test]
    fn test_verify_unknown_user() {
        let registry = InMemoryRegistry::new();
        assert_eq!(
            registry.verify_credentials("nobody", "whatever"),
            Err(RegistryError::UnknownUser)
        );
    }

    #[test]
    fn test_verify_wrong_password() {
        let registry = InMemoryRegistry::new();
        registry.create("josephine", "password123").unwrap();
        assert_eq!(
            registry.verify_credentials("josephine", "wrongwrong"),
            Err(RegistryError::WrongPassword)
        );
    }

    #[test]
    fn test_concurrent_create_same_username() {
        let registry = Arc::new(InMemoryRegistry::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.create("josephine", "password123"))
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|r| r.is_ok())
            .count();

        // Exactly one winner, everyone else sees AlreadyExists
        assert_eq!(successes, 1);
        assert!(registry.exists("josephine"));
    }

    #[test]
    fn test_concurrent_create_distinct_usernames() {
        let registry = Arc::new(InMemoryRegistry::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.create(&format!("user_{i:02}"), "password123"))
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap().is_ok());
        }
        for i in 0..16 {
            assert!(registry.exists(&format!("user_{i:02}")));
        }
    }
}

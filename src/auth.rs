//! Credential storage and verification.
//!
//! This is the auth collaborator, not part of the dispatch core: the core
//! only ever sees the resolved [`User`]. An `AuthManager` is constructed
//! explicitly at startup and injected into the transport.

use crate::model::User;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("user '{0}' already exists")]
    UserExists(String),

    #[error("{0}")]
    InvalidAccount(String),

    #[error("password hashing failed: {0}")]
    Hash(String),
}

pub struct AuthManager {
    /// username → bcrypt hash
    users: RwLock<HashMap<String, String>>,
}

impl AuthManager {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Hashes a password using bcrypt. Each hash includes a random salt, so
    /// the same password produces different hashes.
    fn hash_password(password: &str) -> Result<String, AuthError> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| AuthError::Hash(e.to_string()))
    }

    fn verify_password(password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<User, AuthError> {
        Self::validate_username(username)?;
        Self::validate_password(password)?;

        let hash = Self::hash_password(password)?;
        let mut users = self.users.write().await;

        if users.contains_key(username) {
            return Err(AuthError::UserExists(username.to_string()));
        }
        users.insert(username.to_string(), hash);
        Ok(User::new(username))
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let users = self.users.read().await;
        let hash = users.get(username).ok_or(AuthError::InvalidCredentials)?;

        if !Self::verify_password(password, hash) {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(User::new(username))
    }

    pub async fn user_exists(&self, username: &str) -> bool {
        self.users.read().await.contains_key(username)
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    fn validate_username(username: &str) -> Result<(), AuthError> {
        if username.is_empty() {
            return Err(AuthError::InvalidAccount("username cannot be empty".into()));
        }
        if username.len() > 50 {
            return Err(AuthError::InvalidAccount(
                "username too long (max 50 characters)".into(),
            ));
        }
        Ok(())
    }

    fn validate_password(password: &str) -> Result<(), AuthError> {
        if password.is_empty() {
            return Err(AuthError::InvalidAccount("password cannot be empty".into()));
        }
        if password.len() < 8 {
            return Err(AuthError::InvalidAccount(
                "password must be at least 8 characters long".into(),
            ));
        }
        Ok(())
    }
}

impl Default for AuthManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn register_then_authenticate() {
        let auth = AuthManager::new();
        auth.register("alice", "password123").await.unwrap();

        let user = auth.authenticate("alice", "password123").await.unwrap();
        assert_eq!(user.username(), "alice");
    }

    #[tokio::test]
    async fn invalid_credentials_are_rejected() {
        let auth = AuthManager::new();
        auth.register("alice", "password123").await.unwrap();

        assert!(auth.authenticate("alice", "wrongpass").await.is_err());
        assert!(auth.authenticate("nonexistent", "password123").await.is_err());
    }

    #[tokio::test]
    async fn duplicate_registration_fails() {
        let auth = AuthManager::new();
        auth.register("bob", "password1234").await.unwrap();

        let result = auth.register("bob", "password1234").await;
        assert!(matches!(result, Err(AuthError::UserExists(_))));
        assert_eq!(auth.user_count().await, 1);
    }

    #[tokio::test]
    async fn account_validation() {
        let auth = AuthManager::new();

        assert!(auth.register("", "password123").await.is_err());
        let long_name = "a".repeat(51);
        assert!(auth.register(&long_name, "password123").await.is_err());

        assert!(auth.register("carol", "short").await.is_err());
        assert!(auth.register("carol", "").await.is_err());
        assert!(auth.register("carol", "validpass123").await.is_ok());
    }

    #[tokio::test]
    async fn user_exists_reflects_registration() {
        let auth = AuthManager::new();
        assert!(!auth.user_exists("dave").await);
        auth.register("dave", "password123").await.unwrap();
        assert!(auth.user_exists("dave").await);
    }
}

use serde::{Deserialize, Serialize};

/// An already-authenticated caller identity.
///
/// Produced by the auth collaborator; the core only compares usernames for
/// ownership checks and never sees credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    username: String,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

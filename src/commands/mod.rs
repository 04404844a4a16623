//! The closed command set and its shared contract.
//!
//! Each command declares its name, description, arity and auth requirement;
//! the dispatcher enforces arity and auth up front, so `execute` only deals
//! with argument parsing and its single logical store operation.

pub mod bulk;
pub mod mutate;
pub mod persist;
pub mod query;
mod registry;

pub use registry::CommandRegistry;

use crate::collection::{BandCollection, SnapshotManager};
use crate::core::{CommandError, Result};
use crate::dispatcher::CommandHistory;
use crate::model::User;
use crate::protocol::{Request, Response};
use async_trait::async_trait;
use std::str::FromStr;

/// Whether a command takes positional arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandMode {
    NoArgs,
    WithArguments,
}

/// Everything a command may touch besides the request itself.
pub struct CommandContext<'a> {
    pub store: &'a BandCollection,
    pub history: &'a CommandHistory,
    pub registry: &'a CommandRegistry,
    pub snapshots: Option<&'a SnapshotManager>,
}

#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Required positional argument count; the dispatcher rejects any other
    /// arity before `execute` runs.
    fn min_args(&self) -> usize {
        0
    }

    fn mode(&self) -> CommandMode {
        CommandMode::NoArgs
    }

    /// Commands that mutate the collection require an authenticated caller.
    fn requires_auth(&self) -> bool {
        true
    }

    async fn execute(
        &self,
        request: &Request,
        ctx: &CommandContext<'_>,
        user: Option<&User>,
    ) -> Result<Response>;
}

/// Parses one positional argument, reporting the offending value on failure.
pub(crate) fn parse_arg<T: FromStr>(value: &str, expected: &'static str) -> Result<T> {
    value.parse().map_err(|_| CommandError::ArgumentFormat {
        value: value.to_string(),
        expected,
    })
}

/// The authenticated caller's username; the dispatcher has already gated
/// anonymous access, so hitting `AuthRequired` here means a caller bypassed
/// the dispatcher.
pub(crate) fn require_user<'a>(user: Option<&'a User>) -> Result<&'a str> {
    user.map(User::username).ok_or(CommandError::AuthRequired)
}

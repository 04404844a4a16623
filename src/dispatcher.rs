//! The boundary between the transport and the command set: every request
//! that reaches `dispatch` yields exactly one `Response`, whatever happens
//! inside a command.

use crate::collection::{BandCollection, SnapshotManager};
use crate::commands::{CommandContext, CommandRegistry};
use crate::core::CommandError;
use crate::model::User;
use crate::protocol::{Request, Response};
use log::debug;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

const DEFAULT_HISTORY_CAPACITY: usize = 14;

/// Bounded ring of the most recently dispatched command names.
pub struct CommandHistory {
    entries: RwLock<VecDeque<String>>,
    capacity: usize,
}

impl CommandHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub async fn record(&self, name: &str) {
        let mut entries = self.entries.write().await;
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(name.to_string());
    }

    /// Oldest first.
    pub async fn recent(&self) -> Vec<String> {
        self.entries.read().await.iter().cloned().collect()
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

pub struct Dispatcher {
    registry: CommandRegistry,
    store: Arc<BandCollection>,
    history: CommandHistory,
    snapshots: Option<SnapshotManager>,
}

impl Dispatcher {
    pub fn new(registry: CommandRegistry, store: Arc<BandCollection>) -> Self {
        Self {
            registry,
            store,
            history: CommandHistory::default(),
            snapshots: None,
        }
    }

    /// Enables the `save` command against the given snapshot sink.
    pub fn with_snapshots(mut self, snapshots: SnapshotManager) -> Self {
        self.snapshots = Some(snapshots);
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history = CommandHistory::new(capacity);
        self
    }

    pub fn store(&self) -> &Arc<BandCollection> {
        &self.store
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Routes a request to its command. Check order: lookup, arity, auth,
    /// then the command body; every failure becomes a failure Response.
    pub async fn dispatch(&self, request: &Request, user: Option<&User>) -> Response {
        let Some(command) = self.registry.get(&request.command) else {
            return CommandError::UnknownCommand(request.command.clone()).into();
        };

        if request.args.len() != command.min_args() {
            return CommandError::Arity {
                command: command.name(),
                required: command.min_args(),
            }
            .into();
        }

        if command.requires_auth() && user.is_none() {
            return CommandError::AuthRequired.into();
        }

        self.history.record(command.name()).await;

        let ctx = CommandContext {
            store: &self.store,
            history: &self.history,
            registry: &self.registry,
            snapshots: self.snapshots.as_ref(),
        };

        match command.execute(request, &ctx, user).await {
            Ok(response) => response,
            Err(err) => {
                debug!("command '{}' failed: {}", command.name(), err);
                err.into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BandPayload, Coordinates};

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(
            CommandRegistry::with_default_commands(),
            Arc::new(BandCollection::new()),
        )
    }

    fn payload(name: &str, participants: i64) -> BandPayload {
        BandPayload::new(name, Coordinates::new(0, 0.0), participants)
    }

    fn alice() -> User {
        User::new("alice")
    }

    #[tokio::test]
    async fn unknown_command_is_reported_not_raised() {
        let d = dispatcher();
        let response = d.dispatch(&Request::new("frobnicate"), None).await;
        assert!(!response.success);
        assert_eq!(response.message, "unknown command 'frobnicate'");
    }

    #[tokio::test]
    async fn arity_error_is_identical_every_time_and_mutates_nothing() {
        let d = dispatcher();
        let user = alice();

        let first = d
            .dispatch(&Request::new("remove_by_id"), Some(&user))
            .await;
        let second = d
            .dispatch(
                &Request::new("remove_by_id").arg("1").arg("2"),
                Some(&user),
            )
            .await;

        assert!(!first.success);
        assert_eq!(first.message, second.message);
        assert_eq!(first.message, "command 'remove_by_id' expects 1 argument(s)");
        assert!(d.store().is_empty().await);
    }

    #[tokio::test]
    async fn anonymous_mutation_is_rejected() {
        let d = dispatcher();
        let response = d
            .dispatch(&Request::new("add").with_band(payload("A", 3)), None)
            .await;
        assert!(!response.success);
        assert_eq!(response.message, "authorization required");
        assert!(d.store().is_empty().await);
    }

    #[tokio::test]
    async fn queries_work_without_a_user() {
        let d = dispatcher();
        for name in ["show", "head", "info", "help", "history"] {
            let response = d.dispatch(&Request::new(name), None).await;
            assert!(response.success, "query '{}' failed: {}", name, response.message);
        }
    }

    #[tokio::test]
    async fn parse_failure_becomes_a_format_error() {
        let d = dispatcher();
        let user = alice();
        d.dispatch(
            &Request::new("add").with_band(payload("A", 3)),
            Some(&user),
        )
        .await;

        let response = d
            .dispatch(&Request::new("remove_greater").arg("abc"), Some(&user))
            .await;
        assert!(!response.success);
        assert_eq!(
            response.message,
            "argument 'abc' is not a valid integer threshold"
        );
        assert_eq!(d.store().len().await, 1);
    }

    #[tokio::test]
    async fn add_then_show_round_trip() {
        let d = dispatcher();
        let user = alice();

        let added = d
            .dispatch(
                &Request::new("add").with_band(payload("The Knids", 4)),
                Some(&user),
            )
            .await;
        assert!(added.success);
        assert_eq!(added.message, "band added with id 1");

        let shown = d.dispatch(&Request::new("show"), None).await;
        let bands = shown.bands.unwrap();
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].name, "The Knids");
        assert_eq!(bands[0].owner, "alice");
    }

    #[tokio::test]
    async fn history_records_dispatched_names_in_order() {
        let d = dispatcher();
        d.dispatch(&Request::new("show"), None).await;
        d.dispatch(&Request::new("info"), None).await;
        d.dispatch(&Request::new("nonsense"), None).await; // not recorded

        let response = d.dispatch(&Request::new("history"), None).await;
        assert_eq!(response.message, "show\ninfo\nhistory");
    }

    #[tokio::test]
    async fn history_ring_is_bounded() {
        let history = CommandHistory::new(3);
        for name in ["a", "b", "c", "d"] {
            history.record(name).await;
        }
        assert_eq!(history.recent().await, vec!["b", "c", "d"]);
    }
}

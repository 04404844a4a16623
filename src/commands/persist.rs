use super::{require_user, Command, CommandContext};
use crate::core::{CommandError, Result};
use crate::model::User;
use crate::protocol::{Request, Response};
use async_trait::async_trait;

/// Snapshots the collection to the configured sink. The copy is taken under
/// the read lock; the file write happens after it is released.
pub struct SaveCommand;

#[async_trait]
impl Command for SaveCommand {
    fn name(&self) -> &'static str {
        "save"
    }

    fn description(&self) -> &'static str {
        "persist the collection to disk"
    }

    async fn execute(
        &self,
        _request: &Request,
        ctx: &CommandContext<'_>,
        user: Option<&User>,
    ) -> Result<Response> {
        require_user(user)?;
        let manager = ctx
            .snapshots
            .ok_or_else(|| CommandError::Persistence("no snapshot path configured".into()))?;
        let snapshot = ctx.store.to_snapshot().await;
        let count = snapshot.metadata.band_count;
        manager.save(&snapshot)?;
        Ok(Response::ok(format!("collection saved ({} band(s))", count)))
    }
}

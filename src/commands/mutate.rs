//! Single-record mutations: add, update, remove_by_id, clear.

use super::{parse_arg, require_user, Command, CommandContext, CommandMode};
use crate::core::{CommandError, Result};
use crate::model::User;
use crate::protocol::{Request, Response};
use async_trait::async_trait;

pub struct AddCommand;

#[async_trait]
impl Command for AddCommand {
    fn name(&self) -> &'static str {
        "add"
    }

    fn description(&self) -> &'static str {
        "add a new band to the collection"
    }

    async fn execute(
        &self,
        request: &Request,
        ctx: &CommandContext<'_>,
        user: Option<&User>,
    ) -> Result<Response> {
        let owner = require_user(user)?;
        let payload = request
            .band
            .as_ref()
            .ok_or_else(|| CommandError::Validation("add requires a band payload".into()))?;
        let id = ctx.store.insert(payload, owner).await?;
        Ok(Response::ok(format!("band added with id {}", id)))
    }
}

pub struct UpdateCommand;

#[async_trait]
impl Command for UpdateCommand {
    fn name(&self) -> &'static str {
        "update"
    }

    fn description(&self) -> &'static str {
        "replace the fields of the band with the given id"
    }

    fn min_args(&self) -> usize {
        1
    }

    fn mode(&self) -> CommandMode {
        CommandMode::WithArguments
    }

    async fn execute(
        &self,
        request: &Request,
        ctx: &CommandContext<'_>,
        user: Option<&User>,
    ) -> Result<Response> {
        let requester = require_user(user)?;
        let id: u64 = parse_arg(&request.args[0], "band id")?;
        let payload = request
            .band
            .as_ref()
            .ok_or_else(|| CommandError::Validation("update requires a band payload".into()))?;
        ctx.store.update(id, payload, requester).await?;
        Ok(Response::ok(format!("band {} updated", id)))
    }
}

pub struct RemoveByIdCommand;

#[async_trait]
impl Command for RemoveByIdCommand {
    fn name(&self) -> &'static str {
        "remove_by_id"
    }

    fn description(&self) -> &'static str {
        "remove the band with the given id"
    }

    fn min_args(&self) -> usize {
        1
    }

    fn mode(&self) -> CommandMode {
        CommandMode::WithArguments
    }

    async fn execute(
        &self,
        request: &Request,
        ctx: &CommandContext<'_>,
        user: Option<&User>,
    ) -> Result<Response> {
        let requester = require_user(user)?;
        let id: u64 = parse_arg(&request.args[0], "band id")?;
        ctx.store.remove_by_id(id, requester).await?;
        Ok(Response::ok(format!("band {} removed", id)))
    }
}

pub struct ClearCommand;

#[async_trait]
impl Command for ClearCommand {
    fn name(&self) -> &'static str {
        "clear"
    }

    fn description(&self) -> &'static str {
        "remove all of your bands from the collection"
    }

    async fn execute(
        &self,
        _request: &Request,
        ctx: &CommandContext<'_>,
        user: Option<&User>,
    ) -> Result<Response> {
        let requester = require_user(user)?;
        let removed = ctx.store.clear_owned(requester).await;
        Ok(Response::ok(format!("removed {} band(s)", removed)))
    }
}

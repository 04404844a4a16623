//! Threshold sweeps over the caller's own bands.
//!
//! Both commands report the removed count rather than the surviving records;
//! `show` is one request away if the caller wants the survivors.

use super::{parse_arg, require_user, Command, CommandContext, CommandMode};
use crate::core::Result;
use crate::model::User;
use crate::protocol::{Request, Response};
use async_trait::async_trait;

pub struct RemoveGreaterCommand;

#[async_trait]
impl Command for RemoveGreaterCommand {
    fn name(&self) -> &'static str {
        "remove_greater"
    }

    fn description(&self) -> &'static str {
        "remove your bands with strictly more participants than the threshold"
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
        let threshold: i64 = parse_arg(&request.args[0], "integer threshold")?;
        let removed = ctx
            .store
            .remove_where(requester, |band| band.number_of_participants > threshold)
            .await;
        Ok(Response::ok(format!(
            "removed {} band(s) with more than {} participants",
            removed, threshold
        )))
    }
}

pub struct RemoveLowerCommand;

#[async_trait]
impl Command for RemoveLowerCommand {
    fn name(&self) -> &'static str {
        "remove_lower"
    }

    fn description(&self) -> &'static str {
        "remove your bands with strictly fewer participants than the threshold"
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
        let threshold: i64 = parse_arg(&request.args[0], "integer threshold")?;
        let removed = ctx
            .store
            .remove_where(requester, |band| band.number_of_participants < threshold)
            .await;
        Ok(Response::ok(format!(
            "removed {} band(s) with fewer than {} participants",
            removed, threshold
        )))
    }
}

//! Read-only commands; none of them require authentication or touch the
//! collection beyond a consistent snapshot.

use super::{Command, CommandContext};
use crate::core::Result;
use crate::model::User;
use crate::protocol::{Request, Response};
use async_trait::async_trait;

pub struct ShowCommand;

#[async_trait]
impl Command for ShowCommand {
    fn name(&self) -> &'static str {
        "show"
    }

    fn description(&self) -> &'static str {
        "list every band in iteration order"
    }

    fn requires_auth(&self) -> bool {
        false
    }

    async fn execute(
        &self,
        _request: &Request,
        ctx: &CommandContext<'_>,
        _user: Option<&User>,
    ) -> Result<Response> {
        let bands = ctx.store.snapshot().await;
        Ok(Response::with_bands(
            format!("{} band(s) in the collection", bands.len()),
            bands,
        ))
    }
}

pub struct HeadCommand;

#[async_trait]
impl Command for HeadCommand {
    fn name(&self) -> &'static str {
        "head"
    }

    fn description(&self) -> &'static str {
        "show the first band in iteration order"
    }

    fn requires_auth(&self) -> bool {
        false
    }

    async fn execute(
        &self,
        _request: &Request,
        ctx: &CommandContext<'_>,
        _user: Option<&User>,
    ) -> Result<Response> {
        match ctx.store.head().await {
            Some(band) => Ok(Response::with_bands(band.to_string(), vec![band])),
            None => Ok(Response::ok("the collection is empty")),
        }
    }
}

pub struct InfoCommand;

#[async_trait]
impl Command for InfoCommand {
    fn name(&self) -> &'static str {
        "info"
    }

    fn description(&self) -> &'static str {
        "show collection type, creation time and size"
    }

    fn requires_auth(&self) -> bool {
        false
    }

    async fn execute(
        &self,
        _request: &Request,
        ctx: &CommandContext<'_>,
        _user: Option<&User>,
    ) -> Result<Response> {
        let created = ctx.store.created_at().await;
        let len = ctx.store.len().await;
        Ok(Response::ok(format!(
            "type: ordered band collection, created: {}, size: {}",
            created.to_rfc3339(),
            len
        )))
    }
}

pub struct HelpCommand;

#[async_trait]
impl Command for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn description(&self) -> &'static str {
        "list available commands"
    }

    fn requires_auth(&self) -> bool {
        false
    }

    async fn execute(
        &self,
        _request: &Request,
        ctx: &CommandContext<'_>,
        _user: Option<&User>,
    ) -> Result<Response> {
        let lines: Vec<String> = ctx
            .registry
            .descriptions()
            .into_iter()
            .map(|(name, description)| format!("{} - {}", name, description))
            .collect();
        Ok(Response::ok(lines.join("\n")))
    }
}

pub struct HistoryCommand;

#[async_trait]
impl Command for HistoryCommand {
    fn name(&self) -> &'static str {
        "history"
    }

    fn description(&self) -> &'static str {
        "show the most recently dispatched commands"
    }

    fn requires_auth(&self) -> bool {
        false
    }

    async fn execute(
        &self,
        _request: &Request,
        ctx: &CommandContext<'_>,
        _user: Option<&User>,
    ) -> Result<Response> {
        let recent = ctx.history.recent().await;
        if recent.is_empty() {
            Ok(Response::ok("history is empty"))
        } else {
            Ok(Response::ok(recent.join("\n")))
        }
    }
}

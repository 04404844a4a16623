//! Wire-visible message shapes and the length-prefixed framing both ends
//! of the transport share.

pub mod frame;

use crate::core::CommandError;
use crate::model::{BandPayload, MusicBand};
use serde::{Deserialize, Serialize};

/// Raw credentials attached to a request; resolved to a
/// [`User`](crate::model::User) by the transport before dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// One client request: a command name, its positional string arguments, an
/// optional band payload for add/update style commands, and optional
/// credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub command: String,
    pub args: Vec<String>,
    pub band: Option<BandPayload>,
    pub credentials: Option<Credentials>,
}

impl Request {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            band: None,
            credentials: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_band(mut self, band: BandPayload) -> Self {
        self.band = Some(band);
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }
}

/// The single reply every request produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    pub message: String,
    pub bands: Option<Vec<MusicBand>>,
}

impl Response {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            bands: None,
        }
    }

    pub fn with_bands(message: impl Into<String>, bands: Vec<MusicBand>) -> Self {
        Self {
            success: true,
            message: message.into(),
            bands: Some(bands),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            bands: None,
        }
    }
}

impl From<CommandError> for Response {
    fn from(err: CommandError) -> Self {
        Response::error(err.to_string())
    }
}

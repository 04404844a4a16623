use thiserror::Error;

/// Every failure a request can produce. The dispatcher converts each of
/// these into a failure [`Response`](crate::protocol::Response); none of
/// them escape to the transport layer.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Argument count mismatch. The message depends only on the command,
    /// so the same bad request always yields the same text.
    #[error("command '{command}' expects {required} argument(s)")]
    Arity { command: &'static str, required: usize },

    #[error("authorization required")]
    AuthRequired,

    #[error("band {0} belongs to another user")]
    NotOwner(u64),

    #[error("argument '{value}' is not a valid {expected}")]
    ArgumentFormat {
        value: String,
        expected: &'static str,
    },

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("no band with id {0}")]
    NotFound(u64),

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, CommandError>;

//! A client-server collection of music band records.
//!
//! Remote clients mutate one shared, ordered, server-resident collection
//! through a fixed vocabulary of named commands. The dispatch core —
//! [`Dispatcher`], [`CommandRegistry`] and [`BandCollection`] — guarantees
//! that every request yields exactly one [`Response`], that ids are unique,
//! and that a user can only mutate records they own.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use bandstore::{BandCollection, BandPayload, CommandRegistry, Coordinates,
//!                 Dispatcher, Request, User};
//!
//! # tokio_test::block_on(async {
//! let store = Arc::new(BandCollection::new());
//! let dispatcher = Dispatcher::new(CommandRegistry::with_default_commands(), store);
//!
//! let alice = User::new("alice");
//! let payload = BandPayload::new("The Knids", Coordinates::new(4, 2.0), 4);
//! let response = dispatcher
//!     .dispatch(&Request::new("add").with_band(payload), Some(&alice))
//!     .await;
//! assert!(response.success);
//!
//! // Queries need no authentication.
//! let shown = dispatcher.dispatch(&Request::new("show"), None).await;
//! assert_eq!(shown.bands.unwrap().len(), 1);
//! # });
//! ```

pub mod auth;
pub mod client;
pub mod collection;
pub mod commands;
pub mod config;
pub mod core;
pub mod dispatcher;
pub mod model;
pub mod protocol;
pub mod server;

// Re-export main types for convenience
pub use auth::{AuthError, AuthManager};
pub use client::Client;
pub use collection::{BandCollection, CollectionSnapshot, SnapshotManager};
pub use commands::{Command, CommandContext, CommandMode, CommandRegistry};
pub use config::ServerConfig;
pub use core::{CommandError, Result};
pub use dispatcher::{CommandHistory, Dispatcher};
pub use model::{BandPayload, Coordinates, MusicBand, MusicGenre, User};
pub use protocol::{Credentials, Request, Response};
pub use server::BandServer;

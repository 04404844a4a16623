//! Framed TCP transport: one tokio task per connection, one Response per
//! Request. Credentials are resolved to a `User` here, before dispatch;
//! the dispatch core never sees a password.

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::dispatcher::Dispatcher;
use crate::model::User;
use crate::protocol::{frame, Request, Response};
use log::{debug, error, info};
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

/// Resolved against the `AuthManager` here, never routed to the dispatcher.
const REGISTER_COMMAND: &str = "register";

pub struct BandServer {
    config: ServerConfig,
    dispatcher: Arc<Dispatcher>,
    auth: Arc<AuthManager>,
}

impl BandServer {
    pub fn new(config: ServerConfig, dispatcher: Arc<Dispatcher>, auth: Arc<AuthManager>) -> Self {
        Self {
            config,
            dispatcher,
            auth,
        }
    }

    pub async fn run(&self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.config.addr()).await?;
        info!("bandstore listening on {}", self.config.addr());
        serve(listener, self.dispatcher.clone(), self.auth.clone()).await
    }
}

/// Accept loop over an already-bound listener; tests bind an ephemeral port
/// themselves and hand it in.
pub async fn serve(
    listener: TcpListener,
    dispatcher: Arc<Dispatcher>,
    auth: Arc<AuthManager>,
) -> std::io::Result<()> {
    loop {
        let (socket, addr) = listener.accept().await?;
        debug!("accepted connection from {}", addr);
        let dispatcher = dispatcher.clone();
        let auth = auth.clone();

        tokio::spawn(async move {
            if let Err(e) = handle_connection(socket, dispatcher, auth).await {
                error!("connection from {} failed: {}", addr, e);
            }
        });
    }
}

async fn handle_connection(
    mut socket: TcpStream,
    dispatcher: Arc<Dispatcher>,
    auth: Arc<AuthManager>,
) -> std::io::Result<()> {
    loop {
        let request: Request = match frame::read_message(&mut socket).await? {
            Some(request) => request,
            None => return Ok(()),
        };
        let response = process(&request, &dispatcher, &auth).await;
        frame::write_message(&mut socket, &response).await?;
    }
}

/// Resolves credentials, then routes through the dispatcher. Authentication
/// failures never reach the dispatch core.
async fn process(request: &Request, dispatcher: &Dispatcher, auth: &AuthManager) -> Response {
    if request.command == REGISTER_COMMAND {
        return match &request.credentials {
            Some(credentials) => {
                match auth
                    .register(&credentials.username, &credentials.password)
                    .await
                {
                    Ok(user) => Response::ok(format!("user '{}' registered", user.username())),
                    Err(e) => Response::error(e.to_string()),
                }
            }
            None => Response::error("register requires credentials"),
        };
    }

    let user: Option<User> = match &request.credentials {
        Some(credentials) => {
            match auth
                .authenticate(&credentials.username, &credentials.password)
                .await
            {
                Ok(user) => Some(user),
                Err(e) => return Response::error(e.to_string()),
            }
        }
        None => None,
    };

    dispatcher.dispatch(request, user.as_ref()).await
}

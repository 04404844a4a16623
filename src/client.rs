//! Minimal programmatic client speaking the same framing as the server.
//! Integration tests use it; it is not an interactive shell.

use crate::protocol::{frame, Credentials, Request, Response};
use std::io;
use tokio::net::{TcpStream, ToSocketAddrs};

pub struct Client {
    stream: TcpStream,
    credentials: Option<Credentials>,
}

impl Client {
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> io::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self {
            stream,
            credentials: None,
        })
    }

    /// Attaches credentials to every subsequent request that does not carry
    /// its own.
    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.credentials = Some(Credentials::new(username, password));
        self
    }

    pub async fn register(&mut self, username: &str, password: &str) -> io::Result<Response> {
        let request =
            Request::new("register").with_credentials(Credentials::new(username, password));
        self.send(request).await
    }

    pub async fn send(&mut self, mut request: Request) -> io::Result<Response> {
        if request.credentials.is_none() {
            request.credentials = self.credentials.clone();
        }
        frame::write_message(&mut self.stream, &request).await?;
        frame::read_message(&mut self.stream).await?.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "server closed the connection",
            )
        })
    }
}

//! `MudServer` builder and accept loop.
//!
//! This is the entry point for running a mudcore server. It ties
//! together all the layers: transport → session → bus/world.

use std::sync::Arc;

use mudcore_bus::Bus;
use mudcore_protocol::{RoomId, Styler};
use mudcore_transport::{TcpLineTransport, Transport};
use mudcore_world::InMemoryWorld;

use crate::handler::handle_connection;
use crate::{MudError, ServerConfig};

/// Shared server state passed to each connection handler task.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks. The world
/// and bus handle their own synchronization.
pub(crate) struct ServerState {
    pub(crate) world: Arc<InMemoryWorld>,
    pub(crate) bus: Bus,
    pub(crate) config: ServerConfig,
}

/// Builder for configuring and starting a mud server.
///
/// # Example
///
/// ```rust,ignore
/// use mudcore::MudServer;
///
/// let server = MudServer::builder()
///     .bind("0.0.0.0:4000")
///     .motd("Welcome, traveler.")
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct MudServerBuilder {
    config: ServerConfig,
}

impl MudServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
        }
    }

    /// Starts from a complete config (e.g. [`ServerConfig::from_path`]).
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.config.bind_addr = addr.to_string();
        self
    }

    /// Sets the room new players start in.
    pub fn default_room(mut self, room: RoomId) -> Self {
        self.config.default_room = room;
        self
    }

    /// Sets the message of the day.
    pub fn motd(mut self, motd: &str) -> Self {
        self.config.motd = Some(motd.to_string());
        self
    }

    /// Sets how delivered lines are decorated.
    pub fn styler(mut self, styler: Styler) -> Self {
        self.config.styler = styler;
        self
    }

    /// Binds the listener and builds the server.
    pub async fn build(self) -> Result<MudServer, MudError> {
        let transport = TcpLineTransport::bind(&self.config.bind_addr).await?;

        let state = Arc::new(ServerState {
            world: Arc::new(InMemoryWorld::new()),
            bus: Bus::with_capacity(self.config.bus_capacity),
            config: self.config,
        });

        Ok(MudServer { transport, state })
    }
}

impl Default for MudServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running mud server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct MudServer {
    transport: TcpLineTransport,
    state: Arc<ServerState>,
}

impl MudServer {
    /// Creates a new builder.
    pub fn builder() -> MudServerBuilder {
        MudServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the server accept loop.
    ///
    /// Accepts incoming connections, performs login, and spawns a
    /// handler task for each connected player. Runs until the process
    /// is terminated.
    pub async fn run(mut self) -> Result<(), MudError> {
        tracing::info!("mudcore server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}

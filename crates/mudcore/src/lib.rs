//! # mudcore
//!
//! Session and message-distribution core for a text-based multiplayer
//! (MUD-style) chat server.
//!
//! Clients connect over plain newline-framed TCP (telnet or `nc` will
//! do), pick a name, and land in a room. Every input line becomes a
//! typed event on a shared broadcast bus; every session independently
//! filters the full event stream by room and identity and phrases each
//! event for its own viewer (`You say "hi".` vs `Alice says "hi".`).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mudcore::MudServer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mudcore::MudError> {
//!     let server = MudServer::builder()
//!         .bind("0.0.0.0:4000")
//!         .motd("Welcome, traveler.")
//!         .build()
//!         .await?;
//!     server.run().await
//! }
//! ```

mod config;
mod error;
mod handler;
mod server;

pub use config::ServerConfig;
pub use error::MudError;
pub use server::{MudServer, MudServerBuilder};

/// Commonly used types from across the stack, re-exported for embedders.
pub mod prelude {
    pub use crate::{MudError, MudServer, MudServerBuilder, ServerConfig};
    pub use mudcore_bus::{Bus, BusReceiver};
    pub use mudcore_protocol::{Event, EventKind, PlayerName, RoomId, SessionId, Styler};
    pub use mudcore_session::{render_for, Line, Session};
    pub use mudcore_world::{InMemoryWorld, Profile, Registry, World, WorldError};
}

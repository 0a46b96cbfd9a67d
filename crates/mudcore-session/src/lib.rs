//! Session layer for mudcore: the core of the server.
//!
//! A session is one connected player and two independent activities:
//!
//! 1. **Ingest** — read lines from the connection, parse them into
//!    events, publish to the broadcast bus ([`Session::ingest`]).
//! 2. **Deliver** — observe every event on the bus, decide per event
//!    whether THIS player sees it and with which phrasing, write the
//!    render to the connection ([`Session::deliver`]).
//!
//! The decision logic lives in [`render_for`] and is a pure function of
//! the event, the viewer's identity, and a registry snapshot — no
//! session state, no I/O — so the whole visibility table is unit-testable
//! against a fake registry.
//!
//! # How it fits in the stack
//!
//! ```text
//! mudcore (accept loop)       ← creates sessions
//!     ↕
//! session layer (this crate)  ← login / ingest / deliver / visibility
//!     ↕
//! bus, world, protocol, transport (below)
//! ```

mod error;
mod login;
mod session;
mod view;

pub use error::SessionError;
pub use login::negotiate_name;
pub use session::Session;
pub use view::{render_for, Line};

//! Player/room registry for mudcore.
//!
//! The registry answers one question for the visibility engine — "which
//! room is this player in right now?" — and one for `/who` — "what does
//! this player look like?". It is exposed to the core as a capability
//! trait rather than shared global state, so the visibility engine can
//! be tested against a fake registry with no server running.
//!
//! Two traits split read from write:
//!
//! - [`Registry`] — the read-only capability the deliver loops consume.
//! - [`World`] — `Registry` plus the mutations (join, remove, move)
//!   performed by login and by room-transition commands.
//!
//! [`InMemoryWorld`] is the only production implementation.

mod error;
mod memory;
mod registry;

pub use error::WorldError;
pub use memory::InMemoryWorld;
pub use registry::{Profile, Registry, World};

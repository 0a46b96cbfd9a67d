//! Server configuration.

use std::path::Path;

use mudcore_protocol::{RoomId, Styler};
use serde::{Deserialize, Serialize};

use crate::MudError;

/// Configuration for a [`MudServer`](crate::MudServer).
///
/// Every field has a sensible default, so a config file only needs the
/// keys it wants to change:
///
/// ```json
/// {
///   "bind_addr": "0.0.0.0:4000",
///   "motd": "Welcome to the grove.",
///   "styler": "plain"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the TCP listener binds to.
    pub bind_addr: String,
    /// Room every player starts in after login.
    pub default_room: RoomId,
    /// Message of the day, sent line by line before the name prompt.
    pub motd: Option<String>,
    /// How delivered lines are decorated.
    pub styler: Styler,
    /// Per-subscriber event buffer on the broadcast bus.
    pub bus_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:4000".to_string(),
            default_room: RoomId::new("lobby"),
            motd: None,
            styler: Styler::default(),
            bus_capacity: mudcore_bus::DEFAULT_CAPACITY,
        }
    }
}

impl ServerConfig {
    /// Loads a config from a JSON file, filling missing keys with defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MudError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

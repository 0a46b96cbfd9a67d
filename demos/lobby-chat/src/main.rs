//! A runnable chat server: `cargo run`, then `nc localhost 4000` from a
//! few terminals and start talking.
//!
//! Pass a JSON config path to override the defaults:
//!
//! ```text
//! cargo run -- mud.json
//! RUST_LOG=mudcore=debug cargo run
//! ```

use mudcore::{MudError, MudServer, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), MudError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ServerConfig::from_path(&path)?,
        None => ServerConfig {
            bind_addr: "0.0.0.0:4000".to_string(),
            motd: Some("Welcome to the lobby. /tell, /me, /shout, /go, /who, /quit.".to_string()),
            ..ServerConfig::default()
        },
    };

    tracing::info!(addr = %config.bind_addr, "starting lobby-chat");
    let server = MudServer::builder().config(config).build().await?;
    server.run().await
}

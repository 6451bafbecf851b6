//! Command line configuration of the server binary.
//!
//! Every flag can also be given through the environment:
//!
//! ```bash
//! RAW_HTTP_DIRECTORY=/tmp/files RAW_HTTP_IDLE_TIMEOUT=30 raw-http-server
//! raw-http-server --directory /tmp/files --address 127.0.0.1:4221 --log-level debug
//! ```

use clap::Parser;
use raw_http::codec::DEFAULT_MAX_BODY_SIZE;
use raw_http::connection::ConnectionOptions;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

#[derive(Debug, Clone, Parser)]
#[command(name = "raw-http-server", version, about = "Serves root, echo, user-agent and file routes over HTTP/1.1")]
pub struct Config {
    /// Base directory of the `/files/` routes
    #[arg(long, default_value = ".", env = "RAW_HTTP_DIRECTORY")]
    pub directory: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:4221", env = "RAW_HTTP_ADDRESS")]
    pub address: SocketAddr,

    /// Seconds a connection may wait for its next request; unbounded when absent
    #[arg(long = "idle-timeout", value_name = "SECS", env = "RAW_HTTP_IDLE_TIMEOUT")]
    pub idle_timeout_secs: Option<u64>,

    /// Largest accepted request body, in bytes
    #[arg(long = "max-body-size", value_name = "BYTES", default_value_t = DEFAULT_MAX_BODY_SIZE, env = "RAW_HTTP_MAX_BODY_SIZE")]
    pub max_body_size: u64,

    /// Most verbose level that gets logged
    #[arg(long = "log-level", default_value = "info", env = "RAW_HTTP_LOG_LEVEL")]
    pub log_level: Level,
}

impl Config {
    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_secs.map(Duration::from_secs)
    }

    pub fn connection_options(&self) -> ConnectionOptions {
        ConnectionOptions::default().max_body_size(self.max_body_size).idle_timeout(self.idle_timeout())
    }
}

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper game server", long_about = None)]
pub struct Args {
    /// What log level to use
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,

    /// Address to bind to
    #[arg(long, env = "SAPPER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on, 0 picks a free one
    #[arg(short, long, env = "SAPPER_PORT", default_value_t = 7878)]
    pub port: u16,

    /// Seconds a game stays alive after its last move
    #[arg(long, env = "SAPPER_SESSION_TTL", default_value_t = 300)]
    pub session_ttl_secs: u64,

    /// Seconds between sweeps of expired games
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    pub sweep_interval_secs: u64,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub session_ttl: Duration,
    pub sweep_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            session_ttl: Duration::from_secs(5 * 60),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

impl From<&Args> for ServerConfig {
    fn from(args: &Args) -> Self {
        Self {
            host: args.host.clone(),
            port: args.port,
            session_ttl: Duration::from_secs(args.session_ttl_secs),
            sweep_interval: Duration::from_secs(args.sweep_interval_secs),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

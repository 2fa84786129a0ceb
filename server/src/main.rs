use std::sync::Arc;

use clap::Parser;
use sapper_server::{Args, GameService, ServerConfig, run_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .parse_default_env()
        .init();

    let config = ServerConfig::from(&args);
    log::debug!("config: {:?}", config);

    let service = Arc::new(GameService::new(config.session_ttl));
    run_server(config, service, None).await
}

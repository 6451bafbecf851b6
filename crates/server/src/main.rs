use clap::Parser;
use raw_http_server::config::Config;
use raw_http_server::routes;
use raw_http_server::server::Server;
use raw_http_server::storage::LocalFileStorage;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    let subscriber = FmtSubscriber::builder().with_max_level(config.log_level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("setting default subscriber failed: {e}");
        return ExitCode::FAILURE;
    }

    if !config.directory.is_dir() {
        warn!(directory = %config.directory.display(), "file directory does not exist, file routes will fail");
    }
    info!(directory = %config.directory.display(), max_body_size = config.max_body_size, idle_timeout = ?config.idle_timeout(), "serving files");

    let storage = Arc::new(LocalFileStorage::new(config.directory.clone()));
    let server = match Server::builder()
        .address(config.address)
        .router(routes::router(storage))
        .connection_options(config.connection_options())
        .build()
    {
        Ok(server) => server,
        Err(e) => {
            error!(cause = %e, "build server error");
            return ExitCode::FAILURE;
        }
    };

    match server.start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(cause = %e, "bind server error");
            ExitCode::FAILURE
        }
    }
}

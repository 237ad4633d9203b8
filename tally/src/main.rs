mod config;

use std::{env, process, str::FromStr, sync::Arc};

use config::{AppConfig, ConfigError, Environment};
use ledger::LedgerController;
use points_api::PointsApi;
use thiserror::Error;
use tokio::{net::TcpListener, runtime::Runtime};

fn main() {
    if let Err(err) = run() {
        eprintln!("tally failed: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    env_logger::init();
    let config = {
        let env = parse_environment()?;
        AppConfig::load(env)
    };

    let controller = Arc::new(LedgerController::new());
    let api = Arc::new(PointsApi::new(Arc::clone(&controller)));

    let runtime = Runtime::new()?;
    runtime.block_on(async {
        let listener = TcpListener::bind(config.listen_addr).await?;
        println!(
            "tally api listening on {} in {} mode",
            config.listen_addr,
            config.env_label()
        );
        tokio::select! {
            result = api.serve(listener) => result.map_err(AppError::Serve),
            _ = tokio::signal::ctrl_c() => {
                println!("Shutdown signal received; stopping api.");
                Ok(())
            }
        }
    })
}

fn parse_environment() -> Result<Environment, AppError> {
    let arg = env::args().nth(1).ok_or(AppError::Usage)?;
    Environment::from_str(&arg).map_err(AppError::from)
}

#[derive(Debug, Error)]
enum AppError {
    #[error("usage: tally <dev|prod>")]
    Usage,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("api server failed: {0}")]
    Serve(Box<dyn std::error::Error + Send + Sync>),
}

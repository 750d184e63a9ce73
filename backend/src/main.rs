use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use xmas_xpenses_backend::{create_router, initialize_backend, Config};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();
    init_logger(config.log_level());
    debug!("Log level set to {}", config.log_level().to_string().to_lowercase());

    match serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state, config.cors_origin())?;

    info!("Starting server on {}", config.bind());
    let listener = tokio::net::TcpListener::bind(config.bind()).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initializes the tracing subscriber. RUST_LOG wins over `--log-level`.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!(
            "xmas_xpenses_backend={},{}={}",
            level,
            env!("CARGO_CRATE_NAME"),
            level
        )),
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

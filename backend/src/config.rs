//! Command line and environment configuration for the server binary.

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:xmas_xpenses.db";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";

/// xmas-xpenses-server: REST backend for holiday budgets and expenses.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Config {
    /// SQLite database URL. The file is created on first start.
    #[arg(long, env = "XMAS_DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    database_url: String,

    /// Address the HTTP server listens on
    #[arg(long, env = "XMAS_BIND", default_value = DEFAULT_BIND)]
    bind: String,

    /// Origin allowed to call the API from a browser
    #[arg(long, env = "XMAS_CORS_ORIGIN", default_value = DEFAULT_CORS_ORIGIN)]
    cors_origin: String,

    /// The logging verbosity. One of:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,
}

impl Config {
    pub fn new(database_url: impl Into<String>, bind: impl Into<String>, cors_origin: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            bind: bind.into(),
            cors_origin: cors_origin.into(),
            log_level: LevelFilter::INFO,
        }
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn bind(&self) -> &str {
        &self.bind
    }

    pub fn cors_origin(&self) -> &str {
        &self.cors_origin
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}

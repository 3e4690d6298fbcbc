use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::AppError;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub autosave_debounce: Duration,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://coursedesk.db?mode=rwc".to_string());

        let bind_addr = match env::var("BIND_ADDR") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| AppError::BadRequest(format!("BIND_ADDR is not a socket address: {}", raw)))?,
            Err(_) => SocketAddr::from(([127, 0, 0, 1], 3000)),
        };

        let autosave_ms = match env::var("AUTOSAVE_DEBOUNCE_MS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| AppError::BadRequest(format!("AUTOSAVE_DEBOUNCE_MS is not a number: {}", raw)))?,
            Err(_) => 1000,
        };

        Ok(Self {
            database_url,
            bind_addr,
            autosave_debounce: Duration::from_millis(autosave_ms),
        })
    }
}

// src/config.rs

use dotenvy::dotenv;
use std::env;
use url::Url;

/// Fraction of an exam's total points required to pass (fixed 60% cutoff).
pub const PASS_THRESHOLD_RATIO: f64 = 0.6;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub sandbox_url: Url,
    pub frontend_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let sandbox_url = env::var("SANDBOX_URL").expect("SANDBOX_URL must be set");
        let sandbox_url = Url::parse(&sandbox_url).expect("SANDBOX_URL must be a valid URL");

        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(4000);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            sandbox_url,
            frontend_url,
            port,
            rust_log,
        }
    }
}

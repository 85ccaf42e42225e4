use anyhow::Context;
use rand::{distributions::Alphanumeric, Rng};
use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("Invalid PORT")?;
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = load_jwt_secret();

        Ok(Self {
            host,
            port,
            database_url,
            jwt_secret,
        })
    }
}

fn load_jwt_secret() -> String {
    match env::var("JWT_SECRET") {
        Ok(secret) if !secret.is_empty() => secret,
        _ => {
            // Tokens signed with an ephemeral secret die with the process.
            warn!("JWT_SECRET not set; generating ephemeral secret (development only)");
            rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(64)
                .map(char::from)
                .collect()
        }
    }
}

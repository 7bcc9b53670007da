use std::env;

/// Config holds all application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub db_max_connections: u32,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn load() -> Self {
        Self {
            db_path: get_env("NAVSEED_DB_PATH", "nav.db"),
            db_max_connections: get_env("NAVSEED_DB_MAX_CONNECTIONS", "5")
                .parse()
                .unwrap_or(5),
        }
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

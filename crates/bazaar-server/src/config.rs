use std::env;

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const DEFAULT_MONGODB_URL: &str = "mongodb://localhost:27017/";
pub const DEFAULT_DATABASE_NAME: &str = "ecommerce";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind: String,
    pub mongodb_url: String,
    pub database_name: String,
}

impl ApiConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            bind: env_string("BAZAAR_BIND", DEFAULT_BIND),
            mongodb_url: env_string("MONGODB_URL", DEFAULT_MONGODB_URL),
            database_name: env_string("DATABASE_NAME", DEFAULT_DATABASE_NAME),
        }
    }
}

fn env_string(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

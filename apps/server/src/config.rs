//! Environment-based server configuration.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub db_path: String,
    pub ai_api_url: String,
    pub ai_api_key: String,
    pub ai_model: String,
}

impl Config {
    pub fn from_env() -> Self {
        // Load a local .env if present; real env vars win.
        let _ = dotenvy::dotenv();
        Config {
            listen_addr: env::var("NE_LISTEN_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:8425".to_string()),
            db_path: env::var("NE_DB_PATH").unwrap_or_else(|_| "data/nestegg.db".to_string()),
            ai_api_url: env::var("NE_AI_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            ai_api_key: env::var("NE_AI_API_KEY").unwrap_or_default(),
            ai_model: env::var("NE_AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
        }
    }
}

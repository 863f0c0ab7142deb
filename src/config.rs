// src/config.rs

use std::env;
use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    pub rust_log: String,

    /// OpenAI-compatible chat-completions endpoint for the grading oracle.
    pub oracle_api_url: String,

    /// Absent key selects the deterministic offline oracle.
    pub oracle_api_key: Option<String>,

    pub oracle_model: String,

    /// Bounded timeout for oracle calls; a timeout takes the same fallback
    /// path as any other oracle failure.
    pub oracle_timeout_secs: u64,

    /// Populate the store with demo data on startup.
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let oracle_api_url = env::var("ORACLE_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string());

        let oracle_api_key = env::var("ORACLE_API_KEY").ok();

        let oracle_model = env::var("ORACLE_MODEL")
            .unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let oracle_timeout_secs = env::var("ORACLE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(20);

        let seed_demo_data = env::var("SEED_DEMO_DATA")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Self {
            rust_log,
            oracle_api_url,
            oracle_api_key,
            oracle_model,
            oracle_timeout_secs,
            seed_demo_data,
        }
    }
}

impl Default for Config {
    /// Defaults suitable for tests: offline oracle, no demo seed.
    fn default() -> Self {
        Self {
            rust_log: "error".to_string(),
            oracle_api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            oracle_api_key: None,
            oracle_model: "gpt-4o-mini".to_string(),
            oracle_timeout_secs: 20,
            seed_demo_data: false,
        }
    }
}

use std::env;
use dotenvy::dotenv;
#[derive(Clone)]
pub struct Config {
    pub server_addr: String,

    // Rate limiting
    pub rate_punch_per_min: u32,
    pub rate_admin_per_min: u32,

    /// Optional path to a JSON seed file loaded at startup.
    pub seed_data: Option<String>,

    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),

            rate_punch_per_min: env::var("RATE_PUNCH_PER_MIN")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),
            rate_admin_per_min: env::var("RATE_ADMIN_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap(),

            seed_data: env::var("SEED_DATA").ok(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
        }
    }
}

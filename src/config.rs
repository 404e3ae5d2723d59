use serde::Deserialize;

use crate::services::engine::{EngineConfig, DEFAULT_POPULAR_SAMPLE_RATE};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON array of catalog products
    #[serde(default = "default_products_path")]
    pub products_path: String,

    /// JSON array of users
    #[serde(default = "default_users_path")]
    pub users_path: String,

    /// Probability of sampling each product as a popular pick
    #[serde(default = "default_popular_sample_rate")]
    pub popular_sample_rate: f64,

    /// Number of top recommendations that get a written description
    #[serde(default = "default_described_recommendations")]
    pub described_recommendations: usize,

    /// Seed for the per-request random source; unset means fresh entropy
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_products_path() -> String {
    "data/products.json".to_string()
}

fn default_users_path() -> String {
    "data/users.json".to_string()
}

fn default_popular_sample_rate() -> f64 {
    DEFAULT_POPULAR_SAMPLE_RATE
}

fn default_described_recommendations() -> usize {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            products_path: default_products_path(),
            users_path: default_users_path(),
            popular_sample_rate: default_popular_sample_rate(),
            described_recommendations: default_described_recommendations(),
            rng_seed: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Engine settings, with the sample rate clamped into `[0, 1]`
    pub fn engine_config(&self) -> EngineConfig {
        let rate = if self.popular_sample_rate.is_nan() {
            DEFAULT_POPULAR_SAMPLE_RATE
        } else {
            self.popular_sample_rate.clamp(0.0, 1.0)
        };

        EngineConfig {
            popular_sample_rate: rate,
            ..Default::default()
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

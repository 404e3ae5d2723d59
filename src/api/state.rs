use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

use crate::{config::Config, services::RecommendationEngine, store::Storefront};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Storefront>,
    pub engine: Arc<RecommendationEngine>,
    /// How many top recommendations get a written description
    pub described_recommendations: usize,
    rng_seed: Option<u64>,
}

impl AppState {
    pub fn new(store: Arc<dyn Storefront>, config: &Config) -> Self {
        Self {
            store,
            engine: Arc::new(RecommendationEngine::new(config.engine_config())),
            described_recommendations: config.described_recommendations,
            rng_seed: config.rng_seed,
        }
    }

    /// Random source for one request
    ///
    /// With a configured seed every request sees the same sequence.
    pub fn request_rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

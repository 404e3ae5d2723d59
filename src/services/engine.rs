use rand::Rng;
use std::time::Instant;

use crate::models::{AggregatedRecommendation, Product, TasteProfile, User, UserHistory};

use super::aggregator::{self, MAX_RESULTS};
use super::{signals, similarity};

/// Share of the catalog sampled by the popularity fallback
pub const DEFAULT_POPULAR_SAMPLE_RATE: f64 = 0.3;

/// Tunables of the recommendation engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Probability of each product being sampled as a popular pick, in `[0, 1]`
    pub popular_sample_rate: f64,
    pub max_results: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            popular_sample_rate: DEFAULT_POPULAR_SAMPLE_RATE,
            max_results: MAX_RESULTS,
        }
    }
}

/// Stateless recommendation engine
///
/// Every call recomputes everything from the data it is given. The only
/// source of non-determinism is the random source passed in by the caller.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: EngineConfig,
}

impl RecommendationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Blends every signal into one ranked list
    ///
    /// Generators run in a fixed order (quiz, purchases, favorites, similar
    /// users, popular) because ties in the aggregation depend on it.
    pub fn generate_recommendations<R: Rng + ?Sized>(
        &self,
        profile: &TasteProfile,
        catalog: &[Product],
        users: &[User],
        history: &UserHistory,
        rng: &mut R,
    ) -> Vec<AggregatedRecommendation> {
        let start = Instant::now();

        let mut candidates = signals::test_based(profile, catalog);
        candidates.extend(signals::purchase_based(&history.purchases, catalog));
        candidates.extend(signals::favorite_based(&history.favorites, catalog));

        let similar_users = similarity::find_similar_users(profile, users);
        candidates.extend(similarity::collaborative(&similar_users, catalog));

        candidates.extend(signals::popular(
            catalog,
            self.config.popular_sample_rate,
            rng,
        ));

        let recommendations = aggregator::aggregate(candidates, self.config.max_results);

        tracing::info!(
            catalog = catalog.len(),
            users = users.len(),
            similar_users = similar_users.len(),
            returned = recommendations.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Recommendations generated"
        );

        recommendations
    }
}

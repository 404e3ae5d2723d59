use std::collections::HashMap;

use crate::models::{AggregatedRecommendation, ProductId, ScoredCandidate};

/// Maximum number of recommendations returned to the caller
pub const MAX_RESULTS: usize = 10;

struct Merged {
    recommendation: AggregatedRecommendation,
    best_score: f64,
}

/// Merges candidates by product and keeps the `limit` best
///
/// Scores of the same product add up and every source tag is kept. The
/// reason comes from the single highest-scoring candidate; on a tie the one
/// seen first wins, so the result depends on the order of `candidates`.
/// Products with equal totals keep their first-seen order.
pub fn aggregate(candidates: Vec<ScoredCandidate>, limit: usize) -> Vec<AggregatedRecommendation> {
    let total = candidates.len();
    let mut index: HashMap<ProductId, usize> = HashMap::new();
    let mut merged: Vec<Merged> = Vec::new();

    for candidate in candidates {
        match index.get(&candidate.product_id) {
            Some(&position) => {
                let entry = &mut merged[position];
                entry.recommendation.score += candidate.score;
                entry.recommendation.sources.push(candidate.source);
                if candidate.score > entry.best_score {
                    entry.best_score = candidate.score;
                    entry.recommendation.reason = candidate.reason;
                }
            }
            None => {
                index.insert(candidate.product_id.clone(), merged.len());
                merged.push(Merged {
                    best_score: candidate.score,
                    recommendation: AggregatedRecommendation {
                        product_id: candidate.product_id,
                        score: candidate.score,
                        sources: vec![candidate.source],
                        reason: candidate.reason,
                    },
                });
            }
        }
    }

    let mut ranked: Vec<AggregatedRecommendation> =
        merged.into_iter().map(|m| m.recommendation).collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(limit);

    tracing::debug!(
        candidates = total,
        returned = ranked.len(),
        "Candidates aggregated"
    );
    ranked
}

//! Independent signal generators
//!
//! Each generator turns one source of information into scored candidates.
//! They never share state and never fail: missing data just yields fewer
//! candidates.

use rand::Rng;
use std::collections::HashSet;

use crate::models::{Product, ProductId, ScoredCandidate, Source, TasteProfile};

const PURCHASE_CATEGORY_WEIGHT: f64 = 0.6;
const PURCHASE_ARTIST_WEIGHT: f64 = 0.8;
const FAVORITE_DAMPING: f64 = 0.7;
const POPULAR_SCORE: f64 = 0.2;

const PURCHASE_REASON: &str = "Similar to what you've already bought";
const FAVORITE_REASON: &str = "You've marked similar records";
const POPULAR_REASON: &str = "A popular record";
const DEFAULT_TASTE_REASON: &str = "matches your mood perfectly";

/// One additive scoring rule of the quiz-based generator
struct TasteRule {
    weight: f64,
    matches: fn(&TasteProfile, &Product) -> bool,
    /// Reason clause; `None` means the rule scores silently
    clause: Option<fn(&Product) -> String>,
}

fn category_in(product: &Product, categories: &[&str]) -> bool {
    product
        .category()
        .is_some_and(|category| categories.contains(&category))
}

const TASTE_RULES: &[TasteRule] = &[
    TasteRule {
        weight: 0.8,
        matches: |profile, product| product.category().is_some_and(|c| profile.likes_genre(c)),
        clause: Some(|product| format!("you like {}", product.category().unwrap_or_default())),
    },
    TasteRule {
        weight: 0.4,
        matches: |profile, product| {
            profile.has_mood("energy") && category_in(product, &["rock", "metal", "electronic"])
        },
        clause: Some(|_| "it carries the energy you're after".to_string()),
    },
    TasteRule {
        weight: 0.4,
        matches: |profile, product| {
            profile.has_mood("melancholy") && category_in(product, &["post-punk", "ambient", "indie"])
        },
        clause: Some(|_| "it fits your melancholic side".to_string()),
    },
    TasteRule {
        weight: 0.3,
        matches: |profile, product| {
            profile.visual_style() == Some("gothic") && category_in(product, &["metal", "post-punk"])
        },
        clause: Some(|_| "it matches the gothic atmosphere".to_string()),
    },
    TasteRule {
        weight: 0.3,
        matches: |profile, product| {
            profile.visual_style() == Some("cyberpunk") && product.category() == Some("electronic")
        },
        clause: Some(|_| "it is perfect for the cyberpunk aesthetic".to_string()),
    },
    TasteRule {
        weight: 0.2,
        matches: |profile, product| {
            profile.movie() == Some("blade_runner") && product.category() == Some("electronic")
        },
        clause: Some(|_| "it sounds like a soundtrack to your favorite film".to_string()),
    },
    TasteRule {
        weight: 0.2,
        matches: |profile, product| {
            profile.movie() == Some("drive") && product.genre.as_deref() == Some("электроника")
        },
        clause: None,
    },
];

/// Scores every product against the quiz profile
///
/// Rules are independent and their weights add up; products that match no
/// rule are dropped.
pub fn test_based(profile: &TasteProfile, catalog: &[Product]) -> Vec<ScoredCandidate> {
    let candidates: Vec<ScoredCandidate> = catalog
        .iter()
        .filter_map(|product| {
            let matched: Vec<&TasteRule> = TASTE_RULES
                .iter()
                .filter(|rule| (rule.matches)(profile, product))
                .collect();
            let score: f64 = matched.iter().map(|rule| rule.weight).sum();

            (score > 0.0).then(|| {
                let clauses: Vec<String> = matched
                    .iter()
                    .filter_map(|rule| rule.clause.map(|clause| clause(product)))
                    .collect();
                ScoredCandidate::new(product.id.clone(), score, Source::Test, taste_reason(&clauses))
            })
        })
        .collect();

    tracing::debug!(candidates = candidates.len(), "Quiz-based candidates generated");
    candidates
}

fn taste_reason(clauses: &[String]) -> String {
    if clauses.is_empty() {
        DEFAULT_TASTE_REASON.to_string()
    } else {
        format!("because {}", clauses.join(" and "))
    }
}

/// Scores products that share a category or an artist with the given history
///
/// Products already in `history` are skipped. Ids in the history that are not
/// in the catalog are ignored.
pub fn purchase_based(history: &[ProductId], catalog: &[Product]) -> Vec<ScoredCandidate> {
    let candidates = history_matches(history, catalog, Source::Purchase, PURCHASE_REASON, 1.0);
    tracing::debug!(candidates = candidates.len(), "Purchase-based candidates generated");
    candidates
}

/// Same as [`purchase_based`] over favorites, with damped scores
pub fn favorite_based(favorites: &[ProductId], catalog: &[Product]) -> Vec<ScoredCandidate> {
    let candidates = history_matches(
        favorites,
        catalog,
        Source::Favorite,
        FAVORITE_REASON,
        FAVORITE_DAMPING,
    );
    tracing::debug!(candidates = candidates.len(), "Favorite-based candidates generated");
    candidates
}

fn history_matches(
    history: &[ProductId],
    catalog: &[Product],
    source: Source,
    reason: &str,
    factor: f64,
) -> Vec<ScoredCandidate> {
    if history.is_empty() {
        return Vec::new();
    }

    let owned: HashSet<&ProductId> = history.iter().collect();
    let mut categories: HashSet<&str> = HashSet::new();
    let mut artists: HashSet<String> = HashSet::new();

    for product in catalog.iter().filter(|p| owned.contains(&p.id)) {
        if let Some(category) = product.category() {
            categories.insert(category);
        }
        if let Some(artist) = product.artist_key() {
            artists.insert(artist);
        }
    }

    catalog
        .iter()
        .filter(|product| !owned.contains(&product.id))
        .filter_map(|product| {
            let mut score = 0.0;
            if product.category().is_some_and(|c| categories.contains(c)) {
                score += PURCHASE_CATEGORY_WEIGHT;
            }
            if product.artist_key().is_some_and(|a| artists.contains(&a)) {
                score += PURCHASE_ARTIST_WEIGHT;
            }
            (score > 0.0)
                .then(|| ScoredCandidate::new(product.id.clone(), score * factor, source, reason))
        })
        .collect()
}

/// Samples the catalog independently with probability `rate` at a flat score
///
/// This keeps the final list non-empty and adds some variety. `rate` outside
/// `[0, 1]` behaves like the nearest bound.
pub fn popular<R: Rng + ?Sized>(catalog: &[Product], rate: f64, rng: &mut R) -> Vec<ScoredCandidate> {
    let candidates: Vec<ScoredCandidate> = catalog
        .iter()
        .filter(|_| rng.random::<f64>() < rate)
        .map(|product| {
            ScoredCandidate::new(product.id.clone(), POPULAR_SCORE, Source::Popular, POPULAR_REASON)
        })
        .collect();

    tracing::debug!(candidates = candidates.len(), rate, "Popular candidates sampled");
    candidates
}

use std::collections::{HashMap, HashSet};

use crate::models::{Product, ProductId, ScoredCandidate, SimilarUser, Source, TasteProfile, User};

const GENRE_WEIGHT: f64 = 0.4;
const GENRE_NORMALIZER: f64 = 3.0;
const MOOD_WEIGHT: f64 = 0.3;
const MOOD_NORMALIZER: f64 = 2.0;
const MOVIE_WEIGHT: f64 = 0.2;

/// Users at or below this similarity are not considered similar
pub const SIMILARITY_THRESHOLD: f64 = 0.15;

const COLLABORATIVE_WEIGHT: f64 = 0.8;
const COLLABORATIVE_REASON: &str = "People with your taste buy this";

/// Taste similarity between two profiles, in `[0, 1]`
///
/// Counts entries of `profile` found in `other` (duplicates in `profile`
/// count each time), so the measure is not symmetric for lists with repeats.
pub fn taste_similarity(profile: &TasteProfile, other: &TasteProfile) -> f64 {
    let common_genres = profile.genre.iter().filter(|g| other.likes_genre(g)).count();
    let common_moods = profile.mood.iter().filter(|m| other.has_mood(m)).count();
    let same_movie = matches!(
        (profile.movie(), other.movie()),
        (Some(a), Some(b)) if a == b
    );

    let similarity = (common_genres as f64 / GENRE_NORMALIZER) * GENRE_WEIGHT
        + (common_moods as f64 / MOOD_NORMALIZER) * MOOD_WEIGHT
        + if same_movie { MOVIE_WEIGHT } else { 0.0 };

    similarity.min(1.0)
}

/// Finds users whose taste resembles `profile`, most similar first
///
/// Users without a profile are skipped. The caller decides whether the
/// requesting user is part of `users`.
pub fn find_similar_users<'a>(profile: &TasteProfile, users: &'a [User]) -> Vec<SimilarUser<'a>> {
    let mut similar: Vec<SimilarUser<'a>> = users
        .iter()
        .filter_map(|user| {
            let other = user.profile.as_ref()?;
            let similarity = taste_similarity(profile, other);
            (similarity > SIMILARITY_THRESHOLD).then_some(SimilarUser { user, similarity })
        })
        .collect();

    similar.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));

    tracing::debug!(
        scanned = users.len(),
        similar = similar.len(),
        "Similar users found"
    );
    similar
}

/// Recommends what similar users bought
///
/// Each product scores the mean similarity of the users who bought it,
/// weighted by 0.8. Products are emitted in first-seen order; purchases that
/// are not in the catalog are dropped.
pub fn collaborative(similar_users: &[SimilarUser<'_>], catalog: &[Product]) -> Vec<ScoredCandidate> {
    let known: HashSet<&ProductId> = catalog.iter().map(|p| &p.id).collect();
    let mut order: Vec<&ProductId> = Vec::new();
    let mut similarities: HashMap<&ProductId, Vec<f64>> = HashMap::new();

    for SimilarUser { user, similarity } in similar_users {
        for product_id in user.purchases.iter().filter(|id| known.contains(id)) {
            similarities
                .entry(product_id)
                .or_insert_with(|| {
                    order.push(product_id);
                    Vec::new()
                })
                .push(*similarity);
        }
    }

    let candidates: Vec<ScoredCandidate> = order
        .into_iter()
        .map(|product_id| {
            let scores = &similarities[product_id];
            let mean = scores.iter().sum::<f64>() / scores.len() as f64;
            ScoredCandidate::new(
                product_id.clone(),
                mean * COLLABORATIVE_WEIGHT,
                Source::Collaborative,
                COLLABORATIVE_REASON,
            )
        })
        .collect();

    tracing::debug!(candidates = candidates.len(), "Collaborative candidates generated");
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn profile(genre: &[&str], mood: &[&str], movie: Option<&str>) -> TasteProfile {
        TasteProfile {
            movie: movie.map(str::to_string),
            genre: genre.iter().map(|g| g.to_string()).collect(),
            mood: mood.iter().map(|m| m.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_users() {
        let me = profile(&["rock"], &["calm"], Some("drive"));
        assert!(find_similar_users(&me, &[]).is_empty());
    }

    #[test]
    fn test_identical_profiles_clamp_to_one() {
        let me = profile(
            &["rock", "metal", "post-punk", "indie"],
            &["energy", "melancholy", "calm"],
            Some("drive"),
        );
        let users = vec![User::new("2").with_profile(me.clone())];
        let similar = find_similar_users(&me, &users);
        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].similarity, 1.0);
    }

    #[test]
    fn test_three_genres_two_moods_and_movie() {
        let me = profile(&["rock", "metal", "post-punk"], &["energy", "melancholy"], Some("drive"));
        assert!(approx(taste_similarity(&me, &me.clone()), 0.9));
    }

    #[test]
    fn test_users_without_profile_skipped() {
        let me = profile(&["rock"], &[], Some("drive"));
        let users = vec![User::new("2")];
        assert!(find_similar_users(&me, &users).is_empty());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // Only the movie matches: 0.2 > 0.15
        let me = profile(&[], &[], Some("drive"));
        let users = vec![User::new("2").with_profile(profile(&["jazz"], &[], Some("drive")))];
        assert_eq!(find_similar_users(&me, &users).len(), 1);

        // One genre in common: 0.4 / 3 ~= 0.133, not enough
        let me = profile(&["rock"], &[], None);
        let users = vec![User::new("2").with_profile(profile(&["rock"], &[], None))];
        assert!(find_similar_users(&me, &users).is_empty());
    }

    #[test]
    fn test_missing_movie_never_matches() {
        let me = profile(&[], &[], None);
        let other = profile(&[], &[], None);
        assert_eq!(taste_similarity(&me, &other), 0.0);
    }

    #[test]
    fn test_sorted_by_similarity() {
        let me = profile(&["rock", "metal"], &["energy"], Some("drive"));
        let users = vec![
            User::new("low").with_profile(profile(&[], &["energy"], Some("drive"))),
            User::new("high").with_profile(profile(&["rock", "metal"], &["energy"], Some("drive"))),
        ];
        let similar = find_similar_users(&me, &users);
        assert_eq!(similar.len(), 2);
        assert_eq!(similar[0].user.id.0, "high");
        assert!(similar[0].similarity > similar[1].similarity);
        assert!(approx(similar[1].similarity, 0.35));
    }

    #[test]
    fn test_collaborative_mean_similarity() {
        let catalog = vec![Product::new("a", "rock"), Product::new("b", "rock")];
        let first = User::new("1").with_purchases(["a", "b"]);
        let second = User::new("2").with_purchases(["a", "ghost"]);
        let similar = vec![
            SimilarUser { user: &first, similarity: 0.9 },
            SimilarUser { user: &second, similarity: 0.5 },
        ];

        let candidates = collaborative(&similar, &catalog);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].product_id, ProductId::new("a"));
        assert!(approx(candidates[0].score, 0.7 * 0.8));
        assert!(approx(candidates[1].score, 0.9 * 0.8));
        assert!(candidates.iter().all(|c| c.source == Source::Collaborative));
    }

    #[test]
    fn test_collaborative_empty_catalog() {
        let user = User::new("1").with_purchases(["a"]);
        let similar = vec![SimilarUser { user: &user, similarity: 0.5 }];
        assert!(collaborative(&similar, &[]).is_empty());
    }
}

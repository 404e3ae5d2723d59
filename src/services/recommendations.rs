use rand::Rng;

use crate::{
    error::{AppError, AppResult},
    models::{BasedOn, DescribedRecommendation, RecommendationResponse, User, UserId},
    services::{description::synthesize_description, engine::RecommendationEngine, similarity},
    store::Storefront,
};

/// Generates personalized record recommendations for a stored user
///
/// Loads snapshots of the catalog and users, runs the engine against every
/// other user, and attaches a written explanation to the first `described`
/// results.
pub async fn recommend_for_user<R: Rng + ?Sized>(
    store: &dyn Storefront,
    engine: &RecommendationEngine,
    user_id: &UserId,
    described: usize,
    rng: &mut R,
) -> AppResult<RecommendationResponse> {
    let catalog = store.products().await?;
    let users = store.users().await?;

    let (mut requester, others): (Vec<User>, Vec<User>) =
        users.into_iter().partition(|u| &u.id == user_id);
    let user = requester
        .pop()
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;
    let profile = user
        .profile
        .as_ref()
        .ok_or_else(|| AppError::MissingProfile(user_id.to_string()))?;

    tracing::info!(
        user_id = %user_id,
        store = store.name(),
        products = catalog.len(),
        users = others.len(),
        "Generating recommendations"
    );

    let ranked = engine.generate_recommendations(
        profile,
        &catalog,
        &others,
        &user.history(),
        &mut *rng,
    );

    let recommendations: Vec<DescribedRecommendation> = ranked
        .into_iter()
        .filter_map(|rec| {
            let product = catalog.iter().find(|p| p.id == rec.product_id)?;
            Some((rec, product))
        })
        .take(described)
        .map(|(rec, product)| DescribedRecommendation {
            description: synthesize_description(
                Some(profile),
                Some(product),
                &rec.sources,
                &mut *rng,
            ),
            product: product.clone(),
            score: rec.score,
            sources: rec.sources,
            reason: rec.reason,
        })
        .collect();

    let similar_users = similarity::find_similar_users(profile, &others).len();

    Ok(RecommendationResponse {
        recommendations,
        based_on: BasedOn {
            similar_users,
            genres: profile.genre.clone(),
        },
    })
}

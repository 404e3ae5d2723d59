use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    models::{QuizAnswers, TasteProfile, UserId},
    services::profile::derive_profile,
    store::Storefront,
};

/// A user's stored quiz outcome
#[derive(Debug, Clone, Serialize)]
pub struct ProfileStatus {
    pub profile: Option<TasteProfile>,
    pub quiz_completed: bool,
    pub quiz_completed_at: Option<DateTime<Utc>>,
}

/// Derives a taste profile from quiz answers and stores it on the user
pub async fn submit_quiz(
    store: &dyn Storefront,
    user_id: &UserId,
    answers: &QuizAnswers,
) -> AppResult<TasteProfile> {
    if answers.is_empty() {
        return Err(AppError::InvalidInput("No quiz answers given".to_string()));
    }

    let profile = derive_profile(answers);
    let user = store.save_profile(user_id, profile.clone()).await?;

    tracing::info!(
        user_id = %user.id,
        answered = answers.len(),
        genres = ?profile.genre,
        "Quiz submitted"
    );

    Ok(profile)
}

/// Returns the stored profile of a user, if any
pub async fn profile_status(store: &dyn Storefront, user_id: &UserId) -> AppResult<ProfileStatus> {
    let user = store
        .find_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

    Ok(ProfileStatus {
        quiz_completed: user.profile.is_some(),
        profile: user.profile,
        quiz_completed_at: user.quiz_completed_at,
    })
}

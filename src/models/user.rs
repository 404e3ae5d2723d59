use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ProductId, TasteProfile, UserId};

/// A storefront customer as supplied by the user store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile: Option<TasteProfile>,
    #[serde(default)]
    pub purchases: Vec<ProductId>,
    #[serde(default)]
    pub favorites: Vec<ProductId>,
    /// When the taste quiz was last submitted
    #[serde(default, alias = "testDate")]
    pub quiz_completed_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            name: None,
            profile: None,
            purchases: Vec::new(),
            favorites: Vec::new(),
            quiz_completed_at: None,
        }
    }

    pub fn with_profile(mut self, profile: TasteProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn with_purchases<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.purchases = ids.into_iter().map(ProductId::new).collect();
        self
    }

    pub fn with_favorites<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.favorites = ids.into_iter().map(ProductId::new).collect();
        self
    }

    /// The user's own purchase and favorite history
    pub fn history(&self) -> UserHistory {
        UserHistory {
            purchases: self.purchases.clone(),
            favorites: self.favorites.clone(),
        }
    }
}

/// Purchase and favorite history of the requesting user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserHistory {
    pub purchases: Vec<ProductId>,
    pub favorites: Vec<ProductId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_defaults_missing_collections() {
        let user: User = serde_json::from_str(r#"{"id": 7, "name": "Ann"}"#).unwrap();
        assert!(user.profile.is_none());
        assert!(user.purchases.is_empty());
        assert!(user.favorites.is_empty());
        assert!(user.quiz_completed_at.is_none());
    }

    #[test]
    fn test_history_copies_lists() {
        let user = User::new("1").with_purchases(["a"]).with_favorites(["b", "c"]);
        let history = user.history();
        assert_eq!(history.purchases, vec![ProductId::new("a")]);
        assert_eq!(history.favorites.len(), 2);
    }
}

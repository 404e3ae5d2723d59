use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::{Product, TasteProfile, User, UserId},
};

use super::Storefront;

/// Store holding the catalog and users in memory
///
/// The catalog is immutable after loading and shared as an `Arc` snapshot.
/// Users sit behind a lock because quiz submissions replace profiles.
pub struct InMemoryStore {
    products: Arc<Vec<Product>>,
    users: RwLock<Vec<User>>,
}

impl InMemoryStore {
    pub fn new(products: Vec<Product>, users: Vec<User>) -> Self {
        Self {
            products: Arc::new(products),
            users: RwLock::new(users),
        }
    }

    /// Loads the catalog and users from JSON array files
    ///
    /// A missing users file means no users yet; a missing catalog is an error.
    #[instrument(skip_all, fields(products = %products_path.as_ref().display()))]
    pub async fn from_json_files(
        products_path: impl AsRef<Path>,
        users_path: impl AsRef<Path>,
    ) -> AppResult<Self> {
        let raw = tokio::fs::read_to_string(products_path.as_ref()).await?;
        let products: Vec<Product> = serde_json::from_str(&raw)?;

        let users: Vec<User> = match tokio::fs::read_to_string(users_path.as_ref()).await {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    path = %users_path.as_ref().display(),
                    "Users file not found, starting without users"
                );
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            products = products.len(),
            users = users.len(),
            "Store loaded"
        );

        Ok(Self::new(products, users))
    }
}

#[async_trait::async_trait]
impl Storefront for InMemoryStore {
    async fn products(&self) -> AppResult<Arc<Vec<Product>>> {
        Ok(Arc::clone(&self.products))
    }

    async fn users(&self) -> AppResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn find_user(&self, id: &UserId) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| &u.id == id).cloned())
    }

    async fn save_profile(&self, id: &UserId, profile: TasteProfile) -> AppResult<User> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

        user.profile = Some(profile);
        user.quiz_completed_at = Some(Utc::now());

        tracing::debug!(user_id = %id, "Taste profile saved");
        Ok(user.clone())
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_from_files() {
        let products = write_temp(r#"[{"id": 1, "category": "rock"}, {"id": "2"}]"#);
        let users = write_temp(r#"[{"id": 10, "purchases": [1]}]"#);

        let store = InMemoryStore::from_json_files(products.path(), users.path())
            .await
            .unwrap();

        assert_eq!(store.products().await.unwrap().len(), 2);
        let user = store.find_user(&UserId::new("10")).await.unwrap().unwrap();
        assert_eq!(user.purchases.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_users_file_is_empty() {
        let products = write_temp("[]");
        let store = InMemoryStore::from_json_files(products.path(), "/nonexistent/users.json")
            .await
            .unwrap();
        assert!(store.users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_products_file_fails() {
        let result = InMemoryStore::from_json_files("/nonexistent/products.json", "/nonexistent/users.json").await;
        assert!(matches!(result, Err(AppError::StoreIo(_))));
    }

    #[tokio::test]
    async fn test_malformed_products_fail() {
        let products = write_temp("{not json");
        let result = InMemoryStore::from_json_files(products.path(), "/nonexistent/users.json").await;
        assert!(matches!(result, Err(AppError::StoreData(_))));
    }

    #[tokio::test]
    async fn test_save_profile() {
        let store = InMemoryStore::new(Vec::new(), vec![User::new("1")]);
        let profile = TasteProfile {
            genre: vec!["jazz".to_string()],
            ..Default::default()
        };

        let saved = store.save_profile(&UserId::new("1"), profile.clone()).await.unwrap();
        assert_eq!(saved.profile, Some(profile));
        assert!(saved.quiz_completed_at.is_some());

        let missing = store.save_profile(&UserId::new("2"), TasteProfile::default()).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }
}

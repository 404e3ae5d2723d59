//! Catalog and user store abstraction
//!
//! The recommendation engine never performs I/O. Handlers and request
//! services read snapshots of the catalog and users through [`Storefront`]
//! and hand them to the engine.

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Product, TasteProfile, User, UserId},
};

pub mod memory;

pub use memory::InMemoryStore;

/// Trait for storefront data sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Storefront: Send + Sync {
    /// Read-only snapshot of the catalog, in catalog order
    async fn products(&self) -> AppResult<Arc<Vec<Product>>>;

    /// Snapshot of every user record
    async fn users(&self) -> AppResult<Vec<User>>;

    /// Looks a user up by id
    async fn find_user(&self, id: &UserId) -> AppResult<Option<User>>;

    /// Replaces the user's taste profile and stamps the quiz completion time
    ///
    /// Returns the updated user, or `NotFound` for unknown ids.
    async fn save_profile(&self, id: &UserId, profile: TasteProfile) -> AppResult<User>;

    /// Store name for logging and debugging
    fn name(&self) -> &'static str;
}

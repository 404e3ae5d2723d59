use serde::{Deserialize, Serialize};

use super::ProductId;

/// A record in the storefront catalog
///
/// Every descriptive field is optional: the catalog is owned by the store and
/// the engine only reads whatever is present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub title: Option<String>,
    /// Broad musical category used for matching (e.g. "electronic", "post-punk")
    #[serde(default)]
    pub category: Option<String>,
    /// Free-form genre label as written by the shop
    #[serde(default)]
    pub genre: Option<String>,
    /// Artist/label text
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub format: Option<String>,
}

impl Product {
    /// Creates a product with only an id and a category
    pub fn new(id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: ProductId::new(id),
            title: None,
            category: Some(category.into()),
            genre: None,
            description: None,
            price: None,
            year: None,
            format: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Lower-cased artist/label text, used to match records by the same artist
    pub fn artist_key(&self) -> Option<String> {
        self.description.as_deref().map(str::to_lowercase)
    }
}

use serde::{Deserialize, Serialize};

use super::{Product, ProductId, User};

/// Where a candidate came from
///
/// The declaration order is also the order in which the generators run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Test,
    Purchase,
    Favorite,
    Collaborative,
    Popular,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Test => "test",
            Source::Purchase => "purchase",
            Source::Favorite => "favorite",
            Source::Collaborative => "collaborative",
            Source::Popular => "popular",
        }
    }
}

/// A product scored by one signal generator
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub product_id: ProductId,
    pub score: f64,
    pub source: Source,
    pub reason: String,
}

impl ScoredCandidate {
    pub fn new(product_id: ProductId, score: f64, source: Source, reason: impl Into<String>) -> Self {
        Self {
            product_id,
            score,
            source,
            reason: reason.into(),
        }
    }
}

/// A product after all candidates for it were merged
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedRecommendation {
    pub product_id: ProductId,
    pub score: f64,
    /// One tag per contributing candidate, in generator order
    pub sources: Vec<Source>,
    pub reason: String,
}

/// Another user whose taste resembles the requester's
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarUser<'a> {
    pub user: &'a User,
    pub similarity: f64,
}

/// A top recommendation enriched for display
#[derive(Debug, Clone, Serialize)]
pub struct DescribedRecommendation {
    pub product: Product,
    pub description: String,
    pub score: f64,
    pub sources: Vec<Source>,
    pub reason: String,
}

/// What the recommendation was based on
#[derive(Debug, Clone, Serialize)]
pub struct BasedOn {
    pub similar_users: usize,
    pub genres: Vec<String>,
}

/// Response of the recommendation endpoint
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<DescribedRecommendation>,
    pub based_on: BasedOn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_serialization() {
        let json = serde_json::to_string(&vec![Source::Test, Source::Collaborative]).unwrap();
        assert_eq!(json, r#"["test","collaborative"]"#);
    }

    #[test]
    fn test_source_as_str_matches_serde() {
        for source in [
            Source::Test,
            Source::Purchase,
            Source::Favorite,
            Source::Collaborative,
            Source::Popular,
        ] {
            let json = serde_json::to_string(&source).unwrap();
            assert_eq!(json, format!("\"{}\"", source.as_str()));
        }
    }
}

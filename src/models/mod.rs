use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

mod product;
mod profile;
mod recommendation;
mod user;

pub use product::Product;
pub use profile::{AnswerValue, QuizAnswers, TasteProfile};
pub use recommendation::{
    AggregatedRecommendation, BasedOn, DescribedRecommendation, RecommendationResponse,
    ScoredCandidate, SimilarUser, Source,
};
pub use user::{User, UserHistory};

/// Identifier of a catalog product
///
/// Store files written by older tooling use numeric ids while newer ones use
/// strings, so both are accepted and normalized to a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(#[serde(deserialize_with = "string_or_number")] pub String);

/// Identifier of a storefront user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(#[serde(deserialize_with = "string_or_number")] pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
    Float(f64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Integer(n) => n.to_string(),
        RawId::Float(n) => n.to_string(),
    })
}

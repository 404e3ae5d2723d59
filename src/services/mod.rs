//! Recommendation engine and the request-level services around it
//!
//! `profile`, `signals`, `similarity`, `aggregator`, `description` and
//! `engine` are pure and never touch the store. `quiz` and
//! `recommendations` load data through a [`crate::store::Storefront`] and
//! call into them.

pub mod aggregator;
pub mod description;
pub mod engine;
pub mod profile;
pub mod quiz;
pub mod recommendations;
pub mod signals;
pub mod similarity;

pub use description::synthesize_description;
pub use engine::{EngineConfig, RecommendationEngine};
pub use profile::derive_profile;
pub use similarity::find_similar_users;

//! Record storefront recommendation service
//!
//! The engine in [`services`] blends a quiz-derived taste profile, purchase
//! and favorite history, similar users' purchases and a popularity sample
//! into one ranked list. [`api`] exposes it over HTTP on top of a
//! [`store::Storefront`].

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;

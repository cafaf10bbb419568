//! Recipe recommendation for the Cookwise recipe app.
//!
//! Ranks a recipe catalog against taste-quiz answers or against another
//! recipe, explains each match, and keeps the small pieces of user state
//! (favorites, view history, quiz answers) that recommendation reads from.

pub mod catalog;
pub mod config;
pub mod ffi;
pub mod insights;
pub mod model;
pub mod recommender;
pub mod scoring;
pub mod storage;

pub use catalog::{find_recipe, load_catalog, CatalogError, CatalogProvider};
pub use config::{ConfigError, RecommenderConfig};
pub use insights::{analyze_preferences, generate_insights, PreferenceAnalysis};
pub use model::*;
pub use recommender::{PersonalizedRecommendations, Recommender};
pub use scoring::{
    score_by_preferences, score_by_profile, score_by_similarity, ScoreKind, ScoredRecipe,
    ScoringOptions,
};
pub use storage::{KeyValueStore, StorageError};

uniffi::setup_scaffolding!();

//! UniFFI bindings for cross-platform support (iOS, Android).
//!
//! Recipes and quiz answers cross the boundary as flat records with string
//! labels. Labels are parsed the same way catalog files are: anything
//! unrecognized is treated as an unanswered axis rather than an error.

use crate::catalog::{self, CatalogError};
use crate::insights::PreferenceAnalysis;
use crate::recommender::{PersonalizedRecommendations, Recommender};
use crate::scoring::{self, ScoreKind, ScoredRecipe, ScoringOptions};
use crate::{DietTag, Preferences, Recipe};
use std::sync::Arc;

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum RecommendError {
    #[error("Catalog not found: {message}")]
    NotFound { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },

    #[error("Unsupported catalog: {message}")]
    Unsupported { message: String },
}

impl From<CatalogError> for RecommendError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::IoError(e) => RecommendError::IoError {
                message: e.to_string(),
            },
            CatalogError::GlobError(e) => RecommendError::IoError {
                message: e.to_string(),
            },
            CatalogError::JsonError(e) => RecommendError::ParseError {
                message: e.to_string(),
            },
            CatalogError::YamlError(e) => RecommendError::ParseError {
                message: e.to_string(),
            },
            CatalogError::PatternError(e) => RecommendError::InvalidPath {
                message: e.to_string(),
            },
            CatalogError::InvalidPath(p) => RecommendError::InvalidPath { message: p },
            CatalogError::NotFound(p) => RecommendError::NotFound {
                message: p.to_string(),
            },
            CatalogError::UnsupportedFormat(p) => RecommendError::Unsupported {
                message: p.to_string(),
            },
        }
    }
}

/// FFI-safe representation of a catalog recipe.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiRecipe {
    pub id: String,
    pub title: String,
    pub cuisine: Option<String>,
    /// "Mild", "Medium" or "Spicy"
    pub spice_level: Option<String>,
    pub region: Option<String>,
    /// "Easy", "Medium" or "Hard"
    pub effort: Option<String>,
    /// "Quick", "Medium" or "Long"
    pub difficulty: Option<String>,
    /// Minutes
    pub cooking_time: Option<u32>,
    pub diet_type: Vec<String>,
    pub is_healthy: bool,
    pub is_street_food: bool,
}

impl From<&Recipe> for FfiRecipe {
    fn from(r: &Recipe) -> Self {
        FfiRecipe {
            id: r.id.clone(),
            title: r.title.clone(),
            cuisine: r.cuisine.clone(),
            spice_level: r.spice_level.map(|v| v.to_string()),
            region: r.region.map(|v| v.to_string()),
            effort: r.effort.map(|v| v.to_string()),
            difficulty: r.difficulty.map(|v| v.to_string()),
            cooking_time: r.cooking_time,
            diet_type: r.diet_type.iter().map(ToString::to_string).collect(),
            is_healthy: r.is_healthy,
            is_street_food: r.is_street_food,
        }
    }
}

impl From<FfiRecipe> for Recipe {
    fn from(r: FfiRecipe) -> Self {
        Recipe {
            id: r.id,
            title: r.title,
            cuisine: r.cuisine,
            spice_level: parse_label(r.spice_level),
            region: parse_label(r.region),
            effort: parse_label(r.effort),
            difficulty: parse_label(r.difficulty),
            cooking_time: r.cooking_time.filter(|m| *m > 0),
            diet_type: r.diet_type.into_iter().map(DietTag::from).collect(),
            is_healthy: r.is_healthy,
            is_street_food: r.is_street_food,
        }
    }
}

fn parse_label<T: std::str::FromStr>(raw: Option<String>) -> Option<T> {
    raw.and_then(|s| s.parse().ok())
}

/// Quiz answers as the quiz stores them ("spicy", "south", "non-veg", ...).
#[derive(Debug, Clone, Default, PartialEq, uniffi::Record)]
pub struct FfiPreferences {
    pub spice_level: Option<String>,
    pub cuisine: Option<String>,
    pub experience: Option<String>,
    pub time: Option<String>,
    pub diet_type: Option<String>,
}

impl From<FfiPreferences> for Preferences {
    fn from(p: FfiPreferences) -> Self {
        Preferences {
            spice_level: parse_label(p.spice_level),
            cuisine: parse_label(p.cuisine),
            experience: parse_label(p.experience),
            time: parse_label(p.time),
            diet_type: parse_label(p.diet_type),
        }
    }
}

/// Quiz points or normalized similarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiScoreKind {
    Points,
    Similarity,
}

impl From<ScoreKind> for FfiScoreKind {
    fn from(kind: ScoreKind) -> Self {
        match kind {
            ScoreKind::Points => FfiScoreKind::Points,
            ScoreKind::Similarity => FfiScoreKind::Similarity,
        }
    }
}

/// A recipe with its score and the reasons behind it.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiScoredRecipe {
    pub recipe: FfiRecipe,
    pub score: f64,
    pub kind: FfiScoreKind,
    pub match_reasons: Vec<String>,
}

impl From<ScoredRecipe> for FfiScoredRecipe {
    fn from(s: ScoredRecipe) -> Self {
        FfiScoredRecipe {
            recipe: FfiRecipe::from(&s.recipe),
            score: s.score,
            kind: s.kind.into(),
            match_reasons: s.match_reasons,
        }
    }
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiPreferenceAnalysis {
    pub spice_tolerance: String,
    pub cuisine_preference: String,
    pub cooking_style: String,
    pub time_availability: String,
    pub dietary_focus: String,
}

impl From<PreferenceAnalysis> for FfiPreferenceAnalysis {
    fn from(a: PreferenceAnalysis) -> Self {
        FfiPreferenceAnalysis {
            spice_tolerance: a.spice_tolerance,
            cuisine_preference: a.cuisine_preference,
            cooking_style: a.cooking_style,
            time_availability: a.time_availability,
            dietary_focus: a.dietary_focus,
        }
    }
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiPersonalized {
    pub recommendations: Vec<FfiScoredRecipe>,
    pub analysis: FfiPreferenceAnalysis,
    pub insights: Vec<String>,
    pub total: u32,
}

impl From<PersonalizedRecommendations> for FfiPersonalized {
    fn from(p: PersonalizedRecommendations) -> Self {
        FfiPersonalized {
            total: p.total as u32,
            recommendations: convert_scored(p.recommendations),
            analysis: p.analysis.into(),
            insights: p.insights,
        }
    }
}

fn convert_scored(scored: Vec<ScoredRecipe>) -> Vec<FfiScoredRecipe> {
    scored.into_iter().map(FfiScoredRecipe::from).collect()
}

fn convert_catalog(recipes: Vec<FfiRecipe>) -> Vec<Recipe> {
    recipes.into_iter().map(Recipe::from).collect()
}

/// A catalog snapshot with default tuning, for hosts that score repeatedly.
#[derive(uniffi::Object)]
pub struct FfiRecommender {
    inner: Recommender,
}

#[uniffi::export]
impl FfiRecommender {
    #[uniffi::constructor]
    pub fn new(recipes: Vec<FfiRecipe>) -> Arc<Self> {
        Arc::new(FfiRecommender {
            inner: Recommender::new(convert_catalog(recipes)),
        })
    }

    /// Loads the catalog from a directory of `.cook` files or a catalog file.
    #[uniffi::constructor]
    pub fn from_path(path: String) -> Result<Arc<Self>, RecommendError> {
        let recipes = catalog::load_catalog(path.as_str())?;
        Ok(Arc::new(FfiRecommender {
            inner: Recommender::new(recipes),
        }))
    }

    pub fn recipe_count(&self) -> u32 {
        self.inner.catalog().len() as u32
    }

    pub fn recipe(&self, id: String) -> Option<FfiRecipe> {
        self.inner.recipe(&id).map(FfiRecipe::from)
    }

    pub fn for_preferences(&self, preferences: FfiPreferences) -> Vec<FfiScoredRecipe> {
        convert_scored(self.inner.for_preferences(&preferences.into()))
    }

    pub fn for_profile(&self, preferences: FfiPreferences) -> Vec<FfiScoredRecipe> {
        convert_scored(self.inner.for_profile(&preferences.into()))
    }

    pub fn similar_to(&self, recipe_id: String) -> Vec<FfiScoredRecipe> {
        convert_scored(self.inner.similar_to(&recipe_id))
    }

    pub fn hybrid(&self, preferences: FfiPreferences, count: u32) -> Vec<FfiScoredRecipe> {
        convert_scored(self.inner.hybrid(&preferences.into(), count as usize))
    }

    pub fn personalized(&self, preferences: FfiPreferences) -> FfiPersonalized {
        self.inner.personalized(&preferences.into()).into()
    }
}

// ============================================================================
// Exported FFI Functions
// ============================================================================

/// Ranks recipes against quiz answers using quiz-mode points.
///
/// # Arguments
/// * `recipes` - The catalog to score
/// * `preferences` - Quiz answers
/// * `max_results` - Maximum number of results
#[uniffi::export]
pub fn recommend_for_preferences(
    recipes: Vec<FfiRecipe>,
    preferences: FfiPreferences,
    max_results: u32,
) -> Vec<FfiScoredRecipe> {
    let options = ScoringOptions::quiz().with_max_results(max_results as usize);
    convert_scored(scoring::score_by_preferences(
        &convert_catalog(recipes),
        &preferences.into(),
        &options,
    ))
}

/// Ranks recipes by normalized similarity to quiz answers.
#[uniffi::export]
pub fn recommend_for_profile(
    recipes: Vec<FfiRecipe>,
    preferences: FfiPreferences,
    max_results: u32,
) -> Vec<FfiScoredRecipe> {
    let options = ScoringOptions::profile().with_max_results(max_results as usize);
    convert_scored(scoring::score_by_profile(
        &convert_catalog(recipes),
        &preferences.into(),
        &options,
    ))
}

/// Ranks recipes by similarity to the recipe with `reference_id`.
///
/// The reference itself is never returned; an unknown id returns nothing.
#[uniffi::export]
pub fn recommend_similar(
    recipes: Vec<FfiRecipe>,
    reference_id: String,
    max_results: u32,
) -> Vec<FfiScoredRecipe> {
    let options = ScoringOptions::similar().with_max_results(max_results as usize);
    convert_scored(scoring::score_by_similarity(
        &convert_catalog(recipes),
        &reference_id,
        &options,
    ))
}

/// Loads a catalog from a directory of `.cook` files or from a JSON/YAML
/// catalog file.
#[uniffi::export]
pub fn load_catalog(path: String) -> Result<Vec<FfiRecipe>, RecommendError> {
    let recipes = catalog::load_catalog(path.as_str())?;
    Ok(recipes.iter().map(FfiRecipe::from).collect())
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

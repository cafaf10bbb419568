//! Recommendation scoring.
//!
//! Two scoring models share the same ranking contract:
//!
//! - **Quiz mode** ([`score_by_preferences`]): a weighted additive score in
//!   points (up to 100, plus two 5 point bonuses) against quiz answers.
//! - **Content-based mode** ([`score_by_similarity`], [`score_by_profile`]):
//!   a normalized 0..=1 similarity between feature vectors.
//!
//! Every call is a pure function of its inputs. Results keep only entries
//! scoring above the minimum, are ordered by descending score with ties in
//! catalog order, and are truncated to the configured maximum.

use crate::Recipe;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

mod quiz;
mod reasons;
mod similarity;

pub use quiz::{quiz_score, score_by_preferences, QuizPoints};
pub use similarity::{
    recipe_similarity, score_by_profile, score_by_similarity, similarity, FeatureVector,
    SimilarityWeights,
};

/// Scale a [`ScoredRecipe::score`] is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreKind {
    /// Quiz-mode points.
    Points,
    /// Normalized similarity in `0.0..=1.0`.
    Similarity,
}

/// A catalog recipe with its score and the reasons behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRecipe {
    pub recipe: Recipe,
    pub score: f64,
    pub kind: ScoreKind,
    pub match_reasons: Vec<String>,
}

/// Result bounds for one scoring call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringOptions {
    /// Maximum number of results returned.
    pub max_results: usize,
    /// Entries must score strictly above this to be kept.
    pub min_score: f64,
}

impl ScoringOptions {
    pub const fn new(max_results: usize, min_score: f64) -> Self {
        ScoringOptions {
            max_results,
            min_score,
        }
    }

    /// Quiz mode: top 12, anything above zero points.
    pub const fn quiz() -> Self {
        Self::new(12, 0.0)
    }

    /// Normalized scoring against quiz answers: top 12 above 0.3.
    pub const fn profile() -> Self {
        Self::new(12, 0.3)
    }

    /// "Similar recipes": top 6 above 0.4.
    pub const fn similar() -> Self {
        Self::new(6, 0.4)
    }

    pub const fn with_max_results(self, max_results: usize) -> Self {
        Self::new(max_results, self.min_score)
    }
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self::quiz()
    }
}

/// Filters, orders and truncates scored entries.
///
/// `sort_by` is stable, so equal scores keep their catalog order.
pub(crate) fn rank(mut scored: Vec<ScoredRecipe>, options: &ScoringOptions) -> Vec<ScoredRecipe> {
    scored.retain(|entry| entry.score > options.min_score);
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(options.max_results);
    scored
}

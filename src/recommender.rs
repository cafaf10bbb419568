//! Recommendation facade over a catalog snapshot.

use crate::catalog::{find_recipe, CatalogError, CatalogProvider};
use crate::config::RecommenderConfig;
use crate::insights::{analyze_preferences, generate_insights, PreferenceAnalysis};
use crate::scoring::{score_by_preferences, score_by_profile, score_by_similarity, ScoredRecipe};
use crate::{Preferences, Recipe};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Everything the results screen shows after a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizedRecommendations {
    pub recommendations: Vec<ScoredRecipe>,
    pub analysis: PreferenceAnalysis,
    pub insights: Vec<String>,
    pub total: usize,
}

/// Scores one catalog snapshot with fixed tuning.
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    catalog: Vec<Recipe>,
    config: RecommenderConfig,
}

impl Recommender {
    pub fn new(catalog: Vec<Recipe>) -> Self {
        Self::with_config(catalog, RecommenderConfig::default())
    }

    pub fn with_config(catalog: Vec<Recipe>, config: RecommenderConfig) -> Self {
        Recommender { catalog, config }
    }

    /// Takes a snapshot of whatever the provider currently holds.
    pub fn from_provider<P: CatalogProvider + ?Sized>(
        provider: &P,
        config: RecommenderConfig,
    ) -> Result<Self, CatalogError> {
        Ok(Self::with_config(provider.recipes()?, config))
    }

    pub fn catalog(&self) -> &[Recipe] {
        &self.catalog
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        find_recipe(&self.catalog, id)
    }

    /// Quiz-mode point scoring.
    pub fn for_preferences(&self, prefs: &Preferences) -> Vec<ScoredRecipe> {
        score_by_preferences(&self.catalog, prefs, &self.config.quiz)
    }

    /// Normalized similarity to the quiz answers.
    pub fn for_profile(&self, prefs: &Preferences) -> Vec<ScoredRecipe> {
        score_by_profile(&self.catalog, prefs, &self.config.profile)
    }

    /// Recipes most like the one with `recipe_id`, never including it.
    pub fn similar_to(&self, recipe_id: &str) -> Vec<ScoredRecipe> {
        score_by_similarity(&self.catalog, recipe_id, &self.config.similar)
    }

    /// Up to `n` recommendations: the quiz ranking first, topped up with
    /// recipes similar to the best quiz matches when it runs short.
    ///
    /// Each recipe appears once, at its first position.
    pub fn hybrid(&self, prefs: &Preferences, n: usize) -> Vec<ScoredRecipe> {
        let quiz_options = self.config.quiz.with_max_results(n.saturating_mul(2));
        let mut ranked = score_by_preferences(&self.catalog, prefs, &quiz_options);
        if ranked.len() >= n {
            ranked.truncate(n);
            return ranked;
        }

        let similar_options = self.config.similar.with_max_results(self.config.similar_per_seed);
        let supplement: Vec<ScoredRecipe> = ranked
            .iter()
            .take(n / 2)
            .flat_map(|seed| score_by_similarity(&self.catalog, &seed.recipe.id, &similar_options))
            .collect();
        debug!(
            quiz = ranked.len(),
            supplement = supplement.len(),
            "topping up quiz results with similar recipes"
        );

        let mut seen = HashSet::new();
        ranked.extend(supplement);
        ranked.retain(|entry| seen.insert(entry.recipe.id.clone()));
        ranked.truncate(n);
        ranked
    }

    /// Hybrid recommendations sized to the quiz limit, with the answer
    /// analysis and insights about the list.
    pub fn personalized(&self, prefs: &Preferences) -> PersonalizedRecommendations {
        let recommendations = self.hybrid(prefs, self.config.quiz.max_results);
        let insights = generate_insights(&recommendations, prefs);

        PersonalizedRecommendations {
            total: recommendations.len(),
            analysis: analyze_preferences(prefs),
            insights,
            recommendations,
        }
    }
}

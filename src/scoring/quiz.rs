use super::{rank, reasons, ScoreKind, ScoredRecipe, ScoringOptions};
use crate::{Preferences, Recipe, SpiceLevel, TimeBucket};
use tracing::debug;

const SPICE_EXACT: u32 = 25;
const SPICE_ADJACENT: u32 = 15;
const CUISINE: u32 = 20;
const EXPERIENCE: u32 = 15;
const TIME_BUCKET: u32 = 20;
const TIME_QUICK_COOK: u32 = 15;
const DIET: u32 = 20;
const BONUS: u32 = 5;

/// Recipes at or under this many minutes count as quick.
const QUICK_COOK_MINUTES: u32 = 30;

/// Score of every exactly matched axis, without bonuses.
const FULL_MARKS: f64 = 100.0;

/// Points a recipe earns against a set of quiz answers, with the reason for
/// each scoring axis.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuizPoints {
    pub points: u32,
    pub reasons: Vec<String>,
}

impl QuizPoints {
    fn award(&mut self, points: u32, reason: String) {
        self.points += points;
        self.reasons.push(reason);
    }
}

/// Scores one recipe against quiz answers.
///
/// Axes are evaluated in reason order: spice, cuisine, diet, experience,
/// time, then the healthy and street-food bonuses. An unanswered axis or a
/// recipe without a value on it earns nothing.
pub fn quiz_score(recipe: &Recipe, prefs: &Preferences) -> QuizPoints {
    let mut result = QuizPoints::default();

    if let (Some(wanted), Some(actual)) = (prefs.spice_level, recipe.spice_level) {
        match wanted.distance(actual) {
            0 => result.award(SPICE_EXACT, format!("Perfect spice level: {actual}")),
            1 => result.award(
                SPICE_ADJACENT,
                format!("Close to your spice level: {actual}"),
            ),
            _ => {}
        }
    }

    if let (Some(cuisine), Some(region)) = (prefs.cuisine, recipe.region) {
        if cuisine.includes(region) {
            result.award(CUISINE, format!("Regional cuisine: {region} Indian"));
        }
    }

    if let Some(diet) = prefs.diet_type {
        if diet.accepts(&recipe.diet_type) {
            let reason = if recipe.diet_type.is_empty() {
                "Fits your flexible diet".to_string()
            } else {
                let tags: Vec<String> = recipe.diet_type.iter().map(ToString::to_string).collect();
                format!("Dietary match: {}", tags.join(", "))
            };
            result.award(DIET, reason);
        }
    }

    if let (Some(experience), Some(effort)) = (prefs.experience, recipe.effort) {
        if experience == effort {
            result.award(EXPERIENCE, format!("Perfect difficulty: {effort}"));
        }
    }

    // Exact bucket first; the raw-minutes rule only applies when it misses.
    if let Some(time) = prefs.time {
        if recipe.difficulty == Some(time) {
            result.award(TIME_BUCKET, format!("Ideal cooking time: {time}"));
        } else if time == TimeBucket::Quick {
            if let Some(minutes) = recipe.cooking_time.filter(|m| *m <= QUICK_COOK_MINUTES) {
                result.award(TIME_QUICK_COOK, format!("Ready in {minutes} minutes"));
            }
        }
    }

    if prefs.time == Some(TimeBucket::Quick) && recipe.is_healthy {
        result.award(BONUS, "Healthy quick option".to_string());
    }

    if prefs.spice_level == Some(SpiceLevel::Spicy) && recipe.is_street_food {
        result.award(BONUS, "Authentic street food".to_string());
    }

    result
}

/// Ranks a catalog against quiz answers (quiz mode).
///
/// Recipes earning no points are never returned. The result is ordered by
/// descending points, ties in catalog order, and truncated to
/// `options.max_results`.
///
/// # Examples
///
/// ```
/// use cookwise_recommend::{score_by_preferences, Preferences, Recipe, ScoringOptions, SpiceLevel};
///
/// let catalog = vec![
///     Recipe { spice_level: Some(SpiceLevel::Mild), ..Recipe::new("1", "Dal Khichdi") },
///     Recipe { spice_level: Some(SpiceLevel::Spicy), ..Recipe::new("2", "Fish Curry") },
/// ];
/// let prefs = Preferences { spice_level: Some(SpiceLevel::Spicy), ..Default::default() };
///
/// let ranked = score_by_preferences(&catalog, &prefs, &ScoringOptions::quiz());
/// assert_eq!(ranked.len(), 1);
/// assert_eq!(ranked[0].recipe.id, "2");
/// assert_eq!(ranked[0].score, 25.0);
/// ```
pub fn score_by_preferences(
    catalog: &[Recipe],
    prefs: &Preferences,
    options: &ScoringOptions,
) -> Vec<ScoredRecipe> {
    let scored = catalog
        .iter()
        .map(|recipe| {
            let points = quiz_score(recipe, prefs);
            let score = f64::from(points.points);
            ScoredRecipe {
                recipe: recipe.clone(),
                score,
                kind: ScoreKind::Points,
                match_reasons: reasons::compose(score / FULL_MARKS, points.reasons),
            }
        })
        .collect();

    let ranked = rank(scored, options);
    debug!(
        catalog = catalog.len(),
        returned = ranked.len(),
        "scored catalog against quiz answers"
    );
    ranked
}

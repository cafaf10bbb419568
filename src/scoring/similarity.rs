use super::{rank, reasons, ScoreKind, ScoredRecipe, ScoringOptions};
use crate::{
    minutes_slot, DietPreference, Effort, Preferences, Recipe, Region, SpiceLevel, TimeBucket,
};
use tracing::debug;

/// Credit for two known but different cuisines.
const CUISINE_MISMATCH: f64 = 0.3;
/// Credit a vegetarian gets for a vegan dish.
const VEG_ACCEPTS_VEGAN: f64 = 0.8;

/// Numeric and categorical features compared by content-based scoring.
///
/// Built either from a recipe or from quiz answers; `None` (or an empty
/// region list) marks an unknown value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureVector {
    /// Spice rank, 1..=3.
    pub spice: Option<u8>,
    /// Acceptable regions. A recipe has at most one.
    pub regions: Vec<Region>,
    /// Effort rank, 1..=3.
    pub experience: Option<u8>,
    /// Cooking-time slot, 1..=4.
    pub time_slot: Option<u8>,
    pub diet: Option<DietPreference>,
}

impl FeatureVector {
    /// Cooking minutes decide the time slot; the difficulty bucket is used
    /// only when minutes are unknown.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        FeatureVector {
            spice: recipe.spice_level.map(SpiceLevel::rank),
            regions: recipe.region.into_iter().collect(),
            experience: recipe.effort.map(Effort::rank),
            time_slot: recipe
                .cooking_time
                .map(minutes_slot)
                .or_else(|| recipe.difficulty.map(TimeBucket::slot)),
            diet: DietPreference::of_tags(&recipe.diet_type),
        }
    }

    pub fn from_preferences(prefs: &Preferences) -> Self {
        FeatureVector {
            spice: prefs.spice_level.map(SpiceLevel::rank),
            regions: prefs
                .cuisine
                .map(|c| c.regions().to_vec())
                .unwrap_or_default(),
            experience: prefs.experience.map(Effort::rank),
            time_slot: prefs.time.map(TimeBucket::slot),
            diet: prefs.diet_type,
        }
    }
}

/// Per-axis weights of the normalized similarity score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityWeights {
    pub spice: f64,
    pub cuisine: f64,
    pub experience: f64,
    pub time: f64,
    pub diet: f64,
}

impl SimilarityWeights {
    pub const DEFAULT: SimilarityWeights = SimilarityWeights {
        spice: 0.25,
        cuisine: 0.20,
        experience: 0.20,
        time: 0.15,
        diet: 0.20,
    };

    pub fn total(&self) -> f64 {
        self.spice + self.cuisine + self.experience + self.time + self.diet
    }
}

fn ordinal_match(a: Option<u8>, b: Option<u8>, span: f64) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => 1.0 - f64::from(a.abs_diff(b)) / span,
        _ => 0.0,
    }
}

fn regions_overlap(a: &[Region], b: &[Region]) -> bool {
    a.iter().any(|region| b.contains(region))
}

fn cuisine_match(a: &[Region], b: &[Region]) -> f64 {
    if a.is_empty() || b.is_empty() {
        0.0
    } else if regions_overlap(a, b) {
        1.0
    } else {
        CUISINE_MISMATCH
    }
}

/// Partial credit only flows one way: veg accepts vegan, vegan does not
/// accept veg.
fn diet_match(wanted: Option<DietPreference>, offered: Option<DietPreference>) -> f64 {
    match (wanted, offered) {
        (Some(DietPreference::Flexible), _) => 1.0,
        (Some(wanted), Some(offered)) if wanted == offered => 1.0,
        (Some(DietPreference::Veg), Some(DietPreference::Vegan)) => VEG_ACCEPTS_VEGAN,
        _ => 0.0,
    }
}

/// How an axis unknown on one or both sides is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unknown {
    /// Any unknown side scores 0.
    NoMatch,
    /// Unknown on both sides scores 1; unknown on one side scores 0.
    SharedMatches,
}

impl Unknown {
    fn score(self, both_unknown: bool, known: impl FnOnce() -> f64) -> f64 {
        if both_unknown && self == Unknown::SharedMatches {
            1.0
        } else {
            known()
        }
    }
}

fn weighted_match(reference: &FeatureVector, candidate: &FeatureVector, unknown: Unknown) -> f64 {
    let weights = SimilarityWeights::DEFAULT;
    let terms = [
        (
            weights.spice,
            unknown.score(reference.spice.is_none() && candidate.spice.is_none(), || {
                ordinal_match(reference.spice, candidate.spice, 2.0)
            }),
        ),
        (
            weights.cuisine,
            unknown.score(
                reference.regions.is_empty() && candidate.regions.is_empty(),
                || cuisine_match(&reference.regions, &candidate.regions),
            ),
        ),
        (
            weights.experience,
            unknown.score(
                reference.experience.is_none() && candidate.experience.is_none(),
                || ordinal_match(reference.experience, candidate.experience, 2.0),
            ),
        ),
        (
            weights.time,
            unknown.score(
                reference.time_slot.is_none() && candidate.time_slot.is_none(),
                || ordinal_match(reference.time_slot, candidate.time_slot, 3.0),
            ),
        ),
        (
            weights.diet,
            unknown.score(reference.diet.is_none() && candidate.diet.is_none(), || {
                diet_match(reference.diet, candidate.diet)
            }),
        ),
    ];

    // The denominator accumulates in the same order as the numerator, so a
    // perfect match divides a value by itself.
    let (score, total) = terms
        .iter()
        .fold((0.0, 0.0), |(score, total), (weight, matched)| {
            (score + weight * matched, total + weight)
        });
    score / total
}

/// Normalized similarity of a recipe to quiz answers, in `0.0..=1.0`.
///
/// Each axis contributes `weight * match`; the sum is divided by the sum of
/// all five weights. An axis unknown on either side matches 0 but keeps its
/// weight in the denominator.
pub fn similarity(reference: &FeatureVector, candidate: &FeatureVector) -> f64 {
    weighted_match(reference, candidate, Unknown::NoMatch)
}

/// Normalized similarity between two recipes, in `0.0..=1.0`.
///
/// Same weights as [`similarity`], except that an axis unknown on both
/// recipes counts as a full match. Identical recipes always score 1.0.
pub fn recipe_similarity(reference: &FeatureVector, candidate: &FeatureVector) -> f64 {
    weighted_match(reference, candidate, Unknown::SharedMatches)
}

fn axis_reasons(wanted: &FeatureVector, offered: &FeatureVector) -> Vec<String> {
    let mut reasons = Vec::new();
    let same = |a: Option<u8>, b: Option<u8>| a.is_some() && a == b;

    if same(wanted.spice, offered.spice) {
        reasons.push("Matches your spice preference".to_string());
    }
    if regions_overlap(&wanted.regions, &offered.regions) {
        reasons.push("Your preferred cuisine style".to_string());
    }
    if diet_match(wanted.diet, offered.diet) == 1.0 {
        reasons.push("Suits your dietary preferences".to_string());
    }
    if same(wanted.experience, offered.experience) {
        reasons.push("Matches your cooking experience".to_string());
    }
    if same(wanted.time_slot, offered.time_slot) {
        reasons.push("Fits the time you have".to_string());
    }
    reasons
}

/// Ranks a catalog by normalized similarity to quiz answers.
///
/// Uses the same feature comparison as [`score_by_similarity`], with the
/// answers standing in for the reference recipe. Defaults to
/// [`ScoringOptions::profile`] bounds when called through the recommender.
pub fn score_by_profile(
    catalog: &[Recipe],
    prefs: &Preferences,
    options: &ScoringOptions,
) -> Vec<ScoredRecipe> {
    let wanted = FeatureVector::from_preferences(prefs);
    let scored = catalog
        .iter()
        .map(|recipe| {
            let offered = FeatureVector::from_recipe(recipe);
            let score = similarity(&wanted, &offered);
            ScoredRecipe {
                recipe: recipe.clone(),
                score,
                kind: ScoreKind::Similarity,
                match_reasons: reasons::compose(score, axis_reasons(&wanted, &offered)),
            }
        })
        .collect();

    let ranked = rank(scored, options);
    debug!(
        catalog = catalog.len(),
        returned = ranked.len(),
        "scored catalog against preference profile"
    );
    ranked
}

/// Ranks the catalog by similarity to the recipe with id `reference_id`.
///
/// Scores with [`recipe_similarity`]. The reference itself is never part of
/// the result. An unknown reference id yields an empty result.
///
/// # Examples
///
/// ```
/// use cookwise_recommend::{score_by_similarity, Recipe, Region, ScoringOptions, SpiceLevel};
///
/// let dish = |id: &str, spice| Recipe {
///     spice_level: Some(spice),
///     region: Some(Region::South),
///     ..Recipe::new(id, id)
/// };
/// let catalog = vec![dish("sambar", SpiceLevel::Medium), dish("rasam", SpiceLevel::Medium)];
///
/// let similar = score_by_similarity(&catalog, "sambar", &ScoringOptions::similar());
/// assert_eq!(similar.len(), 1);
/// assert_eq!(similar[0].recipe.id, "rasam");
/// assert_eq!(similar[0].match_reasons[0], "Similar to sambar");
/// ```
pub fn score_by_similarity(
    catalog: &[Recipe],
    reference_id: &str,
    options: &ScoringOptions,
) -> Vec<ScoredRecipe> {
    let Some(reference) = catalog.iter().find(|r| r.id == reference_id) else {
        debug!(reference_id, "reference recipe not in catalog");
        return Vec::new();
    };

    let wanted = FeatureVector::from_recipe(reference);
    let similar_to = format!("Similar to {}", reference.display_name());
    let scored = catalog
        .iter()
        .filter(|recipe| recipe.id != reference.id)
        .map(|recipe| {
            let score = recipe_similarity(&wanted, &FeatureVector::from_recipe(recipe));
            let mut match_reasons = vec![similar_to.clone()];
            match_reasons.extend(reasons::band(score).map(str::to_string));
            ScoredRecipe {
                recipe: recipe.clone(),
                score,
                kind: ScoreKind::Similarity,
                match_reasons,
            }
        })
        .collect();

    rank(scored, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CuisinePreference, DietTag};

    fn sambar() -> Recipe {
        Recipe {
            spice_level: Some(SpiceLevel::Medium),
            region: Some(Region::South),
            effort: Some(Effort::Medium),
            cooking_time: Some(40),
            diet_type: vec![DietTag::Veg],
            ..Recipe::new("sambar", "Sambar")
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        assert!((SimilarityWeights::DEFAULT.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_identical_features_score_exactly_one() {
        let reference = FeatureVector::from_recipe(&sambar());
        let twin = FeatureVector::from_recipe(&Recipe {
            id: "twin".to_string(),
            ..sambar()
        });
        assert_eq!(similarity(&reference, &twin), 1.0);
    }

    #[test]
    fn test_axis_partial_credit() {
        let reference = FeatureVector::from_recipe(&sambar());
        let other = FeatureVector::from_recipe(&Recipe {
            spice_level: Some(SpiceLevel::Spicy),
            region: Some(Region::North),
            effort: Some(Effort::Hard),
            cooking_time: Some(90),
            diet_type: vec![DietTag::NonVeg],
            ..Recipe::new("vindaloo", "Vindaloo")
        });

        // Cooking time: slot 4 against slot 3.
        let expected = 0.25 * 0.5 + 0.20 * 0.3 + 0.20 * 0.5 + 0.15 * (2.0 / 3.0) + 0.0;
        assert!((similarity(&reference, &other) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_diet_partial_credit_is_one_way() {
        assert_eq!(
            diet_match(Some(DietPreference::Veg), Some(DietPreference::Vegan)),
            0.8
        );
        assert_eq!(
            diet_match(Some(DietPreference::Vegan), Some(DietPreference::Veg)),
            0.0
        );
        assert_eq!(diet_match(Some(DietPreference::Flexible), None), 1.0);
        assert_eq!(diet_match(None, Some(DietPreference::Veg)), 0.0);
    }

    #[test]
    fn test_axes_unknown_on_both_recipes_match() {
        let gluten_free = Recipe {
            diet_type: vec![DietTag::GlutenFree],
            ..sambar()
        };
        let reference = FeatureVector::from_recipe(&gluten_free);
        let twin = FeatureVector::from_recipe(&Recipe {
            id: "twin".to_string(),
            ..gluten_free
        });
        assert_eq!(reference.diet, None);
        assert_eq!(recipe_similarity(&reference, &twin), 1.0);
        assert!((similarity(&reference, &twin) - 0.8).abs() < 1e-9);

        let bare = FeatureVector::from_recipe(&Recipe::new("a", "A"));
        assert_eq!(recipe_similarity(&bare, &bare.clone()), 1.0);
        assert_eq!(similarity(&bare, &bare.clone()), 0.0);
    }

    #[test]
    fn test_axis_unknown_on_one_recipe_scores_zero() {
        let reference = FeatureVector::from_recipe(&sambar());
        let no_spice = FeatureVector::from_recipe(&Recipe {
            spice_level: None,
            ..sambar()
        });
        assert!((recipe_similarity(&reference, &no_spice) - 0.75).abs() < 1e-9);
        assert!((recipe_similarity(&no_spice, &reference) - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_score_by_similarity_bare_twins() {
        let catalog = vec![Recipe::new("a", "Plain Rice"), Recipe::new("b", "Plain Rice")];

        let similar = score_by_similarity(&catalog, "a", &ScoringOptions::similar());

        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].recipe.id, "b");
        assert_eq!(similar[0].score, 1.0);
        assert_eq!(similar[0].kind, ScoreKind::Similarity);
    }

    #[test]
    fn test_unknown_axes_contribute_nothing() {
        let blank = FeatureVector::default();
        let full = FeatureVector::from_recipe(&sambar());
        assert_eq!(similarity(&blank, &full), 0.0);
        assert_eq!(cuisine_match(&[], &[Region::South]), 0.0);
    }

    #[test]
    fn test_similarity_stays_in_unit_range() {
        let spice = [None, Some(SpiceLevel::Mild), Some(SpiceLevel::Spicy)];
        let minutes = [None, Some(5), Some(120)];
        for a in spice {
            for b in spice {
                for m in minutes {
                    let x = FeatureVector::from_recipe(&Recipe {
                        spice_level: a,
                        cooking_time: m,
                        ..sambar()
                    });
                    let y = FeatureVector::from_recipe(&Recipe {
                        spice_level: b,
                        ..sambar()
                    });
                    let score = similarity(&x, &y);
                    assert!((0.0..=1.0).contains(&score), "score {score} out of range");
                }
            }
        }
    }

    #[test]
    fn test_score_by_similarity_excludes_reference_and_filters() {
        let catalog = vec![
            sambar(),
            Recipe {
                id: "rasam".to_string(),
                title: "Rasam".to_string(),
                ..sambar()
            },
            Recipe {
                spice_level: Some(SpiceLevel::Mild),
                region: Some(Region::West),
                effort: Some(Effort::Easy),
                cooking_time: Some(10),
                diet_type: vec![DietTag::NonVeg],
                ..Recipe::new("omelette", "Omelette")
            },
        ];

        let similar = score_by_similarity(&catalog, "sambar", &ScoringOptions::similar());

        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].recipe.id, "rasam");
        assert_eq!(similar[0].score, 1.0);
        assert_eq!(
            similar[0].match_reasons,
            vec!["Similar to Sambar", "Perfect match for your preferences"]
        );
    }

    #[test]
    fn test_score_by_similarity_unknown_reference() {
        let similar = score_by_similarity(&[sambar()], "missing", &ScoringOptions::similar());
        assert!(similar.is_empty());
        assert!(score_by_similarity(&[], "sambar", &ScoringOptions::similar()).is_empty());
    }

    #[test]
    fn test_score_by_profile() {
        let prefs = Preferences {
            spice_level: Some(SpiceLevel::Medium),
            cuisine: Some(CuisinePreference::South),
            experience: Some(Effort::Medium),
            time: Some(TimeBucket::Medium),
            diet_type: Some(DietPreference::Veg),
        };
        let vegan_twin = Recipe {
            id: "avial".to_string(),
            title: "Avial".to_string(),
            cooking_time: Some(25),
            diet_type: vec![DietTag::Vegan],
            ..sambar()
        };
        let catalog = vec![sambar(), vegan_twin];

        let ranked = score_by_profile(&catalog, &prefs, &ScoringOptions::profile());

        assert_eq!(ranked.len(), 2);
        // Avial: exact on every axis but diet (0.8)
        assert_eq!(ranked[0].recipe.id, "avial");
        assert!((ranked[0].score - 0.96).abs() < 1e-9);
        assert_eq!(
            ranked[0].match_reasons,
            vec![
                "Perfect match for your preferences",
                "Matches your spice preference",
                "Your preferred cuisine style",
                "Matches your cooking experience",
                "Fits the time you have",
            ]
        );
        assert!(ranked[1].score < ranked[0].score);
    }
}

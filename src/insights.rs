//! Plain-language summaries of quiz answers and of a recommendation list.

use crate::scoring::ScoredRecipe;
use crate::{
    CuisinePreference, DietPreference, DietTag, Effort, Preferences, SpiceLevel, TimeBucket,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How the quiz answers read as a cooking profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceAnalysis {
    pub spice_tolerance: String,
    pub cuisine_preference: String,
    pub cooking_style: String,
    pub time_availability: String,
    pub dietary_focus: String,
}

pub fn analyze_preferences(prefs: &Preferences) -> PreferenceAnalysis {
    let spice_tolerance = match prefs.spice_level {
        Some(SpiceLevel::Spicy) => "High",
        Some(SpiceLevel::Mild) => "Low",
        _ => "Moderate",
    };
    let cuisine_preference = match prefs.cuisine {
        Some(CuisinePreference::North) => "North Indian",
        Some(CuisinePreference::South) => "South Indian",
        _ => "Balanced",
    };
    let cooking_style = match prefs.experience {
        Some(Effort::Hard) => "Experimental",
        Some(Effort::Easy) => "Simple",
        _ => "Traditional",
    };
    let time_availability = match prefs.time {
        Some(TimeBucket::Quick) => "Limited",
        Some(TimeBucket::Long) => "Generous",
        _ => "Flexible",
    };
    let dietary_focus = match prefs.diet_type {
        Some(DietPreference::Veg | DietPreference::Vegan) => "Plant-based",
        Some(DietPreference::NonVeg) => "Protein-rich",
        _ => "Inclusive",
    };

    PreferenceAnalysis {
        spice_tolerance: spice_tolerance.to_string(),
        cuisine_preference: cuisine_preference.to_string(),
        cooking_style: cooking_style.to_string(),
        time_availability: time_availability.to_string(),
        dietary_focus: dietary_focus.to_string(),
    }
}

/// Cooking time at or under which a recipe counts as quick.
const QUICK_MINUTES: u32 = 30;
/// Distinct regions needed before variety is worth mentioning.
const DIVERSE_REGIONS: usize = 3;

/// Observations about a recommendation list in light of the answers given.
pub fn generate_insights(recommendations: &[ScoredRecipe], prefs: &Preferences) -> Vec<String> {
    if recommendations.is_empty() {
        return vec![
            "No specific recommendations found. Try adjusting your preferences.".to_string(),
        ];
    }

    let recipes = || recommendations.iter().map(|scored| &scored.recipe);
    let mut insights = Vec::new();

    let spice_levels: Vec<_> = recipes()
        .map(|r| r.spice_level)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    if let [Some(level)] = spice_levels.as_slice() {
        insights.push(format!(
            "All recommendations are {} - perfect for your spice preference!",
            level.to_string().to_lowercase()
        ));
    }

    if prefs.time == Some(TimeBucket::Quick) {
        let quick = recipes()
            .filter(|r| r.cooking_time.is_some_and(|m| m <= QUICK_MINUTES))
            .count();
        if quick > 0 {
            insights.push(format!(
                "{quick} quick recipes (≤30 min) match your time preference."
            ));
        }
    }

    let regions: HashSet<_> = recipes().filter_map(|r| r.region).collect();
    if regions.len() >= DIVERSE_REGIONS {
        insights.push(format!(
            "Diverse regional cuisine: {} different regions represented.",
            regions.len()
        ));
    }

    if matches!(
        prefs.diet_type,
        Some(DietPreference::Veg | DietPreference::Vegan)
    ) {
        let vegetarian = recipes()
            .filter(|r| r.has_diet(&DietTag::Veg) || r.has_diet(&DietTag::Vegan))
            .count();
        if vegetarian > 0 {
            insights.push(format!("{vegetarian} vegetarian options available."));
        }
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoreKind;
    use crate::{Recipe, Region};

    fn scored(recipe: Recipe) -> ScoredRecipe {
        ScoredRecipe {
            recipe,
            score: 50.0,
            kind: ScoreKind::Points,
            match_reasons: Vec::new(),
        }
    }

    fn dish(id: &str, spice: SpiceLevel, region: Region, minutes: u32, diet: &str) -> ScoredRecipe {
        scored(Recipe {
            spice_level: Some(spice),
            region: Some(region),
            cooking_time: Some(minutes),
            diet_type: vec![DietTag::from(diet)],
            ..Recipe::new(id, id)
        })
    }

    #[test]
    fn test_analysis_defaults() {
        let analysis = analyze_preferences(&Preferences::default());
        assert_eq!(
            analysis,
            PreferenceAnalysis {
                spice_tolerance: "Moderate".to_string(),
                cuisine_preference: "Balanced".to_string(),
                cooking_style: "Traditional".to_string(),
                time_availability: "Flexible".to_string(),
                dietary_focus: "Inclusive".to_string(),
            }
        );
    }

    #[test]
    fn test_analysis_overrides() {
        let analysis = analyze_preferences(&Preferences {
            spice_level: Some(SpiceLevel::Spicy),
            cuisine: Some(CuisinePreference::South),
            experience: Some(Effort::Easy),
            time: Some(TimeBucket::Long),
            diet_type: Some(DietPreference::Vegan),
        });
        assert_eq!(analysis.spice_tolerance, "High");
        assert_eq!(analysis.cuisine_preference, "South Indian");
        assert_eq!(analysis.cooking_style, "Simple");
        assert_eq!(analysis.time_availability, "Generous");
        assert_eq!(analysis.dietary_focus, "Plant-based");

        let analysis = analyze_preferences(&Preferences {
            spice_level: Some(SpiceLevel::Medium),
            cuisine: Some(CuisinePreference::West),
            diet_type: Some(DietPreference::NonVeg),
            ..Default::default()
        });
        assert_eq!(analysis.spice_tolerance, "Moderate");
        assert_eq!(analysis.cuisine_preference, "Balanced");
        assert_eq!(analysis.dietary_focus, "Protein-rich");
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(
            generate_insights(&[], &Preferences::default()),
            vec!["No specific recommendations found. Try adjusting your preferences.".to_string()]
        );
    }

    #[test]
    fn test_all_insights() {
        let recommendations = vec![
            dish("1", SpiceLevel::Mild, Region::North, 20, "Veg"),
            dish("2", SpiceLevel::Mild, Region::South, 25, "Vegan"),
            dish("3", SpiceLevel::Mild, Region::East, 50, "Non-Veg"),
        ];
        let prefs = Preferences {
            time: Some(TimeBucket::Quick),
            diet_type: Some(DietPreference::Veg),
            ..Default::default()
        };

        assert_eq!(
            generate_insights(&recommendations, &prefs),
            vec![
                "All recommendations are mild - perfect for your spice preference!".to_string(),
                "2 quick recipes (≤30 min) match your time preference.".to_string(),
                "Diverse regional cuisine: 3 different regions represented.".to_string(),
                "2 vegetarian options available.".to_string(),
            ]
        );
    }

    #[test]
    fn test_insights_depend_on_answers() {
        let recommendations = vec![
            dish("1", SpiceLevel::Mild, Region::North, 20, "Veg"),
            dish("2", SpiceLevel::Spicy, Region::North, 25, "Veg"),
        ];

        assert!(generate_insights(&recommendations, &Preferences::default()).is_empty());
    }

    #[test]
    fn test_unknown_spice_is_not_uniform() {
        let recommendations = vec![
            dish("1", SpiceLevel::Mild, Region::North, 20, "Veg"),
            scored(Recipe::new("2", "Plain rice")),
        ];

        assert!(generate_insights(&recommendations, &Preferences::default()).is_empty());
    }
}

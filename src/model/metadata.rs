use super::recipe::{parse_minutes, split_tags, DietTag, Recipe};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::HashMap;

/// YAML frontmatter of a `.cook` recipe file.
///
/// Gives typed access to the fields recommendation needs while keeping
/// every other key reachable through [`Metadata::get`].
///
/// ```no_run
/// # use cookwise_recommend::Metadata;
/// # let metadata: Metadata = Default::default();
/// let recipe = metadata.to_recipe("breakfast/dosa", "dosa");
/// if let Some(level) = metadata.text(&["spice"]) {
///     println!("Spice: {level}");
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Metadata {
    #[serde(flatten)]
    pub(super) data: HashMap<String, Value>,
}

const TITLE_KEYS: &[&str] = &["title", "name"];
const CUISINE_KEYS: &[&str] = &["cuisine"];
const SPICE_KEYS: &[&str] = &["spice", "spice_level", "spiceLevel"];
const REGION_KEYS: &[&str] = &["region"];
const EFFORT_KEYS: &[&str] = &["effort", "experience"];
const DIFFICULTY_KEYS: &[&str] = &["difficulty"];
const TIME_KEYS: &[&str] = &["time", "cooking_time", "cookingTime", "duration"];
const DIET_KEYS: &[&str] = &["diet", "diet_type", "dietType", "diets"];
const HEALTHY_KEYS: &[&str] = &["healthy", "is_healthy", "isHealthy"];
const STREET_FOOD_KEYS: &[&str] = &["street_food", "is_street_food", "isStreetFood"];

impl Metadata {
    /// Returns a metadata value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    fn first(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter().find_map(|key| self.data.get(*key))
    }

    /// First string value found under any of `keys`.
    pub fn text(&self, keys: &[&str]) -> Option<&str> {
        self.first(keys).and_then(|v| v.as_str())
    }

    /// First boolean found under any of `keys`; absent means `false`.
    pub fn flag(&self, keys: &[&str]) -> bool {
        self.first(keys).and_then(|v| v.as_bool()).unwrap_or(false)
    }

    /// Cooking time in minutes, either a bare number or text like "1h 15m".
    pub fn minutes(&self, keys: &[&str]) -> Option<u32> {
        let minutes = match self.first(keys)? {
            Value::Number(n) => n.as_u64().and_then(|m| u32::try_from(m).ok()),
            Value::String(s) => parse_minutes(s),
            _ => None,
        };
        minutes.filter(|m| *m > 0)
    }

    /// Diet tags, given either as a comma-separated string or a list.
    pub fn diet_tags(&self) -> Vec<DietTag> {
        match self.first(DIET_KEYS) {
            Some(Value::String(raw)) => split_tags(raw),
            Some(Value::Sequence(items)) => items
                .iter()
                .filter_map(|v| v.as_str())
                .map(DietTag::from)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Builds a [`Recipe`] from the frontmatter.
    ///
    /// `fallback_title` is used when neither `title` nor `name` is set.
    /// Unrecognized categorical values are left empty.
    pub fn to_recipe(&self, id: &str, fallback_title: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: self.text(TITLE_KEYS).unwrap_or(fallback_title).to_string(),
            cuisine: self.text(CUISINE_KEYS).map(str::to_string),
            spice_level: self.text(SPICE_KEYS).and_then(|s| s.parse().ok()),
            region: self.text(REGION_KEYS).and_then(|s| s.parse().ok()),
            effort: self.text(EFFORT_KEYS).and_then(|s| s.parse().ok()),
            difficulty: self.text(DIFFICULTY_KEYS).and_then(|s| s.parse().ok()),
            cooking_time: self.minutes(TIME_KEYS),
            diet_type: self.diet_tags(),
            is_healthy: self.flag(HEALTHY_KEYS),
            is_street_food: self.flag(STREET_FOOD_KEYS),
        }
    }
}

/// Parse YAML frontmatter from raw YAML content (without --- markers)
/// Returns None if the content is empty or invalid YAML
pub(crate) fn parse_yaml_content(yaml_content: &str) -> Option<Metadata> {
    if yaml_content.trim().is_empty() {
        return None;
    }

    serde_yaml::from_str::<HashMap<String, Value>>(yaml_content)
        .ok()
        .map(|data| Metadata { data })
}

/// Longest frontmatter block we are willing to read.
const MAX_FRONTMATTER_LINES: usize = 30;

/// Collects the lines between the opening and closing `---` markers.
pub(crate) fn extract_yaml_from_lines<I, E>(mut lines: I) -> Result<Option<String>, E>
where
    I: Iterator<Item = Result<String, E>>,
{
    let first_line = match lines.next() {
        Some(line) => line?,
        None => return Ok(None),
    };
    if first_line.trim() != "---" {
        return Ok(None);
    }

    let mut yaml_lines = Vec::new();
    for line in lines {
        let line = line?;
        if line.trim() == "---" {
            return Ok(Some(yaml_lines.join("\n")));
        }
        yaml_lines.push(line);
        if yaml_lines.len() > MAX_FRONTMATTER_LINES {
            return Ok(None);
        }
    }

    // No closing marker
    Ok(None)
}

/// Extracts and parses frontmatter; files without any yield empty metadata.
pub(crate) fn extract_and_parse_metadata<I, E>(lines: I) -> Result<Metadata, E>
where
    I: Iterator<Item = Result<String, E>>,
{
    let yaml_content = extract_yaml_from_lines(lines)?;
    Ok(yaml_content
        .and_then(|content| parse_yaml_content(&content))
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Effort, Region, SpiceLevel, TimeBucket};
    use indoc::indoc;

    fn lines(content: &str) -> impl Iterator<Item = Result<String, std::io::Error>> + '_ {
        content.lines().map(|l| Ok(l.to_string()))
    }

    #[test]
    fn test_parse_yaml_content() {
        let metadata = parse_yaml_content("title: Dosa\nspice: Medium").unwrap();
        assert_eq!(metadata.text(&["title"]), Some("Dosa"));

        assert!(parse_yaml_content("invalid: yaml: content:").is_none());
        assert!(parse_yaml_content("").is_none());
    }

    #[test]
    fn test_frontmatter_to_recipe() {
        let content = indoc! {r#"
            ---
            title: Masala Dosa
            cuisine: South Indian
            spice: Medium
            region: South
            effort: Hard
            difficulty: Long
            time: 1h
            diet: Veg, Gluten-Free
            healthy: true
            ---

            Spread the @batter{} thin."#};

        let metadata = extract_and_parse_metadata(lines(content)).unwrap();
        let recipe = metadata.to_recipe("south/dosa", "dosa");

        assert_eq!(recipe.id, "south/dosa");
        assert_eq!(recipe.title, "Masala Dosa");
        assert_eq!(recipe.cuisine.as_deref(), Some("South Indian"));
        assert_eq!(recipe.spice_level, Some(SpiceLevel::Medium));
        assert_eq!(recipe.region, Some(Region::South));
        assert_eq!(recipe.effort, Some(Effort::Hard));
        assert_eq!(recipe.difficulty, Some(TimeBucket::Long));
        assert_eq!(recipe.cooking_time, Some(60));
        assert_eq!(recipe.diet_type, vec![DietTag::Veg, DietTag::GlutenFree]);
        assert!(recipe.is_healthy);
        assert!(!recipe.is_street_food);
    }

    #[test]
    fn test_frontmatter_list_tags_and_numeric_time() {
        let content = indoc! {r#"
            ---
            dietType: [Non-Veg]
            cookingTime: 35
            isStreetFood: true
            ---
            "#};

        let recipe = extract_and_parse_metadata(lines(content))
            .unwrap()
            .to_recipe("fish-curry", "fish-curry");

        assert_eq!(recipe.title, "fish-curry");
        assert_eq!(recipe.diet_type, vec![DietTag::NonVeg]);
        assert_eq!(recipe.cooking_time, Some(35));
        assert!(recipe.is_street_food);
    }

    #[test]
    fn test_missing_frontmatter() {
        let metadata = extract_and_parse_metadata(lines("Just steps, no header")).unwrap();
        let recipe = metadata.to_recipe("plain", "plain");
        assert_eq!(recipe.spice_level, None);
        assert!(recipe.diet_type.is_empty());

        let unterminated = "---\ntitle: Never closed\n";
        assert!(extract_yaml_from_lines(lines(unterminated)).unwrap().is_none());
    }
}

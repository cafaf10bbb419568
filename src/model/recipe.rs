use regex::Regex;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

/// Error returned when a categorical label cannot be mapped to a known value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unrecognized {kind}: {value}")]
pub struct LabelError {
    kind: &'static str,
    value: String,
}

impl LabelError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        LabelError {
            kind,
            value: value.to_string(),
        }
    }
}

/// Lowercases a label and strips whitespace, dashes and underscores, so that
/// "Non-Veg", "non veg" and "NON_VEG" all normalize to "nonveg".
pub(crate) fn normalize_label(raw: &str) -> String {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    let re = SEPARATORS.get_or_init(|| Regex::new(r"[\s_\-]+").unwrap());
    re.replace_all(raw.trim(), "").to_lowercase()
}

/// Parses a free-form duration such as "30 min", "1h 15m" or "45" into minutes.
///
/// Numbers without a unit are taken as minutes. Returns `None` when the text
/// contains no number at all.
pub fn parse_minutes(raw: &str) -> Option<u32> {
    static DURATION: OnceLock<Regex> = OnceLock::new();
    let re = DURATION.get_or_init(|| {
        Regex::new(r"(?i)(\d+)\s*(hours?|hrs?|h|minutes?|mins?|m)?").unwrap()
    });

    let mut total: Option<u32> = None;
    for caps in re.captures_iter(raw) {
        let amount: u32 = caps[1].parse().ok()?;
        let factor = match caps.get(2).map(|m| m.as_str().to_lowercase()) {
            Some(unit) if unit.starts_with('h') => 60,
            _ => 1,
        };
        total = Some(total.unwrap_or(0).saturating_add(amount.saturating_mul(factor)));
    }
    total
}

/// Spice level of a recipe, ordered from mildest to hottest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum SpiceLevel {
    Mild,
    Medium,
    Spicy,
}

impl SpiceLevel {
    /// Position on the 1..=3 scale.
    pub fn rank(self) -> u8 {
        match self {
            SpiceLevel::Mild => 1,
            SpiceLevel::Medium => 2,
            SpiceLevel::Spicy => 3,
        }
    }

    /// Number of steps between two levels on the ordered scale.
    pub fn distance(self, other: SpiceLevel) -> u8 {
        self.rank().abs_diff(other.rank())
    }
}

impl FromStr for SpiceLevel {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "mild" => Ok(SpiceLevel::Mild),
            "medium" => Ok(SpiceLevel::Medium),
            // Older catalogs label the top level "Hot"
            "spicy" | "hot" => Ok(SpiceLevel::Spicy),
            _ => Err(LabelError::new("spice level", s)),
        }
    }
}

impl fmt::Display for SpiceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SpiceLevel::Mild => "Mild",
            SpiceLevel::Medium => "Medium",
            SpiceLevel::Spicy => "Spicy",
        };
        f.write_str(label)
    }
}

/// Regional cuisine tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Region {
    North,
    South,
    East,
    West,
    Northeast,
    Central,
}

impl FromStr for Region {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "north" => Ok(Region::North),
            "south" => Ok(Region::South),
            "east" => Ok(Region::East),
            "west" => Ok(Region::West),
            "northeast" => Ok(Region::Northeast),
            "central" => Ok(Region::Central),
            _ => Err(LabelError::new("region", s)),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Region::North => "North",
            Region::South => "South",
            Region::East => "East",
            Region::West => "West",
            Region::Northeast => "Northeast",
            Region::Central => "Central",
        };
        f.write_str(label)
    }
}

/// How much cooking skill a recipe asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Effort {
    Easy,
    Medium,
    Hard,
}

impl Effort {
    pub fn rank(self) -> u8 {
        match self {
            Effort::Easy => 1,
            Effort::Medium => 2,
            Effort::Hard => 3,
        }
    }
}

impl FromStr for Effort {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "easy" | "beginner" => Ok(Effort::Easy),
            "medium" | "intermediate" => Ok(Effort::Medium),
            "hard" | "advanced" => Ok(Effort::Hard),
            _ => Err(LabelError::new("effort level", s)),
        }
    }
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Effort::Easy => "Easy",
            Effort::Medium => "Medium",
            Effort::Hard => "Hard",
        };
        f.write_str(label)
    }
}

/// Coarse cooking-time bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum TimeBucket {
    Quick,
    Medium,
    Long,
}

impl TimeBucket {
    /// Slot on the 1..=4 cooking-time scale used by similarity scoring.
    ///
    /// `Long` sits at the far end of the scale, past the 45 minute slot.
    pub fn slot(self) -> u8 {
        match self {
            TimeBucket::Quick => 1,
            TimeBucket::Medium => 2,
            TimeBucket::Long => 4,
        }
    }
}

/// Maps raw cooking minutes onto the 1..=4 slot scale
/// (up to 15, up to 30, up to 45, longer).
pub fn minutes_slot(minutes: u32) -> u8 {
    match minutes {
        0..=15 => 1,
        16..=30 => 2,
        31..=45 => 3,
        _ => 4,
    }
}

impl FromStr for TimeBucket {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "quick" | "short" | "fast" => Ok(TimeBucket::Quick),
            "medium" | "moderate" => Ok(TimeBucket::Medium),
            "long" | "slow" => Ok(TimeBucket::Long),
            _ => Err(LabelError::new("time bucket", s)),
        }
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimeBucket::Quick => "Quick",
            TimeBucket::Medium => "Medium",
            TimeBucket::Long => "Long",
        };
        f.write_str(label)
    }
}

/// A dietary tag attached to a recipe.
///
/// Tags are matched as whole normalized labels, so `Veg` and `NonVeg` never
/// match each other. Unknown tags are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DietTag {
    Veg,
    Vegan,
    NonVeg,
    GlutenFree,
    Other(String),
}

impl From<String> for DietTag {
    fn from(raw: String) -> Self {
        match normalize_label(&raw).as_str() {
            "veg" | "vegetarian" => DietTag::Veg,
            "vegan" => DietTag::Vegan,
            "nonveg" | "nonvegetarian" => DietTag::NonVeg,
            "glutenfree" => DietTag::GlutenFree,
            _ => DietTag::Other(raw.trim().to_string()),
        }
    }
}

impl From<&str> for DietTag {
    fn from(raw: &str) -> Self {
        DietTag::from(raw.to_string())
    }
}

impl From<DietTag> for String {
    fn from(tag: DietTag) -> Self {
        tag.to_string()
    }
}

impl fmt::Display for DietTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DietTag::Veg => f.write_str("Veg"),
            DietTag::Vegan => f.write_str("Vegan"),
            DietTag::NonVeg => f.write_str("Non-Veg"),
            DietTag::GlutenFree => f.write_str("Gluten-Free"),
            DietTag::Other(label) => f.write_str(label),
        }
    }
}

macro_rules! label_try_from {
    ($($ty:ty),*) => {
        $(impl TryFrom<String> for $ty {
            type Error = LabelError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        })*
    };
}

label_try_from!(SpiceLevel, Region, Effort, TimeBucket);

/// Accepts any value for an optional categorical field; anything that is not
/// a recognized label becomes `None` instead of failing the whole record.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Text(raw)) => match raw.parse() {
            Ok(value) => Some(value),
            Err(err) => {
                debug!("ignoring field value: {err}");
                None
            }
        },
        _ => None,
    })
}

/// Cooking time given either as a number of minutes or as text ("30 min").
pub(crate) fn lenient_minutes<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Minutes(u64),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Minutes(minutes)) => u32::try_from(minutes).ok().filter(|m| *m > 0),
        Some(Loose::Text(raw)) => parse_minutes(&raw).filter(|m| *m > 0),
        _ => None,
    })
}

/// Diet tags given either as a list or as a comma-separated string.
pub(crate) fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<DietTag>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        List(Vec<String>),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::List(items)) => items.into_iter().map(DietTag::from).collect(),
        Some(Loose::Text(raw)) => split_tags(&raw),
        _ => Vec::new(),
    })
}

pub(crate) fn split_tags(raw: &str) -> Vec<DietTag> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(DietTag::from)
        .collect()
}

/// A catalog recipe reduced to the fields recommendation cares about.
///
/// Every scoring field is optional: a recipe missing a value simply never
/// matches on that axis.
///
/// # Examples
///
/// ```
/// use cookwise_recommend::{DietTag, Recipe, SpiceLevel};
///
/// let recipe: Recipe = serde_json::from_str(
///     r#"{"id": "7", "title": "Fish Curry", "spiceLevel": "Hot", "dietType": ["Non-Veg"]}"#,
/// )?;
/// assert_eq!(recipe.spice_level, Some(SpiceLevel::Spicy));
/// assert!(recipe.has_diet(&DietTag::NonVeg));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub spice_level: Option<SpiceLevel>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub region: Option<Region>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub effort: Option<Effort>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub difficulty: Option<TimeBucket>,
    #[serde(
        default,
        deserialize_with = "lenient_minutes",
        skip_serializing_if = "Option::is_none"
    )]
    pub cooking_time: Option<u32>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub diet_type: Vec<DietTag>,
    #[serde(default)]
    pub is_healthy: bool,
    #[serde(default)]
    pub is_street_food: bool,
}

impl Recipe {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Recipe {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn has_diet(&self, tag: &DietTag) -> bool {
        self.diet_type.iter().any(|t| t == tag)
    }

    /// Name used in explanations: the title, or the id when untitled.
    pub fn display_name(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.id
        } else {
            &self.title
        }
    }

    /// Decodes a list of recipes from JSON.
    pub fn list_from_json(raw: &str) -> Result<Vec<Recipe>, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

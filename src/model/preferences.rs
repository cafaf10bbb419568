use super::recipe::{
    lenient, normalize_label, DietTag, Effort, LabelError, Region, SpiceLevel, TimeBucket,
};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Preferred regional cuisine, as answered in the taste quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CuisinePreference {
    North,
    South,
    East,
    West,
    Central,
}

impl CuisinePreference {
    /// Regions that count as a match for this preference.
    pub fn regions(self) -> &'static [Region] {
        match self {
            CuisinePreference::North => &[Region::North, Region::Northeast],
            CuisinePreference::South => &[Region::South],
            CuisinePreference::East => &[Region::East],
            CuisinePreference::West => &[Region::West],
            CuisinePreference::Central => &[Region::Central],
        }
    }

    pub fn includes(self, region: Region) -> bool {
        self.regions().contains(&region)
    }
}

impl FromStr for CuisinePreference {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "north" => Ok(CuisinePreference::North),
            "south" => Ok(CuisinePreference::South),
            "east" => Ok(CuisinePreference::East),
            "west" => Ok(CuisinePreference::West),
            "central" => Ok(CuisinePreference::Central),
            _ => Err(LabelError::new("cuisine preference", s)),
        }
    }
}

impl fmt::Display for CuisinePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CuisinePreference::North => "north",
            CuisinePreference::South => "south",
            CuisinePreference::East => "east",
            CuisinePreference::West => "west",
            CuisinePreference::Central => "central",
        };
        f.write_str(label)
    }
}

/// Diet the user follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DietPreference {
    Veg,
    Vegan,
    NonVeg,
    Flexible,
}

impl DietPreference {
    /// Whether a recipe carrying `tags` fits this diet in quiz scoring.
    ///
    /// Vegan dishes count as vegetarian; `Flexible` accepts everything,
    /// including untagged recipes.
    pub fn accepts(self, tags: &[DietTag]) -> bool {
        match self {
            DietPreference::Flexible => true,
            DietPreference::Veg => tags
                .iter()
                .any(|t| matches!(t, DietTag::Veg | DietTag::Vegan)),
            DietPreference::Vegan => tags.contains(&DietTag::Vegan),
            DietPreference::NonVeg => tags.contains(&DietTag::NonVeg),
        }
    }

    /// The single diet class a recipe belongs to, most restrictive tag first.
    pub fn of_tags(tags: &[DietTag]) -> Option<DietPreference> {
        if tags.contains(&DietTag::Vegan) {
            Some(DietPreference::Vegan)
        } else if tags.contains(&DietTag::Veg) {
            Some(DietPreference::Veg)
        } else if tags.contains(&DietTag::NonVeg) {
            Some(DietPreference::NonVeg)
        } else {
            None
        }
    }
}

impl FromStr for DietPreference {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "veg" | "vegetarian" => Ok(DietPreference::Veg),
            "vegan" => Ok(DietPreference::Vegan),
            "nonveg" | "nonvegetarian" => Ok(DietPreference::NonVeg),
            "flexible" | "everything" | "any" => Ok(DietPreference::Flexible),
            _ => Err(LabelError::new("diet preference", s)),
        }
    }
}

impl fmt::Display for DietPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DietPreference::Veg => "veg",
            DietPreference::Vegan => "vegan",
            DietPreference::NonVeg => "non-veg",
            DietPreference::Flexible => "flexible",
        };
        f.write_str(label)
    }
}

/// Quiz answers, one optional value per axis.
///
/// Serialized with the lowercase answer values the quiz stores
/// (`{"spiceLevel": "spicy", "dietType": "non-veg", ...}`). An unanswered
/// or unrecognized axis is `None` and scores nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(
        default,
        deserialize_with = "lenient",
        serialize_with = "lowercase",
        skip_serializing_if = "Option::is_none"
    )]
    pub spice_level: Option<SpiceLevel>,
    #[serde(
        default,
        deserialize_with = "lenient",
        serialize_with = "lowercase",
        skip_serializing_if = "Option::is_none"
    )]
    pub cuisine: Option<CuisinePreference>,
    #[serde(
        default,
        deserialize_with = "lenient",
        serialize_with = "lowercase",
        skip_serializing_if = "Option::is_none"
    )]
    pub experience: Option<Effort>,
    #[serde(
        default,
        deserialize_with = "lenient",
        serialize_with = "lowercase",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<TimeBucket>,
    #[serde(
        default,
        deserialize_with = "lenient",
        serialize_with = "lowercase",
        skip_serializing_if = "Option::is_none"
    )]
    pub diet_type: Option<DietPreference>,
}

impl Preferences {
    /// True when no axis has been answered.
    pub fn is_empty(&self) -> bool {
        *self == Preferences::default()
    }
}

fn lowercase<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: fmt::Display,
{
    match value {
        Some(v) => serializer.serialize_some(&v.to_string().to_lowercase()),
        None => serializer.serialize_none(),
    }
}

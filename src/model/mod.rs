mod metadata;
mod preferences;
mod recipe;

pub use metadata::Metadata;
pub(crate) use metadata::extract_and_parse_metadata;
pub use preferences::{CuisinePreference, DietPreference, Preferences};
pub use recipe::{
    minutes_slot, parse_minutes, DietTag, Effort, LabelError, Recipe, Region, SpiceLevel,
    TimeBucket,
};

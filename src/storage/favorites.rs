use super::{read_json, write_json, KeyValueStore, StorageError};
use crate::{Recipe, Region, SpiceLevel};
use chrono::serde::ts_milliseconds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Key holding the list of saved recipe ids.
pub const SAVED_RECIPES_KEY: &str = "saved-recipes";
/// Key holding the richer favorite entries.
pub const FAVORITE_ENTRIES_KEY: &str = "favorite-entries";

/// A saved recipe as shown in the favorites list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    pub id: String,
    pub title: String,
    /// Epoch milliseconds on disk.
    #[serde(with = "ts_milliseconds")]
    pub added_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spice_level: Option<SpiceLevel>,
}

impl FavoriteEntry {
    fn from_recipe(recipe: &Recipe, added_at: DateTime<Utc>) -> Self {
        FavoriteEntry {
            id: recipe.id.clone(),
            title: recipe.display_name().to_string(),
            added_at,
            cuisine: recipe.cuisine.clone(),
            region: recipe.region,
            spice_level: recipe.spice_level,
        }
    }
}

/// Saved recipes.
pub struct Favorites<S> {
    store: S,
}

impl<S: KeyValueStore> Favorites<S> {
    pub fn new(store: S) -> Self {
        Favorites { store }
    }

    pub fn ids(&self) -> Result<Vec<String>, StorageError> {
        read_json(&self.store, SAVED_RECIPES_KEY)
    }

    pub fn entries(&self) -> Result<Vec<FavoriteEntry>, StorageError> {
        read_json(&self.store, FAVORITE_ENTRIES_KEY)
    }

    pub fn contains(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.ids()?.iter().any(|saved| saved == id))
    }

    pub fn count(&self) -> Result<usize, StorageError> {
        Ok(self.ids()?.len())
    }

    /// Saves a recipe. Returns `false` if it was already saved.
    pub fn add(&self, recipe: &Recipe) -> Result<bool, StorageError> {
        self.add_at(recipe, Utc::now())
    }

    pub fn add_at(&self, recipe: &Recipe, added_at: DateTime<Utc>) -> Result<bool, StorageError> {
        let mut ids = self.ids()?;
        if ids.contains(&recipe.id) {
            return Ok(false);
        }
        ids.push(recipe.id.clone());

        let mut entries = self.entries()?;
        entries.retain(|entry| entry.id != recipe.id);
        entries.push(FavoriteEntry::from_recipe(recipe, added_at));

        write_json(&self.store, SAVED_RECIPES_KEY, &ids)?;
        write_json(&self.store, FAVORITE_ENTRIES_KEY, &entries)?;
        Ok(true)
    }

    /// Removes a saved recipe. Returns `false` if it was not saved.
    pub fn remove(&self, id: &str) -> Result<bool, StorageError> {
        let mut ids = self.ids()?;
        let before = ids.len();
        ids.retain(|saved| saved != id);
        if ids.len() == before {
            return Ok(false);
        }

        let mut entries = self.entries()?;
        entries.retain(|entry| entry.id != id);

        write_json(&self.store, SAVED_RECIPES_KEY, &ids)?;
        write_json(&self.store, FAVORITE_ENTRIES_KEY, &entries)?;
        Ok(true)
    }

    /// Toggles a recipe in or out of favorites; returns whether it is now saved.
    pub fn toggle(&self, recipe: &Recipe) -> Result<bool, StorageError> {
        if self.remove(&recipe.id)? {
            Ok(false)
        } else {
            self.add(recipe)
        }
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(SAVED_RECIPES_KEY)?;
        self.store.remove(FAVORITE_ENTRIES_KEY)
    }
}

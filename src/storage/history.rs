use super::{read_json, write_json, KeyValueStore, StorageError};
use crate::{Recipe, RecommenderConfig};
use chrono::serde::ts_milliseconds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const HISTORY_KEY: &str = "recipe-history";

/// One recently viewed recipe.
///
/// Timestamps are stored as epoch milliseconds, with the first view under
/// `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub title: String,
    #[serde(rename = "timestamp", with = "ts_milliseconds")]
    pub viewed_at: DateTime<Utc>,
    #[serde(with = "ts_milliseconds")]
    pub last_viewed: DateTime<Utc>,
    #[serde(default = "one")]
    pub view_count: u32,
}

fn one() -> u32 {
    1
}

/// Recently viewed recipes, most recent first, bounded to `limit` entries.
pub struct ViewHistory<S> {
    store: S,
    limit: usize,
}

impl<S: KeyValueStore> ViewHistory<S> {
    pub const DEFAULT_LIMIT: usize = 50;

    pub fn new(store: S) -> Self {
        Self::with_limit(store, Self::DEFAULT_LIMIT)
    }

    pub fn with_limit(store: S, limit: usize) -> Self {
        ViewHistory { store, limit }
    }

    pub fn from_config(store: S, config: &RecommenderConfig) -> Self {
        Self::with_limit(store, config.history_limit)
    }

    pub fn entries(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        read_json(&self.store, HISTORY_KEY)
    }

    pub fn count(&self) -> Result<usize, StorageError> {
        Ok(self.entries()?.len())
    }

    pub fn record_view(&self, recipe: &Recipe) -> Result<(), StorageError> {
        self.record_view_at(recipe, Utc::now())
    }

    /// A repeat view bumps the count and timestamp in place; a first view is
    /// prepended. Entries beyond the limit are dropped from the end.
    pub fn record_view_at(&self, recipe: &Recipe, now: DateTime<Utc>) -> Result<(), StorageError> {
        let mut entries = self.entries()?;

        match entries.iter_mut().find(|entry| entry.id == recipe.id) {
            Some(entry) => {
                entry.view_count = entry.view_count.saturating_add(1);
                entry.last_viewed = now;
            }
            None => {
                entries.insert(
                    0,
                    HistoryEntry {
                        id: recipe.id.clone(),
                        title: recipe.display_name().to_string(),
                        viewed_at: now,
                        last_viewed: now,
                        view_count: 1,
                    },
                );
            }
        }
        entries.truncate(self.limit);

        write_json(&self.store, HISTORY_KEY, &entries)
    }

    /// Returns `false` if the recipe was not in the history.
    pub fn remove(&self, id: &str) -> Result<bool, StorageError> {
        let mut entries = self.entries()?;
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        if entries.len() == before {
            return Ok(false);
        }
        write_json(&self.store, HISTORY_KEY, &entries)?;
        Ok(true)
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(HISTORY_KEY)
    }
}

/// Relative label for when a recipe was last viewed.
pub fn last_viewed_label(last_viewed: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - last_viewed).num_hours();
    if hours < 1 {
        "Just now".to_string()
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if hours < 24 * 7 {
        format!("{}d ago", hours / 24)
    } else {
        last_viewed.format("%b %-d, %Y").to_string()
    }
}

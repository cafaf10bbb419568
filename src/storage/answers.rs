use super::{read_json, write_json, KeyValueStore, StorageError};
use crate::Preferences;

pub const QUIZ_ANSWERS_KEY: &str = "cookwise-quiz-preferences";

/// The last set of quiz answers the user submitted.
pub struct QuizAnswers<S> {
    store: S,
}

impl<S: KeyValueStore> QuizAnswers<S> {
    pub fn new(store: S) -> Self {
        QuizAnswers { store }
    }

    /// Saved answers, or `None` if the quiz was never taken.
    pub fn load(&self) -> Result<Option<Preferences>, StorageError> {
        let prefs: Preferences = read_json(&self.store, QUIZ_ANSWERS_KEY)?;
        Ok(Some(prefs).filter(|p| !p.is_empty()))
    }

    pub fn save(&self, prefs: &Preferences) -> Result<(), StorageError> {
        write_json(&self.store, QUIZ_ANSWERS_KEY, prefs)
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(QUIZ_ANSWERS_KEY)
    }
}

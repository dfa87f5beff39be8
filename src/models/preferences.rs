use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Favourite genres as returned by the preferences endpoint
///
/// The backend has answered with `genres`, `favorite_genres` or both.
/// `genres` wins whenever it holds a list, even an empty one; otherwise
/// `favorite_genres` is used. A key holding anything but a list of strings
/// is treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferencesResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    genres: Option<Value>,
    #[serde(default)]
    favorite_genres: Option<Value>,
}

impl PreferencesResponse {
    pub fn resolved_genres(&self) -> Vec<String> {
        genre_list(self.genres.as_ref())
            .or_else(|| genre_list(self.favorite_genres.as_ref()))
            .unwrap_or_default()
    }
}

fn genre_list(value: Option<&Value>) -> Option<Vec<String>> {
    let items = value?.as_array()?;
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

/// Body sent when saving preferences
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SavePreferencesRequest {
    pub genres: Vec<String>,
}

/// Genre chips the user has toggled on the profile page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreSelection {
    genres: BTreeSet<String>,
}

impl GenreSelection {
    pub fn from_genres<I: IntoIterator<Item = String>>(genres: I) -> Self {
        Self {
            genres: genres.into_iter().collect(),
        }
    }

    /// Flips a chip, returning whether it is now selected
    pub fn toggle(&mut self, genre: &str) -> bool {
        if self.genres.remove(genre) {
            false
        } else {
            self.genres.insert(genre.to_string());
            true
        }
    }

    pub fn contains(&self, genre: &str) -> bool {
        self.genres.contains(genre)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.genres.iter().cloned().collect()
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub mod chat;
pub mod filters;
pub mod movie;
pub mod preferences;

pub use chat::{ChatMessage, ChatRole, ChatTranscript};
pub use filters::FilterState;
pub use movie::{ott_platform_url, Movie};
pub use preferences::{GenreSelection, PreferencesResponse, SavePreferencesRequest};

// ============================================================================
// Backend API Types
// ============================================================================

/// Answer of `/api/auth-status`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthStatus {
    #[serde(default)]
    pub logged_in: bool,
    #[serde(default)]
    pub username: Option<String>,
}

impl AuthStatus {
    /// Identity to scope local state by, `None` for guests
    pub fn identity(&self) -> Option<String> {
        if !self.logged_in {
            return None;
        }
        self.username.clone().filter(|name| !name.is_empty())
    }
}

/// The `{status, message}` envelope most write endpoints answer with
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl StatusResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Credentials posted to `/api/login`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub favorite_genres: Vec<String>,
}

/// Account details posted to `/api/register`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub favorite_genres: Vec<String>,
}

/// Recommender endpoints wrap their list in an object
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationsResponse {
    #[serde(default)]
    pub recommendations: Vec<Movie>,
}

/// Mood analysis of a song and the movies matched to it
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SongAnalysis {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub song: String,
    #[serde(default)]
    pub detected_mood: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<Movie>,
}

/// Viewing-taste breakdown shown on the profile page
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CinematicProfile {
    /// Category key to percentage
    #[serde(default)]
    pub profile: BTreeMap<String, f64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub total_interactions: f64,
}

/// Human label for a profile category key
pub fn profile_category_label(key: &str) -> &str {
    match key {
        "sci_fi_dreamer" => "Sci-Fi Dreamer",
        "romantic_idealist" => "Romantic Idealist",
        "action_enthusiast" => "Action Enthusiast",
        "comedy_lover" => "Comedy Lover",
        "drama_seeker" => "Drama Seeker",
        other => other,
    }
}

/// Answer of `/api/chatbot`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: Option<String>,
}

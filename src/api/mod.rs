/// Backend API abstraction
///
/// Every ranking, mood analysis, authentication and profile computation
/// lives behind the CineFlix backend. This module shapes requests for it and
/// decodes its answers; [`HttpBackend`] is the real transport and tests
/// substitute the generated mock.
use crate::{
    error::AppResult,
    models::{
        AuthStatus, ChatReply, CinematicProfile, FilterState, LoginRequest, Movie,
        PreferencesResponse, RegisterRequest, SavePreferencesRequest, SongAnalysis,
        StatusResponse,
    },
};

pub mod client;
pub mod state;

pub use client::HttpBackend;
pub use state::AppState;

/// Trait for the CineFlix backend
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CineflixApi: Send + Sync {
    /// Who the backend session belongs to
    async fn auth_status(&self) -> AppResult<AuthStatus>;

    /// Start a backend session; failures come back as a non-success status
    async fn login(&self, request: &LoginRequest) -> AppResult<StatusResponse>;

    async fn register(&self, request: &RegisterRequest) -> AppResult<StatusResponse>;

    async fn logout(&self) -> AppResult<()>;

    /// Catalogue listing narrowed by the non-empty filters
    async fn movies(&self, filters: &FilterState) -> AppResult<Vec<Movie>>;

    /// Titles similar to `title`
    async fn recommend(&self, title: &str) -> AppResult<Vec<Movie>>;

    /// Titles from the opposite genres of `title`
    async fn parallel_universe(&self, title: &str) -> AppResult<Vec<Movie>>;

    async fn track_view(&self, title: &str, genre: &str) -> AppResult<()>;

    async fn like(&self, title: &str, genre: &str) -> AppResult<()>;

    /// Mood analysis of a song name or lyrics
    async fn cinesound(&self, song: &str) -> AppResult<SongAnalysis>;

    async fn profile(&self) -> AppResult<CinematicProfile>;

    async fn get_preferences(&self) -> AppResult<PreferencesResponse>;

    async fn save_preferences(
        &self,
        request: &SavePreferencesRequest,
    ) -> AppResult<StatusResponse>;

    /// One turn with the movie assistant
    async fn chatbot(&self, message: &str) -> AppResult<ChatReply>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}

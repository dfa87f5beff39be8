use std::sync::Arc;

use crate::{
    api::{AppState, CineflixApi},
    error::{AppError, AppResult},
    models::{
        chat::{EMPTY_REPLY, ERROR_REPLY},
        ChatMessage, ChatTranscript, CinematicProfile, FilterState, GenreSelection, LoginRequest,
        Movie, RegisterRequest, SavePreferencesRequest, SongAnalysis, StatusResponse,
    },
    services::{ChatStore, FilterStore},
    storage::{KeyValueStore, Loaded},
};

/// One page session of the client
///
/// Owns the [`AppState`] and the two user-scoped stores. Every user action
/// goes through a method here, runs to completion, and leaves the state and
/// the local namespace consistent with each other.
pub struct Session {
    state: AppState,
    api: Arc<dyn CineflixApi>,
    storage: Arc<dyn KeyValueStore>,
    filters: FilterStore,
    chat: ChatStore,
}

impl Session {
    pub fn new(api: Arc<dyn CineflixApi>, storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            state: AppState::new(),
            filters: FilterStore::new(storage.clone()),
            chat: ChatStore::new(storage.clone()),
            api,
            storage,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Startup sequence: identify the user, load their chat, then restore
    /// their last search (which runs it) or fall back to the default listing.
    ///
    /// The chat is loaded before any listing request so a failed fetch can't
    /// leave the greeting in place of the stored conversation.
    pub async fn start(&mut self) -> AppResult<()> {
        self.check_auth_status().await;
        self.open_chat();

        let searched = self.restore_filters_and_search().await?;
        if !searched {
            self.load_movies().await?;
        }

        Ok(())
    }

    /// Asks the backend who is logged in; any failure leaves a guest session
    pub async fn check_auth_status(&mut self) {
        match self.api.auth_status().await {
            Ok(status) => {
                self.state.logged_in = status.logged_in;
                self.state.identity = status.identity();
            }
            Err(e) => {
                tracing::error!(backend = self.api.name(), error = %e, "Auth status check failed");
                self.state.logged_in = false;
                self.state.identity = None;
            }
        }

        tracing::info!(
            logged_in = self.state.logged_in,
            identity = self.state.identity().unwrap_or("guest"),
            "Session identity resolved"
        );
    }

    /// Restores the user's saved filters into the controls
    ///
    /// When a saved record was found, a search with the restored values runs
    /// before this returns and the result is `true`. Otherwise the controls
    /// keep their values and no search runs.
    pub async fn restore_filters_and_search(&mut self) -> AppResult<bool> {
        let current = self.state.filters.clone();

        match self.filters.load(self.state.identity(), current) {
            Loaded::Restored(filters) => {
                tracing::info!(
                    search = %filters.search,
                    genre = %filters.genre,
                    ott = %filters.ott,
                    "Restored saved filters"
                );
                self.search(filters).await?;
                Ok(true)
            }
            other => {
                self.state.filters = other.into_inner();
                Ok(false)
            }
        }
    }

    /// The unfiltered listing (the backend applies saved preferences)
    pub async fn load_movies(&mut self) -> AppResult<&[Movie]> {
        self.state.movies = self.api.movies(&FilterState::default()).await?;
        Ok(&self.state.movies)
    }

    /// Runs a search with `filters` and remembers them for this user
    ///
    /// The filters only reach local storage once the listing came back.
    pub async fn search(&mut self, filters: FilterState) -> AppResult<&[Movie]> {
        self.state.filters = filters;
        self.state.movies = self.api.movies(&self.state.filters).await?;
        self.filters
            .save(self.state.identity.as_deref(), &self.state.filters);
        Ok(&self.state.movies)
    }

    pub async fn set_search(&mut self, search: &str) -> AppResult<&[Movie]> {
        let filters = FilterState {
            search: search.to_string(),
            ..self.state.filters.clone()
        };
        self.search(filters).await
    }

    pub async fn set_genre(&mut self, genre: &str) -> AppResult<&[Movie]> {
        let filters = FilterState {
            genre: genre.to_string(),
            ..self.state.filters.clone()
        };
        self.search(filters).await
    }

    pub async fn set_ott(&mut self, ott: &str) -> AppResult<&[Movie]> {
        let filters = FilterState {
            ott: ott.to_string(),
            ..self.state.filters.clone()
        };
        self.search(filters).await
    }

    fn require_login(&self) -> AppResult<()> {
        if self.state.logged_in {
            Ok(())
        } else {
            Err(AppError::NotLoggedIn)
        }
    }

    /// Movies similar to `title`, or its opposites in parallel-universe mode
    ///
    /// With a genre, the view is also reported to the backend; a failed
    /// report doesn't stop the recommendations.
    pub async fn recommendations(
        &mut self,
        title: &str,
        genre: Option<&str>,
    ) -> AppResult<Vec<Movie>> {
        self.require_login()?;
        self.state.selected_movie = Some(title.to_string());

        if let Some(genre) = genre.filter(|g| !g.is_empty()) {
            if let Err(e) = self.api.track_view(title, genre).await {
                tracing::warn!(title = %title, error = %e, "Could not record view");
            }
        }

        if self.state.parallel_universe {
            self.api.parallel_universe(title).await
        } else {
            self.api.recommend(title).await
        }
    }

    /// Flips parallel-universe mode, refreshing recommendations for the
    /// selected movie when there is one
    pub async fn toggle_parallel_universe(&mut self) -> AppResult<(bool, Option<Vec<Movie>>)> {
        self.state.parallel_universe = !self.state.parallel_universe;
        let mode = self.state.parallel_universe;

        match self.state.selected_movie.clone() {
            Some(title) => {
                let movies = self.recommendations(&title, None).await?;
                Ok((mode, Some(movies)))
            }
            None => Ok((mode, None)),
        }
    }

    pub async fn like(&mut self, title: &str, genre: &str) -> AppResult<()> {
        self.require_login()?;
        self.api.like(title, genre).await
    }

    /// Matches a song's mood to movies
    pub async fn analyze_song(&mut self, song: &str) -> AppResult<SongAnalysis> {
        self.require_login()?;

        let song = song.trim();
        if song.is_empty() {
            return Err(AppError::InvalidInput(
                "Please enter a song name, lyrics, or description".to_string(),
            ));
        }

        let analysis = self.api.cinesound(song).await?;
        if analysis.status != "success" {
            return Err(AppError::ExternalApi(
                analysis
                    .message
                    .unwrap_or_else(|| "Could not analyze song".to_string()),
            ));
        }

        Ok(analysis)
    }

    pub async fn profile(&mut self) -> AppResult<CinematicProfile> {
        self.require_login()?;
        self.api.profile().await
    }

    /// Replaces the genre chips with the backend's saved preferences
    pub async fn load_preferences(&mut self) -> AppResult<&GenreSelection> {
        let prefs = self.api.get_preferences().await?;
        self.state.selected_genres = GenreSelection::from_genres(prefs.resolved_genres());
        Ok(&self.state.selected_genres)
    }

    pub fn toggle_genre(&mut self, genre: &str) -> bool {
        self.state.selected_genres.toggle(genre)
    }

    /// Saves the chip selection, then clears the filters and reloads the
    /// listing so the new preferences take effect
    pub async fn save_preferences(&mut self) -> AppResult<()> {
        let request = SavePreferencesRequest {
            genres: self.state.selected_genres.to_vec(),
        };

        let response = self.api.save_preferences(&request).await?;
        if response.status != "success" && response.status != "saved" {
            return Err(AppError::ExternalApi(
                response
                    .message
                    .unwrap_or_else(|| "Error saving preferences".to_string()),
            ));
        }

        self.state.filters = FilterState::default();
        self.load_movies().await?;
        Ok(())
    }

    /// Loads the user's conversation into the chat panel
    pub fn open_chat(&mut self) -> &ChatTranscript {
        self.state.chat = self.chat.load(self.state.identity()).into_inner();
        &self.state.chat
    }

    /// Sends one message to the assistant and records both sides
    ///
    /// Blank input is ignored and yields `None`. Backend trouble becomes an
    /// apology in the transcript rather than an error.
    pub async fn send_chat(&mut self, message: &str) -> Option<String> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        self.chat.append(
            self.state.identity.as_deref(),
            &mut self.state.chat,
            ChatMessage::user(message),
        );

        let reply = match self.api.chatbot(message).await {
            Ok(reply) => reply
                .response
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| EMPTY_REPLY.to_string()),
            Err(e) => {
                tracing::error!(error = %e, "Chat request failed");
                ERROR_REPLY.to_string()
            }
        };

        self.chat.append(
            self.state.identity.as_deref(),
            &mut self.state.chat,
            ChatMessage::bot(reply.clone()),
        );

        Some(reply)
    }

    /// Logs in and, on success, restarts the session as the new user
    ///
    /// Nothing from the previous user's controls carries over.
    pub async fn login(&mut self, email: &str, password: &str) -> AppResult<StatusResponse> {
        let email = email.trim();
        let password = password.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::InvalidInput(
                "Please enter email and password.".to_string(),
            ));
        }

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            favorite_genres: self.state.selected_genres.to_vec(),
        };

        let response = self.api.login(&request).await?;
        if response.is_success() {
            self.state.reset();
            self.start().await?;
        }
        Ok(response)
    }

    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> AppResult<StatusResponse> {
        let (username, email, password) = (username.trim(), email.trim(), password.trim());
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AppError::InvalidInput("Please fill all fields.".to_string()));
        }

        let request = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            favorite_genres: self.state.selected_genres.to_vec(),
        };

        self.api.register(&request).await
    }

    /// Ends the backend session and wipes all local state
    pub async fn logout(&mut self) {
        if let Err(e) = self.api.logout().await {
            tracing::error!(error = %e, "Logout request failed");
        }

        self.state.reset();

        if let Err(e) = self.storage.clear() {
            tracing::warn!(backend = self.storage.name(), error = %e, "Could not clear local state");
        }
    }
}

use crate::models::{ChatTranscript, FilterState, GenreSelection, Movie};

/// Everything the page session knows about the user and the screen
///
/// Owned by the [`Session`](crate::services::Session); handlers receive it
/// through the session rather than reaching for globals.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Display name of the logged-in user, `None` for guests
    pub identity: Option<String>,
    pub logged_in: bool,
    /// Current search box and dropdown values
    pub filters: FilterState,
    pub parallel_universe: bool,
    /// Title the last recommendation request was made for
    pub selected_movie: Option<String>,
    pub selected_genres: GenreSelection,
    pub chat: ChatTranscript,
    /// Listing currently on screen
    pub movies: Vec<Movie>,
}

impl AppState {
    /// Creates a guest state with the greeting already in the chat
    pub fn new() -> Self {
        Self {
            chat: ChatTranscript::greeting(),
            ..Self::default()
        }
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Drops everything tied to the previous user
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

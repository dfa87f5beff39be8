/// HTTP transport for the CineFlix backend
///
/// The backend authenticates with a session cookie, so the client keeps a
/// cookie store for as long as it lives. Non-2xx answers become
/// [`AppError::ExternalApi`] carrying the backend's own `message` when it
/// sent one; login and registration instead hand the status envelope back so
/// the caller can show why it was refused.
use std::time::Duration;

use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::{
    api::CineflixApi,
    error::{AppError, AppResult},
    models::{
        AuthStatus, ChatReply, CinematicProfile, FilterState, LoginRequest, Movie,
        PreferencesResponse, RecommendationsResponse, RegisterRequest, SavePreferencesRequest,
        SongAnalysis, StatusResponse,
    },
};

#[derive(Clone)]
pub struct HttpBackend {
    http_client: HttpClient,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decodes a successful response, or turns the failure into an error
    async fn read_json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(describe_failure(status.as_u16(), &body)));
        }

        Ok(response.json().await?)
    }

    /// Decodes the status envelope whatever the HTTP status was
    async fn read_status(response: Response) -> AppResult<StatusResponse> {
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<StatusResponse>(&body) {
            Ok(envelope) => Ok(envelope),
            Err(_) if !status.is_success() => {
                Err(AppError::ExternalApi(describe_failure(status.as_u16(), &body)))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn post_interaction(&self, path: &str, title: &str, genre: &str) -> AppResult<()> {
        let response = self
            .http_client
            .post(self.url(path))
            .json(&json!({ "title": title, "genre": genre }))
            .send()
            .await?;

        let envelope: StatusResponse = Self::read_json(response).await?;
        if !envelope.is_success() {
            tracing::warn!(path = %path, title = %title, "Backend did not record interaction");
        }
        Ok(())
    }

    async fn post_recommendations(&self, path: &str, title: &str) -> AppResult<Vec<Movie>> {
        let response = self
            .http_client
            .post(self.url(path))
            .json(&json!({ "title": title }))
            .send()
            .await?;

        let body: RecommendationsResponse = Self::read_json(response).await?;

        tracing::info!(
            path = %path,
            title = %title,
            results_count = body.recommendations.len(),
            "Fetched recommendations"
        );

        Ok(body.recommendations)
    }
}

/// Prefers the backend's `message` field over the raw body
fn describe_failure(status: u16, body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
        }) => format!("backend returned status {}: {}", status, message),
        _ => format!("backend returned status {}: {}", status, body),
    }
}

#[async_trait::async_trait]
impl CineflixApi for HttpBackend {
    async fn auth_status(&self) -> AppResult<AuthStatus> {
        let response = self.http_client.get(self.url("/api/auth-status")).send().await?;
        Self::read_json(response).await
    }

    async fn login(&self, request: &LoginRequest) -> AppResult<StatusResponse> {
        let response = self
            .http_client
            .post(self.url("/api/login"))
            .json(request)
            .send()
            .await?;
        Self::read_status(response).await
    }

    async fn register(&self, request: &RegisterRequest) -> AppResult<StatusResponse> {
        let response = self
            .http_client
            .post(self.url("/api/register"))
            .json(request)
            .send()
            .await?;
        Self::read_status(response).await
    }

    async fn logout(&self) -> AppResult<()> {
        let response = self.http_client.post(self.url("/api/logout")).send().await?;
        let _: StatusResponse = Self::read_json(response).await?;
        Ok(())
    }

    async fn movies(&self, filters: &FilterState) -> AppResult<Vec<Movie>> {
        let response = self
            .http_client
            .get(self.url("/api/movies"))
            .query(&filters.query_params())
            .send()
            .await?;

        let movies: Vec<Movie> = Self::read_json(response).await?;

        tracing::info!(
            search = %filters.search,
            genre = %filters.genre,
            ott = %filters.ott,
            results_count = movies.len(),
            "Fetched movie listing"
        );

        Ok(movies)
    }

    async fn recommend(&self, title: &str) -> AppResult<Vec<Movie>> {
        self.post_recommendations("/api/recommend", title).await
    }

    async fn parallel_universe(&self, title: &str) -> AppResult<Vec<Movie>> {
        self.post_recommendations("/api/parallel-universe", title).await
    }

    async fn track_view(&self, title: &str, genre: &str) -> AppResult<()> {
        self.post_interaction("/api/view", title, genre).await
    }

    async fn like(&self, title: &str, genre: &str) -> AppResult<()> {
        self.post_interaction("/api/like", title, genre).await
    }

    async fn cinesound(&self, song: &str) -> AppResult<SongAnalysis> {
        let response = self
            .http_client
            .post(self.url("/api/cinesound"))
            .json(&json!({ "song": song }))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn profile(&self) -> AppResult<CinematicProfile> {
        let response = self.http_client.get(self.url("/api/profile")).send().await?;
        Self::read_json(response).await
    }

    async fn get_preferences(&self) -> AppResult<PreferencesResponse> {
        let response = self
            .http_client
            .get(self.url("/api/user/preferences"))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn save_preferences(
        &self,
        request: &SavePreferencesRequest,
    ) -> AppResult<StatusResponse> {
        let response = self
            .http_client
            .post(self.url("/api/user/preferences"))
            .json(request)
            .send()
            .await?;
        Self::read_status(response).await
    }

    async fn chatbot(&self, message: &str) -> AppResult<ChatReply> {
        let response = self
            .http_client
            .post(self.url("/api/chatbot"))
            .json(&json!({ "message": message }))
            .send()
            .await?;
        Self::read_json(response).await
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

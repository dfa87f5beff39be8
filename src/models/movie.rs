use serde::{Deserialize, Deserializer, Serialize};

/// A catalogue entry as served by the backend listing and recommenders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genre: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub imdb_rating: Option<f32>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ott_platform: String,
    #[serde(default)]
    pub poster_url: Option<String>,
}

impl Movie {
    /// Where the "Watch Now" action sends the viewer
    pub fn watch_url(&self) -> String {
        ott_platform_url(&self.ott_platform)
    }
}

/// Streaming platform landing page, or a web search for unknown platforms
pub fn ott_platform_url(platform: &str) -> String {
    let host = match platform {
        "Netflix" => "www.netflix.com",
        "Prime Video" => "www.primevideo.com",
        "Disney+" => "www.disneyplus.com",
        "HBO Max" => "www.hbomax.com",
        "Hulu" => "www.hulu.com",
        other => return format!("https://www.google.com/search?q={}", urlencoding::encode(other)),
    };
    format!("https://{}", host)
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

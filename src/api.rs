//! Rick and Morty API client

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::{Character, Episode, StatusFilter};

pub const DEFAULT_API_URL: &str = "https://rickandmortyapi.com/api";

// ============================================================================
// Source seam
// ============================================================================

/// Where characters and episodes come from.
///
/// The HTTP client implements this; tests provide in-memory sources.
#[async_trait]
pub trait CharacterSource: Send + Sync {
    /// Number of result pages for a status filter.
    async fn page_count(&self, status: StatusFilter) -> Result<u32, ApiError>;

    /// One page of characters (1-based). May be empty.
    async fn fetch_page(&self, page: u32, status: StatusFilter)
        -> Result<Vec<Character>, ApiError>;

    /// Resolve one episode reference (an episode URL).
    async fn fetch_episode(&self, reference: &str) -> Result<Episode, ApiError>;
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct CharacterPageResponse {
    info: PageInfo,
    #[serde(default)]
    results: Vec<Character>,
}

#[derive(Debug, Deserialize)]
struct PageInfo {
    pages: u32,
}

#[derive(Debug, Deserialize)]
struct EpisodeResponse {
    episode: String,
    name: String,
    #[serde(default)]
    air_date: String,
}

impl From<EpisodeResponse> for Episode {
    fn from(response: EpisodeResponse) -> Self {
        Episode {
            code: response.episode,
            name: response.name,
            air_date: response.air_date,
        }
    }
}

// ============================================================================
// HTTP client
// ============================================================================

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn character_url(&self) -> String {
        format!("{}/character/", self.base_url)
    }

    async fn get_page(
        &self,
        page: Option<u32>,
        status: StatusFilter,
    ) -> Result<CharacterPageResponse, ApiError> {
        let url = self.character_url();
        let mut request = self.client.get(&url);
        if status != StatusFilter::Any {
            request = request.query(&[("status", status.as_query())]);
        }
        if let Some(page) = page {
            request = request.query(&[("page", page)]);
        }

        let response = request.send().await?;
        let code = response.status();
        if !code.is_success() {
            return Err(ApiError::Status {
                status: code.as_u16(),
                url,
            });
        }
        Ok(response.json().await?)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[async_trait]
impl CharacterSource for ApiClient {
    async fn page_count(&self, status: StatusFilter) -> Result<u32, ApiError> {
        match self.get_page(None, status).await {
            Ok(response) => Ok(response.info.pages),
            Err(err) if err.is_not_found() => Ok(0),
            Err(err) => Err(err),
        }
    }

    async fn fetch_page(
        &self,
        page: u32,
        status: StatusFilter,
    ) -> Result<Vec<Character>, ApiError> {
        match self.get_page(Some(page), status).await {
            Ok(response) => Ok(response.results),
            Err(err) if err.is_not_found() => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }

    async fn fetch_episode(&self, reference: &str) -> Result<Episode, ApiError> {
        let response = self.client.get(reference).send().await?;
        let code = response.status();
        if !code.is_success() {
            return Err(ApiError::Status {
                status: code.as_u16(),
                url: reference.to_string(),
            });
        }
        let episode: EpisodeResponse = response.json().await?;
        Ok(episode.into())
    }
}

use crate::{
    errors::{ReelError, UpstreamService},
    providers::catalog::CatalogProvider,
    types::SearchQuery,
};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde_json::Value;
use tracing::debug;

/// The public TMDB v3 API root.
pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// The result language requested from TMDB.
pub const DEFAULT_TMDB_LANGUAGE: &str = "ko-KR";

/// A provider for TMDB's `/search/multi` endpoint (movies, TV and people).
#[derive(Clone)]
pub struct TmdbProvider {
    client: ReqwestClient,
    base_url: String,
    api_key: String,
    language: String,
}

impl std::fmt::Debug for TmdbProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbProvider")
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl TmdbProvider {
    /// Creates a new `TmdbProvider`. A trailing slash on `base_url` is ignored.
    pub fn new(base_url: String, api_key: String, language: String) -> Result<Self, ReelError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(ReelError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            language,
        })
    }
}

#[async_trait]
impl CatalogProvider for TmdbProvider {
    async fn search(&self, query: &SearchQuery) -> Result<Value, ReelError> {
        let url = format!("{}/search/multi", self.base_url);
        let page = query.page().to_string();
        debug!(query = %query.text(), page = %page, "--> Sending catalog search request");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query.text()),
                ("language", self.language.as_str()),
                ("page", page.as_str()),
                ("include_adult", "false"),
            ])
            .send()
            .await
            .map_err(|source| ReelError::Request {
                service: UpstreamService::Catalog,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ReelError::upstream(
                UpstreamService::Catalog,
                status.as_u16(),
                &error_text,
            ));
        }

        response
            .json()
            .await
            .map_err(|source| ReelError::Deserialization {
                service: UpstreamService::Catalog,
                source,
            })
    }
}

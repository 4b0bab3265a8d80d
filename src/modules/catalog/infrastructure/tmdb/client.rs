use super::mapper::TmdbMapper;
use super::models::{TmdbMovieDetail, TmdbSearchResponse};
use crate::modules::catalog::domain::entities::{CatalogMovieDetail, CatalogMovieSummary};
use crate::modules::catalog::domain::provider::CatalogProvider;
use crate::shared::errors::AppResult;
use crate::shared::http::RateLimitClient;
use async_trait::async_trait;

/// TMDB adapter for the movie catalog boundary
pub struct TmdbClient {
    http_client: RateLimitClient,
    base_url: String,
    api_key: String,
    mapper: TmdbMapper,
}

impl TmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http_client: RateLimitClient::for_tmdb(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            mapper: TmdbMapper::new(),
        }
    }

    /// Build URL with API key parameter
    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}?api_key={}", self.base_url, endpoint, self.api_key)
    }

    /// Build URL with API key and additional query parameters
    fn build_url_with_params(&self, endpoint: &str, params: &[(String, String)]) -> String {
        let mut url = format!("{}{}?api_key={}", self.base_url, endpoint, self.api_key);
        for (key, value) in params {
            if key != "api_key" {
                url.push_str(&format!("&{}={}", key, urlencoding::encode(value)));
            }
        }
        url
    }
}

#[async_trait]
impl CatalogProvider for TmdbClient {
    async fn search_movies(&self, query: &str) -> AppResult<Vec<CatalogMovieSummary>> {
        let params = vec![
            ("query".to_string(), query.to_string()),
            ("page".to_string(), "1".to_string()),
        ];
        let url = self.build_url_with_params("/search/movie", &params);

        log::info!("TMDB: Searching movies for '{}'", query);

        let response: TmdbSearchResponse = self.http_client.get(&url).await?;

        // Hits without a usable title are dropped rather than failing the
        // whole search.
        let summaries: Vec<CatalogMovieSummary> = response
            .results
            .into_iter()
            .filter_map(|hit| self.mapper.map_summary(hit).ok())
            .collect();

        log::info!("TMDB: Found {} results for '{}'", summaries.len(), query);
        Ok(summaries)
    }

    async fn movie_detail(&self, tmdb_id: i32) -> AppResult<CatalogMovieDetail> {
        let url = self.build_url(&format!("/movie/{}", tmdb_id));

        log::info!("TMDB: Getting movie detail for id {}", tmdb_id);

        let detail: TmdbMovieDetail = self.http_client.get(&url).await?;
        self.mapper.map_detail(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_appends_api_key() {
        let client = TmdbClient::new("https://api.themoviedb.org/3", "secret");
        assert_eq!(
            client.build_url("/movie/550"),
            "https://api.themoviedb.org/3/movie/550?api_key=secret"
        );
    }

    #[test]
    fn build_url_with_params_encodes_query() {
        let client = TmdbClient::new("https://api.themoviedb.org/3", "secret");
        let url = client.build_url_with_params(
            "/search/movie",
            &[("query".to_string(), "the matrix".to_string())],
        );
        assert_eq!(
            url,
            "https://api.themoviedb.org/3/search/movie?api_key=secret&query=the%20matrix"
        );
    }
}

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::config::TmdbConfig;

/// Errors from the upstream movie metadata API, discriminated so the proxy
/// boundary can tell "upstream said 404" from "upstream unreachable" from
/// "upstream sent garbage".
#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    #[error("upstream request failed: {0}")]
    Network(reqwest::Error),
    #[error("upstream returned status {status}")]
    Status { status: u16 },
    #[error("upstream payload was not valid JSON: {0}")]
    Decode(reqwest::Error),
}

/// Thin client for the TMDB HTTP API. Holds a shared connection pool with a
/// request timeout so a hung upstream call can't hang a view forever.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    language: String,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig, api_key: String) -> Result<Self, TmdbError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(TmdbError::Network)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            language: config.language.clone(),
        })
    }

    /// The "popular movies" listing for one page.
    pub async fn popular(&self, page: u32) -> Result<Value, TmdbError> {
        let path = format!("/movie/popular?page={}", page);
        self.get_json(&path).await
    }

    /// One movie plus its credits and similar titles, composed upstream via
    /// `append_to_response` so the client never needs follow-up calls.
    pub async fn detail(&self, movie_id: &str) -> Result<Value, TmdbError> {
        let path = format!(
            "/movie/{}?append_to_response=credits,similar",
            urlencoding::encode(movie_id)
        );
        self.get_json(&path).await
    }

    /// Full-text title search, first page only, adult content excluded.
    pub async fn search(&self, term: &str) -> Result<Value, TmdbError> {
        let path = format!(
            "/search/movie?query={}&page=1&include_adult=false",
            urlencoding::encode(term)
        );
        self.get_json(&path).await
    }

    async fn get_json(&self, path: &str) -> Result<Value, TmdbError> {
        debug!(path = %path, "tmdb request");

        // The api_key goes on as the last query parameter and stays out of
        // the logs above.
        let sep = if path.contains('?') { '&' } else { '?' };
        let url = format!(
            "{}{}{}language={}&api_key={}",
            self.base_url, path, sep, self.language, self.api_key
        );

        let response = self.http.get(&url).send().await.map_err(TmdbError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TmdbError::Status {
                status: status.as_u16(),
            });
        }

        response.json::<Value>().await.map_err(TmdbError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Json, Router};
    use serde_json::json;

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: String) -> TmdbClient {
        let config = TmdbConfig {
            base_url,
            ..TmdbConfig::default()
        };
        TmdbClient::new(&config, "test-key".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_popular_returns_payload() {
        let router = Router::new().route(
            "/movie/popular",
            get(|| async { Json(json!({"page": 1, "results": [{"id": 1}]})) }),
        );
        let client = client_for(spawn_stub(router).await);

        let payload = client.popular(1).await.unwrap();
        assert_eq!(payload["results"][0]["id"], 1);
    }

    #[tokio::test]
    async fn test_non_2xx_is_status_error() {
        let router = Router::new().route(
            "/movie/popular",
            get(|| async { axum::http::StatusCode::NOT_FOUND }),
        );
        let client = client_for(spawn_stub(router).await);

        match client.popular(1).await {
            Err(TmdbError::Status { status }) => assert_eq!(status, 404),
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_is_network_error() {
        // Nothing listens on this port.
        let client = client_for("http://127.0.0.1:1".to_string());

        match client.popular(1).await {
            Err(TmdbError::Network(_)) => {}
            other => panic!("expected network error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_term_is_encoded() {
        let router = Router::new().route(
            "/search/movie",
            get(
                |axum::extract::RawQuery(query): axum::extract::RawQuery| async move {
                    Json(json!({"query": query.unwrap_or_default()}))
                },
            ),
        );
        let client = client_for(spawn_stub(router).await);

        let payload = client.search("dark knight").await.unwrap();
        let query = payload["query"].as_str().unwrap();
        assert!(query.contains("query=dark%20knight"));
        assert!(query.contains("include_adult=false"));
        assert!(query.contains("page=1"));
    }
}

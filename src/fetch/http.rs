//! Network retrieval of wiki articles

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use tracing::debug;
use url::Url;

use super::error::FetchError;
use super::ContentSource;

/// Default timeout for article requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Article path of the wiki this tool was written against.
pub const DEFAULT_BASE_URL: &str = "https://bulbapedia.bulbagarden.net/wiki";

/// Fetches article HTML over HTTP.
///
/// A phrase maps to `{base_url}/{phrase}` with spaces replaced by
/// underscores. Any transport failure or non-success status is a
/// [`FetchError`]; there is no retry.
pub struct HttpSource {
    client: ReqwestClient,
    base_url: String,
}

impl HttpSource {
    /// Create a source rooted at `base_url` (trailing slashes are dropped).
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(concat!("wikiscout/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn article_url(&self, phrase: &str) -> String {
        format!("{}/{}", self.base_url, phrase.replace(' ', "_"))
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    async fn fetch_html(&self, phrase: &str) -> Result<String, FetchError> {
        let url = self.article_url(phrase);
        let parsed = Url::parse(&url).map_err(|source| FetchError::InvalidUrl {
            phrase: phrase.to_string(),
            source,
        })?;
        debug!("Fetching {}", url);

        let response =
            self.client
                .get(parsed)
                .send()
                .await
                .map_err(|source| FetchError::Network {
                    phrase: phrase.to_string(),
                    url: url.clone(),
                    source,
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                phrase: phrase.to_string(),
                url,
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Network {
            phrase: phrase.to_string(),
            url,
            source,
        })
    }

    fn locate(&self, phrase: &str) -> String {
        self.article_url(phrase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[test]
    fn phrases_map_to_underscored_paths() {
        let source = HttpSource::new("https://wiki.example/wiki/");
        assert_eq!(
            source.article_url("Team Rocket"),
            "https://wiki.example/wiki/Team_Rocket"
        );
    }

    #[tokio::test]
    async fn fetch_returns_body_on_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/Pikachu")
            .with_status(200)
            .with_body("<html>pika</html>")
            .expect(1)
            .create_async()
            .await;

        let source = HttpSource::new(server.url());
        let html = source.fetch_html("Pikachu").await.unwrap();
        assert_eq!(html, "<html>pika</html>");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_a_fetch_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/Missingno")
            .with_status(404)
            .create_async()
            .await;

        let source = HttpSource::new(server.url());
        let err = source.fetch_html("Missingno").await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }
}

//! HTTP client for the uLogin `token.php` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::{DomainError, ProfileProvider, ProviderProfile};

/// Path of the token exchange endpoint below the provider base URL.
const TOKEN_PATH: &str = "/token.php";

/// Blocking `ureq` client run on the blocking pool.
#[derive(Clone)]
pub struct ULoginClient {
    agent: ureq::Agent,
    token_url: String,
}

impl ULoginClient {
    /// Client for the provider at `base_url`.
    ///
    /// Without a `timeout` the call waits as long as the connection stays open.
    #[must_use]
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            agent: builder.build(),
            token_url: format!("{}{TOKEN_PATH}", base_url.trim_end_matches('/')),
        }
    }

    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    fn fetch_blocking(&self, token: &str, host: &str) -> Result<ProviderProfile, DomainError> {
        let response = self
            .agent
            .get(&self.token_url)
            .query("token", token)
            .query("host", host)
            .call();

        let response = match response {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => {
                warn!(status, "uLogin answered with an error status");
                return Err(DomainError::ProviderStatus { status });
            }
            Err(ureq::Error::Transport(e)) => {
                warn!(kind = ?e.kind(), "uLogin request failed");
                return Err(DomainError::unreachable(e.to_string()));
            }
        };

        // Any other 2xx/3xx that ureq lets through is still not a profile.
        let status = response.status();
        if status != 200 {
            warn!(status, "uLogin answered with an unexpected status");
            return Err(DomainError::ProviderStatus { status });
        }

        let body = response
            .into_string()
            .map_err(|e| DomainError::unreachable(format!("unreadable body: {e}")))?;
        debug!(bytes = body.len(), "received uLogin profile");
        ProviderProfile::from_json(&body)
    }
}

#[async_trait]
impl ProfileProvider for ULoginClient {
    async fn fetch_profile(&self, token: &str, host: &str) -> Result<ProviderProfile, DomainError> {
        let client = self.clone();
        let token = token.to_owned();
        let host = host.to_owned();

        tokio::task::spawn_blocking(move || client.fetch_blocking(&token, &host))
            .await
            .map_err(|e| DomainError::unreachable(format!("provider call aborted: {e}")))?
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn token_url_ignores_trailing_slash() {
        assert_eq!(
            ULoginClient::new("http://ulogin.ru/", None).token_url(),
            "http://ulogin.ru/token.php"
        );
        assert_eq!(
            ULoginClient::new("http://ulogin.ru", None).token_url(),
            "http://ulogin.ru/token.php"
        );
    }

    #[tokio::test]
    async fn sends_token_and_host_as_query() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/token.php")
                    .query_param("token", "t-1")
                    .query_param("host", "example.com");
                then.status(200)
                    .json_body(json!({"email": "a@example.com", "verified_email": "1"}));
            })
            .await;
        let client = ULoginClient::new(&server.base_url(), None);

        let profile = client.fetch_profile("t-1", "example.com").await.unwrap();

        mock.assert_async().await;
        assert_eq!(profile.verified_email().unwrap(), "a@example.com");
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/token.php");
                then.status(503).body("down");
            })
            .await;
        let client = ULoginClient::new(&server.base_url(), None);

        let err = client.fetch_profile("t", "h").await.unwrap_err();

        assert!(matches!(err, DomainError::ProviderStatus { status: 503 }));
    }

    #[tokio::test]
    async fn non_200_success_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/token.php");
                then.status(204);
            })
            .await;
        let client = ULoginClient::new(&server.base_url(), None);

        let err = client.fetch_profile("t", "h").await.unwrap_err();

        assert!(matches!(err, DomainError::ProviderStatus { status: 204 }));
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/token.php");
                then.status(200).body("<html>maintenance</html>");
            })
            .await;
        let client = ULoginClient::new(&server.base_url(), None);

        let err = client.fetch_profile("t", "h").await.unwrap_err();

        assert!(matches!(err, DomainError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn connection_refused_is_unreachable() {
        // Nothing listens on port 9 of localhost in the test environment.
        let client = ULoginClient::new("http://127.0.0.1:9", Some(Duration::from_secs(2)));

        let err = client.fetch_profile("t", "h").await.unwrap_err();

        assert!(matches!(err, DomainError::ProviderUnreachable { .. }));
    }
}

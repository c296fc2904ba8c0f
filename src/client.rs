use anyhow::{Context, Result};
use reqwest::{Client, Url};
use tracing::debug;

use crate::config::Config;
use crate::models::{GitHubUser, RawEvent};

/// Thin client over the two GitHub REST endpoints the lookup needs.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: Url,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            http: build_client(&config.user_agent)?,
            api_url: config.api_url.clone(),
        })
    }

    /// The shared HTTP client, also used for avatar downloads.
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Fetches a GitHub user by username.
    pub async fn fetch_user(&self, username: &str) -> Result<GitHubUser> {
        let url = self.endpoint(&["users", username])?;
        debug!(%url, "fetching profile");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .context("Failed to send request to GitHub API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("GitHub API error ({status}): {body}");
        }

        response
            .json::<GitHubUser>()
            .await
            .context("Failed to deserialize GitHub user response")
    }

    /// Fetches the user's public events feed, newest first.
    pub async fn fetch_events(&self, username: &str) -> Result<Vec<RawEvent>> {
        let url = self.endpoint(&["users", username, "events"])?;
        debug!(%url, "fetching events");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .context("Failed to send events request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("GitHub Events API error ({status}): {body}");
        }

        response
            .json::<Vec<RawEvent>>()
            .await
            .context("Failed to deserialize events response")
    }

    /// Appends path segments to the API base; each segment is percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("API URL cannot be a base: {}", self.api_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Creates a preconfigured HTTP client with required headers.
fn build_client(user_agent: &str) -> Result<Client> {
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};

    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent).context("Invalid User-Agent value")?,
    );
    headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));

    Client::builder()
        .default_headers(headers)
        .build()
        .context("Failed to build HTTP client")
}

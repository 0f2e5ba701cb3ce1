use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde::Deserialize;
use url::Url;

use crate::{
    domain::{
        api::LinksApi,
        error::ApiError,
        models::{CreateRequest, CreatedLink, StatsSnapshot},
    },
    http::config::Config,
};

const SHORTEN_PATH: &str = "/api/shorten";
const STATS_PATH: &str = "/admin/stats";

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// `LinksApi` over the dashboard server's JSON endpoints.
pub struct HttpApi {
    client: Client,
    base_url: Url,
}

impl HttpApi {
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        url
    }

    fn link_endpoint(&self, code: &str) -> Url {
        let mut url = self.endpoint("/");
        // Only cannot-be-a-base URLs reject segments and those fail parse_base_url.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.clear().extend(["api", "links", code]);
        }
        url
    }

    /// A non-2xx response is an application rejection only when its body is
    /// the server's JSON error shape. Anything else (a proxy's HTML page, an
    /// empty body) is treated as a transport failure.
    async fn rejection(response: Response) -> ApiError {
        let status = response.status().as_u16();
        match response.json::<ErrorBody>().await {
            Ok(body) => ApiError::Application {
                status,
                message: body.error.filter(|msg| !msg.is_empty()),
            },
            Err(err) => {
                tracing::debug!(status, error = %err, "Undecodable error body");
                ApiError::Transport(err)
            }
        }
    }
}

/// Parses the dashboard origin. Only the scheme, host and port are kept.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw).with_context(|| format!("Invalid base URL '{}'", raw))?;
    if url.cannot_be_a_base() || url.host_str().is_none() {
        anyhow::bail!("Base URL '{}' must be an absolute http(s) origin", raw);
    }
    url.set_path("");
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

impl LinksApi for HttpApi {
    async fn create(&self, request: &CreateRequest) -> Result<CreatedLink, ApiError> {
        let response = self
            .client
            .post(self.endpoint(SHORTEN_PATH))
            .json(request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }
        Ok(response.json::<CreatedLink>().await?)
    }

    async fn delete(&self, code: &str) -> Result<(), ApiError> {
        let response = self.client.delete(self.link_endpoint(code)).send().await?;
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }
        Ok(())
    }

    async fn fetch_stats(&self) -> Result<StatsSnapshot, ApiError> {
        let response = self.client.get(self.endpoint(STATS_PATH)).send().await?;
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }
        Ok(response.json::<StatsSnapshot>().await?)
    }
}

use super::types::{HttpReply, PoemRequest};
use crate::{Result, config::ProbeConfig};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

#[async_trait]
pub trait PoemApi: Send + Sync {
    /// `GET {base}/`
    async fn health(&self) -> Result<HttpReply>;

    /// `POST {base}/generate-poem`
    async fn generate_poem(&self, request: &PoemRequest) -> Result<HttpReply>;
}

pub struct HttpPoemApi {
    client: reqwest::Client,
    base_url: String,
    health_timeout: Duration,
    generate_timeout: Duration,
}

impl HttpPoemApi {
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            health_timeout: Duration::from_secs(config.health_timeout_secs),
            generate_timeout: Duration::from_secs(config.generate_timeout_secs),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn into_reply(response: reqwest::Response) -> Result<HttpReply> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpReply { status, body })
    }
}

#[async_trait]
impl PoemApi for HttpPoemApi {
    async fn health(&self) -> Result<HttpReply> {
        let url = self.url("");
        debug!("Sending health check to {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.health_timeout)
            .send()
            .await?;

        let reply = Self::into_reply(response).await?;
        debug!("Health check returned status {}", reply.status);
        Ok(reply)
    }

    async fn generate_poem(&self, request: &PoemRequest) -> Result<HttpReply> {
        let url = self.url("generate-poem");
        debug!(
            "Requesting {} poem about '{}' from {}",
            request.style, request.theme, url
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .timeout(self.generate_timeout)
            .send()
            .await?;

        let reply = Self::into_reply(response).await?;
        debug!(
            "Generation for '{}' returned status {} ({} bytes)",
            request.theme,
            reply.status,
            reply.body.len()
        );
        Ok(reply)
    }
}

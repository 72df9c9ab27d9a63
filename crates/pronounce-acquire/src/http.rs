use pronounce_model::USER_AGENT;
use std::time::Duration;
use thiserror::Error;

/// Plain HTTP side of the pipeline: no script execution, fixed user agent.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

/// Why a GET did not produce a usable body.
#[derive(Debug, Error)]
pub enum HttpFailure {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),
}

impl HttpClient {
    pub fn new(timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, HttpFailure> {
        let response = self
            .client
            .get(url)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpFailure::Status(status));
        }
        Ok(response)
    }

    /// GET `url` and return the body as text. Non-2xx is a failure.
    pub async fn fetch_text(&self, url: &str) -> Result<String, HttpFailure> {
        let response = self.get(url).await?;
        Ok(response.text().await?)
    }

    /// GET `url` and return the raw body. Non-2xx is a failure.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, HttpFailure> {
        let response = self.get(url).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

//! Blocking HTTP client. Runs on the fetcher's background thread, never on the UI thread.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use yz_core::{AdviceConfig, AdviceError, AdviceSource};

use crate::protocol::parse_advice;

#[derive(Debug, Clone)]
pub struct HttpAdviceSource {
    client: Client,
    url: String,
}

impl HttpAdviceSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, AdviceError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| AdviceError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(cfg: &AdviceConfig) -> Result<Self, AdviceError> {
        Self::new(cfg.url.clone(), Duration::from_millis(cfg.timeout_ms))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn map_reqwest(e: reqwest::Error) -> AdviceError {
    if e.is_timeout() {
        AdviceError::Timeout
    } else {
        AdviceError::Transport(e.to_string())
    }
}

impl AdviceSource for HttpAdviceSource {
    fn fetch(&self) -> Result<String, AdviceError> {
        debug!(url = %self.url, "GET advice");
        let resp = self.client.get(&self.url).send().map_err(map_reqwest)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(AdviceError::Status(status.as_u16()));
        }
        let body = resp.text().map_err(map_reqwest)?;
        parse_advice(&body)
    }
}

//! Blocking HTTP fetch used for link-title lookups.
//!
//! Every request is bounded: the client carries a total timeout and the body
//! is read up to a byte cap. Anything past the cap is dropped, since a page
//! title sits in the document head.

use log::debug;
use reqwest::blocking::Client;
use std::io::Read;
use std::time::Duration;

use crate::config::LookupSettings;
use crate::errors::AutolinkError;

/// Retrieves the raw body behind a URL.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, AutolinkError>;
}

/// `Fetcher` backed by a shared, connection-pooling `reqwest` blocking client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_body_bytes: u64,
}

impl HttpFetcher {
    pub fn new(settings: &LookupSettings) -> Result<Self, AutolinkError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| AutolinkError::FetchError("<client>".to_string(), e))?;
        Ok(Self {
            client,
            max_body_bytes: settings.max_body_bytes,
        })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, AutolinkError> {
        debug!("Fetching lookup URL {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| AutolinkError::FetchError(url.to_string(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AutolinkError::HttpStatus(url.to_string(), status.as_u16()));
        }

        let mut body = Vec::new();
        response
            .take(self.max_body_bytes)
            .read_to_end(&mut body)
            .map_err(|e| AutolinkError::ReadError(url.to_string(), e))?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

//! The provider contract and its HTTP implementation.
//!
//! A provider takes encoded image bytes and returns encoded image bytes
//! with the background removed (typically PNG with alpha), or a typed
//! failure. Remote services differ only in endpoint, credential header,
//! and whether they accept a `size` option — that capability is declared
//! in configuration rather than probed at runtime.

use std::time::Duration;

use reqwest::blocking::multipart;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    /// The service answered with a non-success status.
    #[error("{provider} returned HTTP {status}: {body}")]
    Http {
        provider: String,
        status: u16,
        body: String,
    },
    /// The request never produced a response (DNS, TLS, timeout...).
    #[error("request to {provider} failed: {source}")]
    Transport {
        provider: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ProviderError {
    /// Quota, rate-limit, or payment-required failures: HTTP 402/429 or
    /// an error body mentioning quota/credits.
    ///
    /// The classification is informational — the orchestrator logs these
    /// differently but falls through to the next provider either way.
    pub fn is_quota_exhausted(&self) -> bool {
        match self {
            ProviderError::Http { status, body, .. } => {
                matches!(status, 402 | 429)
                    || body.to_lowercase().contains("quota")
                    || body.to_lowercase().contains("credits")
            }
            ProviderError::Transport { .. } => false,
        }
    }
}

/// A background removal service.
///
/// `Send + Sync` so a whole removal call can be offloaded to a worker
/// thread while the UI stays interactive.
pub trait BackgroundProvider: Send + Sync {
    /// Display name, used in progress messages and error aggregation.
    fn name(&self) -> &str;

    /// Remove the background from `image` (encoded bytes in, encoded
    /// bytes out).
    fn remove(&self, image: &[u8]) -> Result<Vec<u8>, ProviderError>;
}

/// Remote segmentation service reached over HTTP multipart upload.
///
/// The image goes up as the `image_file` part; the credential rides in a
/// configurable header (`x-api-key` by default). Services that accept a
/// `size` option get `size=auto` appended when the capability is
/// declared.
pub struct HttpProvider {
    name: String,
    endpoint: String,
    credential: String,
    header: String,
    size_option: bool,
    client: reqwest::blocking::Client,
}

/// Remote calls can take seconds for large photos; cap them well below
/// anything a user would wait through.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

impl HttpProvider {
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        credential: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let name = name.into();
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| ProviderError::Transport {
                provider: name.clone(),
                source,
            })?;
        Ok(Self {
            name,
            endpoint: endpoint.into(),
            credential: credential.into(),
            header: "x-api-key".to_string(),
            size_option: false,
            client,
        })
    }

    /// Use a different credential header (e.g. `X-Api-Key` for remove.bg).
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Declare that the endpoint accepts a `size` option.
    pub fn with_size_option(mut self, size_option: bool) -> Self {
        self.size_option = size_option;
        self
    }

    fn transport(&self, source: reqwest::Error) -> ProviderError {
        ProviderError::Transport {
            provider: self.name.clone(),
            source,
        }
    }
}

impl BackgroundProvider for HttpProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn remove(&self, image: &[u8]) -> Result<Vec<u8>, ProviderError> {
        let part = multipart::Part::bytes(image.to_vec())
            .file_name("photo.png")
            .mime_str("image/png")
            .map_err(|e| self.transport(e))?;
        let mut form = multipart::Form::new().part("image_file", part);
        if self.size_option {
            form = form.text("size", "auto");
        }

        let response = self
            .client
            .post(&self.endpoint)
            .header(&self.header, &self.credential)
            .multipart(form)
            .send()
            .map_err(|e| self.transport(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ProviderError::Http {
                provider: self.name.clone(),
                status: status.as_u16(),
                body,
            });
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| self.transport(e))
    }
}

//! Blocking `reqwest` client for the trip endpoints.

use std::future::Future;
use std::time::Duration;

use itinera_core::{
    BackendError, CreateTripPayload, PriceEstimator, PriceQuote, PriceRequest, TripGateway,
    TripReceipt,
};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::wire::{QuoteEnvelope, error_message, trip_id};

/// Errors raised while constructing an [`HttpBackend`].
#[derive(Debug)]
pub enum BackendBuildError {
    /// The base URL is not an absolute `http` or `https` URL.
    InvalidBaseUrl {
        /// Rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// Failed to build the Tokio runtime.
    Runtime(std::io::Error),
}

impl std::fmt::Display for BackendBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBaseUrl { input, reason } => {
                write!(f, "invalid backend URL {input:?}: {reason}")
            }
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::Runtime(err) => write!(f, "failed to build Tokio runtime: {err}"),
        }
    }
}

impl std::error::Error for BackendBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidBaseUrl { .. } => None,
            Self::HttpClient(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

/// Default user agent for backend requests.
pub const DEFAULT_USER_AGENT: &str = "itinera/0.1";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`HttpBackend`].
#[derive(Clone)]
pub struct HttpBackendConfig {
    /// API root, e.g. `"https://api.example.com"`.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Bearer token sent with trip create and update calls.
    pub api_token: Option<String>,
}

impl std::fmt::Debug for HttpBackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBackendConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for HttpBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            api_token: None,
        }
    }
}

impl HttpBackendConfig {
    /// Configuration for `base_url` with default timeout and user agent.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Authenticate trip writes with a bearer token.
    #[must_use]
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }
}

/// Trip backend reached over HTTP.
///
/// The backend owns a current-thread Tokio runtime reused across calls.
/// When invoked from inside a multi-threaded runtime it blocks on the
/// caller's handle via [`tokio::task::block_in_place`] instead.
pub struct HttpBackend {
    client: Client,
    base: Url,
    config: HttpBackendConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBackend")
            .field("base", &self.base.as_str())
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

fn parse_base_url(input: &str) -> Result<Url, BackendBuildError> {
    let invalid = |reason: String| BackendBuildError::InvalidBaseUrl {
        input: input.to_owned(),
        reason,
    };
    let url = Url::parse(input.trim()).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot carry a path".to_owned()));
    }
    Ok(url)
}

impl HttpBackend {
    /// Create a backend for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, BackendBuildError> {
        Self::with_config(HttpBackendConfig::new(base_url))
    }

    /// Create a backend with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn with_config(config: HttpBackendConfig) -> Result<Self, BackendBuildError> {
        let base = parse_base_url(&config.base_url)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(BackendBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(BackendBuildError::Runtime)?;
        Ok(Self {
            client,
            base,
            config,
            runtime,
        })
    }

    /// Absolute URL of `path` below the API root.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base.as_str().trim_end_matches('/'))
    }

    fn request(&self, method: Method, url: &str, authenticated: bool) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match (&self.config.api_token, authenticated) {
            (Some(token), true) => builder.bearer_auth(token),
            _ => builder,
        }
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            // No runtime, or a current_thread one we must not block: use ours.
            _ => self.runtime.block_on(future),
        }
    }

    /// Send `body` and return the raw success body.
    async fn send_json<B: Serialize>(
        &self,
        method: Method,
        url: String,
        body: &B,
        authenticated: bool,
    ) -> Result<String, BackendError> {
        log::debug!("{method} {url}");
        let response = self
            .request(method, &url, authenticated)
            .json(body)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        if status.is_success() {
            return Ok(text);
        }
        let message = error_message(&text).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_owned()
        });
        log::warn!("{url} rejected the request with HTTP {status}: {message}");
        Err(BackendError::Http {
            url,
            status: status.as_u16(),
            message,
        })
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> BackendError {
        if error.is_timeout() {
            return BackendError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return BackendError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        BackendError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    fn store_trip(
        &self,
        method: Method,
        path: &str,
        payload: &CreateTripPayload,
    ) -> Result<TripReceipt, BackendError> {
        let url = self.endpoint(path);
        let body = self.block_on(self.send_json(method, url, payload, true))?;
        Ok(TripReceipt { id: trip_id(&body) })
    }
}

impl PriceEstimator for HttpBackend {
    fn estimate(&self, request: &PriceRequest) -> Result<PriceQuote, BackendError> {
        let url = self.endpoint("trips/calculate");
        let body = self.block_on(self.send_json(Method::POST, url, request, false))?;
        let envelope: QuoteEnvelope =
            serde_json::from_str(&body).map_err(|err| BackendError::Parse {
                message: err.to_string(),
            })?;
        Ok(envelope.into_quote())
    }
}

impl TripGateway for HttpBackend {
    fn create_trip(&self, payload: &CreateTripPayload) -> Result<TripReceipt, BackendError> {
        self.store_trip(Method::POST, "trips", payload)
    }

    fn update_trip(
        &self,
        trip_id: u64,
        payload: &CreateTripPayload,
    ) -> Result<TripReceipt, BackendError> {
        let receipt = self.store_trip(Method::PATCH, &format!("trips/{trip_id}"), payload)?;
        Ok(TripReceipt {
            id: receipt.id.or(Some(trip_id)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://api.example.com", "https://api.example.com/trips/calculate")]
    #[case("https://api.example.com/", "https://api.example.com/trips/calculate")]
    #[case("http://localhost:3000/v1/", "http://localhost:3000/v1/trips/calculate")]
    fn endpoints_join_below_the_root(#[case] base: &str, #[case] expected: &str) {
        let backend = HttpBackend::new(base).expect("backend should build");
        assert_eq!(backend.endpoint("trips/calculate"), expected);
    }

    #[rstest]
    #[case("not a url")]
    #[case("ftp://files.example.com")]
    #[case("mailto:ops@example.com")]
    fn rejects_unusable_base_urls(#[case] base: &str) {
        let err = HttpBackend::new(base).expect_err("invalid base URL");
        assert!(matches!(err, BackendBuildError::InvalidBaseUrl { .. }));
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = HttpBackendConfig::new("https://api.example.com")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("planner/2.0")
            .with_api_token("t0ken");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "planner/2.0");
        assert_eq!(config.api_token.as_deref(), Some("t0ken"));
        assert!(!format!("{config:?}").contains("t0ken"));
    }
}

//! Construction of the remote backend used by `quote` and `submit`.

use std::time::Duration;

use itinera_core::{PriceEstimator, TripGateway};
use itinera_data::{HttpBackend, HttpBackendConfig};

use crate::CliError;

/// Connection settings resolved from layered configuration.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct BackendSettings {
    pub(crate) base_url: String,
    pub(crate) timeout: Duration,
    pub(crate) api_token: Option<String>,
}

impl std::fmt::Debug for BackendSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendSettings")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl BackendSettings {
    /// Settings for `base_url`, falling back to the client defaults.
    pub(crate) fn resolve(
        base_url: Option<String>,
        timeout_secs: Option<u64>,
        api_token: Option<String>,
    ) -> Self {
        let defaults = HttpBackendConfig::default();
        Self {
            base_url: base_url.unwrap_or(defaults.base_url),
            timeout: timeout_secs.map_or(defaults.timeout, Duration::from_secs),
            api_token: api_token.filter(|token| !token.is_empty()),
        }
    }

    fn http_config(&self) -> HttpBackendConfig {
        let config = HttpBackendConfig::new(self.base_url.clone()).with_timeout(self.timeout);
        match &self.api_token {
            Some(token) => config.with_api_token(token.clone()),
            None => config,
        }
    }

    fn connect(&self) -> Result<HttpBackend, CliError> {
        HttpBackend::with_config(self.http_config()).map_err(|source| CliError::BuildBackend {
            base_url: self.base_url.clone(),
            source,
        })
    }
}

/// Builds backend clients for the current invocation.
pub(super) trait BackendBuilder {
    fn estimator(&self, settings: &BackendSettings) -> Result<Box<dyn PriceEstimator>, CliError>;
    fn gateway(&self, settings: &BackendSettings) -> Result<Box<dyn TripGateway>, CliError>;
}

pub(super) struct DefaultBackendBuilder;

impl BackendBuilder for DefaultBackendBuilder {
    fn estimator(&self, settings: &BackendSettings) -> Result<Box<dyn PriceEstimator>, CliError> {
        Ok(Box::new(settings.connect()?))
    }

    fn gateway(&self, settings: &BackendSettings) -> Result<Box<dyn TripGateway>, CliError> {
        Ok(Box::new(settings.connect()?))
    }
}

use std::{sync::Arc, time::Duration};

use crate::{
    configuration_store::ConfigurationStore,
    poller::{MIN_POLL_INTERVAL, POLL_INTERVAL},
    TestData,
};

/// Configuration for [`Client`](crate::Client).
///
/// # Examples
/// ```no_run
/// # use std::time::Duration;
/// # use featflags::{Client, ClientConfig};
/// let client = Client::connect(
///     ClientConfig::from_sdk_key("sdk-key").poll_interval(Duration::from_secs(60)),
///     Duration::from_secs(5),
/// );
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    pub(crate) sdk_key: String,
    pub(crate) base_url: String,
    pub(crate) poll_interval: Duration,
    pub(crate) data_source: DataSource,
}

/// Where a client gets its flag values from.
#[derive(Clone)]
pub(crate) enum DataSource {
    Polling,
    Static(Arc<ConfigurationStore>),
}

impl ClientConfig {
    /// Create a default configuration using the specified SDK key.
    ///
    /// ```
    /// # use featflags::ClientConfig;
    /// ClientConfig::from_sdk_key("sdk-key");
    /// ```
    pub fn from_sdk_key(sdk_key: impl Into<String>) -> Self {
        ClientConfig {
            sdk_key: sdk_key.into(),
            base_url: ClientConfig::DEFAULT_BASE_URL.to_owned(),
            poll_interval: POLL_INTERVAL,
            data_source: DataSource::Polling,
        }
    }

    /// Default base URL for API calls.
    pub const DEFAULT_BASE_URL: &'static str = "https://flags.featflags.dev/api";

    /// Override base URL for API calls. Clients should use the default setting in most cases.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override how often the flag values are refreshed. A small random jitter is added to every
    /// interval.
    ///
    /// Intervals shorter than one second are raised to one second.
    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval.max(MIN_POLL_INTERVAL);
        self
    }

    /// Serve flag values from `test_data` instead of polling the server.
    ///
    /// ```
    /// # use featflags::{ClientConfig, TestData};
    /// let td = TestData::new();
    /// let config = ClientConfig::from_sdk_key("fake-key").data_source(&td);
    /// ```
    pub fn data_source(mut self, test_data: &TestData) -> Self {
        self.data_source = DataSource::Static(test_data.store());
        self
    }
}

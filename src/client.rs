use std::{sync::Arc, time::Duration};

use crate::{
    config::DataSource,
    configuration::FlagConfig,
    configuration_store::ConfigurationStore,
    poller::{PollerThread, PollerThreadConfig},
    value::{self, ValueKind},
    ClientConfig, Context, Error, Evaluation, EvaluationError, Evaluator, Result,
};

/// A flag evaluation engine backed by a periodically refreshed flag values document.
///
/// Every flag resolves to its single configured value for all contexts. Evaluation never blocks
/// on the network: it reads the last fetched document.
///
/// # Examples
/// ```no_run
/// # use std::time::Duration;
/// # use featflags::{Client, ClientConfig, Context, Factory};
/// let client = Client::connect(ClientConfig::from_sdk_key("sdk-key"), Duration::from_secs(5))?;
///
/// let beta = Factory::new().bool_flag("beta", false);
/// let enabled = beta.evaluate(&client, &Context::new("user-1")).value;
///
/// client.close()?;
/// # Ok::<(), featflags::Error>(())
/// ```
pub struct Client {
    config: ClientConfig,
    configuration_store: Arc<ConfigurationStore>,
    poller: Option<PollerThread>,
}

impl Client {
    /// Create a client and start fetching flag values.
    ///
    /// Blocks for at most `timeout` waiting for the first configuration; a zero `timeout` does not
    /// wait at all. If the configuration does not arrive in time, a warning is logged and the
    /// client is returned anyway: evaluations fail with
    /// [`ClientNotReady`](EvaluationError::ClientNotReady) until the poller catches up.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidBaseUrl`] if the base URL configuration is invalid.
    /// - [`Error::Unauthorized`] if the server rejected the SDK key.
    /// - [`Error::Io`] if the poller thread could not be spawned.
    pub fn connect(config: ClientConfig, timeout: Duration) -> Result<Client> {
        let store = match &config.data_source {
            DataSource::Static(store) => {
                let store = store.clone();
                return Ok(Client::from_store(config, store));
            }
            DataSource::Polling => Arc::new(ConfigurationStore::new()),
        };

        let poller = PollerThread::start(PollerThreadConfig {
            store: store.clone(),
            base_url: config.base_url.clone(),
            sdk_key: config.sdk_key.clone(),
            poll_interval: config.poll_interval,
        })?;

        if !timeout.is_zero() {
            match poller.wait_for_configuration_timeout(timeout) {
                Ok(()) => {}
                Err(Error::InitializationTimeout) => {
                    log::warn!(target: "featflags",
                               timeout_ms = timeout.as_millis() as u64;
                               "configuration was not fetched in time, flags will evaluate to their defaults");
                }
                Err(err) => {
                    if let Err(shutdown_err) = poller.shutdown() {
                        log::debug!(target: "featflags",
                                    error:display = shutdown_err;
                                    "failed to shut down poller thread");
                    }
                    return Err(err);
                }
            }
        }

        Ok(Client {
            config,
            configuration_store: store,
            poller: Some(poller),
        })
    }

    pub(crate) fn from_store(
        config: ClientConfig,
        configuration_store: Arc<ConfigurationStore>,
    ) -> Self {
        Client {
            config,
            configuration_store,
            poller: None,
        }
    }

    /// Returns `true` once a configuration is available.
    pub fn is_initialized(&self) -> bool {
        self.configuration_store.get_configuration().is_some()
    }

    /// Block until the first configuration has been fetched.
    ///
    /// # Errors
    ///
    /// - [`Error::Unauthorized`] if the server rejected the SDK key.
    /// - [`Error::PollerThreadPanicked`] if the poller thread panicked.
    pub fn wait_for_configuration(&self) -> Result<()> {
        match &self.poller {
            Some(poller) => poller.wait_for_configuration(),
            None => Ok(()),
        }
    }

    /// Stop fetching flag values and wait for the poller thread to exit.
    pub fn close(mut self) -> Result<()> {
        log::debug!(target: "featflags", base_url = self.config.base_url.as_str(); "closing client");
        match self.poller.take() {
            Some(poller) => poller.shutdown(),
            None => Ok(()),
        }
    }

    fn variation<T>(
        &self,
        flag_key: &str,
        context: &Context,
        default: T,
        expected: ValueKind,
        convert: impl FnOnce(&serde_json::Value) -> Option<T>,
    ) -> Evaluation<T> {
        match self.resolve(flag_key, context, expected, convert) {
            Ok(value) => {
                log::trace!(target: "featflags",
                            flag_key,
                            context_key = context.key();
                            "evaluated a flag");
                Evaluation::ok(value)
            }
            Err(err) => {
                log::debug!(target: "featflags",
                            flag_key,
                            context_key = context.key(),
                            error:display = err;
                            "flag evaluation failed, returning default value");
                Evaluation::fallback(default, err)
            }
        }
    }

    fn resolve<T>(
        &self,
        flag_key: &str,
        context: &Context,
        expected: ValueKind,
        convert: impl FnOnce(&serde_json::Value) -> Option<T>,
    ) -> std::result::Result<T, EvaluationError> {
        let Some(configuration) = self.configuration_store.get_configuration() else {
            return Err(EvaluationError::ClientNotReady);
        };

        if !context.is_valid() {
            return Err(EvaluationError::InvalidContext);
        }

        let flag = configuration
            .get_flag(flag_key)
            .ok_or(EvaluationError::FlagNotFound)?;
        let flag: &FlagConfig =
            Option::from(flag).ok_or(EvaluationError::ConfigurationParseError)?;

        convert(&flag.value).ok_or_else(|| EvaluationError::WrongType {
            expected,
            found: ValueKind::of(&flag.value),
        })
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        if let Some(poller) = &self.poller {
            poller.stop();
        }
    }
}

impl Evaluator for Client {
    fn bool_variation(&self, key: &str, context: &Context, default: bool) -> Evaluation<bool> {
        self.variation(key, context, default, ValueKind::Boolean, value::to_bool)
    }

    fn string_variation(
        &self,
        key: &str,
        context: &Context,
        default: String,
    ) -> Evaluation<String> {
        self.variation(key, context, default, ValueKind::String, value::to_string)
    }

    fn int_variation(&self, key: &str, context: &Context, default: i64) -> Evaluation<i64> {
        self.variation(key, context, default, ValueKind::Integer, value::to_integer)
    }

    fn float_variation(&self, key: &str, context: &Context, default: f64) -> Evaluation<f64> {
        self.variation(key, context, default, ValueKind::Float, value::to_float)
    }

    fn json_variation(
        &self,
        key: &str,
        context: &Context,
        default: serde_json::Value,
    ) -> Evaluation<serde_json::Value> {
        self.variation(key, context, default, ValueKind::Json, value::to_json)
    }
}

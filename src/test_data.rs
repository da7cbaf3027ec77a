use std::sync::Arc;

use crate::{
    configuration::{FlagConfig, TryParse},
    configuration_store::ConfigurationStore,
    Client, ClientConfig,
};

/// An in-memory source of flag values, for tests and local development.
///
/// Clients built with [`ClientConfig::data_source`] read straight from it, so updates are visible
/// to them immediately. Clones share the same flag values.
///
/// ```
/// # use featflags::{Context, Evaluator, TestData};
/// let td = TestData::new();
/// td.update("beta", true);
///
/// let client = td.client();
/// let evaluation = client.bool_variation("beta", &Context::new("user"), false);
/// assert_eq!(evaluation.value, true);
/// ```
#[derive(Clone)]
pub struct TestData {
    store: Arc<ConfigurationStore>,
}

impl TestData {
    /// Create a source with no flags. Clients built from it are ready immediately.
    pub fn new() -> Self {
        let store = ConfigurationStore::new();
        store.update_configuration(|_| {});
        TestData {
            store: Arc::new(store),
        }
    }

    /// Set the value of `key` for all contexts.
    pub fn update(&self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        let flag = TryParse::Parsed(FlagConfig {
            value: value.into(),
        });
        self.insert(key.into(), flag);
    }

    /// Store a flag entry as it would appear in the served document. Entries that do not parse
    /// fail evaluation with
    /// [`ConfigurationParseError`](crate::EvaluationError::ConfigurationParseError).
    pub fn update_raw(&self, key: impl Into<String>, entry: serde_json::Value) {
        let flag = serde_json::from_value(entry.clone()).unwrap_or(TryParse::ParseFailed(entry));
        self.insert(key.into(), flag);
    }

    /// Remove `key`, so that evaluating it fails with
    /// [`FlagNotFound`](crate::EvaluationError::FlagNotFound).
    pub fn remove(&self, key: &str) {
        self.store.update_configuration(|configuration| {
            configuration.flags.remove(key);
        });
    }

    /// Build a client reading from this source.
    pub fn client(&self) -> Client {
        Client::from_store(ClientConfig::from_sdk_key("test-data").data_source(self), self.store())
    }

    pub(crate) fn store(&self) -> Arc<ConfigurationStore> {
        self.store.clone()
    }

    fn insert(&self, key: String, flag: TryParse<FlagConfig>) {
        log::trace!(target: "featflags", flag_key = key.as_str(); "updating test data");
        self.store.update_configuration(move |configuration| {
            configuration.flags.insert(key, flag);
        });
    }
}

impl Default for TestData {
    fn default() -> Self {
        TestData::new()
    }
}

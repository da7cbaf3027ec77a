use std::sync::{Arc, RwLock};

use crate::configuration::Configuration;

/// `ConfigurationStore` provides a Sync storage for the flag values document that allows
/// concurrent access for readers and writers.
#[derive(Default)]
pub struct ConfigurationStore {
    configuration: RwLock<Option<Arc<Configuration>>>,
}

impl ConfigurationStore {
    pub fn new() -> Self {
        Self {
            configuration: RwLock::new(None),
        }
    }

    pub fn get_configuration(&self) -> Option<Arc<Configuration>> {
        // Err() is possible only if the lock is poisoned (writer panicked while holding the lock).
        // Treat it as missing configuration rather than crashing the app.
        let configuration = self.configuration.read().ok()?;
        configuration.clone()
    }

    /// Set new configuration, returning the previous one.
    pub fn set_configuration(&self, configuration: Configuration) -> Option<Arc<Configuration>> {
        // Constructing new value before requesting the lock to minimize lock span.
        let new_value = Some(Arc::new(configuration));

        let mut configuration_slot = self.configuration.write().ok()?;
        std::mem::replace(&mut configuration_slot, new_value)
    }

    /// Apply `f` to a copy of the current configuration (or an empty one) and store the result.
    pub(crate) fn update_configuration(&self, f: impl FnOnce(&mut Configuration)) {
        let Ok(mut configuration_slot) = self.configuration.write() else {
            return;
        };
        let mut configuration = configuration_slot
            .as_deref()
            .cloned()
            .unwrap_or_default();
        f(&mut configuration);
        *configuration_slot = Some(Arc::new(configuration));
    }
}

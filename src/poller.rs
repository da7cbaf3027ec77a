use std::{
    sync::{mpsc::RecvTimeoutError, Arc, Condvar, Mutex},
    time::Duration,
};

use rand::{thread_rng, Rng};
use reqwest::{header::AUTHORIZATION, StatusCode, Url};

use crate::{
    configuration::Configuration, configuration_store::ConfigurationStore, Error, Result,
};

pub(crate) struct PollerThreadConfig {
    pub store: Arc<ConfigurationStore>,
    pub base_url: String,
    pub sdk_key: String,
    pub poll_interval: Duration,
}

/// A configuration poller thread.
///
/// Started by [`Client::connect`](crate::Client::connect) and stopped by
/// [`Client::close`](crate::Client::close).
pub(crate) struct PollerThread {
    join_handle: std::thread::JoinHandle<()>,

    /// Used to send a stop command to the poller thread.
    stop_sender: std::sync::mpsc::Sender<()>,

    /// Holds `None` if configuration hasn't been fetched yet. Holds `Some(Ok(()))` if configuration
    /// has been fetched successfully. Holds `Some(Err(...))` if there was an error fetching the
    /// first configuration.
    result: Arc<(Mutex<Option<Result<()>>>, Condvar)>,
}

const FLAGS_ENDPOINT: &str = "/sdk/v1/flags";

pub(crate) const POLL_INTERVAL: Duration = Duration::from_secs(5 * 60);
const POLL_JITTER: Duration = Duration::from_secs(30);
/// Shortest allowed interval between two fetches.
pub(crate) const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

impl PollerThread {
    pub(crate) fn start(config: PollerThreadConfig) -> Result<PollerThread> {
        let (stop_sender, stop_receiver) = std::sync::mpsc::channel::<()>();

        let result = Arc::new((Mutex::new(None), Condvar::new()));

        let join_handle = {
            // Cloning Arc for move into thread
            let result = Arc::clone(&result);
            let update_result = move |value| {
                if let Ok(mut slot) = result.0.lock() {
                    *slot = Some(value);
                }
                result.1.notify_all();
            };

            let client = reqwest::blocking::Client::new();
            let url = Url::parse_with_params(
                &format!("{}{}", config.base_url, FLAGS_ENDPOINT),
                &[("sdkName", "rust"), ("sdkVersion", env!("CARGO_PKG_VERSION"))],
            )
            .map_err(Error::InvalidBaseUrl)?;
            let poll_interval = config.poll_interval.max(MIN_POLL_INTERVAL);
            let poll_jitter = POLL_JITTER.min(poll_interval / 10);

            std::thread::Builder::new()
                .name("featflags-poller".to_owned())
                .spawn(move || {
                    loop {
                        log::debug!(target: "featflags", "fetching new configuration");
                        let response = client
                            .get(url.clone())
                            .header(AUTHORIZATION, &config.sdk_key)
                            .send();
                        match response {
                            Ok(response) => match response.status() {
                                StatusCode::OK => match response.json::<Configuration>() {
                                    Ok(configuration) => {
                                        log::debug!(target: "featflags",
                                                    created_at:? = configuration.created_at();
                                                    "successfully fetched configuration");
                                        config.store.set_configuration(configuration);
                                        update_result(Ok(()));
                                    }
                                    Err(err) => {
                                        log::warn!(target: "featflags", "failed to parse configuration response body: {:?}", err);
                                    }
                                },
                                StatusCode::UNAUTHORIZED => {
                                    log::warn!(target: "featflags", "client is not authorized. Check your SDK key");
                                    update_result(Err(Error::Unauthorized));
                                    // The SDK key is not valid, which is not recoverable. Stop the
                                    // poller thread.
                                    return;
                                }
                                code => {
                                    // Ignore other errors, we'll try another request later.
                                    log::warn!(target: "featflags", "received non-200 response while fetching new configuration: {:?}", code);
                                }
                            },
                            Err(err) => {
                                log::warn!(target: "featflags", "error while fetching new configuration: {:?}", err);
                            }
                        }

                        let timeout = jitter(poll_interval, poll_jitter);
                        match stop_receiver.recv_timeout(timeout) {
                            Err(RecvTimeoutError::Timeout) => {
                                // Timed out. Loop to fetch new configuration.
                            }
                            Ok(()) => {
                                log::debug!(target: "featflags", "poller thread received stop command");
                                return;
                            }
                            Err(RecvTimeoutError::Disconnected) => {
                                // When the other end of channel disconnects, calls to
                                // .recv_timeout() return immediately. Use normal thread sleep in
                                // this case.
                                std::thread::sleep(timeout);
                            }
                        }
                    }
                })?
        };

        Ok(PollerThread {
            join_handle,
            stop_sender,
            result,
        })
    }

    /// Block waiting for the first configuration to get fetched.
    pub(crate) fn wait_for_configuration(&self) -> Result<()> {
        let (lock, condvar) = &*self.result;
        let guard = lock.lock().map_err(|_| Error::PollerThreadPanicked)?;
        let guard = condvar
            .wait_while(guard, |result| result.is_none())
            .map_err(|_| Error::PollerThreadPanicked)?;
        guard.clone().unwrap_or(Ok(()))
    }

    /// Block waiting for the first configuration for at most `timeout`.
    ///
    /// Returns [`Error::InitializationTimeout`] if nothing was fetched in time.
    pub(crate) fn wait_for_configuration_timeout(&self, timeout: Duration) -> Result<()> {
        let (lock, condvar) = &*self.result;
        let guard = lock.lock().map_err(|_| Error::PollerThreadPanicked)?;
        let (guard, _) = condvar
            .wait_timeout_while(guard, timeout, |result| result.is_none())
            .map_err(|_| Error::PollerThreadPanicked)?;
        match &*guard {
            Some(result) => result.clone(),
            None => Err(Error::InitializationTimeout),
        }
    }

    /// Stop the poller thread.
    ///
    /// This function does not wait for the thread to actually stop.
    pub(crate) fn stop(&self) {
        // Error means that the receiver was dropped (thread exited). Ignoring it as there's nothing
        // useful we can do.
        let _ = self.stop_sender.send(());
    }

    /// Stop the poller thread and block waiting for it to exit.
    pub(crate) fn shutdown(self) -> Result<()> {
        // Send stop signal in case it wasn't sent before.
        self.stop();

        // Error means that the thread has panicked and there's nothing useful we can do in that
        // case.
        self.join_handle
            .join()
            .map_err(|_| Error::PollerThreadPanicked)?;

        Ok(())
    }
}

/// Apply a random jitter to `interval`.
fn jitter(interval: Duration, jitter: Duration) -> Duration {
    if jitter.is_zero() {
        return interval;
    }
    interval + thread_rng().gen_range(Duration::ZERO..jitter)
}

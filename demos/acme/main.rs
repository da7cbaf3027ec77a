use std::time::Duration;

use featflags::{Client, ClientConfig, Context};

mod feature_flags;

use feature_flags::FeatureFlags;

pub fn main() {
    // Configure env_logger to see flag evaluation logs.
    env_logger::Builder::from_env(env_logger::Env::new().default_filter_or("info")).init();

    let Ok(sdk_key) = std::env::var("FEATFLAGS_SDK_KEY") else {
        log::error!("FEATFLAGS_SDK_KEY environment variable is required");
        std::process::exit(1);
    };

    let mut config = ClientConfig::from_sdk_key(sdk_key);
    if let Ok(base_url) = std::env::var("FEATFLAGS_BASE_URL") {
        config = config.base_url(base_url);
    }

    let client = match Client::connect(config, Duration::from_secs(5)) {
        Ok(client) => client,
        Err(err) => {
            log::error!(error:display = err; "failed to create flag client");
            std::process::exit(1);
        }
    };

    let flags = FeatureFlags::new();
    report(&flags, &client, &Context::new("example-user"));

    if let Err(err) = client.close() {
        log::error!(error:display = err; "failed to close flag client");
    }
}

fn report(flags: &FeatureFlags, client: &Client, context: &Context) {
    let software_version = flags.software_version.evaluate(client, context);
    log::info!(software_version = software_version.value; "evaluated flag");
    if let Some(err) = software_version.error {
        log::error!(error:display = err; "failed to evaluate software version");
    }

    let motd = flags.motd.evaluate(client, context);
    log::info!(motd = motd.value.as_str(); "evaluated flag");

    let beta = flags.beta.evaluate(client, context);
    log::info!(beta = beta.value; "evaluated flag");

    let metadata = flags.metadata.evaluate(client, context);
    log::info!(metadata:serde = metadata.value; "evaluated flag");
}

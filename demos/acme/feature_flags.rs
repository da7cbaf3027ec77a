use featflags::{BoolFlag, Factory, FloatFlag, JsonFlag, StringFlag};

/// Every flag the service reads, declared once at startup.
pub struct FeatureFlags {
    pub software_version: FloatFlag,
    pub motd: StringFlag,
    pub beta: BoolFlag,
    pub metadata: JsonFlag,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        FeatureFlags::new()
    }
}

impl FeatureFlags {
    pub fn new() -> Self {
        let factory = Factory::new().on_error(|err| {
            log::warn!(error:display = err; "flag evaluation failed");
        });
        FeatureFlags {
            software_version: factory.float_flag("software-version", 0.0),
            motd: factory.string_flag("motd", ""),
            beta: factory.bool_flag("beta", false),
            metadata: factory
                .json_flag("metadata", serde_json::json!({}))
                .on_error(|err| {
                    log::error!(error:display = err; "metadata evaluation is really important, and it failed");
                }),
        }
    }
}

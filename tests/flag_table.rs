use std::sync::{Arc, Mutex};

use featflags::{
    BoolFlag, Context, Evaluation, EvaluationError, Factory, FloatFlag, JsonFlag, StringFlag,
    TestData,
};
use serde_json::json;

struct FeatureFlags {
    software_version: FloatFlag,
    motd: StringFlag,
    beta: BoolFlag,
    metadata: JsonFlag,
}

struct Reports {
    warnings: Arc<Mutex<Vec<EvaluationError>>>,
    errors: Arc<Mutex<Vec<EvaluationError>>>,
}

fn feature_flags() -> (FeatureFlags, Reports) {
    let reports = Reports {
        warnings: Arc::default(),
        errors: Arc::default(),
    };
    let factory = Factory::new().on_error({
        let warnings = reports.warnings.clone();
        move |err| warnings.lock().unwrap().push(err)
    });
    let flags = FeatureFlags {
        software_version: factory.float_flag("software-version", 0.0),
        motd: factory.string_flag("motd", ""),
        beta: factory.bool_flag("beta", false),
        metadata: factory.json_flag("metadata", json!({})).on_error({
            let errors = reports.errors.clone();
            move |err| errors.lock().unwrap().push(err)
        }),
    };
    (flags, reports)
}

#[test]
fn evaluates_configured_flags() {
    let td = TestData::new();
    td.update("software-version", 1.4);
    td.update("motd", "Welcome back!");
    td.update("beta", true);
    td.update("metadata", json!({"key": "val"}));
    let client = td.client();
    let context = Context::new("example-user");

    let (flags, reports) = feature_flags();

    assert_eq!(
        flags.software_version.evaluate(&client, &context),
        Evaluation::ok(1.4)
    );
    assert_eq!(
        flags.motd.evaluate(&client, &context),
        Evaluation::ok("Welcome back!".to_owned())
    );
    assert_eq!(flags.beta.evaluate(&client, &context), Evaluation::ok(true));
    assert_eq!(
        flags.metadata.evaluate(&client, &context),
        Evaluation::ok(json!({"key": "val"}))
    );

    assert!(reports.warnings.lock().unwrap().is_empty());
    assert!(reports.errors.lock().unwrap().is_empty());
}

#[test]
fn missing_flags_fall_back_and_report_to_the_right_handler() {
    let td = TestData::new();
    let client = td.client();
    let context = Context::new("example-user");

    let (flags, reports) = feature_flags();

    assert_eq!(
        flags.software_version.evaluate(&client, &context),
        Evaluation::fallback(0.0, EvaluationError::FlagNotFound)
    );
    assert_eq!(
        flags.beta.evaluate(&client, &context),
        Evaluation::fallback(false, EvaluationError::FlagNotFound)
    );
    assert_eq!(
        flags.metadata.evaluate(&client, &context),
        Evaluation::fallback(json!({}), EvaluationError::FlagNotFound)
    );

    assert_eq!(reports.warnings.lock().unwrap().len(), 2);
    assert_eq!(
        *reports.errors.lock().unwrap(),
        vec![EvaluationError::FlagNotFound]
    );
}

#[test]
fn flag_values_follow_test_data_updates() {
    let td = TestData::new();
    let client = td.client();
    let context = Context::new("example-user").with_attribute("plan", "pro");
    let (flags, _reports) = feature_flags();

    td.update("motd", "first");
    assert_eq!(flags.motd.evaluate(&client, &context).value, "first");

    td.update("motd", "second");
    assert_eq!(flags.motd.evaluate(&client, &context).value, "second");
}

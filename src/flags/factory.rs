use std::sync::Arc;

use crate::EvaluationError;

use super::{
    BoolFlag, ErrorHandler, EvalFn, Flag, FlagValue, FloatFlag, IntFlag, JsonFlag, StringFlag,
};

/// Creates typed [`Flag`]s that share a default error handler.
///
/// Configuring a factory never changes it in place: [`Factory::on_error`] returns a new factory,
/// and flags capture the handler that was current when they were created.
///
/// # Examples
/// ```
/// # use featflags::Factory;
/// let factory = Factory::new().on_error(|err| log::warn!("flag evaluation failed: {err}"));
///
/// let beta = factory.bool_flag("beta", false);
/// let motd = factory.string_flag("motd", "");
/// ```
#[derive(Clone, Default)]
pub struct Factory {
    on_error: Option<ErrorHandler>,
}

impl Factory {
    /// Create a factory without a default error handler.
    pub fn new() -> Self {
        Factory { on_error: None }
    }

    /// Return a copy of this factory whose flags report evaluation failures to `handler`.
    ///
    /// Flags created before this call are not affected.
    pub fn on_error(&self, handler: impl Fn(EvaluationError) + Send + Sync + 'static) -> Self {
        Factory {
            on_error: Some(Arc::new(handler)),
        }
    }

    /// Create a flag of any [`FlagValue`] type.
    pub fn flag<T: FlagValue>(&self, key: impl Into<String>, default_value: T) -> Flag<T> {
        self.custom_flag(key, default_value, T::variation)
    }

    /// Create a flag evaluated by a custom function.
    ///
    /// Useful for value types that the engine does not support directly: the function can call
    /// one of the engine's variations and convert the result.
    pub fn custom_flag<T: Clone>(
        &self,
        key: impl Into<String>,
        default_value: T,
        eval_fn: EvalFn<T>,
    ) -> Flag<T> {
        Flag::new(key.into(), default_value, eval_fn, self.on_error.clone())
    }

    /// Create a boolean flag.
    pub fn bool_flag(&self, key: impl Into<String>, default_value: bool) -> BoolFlag {
        self.flag(key, default_value)
    }

    /// Create a string flag.
    pub fn string_flag(
        &self,
        key: impl Into<String>,
        default_value: impl Into<String>,
    ) -> StringFlag {
        self.flag(key, default_value.into())
    }

    /// Create an integer flag.
    pub fn int_flag(&self, key: impl Into<String>, default_value: i64) -> IntFlag {
        self.flag(key, default_value)
    }

    /// Create a floating-point flag.
    pub fn float_flag(&self, key: impl Into<String>, default_value: f64) -> FloatFlag {
        self.flag(key, default_value)
    }

    /// Create a JSON flag.
    pub fn json_flag(&self, key: impl Into<String>, default_value: serde_json::Value) -> JsonFlag {
        self.flag(key, default_value)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use crate::{Client, Context, Evaluation, EvaluationError, TestData};

    use super::Factory;

    struct Harness {
        td: TestData,
        client: Client,
        context: Context,
    }

    fn setup() -> Harness {
        let td = TestData::new();
        let client = td.client();
        Harness {
            td,
            client,
            context: Context::new("test-user"),
        }
    }

    fn capture() -> (
        Arc<Mutex<Option<EvaluationError>>>,
        impl Fn(EvaluationError) + Send + Sync,
    ) {
        let captured = Arc::new(Mutex::new(None));
        let handler = {
            let captured = captured.clone();
            move |err: EvaluationError| {
                *captured.lock().unwrap() = Some(err);
            }
        };
        (captured, handler)
    }

    #[test]
    fn bool_flag() {
        let h = setup();
        let f = Factory::new();

        h.td.update("my-bool", true);
        let result = f.bool_flag("my-bool", false).evaluate(&h.client, &h.context);
        assert_eq!(result, Evaluation::ok(true));

        h.td.update("my-bool", false);
        let result = f.bool_flag("my-bool", true).evaluate(&h.client, &h.context);
        assert_eq!(result, Evaluation::ok(false));

        let result = f.bool_flag("nonexistent", true).evaluate(&h.client, &h.context);
        assert!(result.value);
        assert_eq!(result.error, Some(EvaluationError::FlagNotFound));
    }

    #[test]
    fn string_flag() {
        let h = setup();
        let f = Factory::new();

        h.td.update("my-string", "hello");
        let result = f
            .string_flag("my-string", "default")
            .evaluate(&h.client, &h.context);
        assert_eq!(result, Evaluation::ok("hello".to_owned()));

        let result = f
            .string_flag("nonexistent-string", "fallback")
            .evaluate(&h.client, &h.context);
        assert_eq!(result.value, "fallback");
        assert!(result.error.is_some());
    }

    #[test]
    fn int_flag() {
        let h = setup();
        let f = Factory::new();

        h.td.update("my-int", 42);
        let result = f.int_flag("my-int", 0).evaluate(&h.client, &h.context);
        assert_eq!(result, Evaluation::ok(42));

        let result = f.int_flag("nonexistent-int", 99).evaluate(&h.client, &h.context);
        assert_eq!(result.value, 99);
        assert!(result.error.is_some());
    }

    #[test]
    fn float_flag() {
        let h = setup();
        let f = Factory::new();

        h.td.update("my-float", 3.5);
        let result = f.float_flag("my-float", 0.0).evaluate(&h.client, &h.context);
        assert_eq!(result, Evaluation::ok(3.5));

        let result = f
            .float_flag("nonexistent-float", 2.72)
            .evaluate(&h.client, &h.context);
        assert_eq!(result.value, 2.72);
        assert!(result.error.is_some());
    }

    #[test]
    fn json_flag() {
        let h = setup();
        let f = Factory::new();

        let expected = json!({"key": "val"});
        h.td.update("my-json", expected.clone());
        let result = f.json_flag("my-json", json!(null)).evaluate(&h.client, &h.context);
        assert_eq!(result, Evaluation::ok(expected));

        let default = json!("fallback");
        let result = f
            .json_flag("nonexistent-json", default.clone())
            .evaluate(&h.client, &h.context);
        assert_eq!(result.value, default);
        assert!(result.error.is_some());
    }

    #[test]
    fn default_returned_when_key_missing() {
        let h = setup();
        let f = Factory::new();

        assert_eq!(
            f.bool_flag("missing-bool", true).evaluate(&h.client, &h.context),
            Evaluation::fallback(true, EvaluationError::FlagNotFound)
        );
        assert_eq!(
            f.string_flag("missing-string", "def").evaluate(&h.client, &h.context),
            Evaluation::fallback("def".to_owned(), EvaluationError::FlagNotFound)
        );
        assert_eq!(
            f.int_flag("missing-int", 7).evaluate(&h.client, &h.context),
            Evaluation::fallback(7, EvaluationError::FlagNotFound)
        );
        assert_eq!(
            f.float_flag("missing-float", 1.5).evaluate(&h.client, &h.context),
            Evaluation::fallback(1.5, EvaluationError::FlagNotFound)
        );
        assert_eq!(
            f.json_flag("missing-json", json!("default-json"))
                .evaluate(&h.client, &h.context),
            Evaluation::fallback(json!("default-json"), EvaluationError::FlagNotFound)
        );
    }

    #[test]
    fn wrong_type_returns_default() {
        let h = setup();
        h.td.update("my-string", "hello");

        let result = Factory::new()
            .int_flag("my-string", 5)
            .evaluate(&h.client, &h.context);
        assert_eq!(result.value, 5);
        assert!(matches!(
            result.error,
            Some(EvaluationError::WrongType { .. })
        ));
    }

    #[test]
    fn repeated_evaluation_is_idempotent() {
        let h = setup();
        h.td.update("my-json", json!({"nested": [1, 2, 3]}));
        let flag = Factory::new().json_flag("my-json", json!({}));

        let first = flag.evaluate(&h.client, &h.context);
        let second = flag.evaluate(&h.client, &h.context);
        assert_eq!(first, second);

        let missing = Factory::new().bool_flag("missing", false);
        assert_eq!(
            missing.evaluate(&h.client, &h.context),
            missing.evaluate(&h.client, &h.context)
        );
    }

    #[test]
    fn flag_on_error_called_on_evaluation_error() {
        let h = setup();
        let (captured, handler) = capture();
        let flag = Factory::new().bool_flag("nonexistent", false).on_error(handler);

        let result = flag.evaluate(&h.client, &h.context);
        assert!(!result.value);
        assert!(result.error.is_some());
        assert_eq!(*captured.lock().unwrap(), result.error);
    }

    #[test]
    fn flag_on_error_not_called_on_success() {
        let h = setup();
        h.td.update("exists", true);
        let (captured, handler) = capture();
        let flag = Factory::new().bool_flag("exists", false).on_error(handler);

        let result = flag.evaluate(&h.client, &h.context);
        assert_eq!(result, Evaluation::ok(true));
        assert_eq!(*captured.lock().unwrap(), None);
    }

    #[test]
    fn factory_on_error_propagated_to_flags() {
        let h = setup();
        let (captured, handler) = capture();
        let f = Factory::new().on_error(handler);

        let result = f.bool_flag("nonexistent", false).evaluate(&h.client, &h.context);
        assert!(result.error.is_some());
        assert_eq!(*captured.lock().unwrap(), result.error);
    }

    #[test]
    fn flag_on_error_overrides_factory_handler() {
        let h = setup();
        let (factory_captured, factory_handler) = capture();
        let (flag_captured, flag_handler) = capture();

        let flag = Factory::new()
            .on_error(factory_handler)
            .bool_flag("nonexistent", false)
            .on_error(flag_handler);

        let result = flag.evaluate(&h.client, &h.context);
        assert!(result.error.is_some());
        assert_eq!(*factory_captured.lock().unwrap(), None);
        assert_eq!(*flag_captured.lock().unwrap(), result.error);
    }

    #[test]
    fn factory_on_error_does_not_affect_existing_flags() {
        let h = setup();
        let (captured, handler) = capture();

        let factory = Factory::new();
        let before = factory.bool_flag("nonexistent", false);
        let configured = factory.on_error(handler);
        let after = configured.bool_flag("nonexistent", false);
        let from_original = factory.bool_flag("nonexistent", false);

        before.evaluate(&h.client, &h.context);
        from_original.evaluate(&h.client, &h.context);
        assert_eq!(*captured.lock().unwrap(), None);

        after.evaluate(&h.client, &h.context);
        assert_eq!(
            *captured.lock().unwrap(),
            Some(EvaluationError::FlagNotFound)
        );
    }

    #[test]
    fn generic_flag_matches_typed_constructor() {
        let h = setup();
        h.td.update("my-int", 42);
        let f = Factory::new();

        assert_eq!(
            f.flag::<i64>("my-int", 0).evaluate(&h.client, &h.context),
            f.int_flag("my-int", 0).evaluate(&h.client, &h.context)
        );
        assert_eq!(f.flag("my-int", 1_i64).key(), "my-int");
        assert_eq!(f.flag("my-int", 1_i64).default_value(), &1);
    }
}

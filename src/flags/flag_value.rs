use crate::{Context, Evaluation, Evaluator};

/// A value type that flags can be declared with.
///
/// Each implementation binds the type to the matching typed variation of an [`Evaluator`].
pub trait FlagValue: Clone {
    /// Evaluate `key` for `context` through the engine, falling back to `default`.
    fn variation(
        engine: &dyn Evaluator,
        key: &str,
        context: &Context,
        default: Self,
    ) -> Evaluation<Self>;
}

impl FlagValue for bool {
    fn variation(
        engine: &dyn Evaluator,
        key: &str,
        context: &Context,
        default: bool,
    ) -> Evaluation<bool> {
        engine.bool_variation(key, context, default)
    }
}

impl FlagValue for String {
    fn variation(
        engine: &dyn Evaluator,
        key: &str,
        context: &Context,
        default: String,
    ) -> Evaluation<String> {
        engine.string_variation(key, context, default)
    }
}

impl FlagValue for i64 {
    fn variation(
        engine: &dyn Evaluator,
        key: &str,
        context: &Context,
        default: i64,
    ) -> Evaluation<i64> {
        engine.int_variation(key, context, default)
    }
}

impl FlagValue for f64 {
    fn variation(
        engine: &dyn Evaluator,
        key: &str,
        context: &Context,
        default: f64,
    ) -> Evaluation<f64> {
        engine.float_variation(key, context, default)
    }
}

impl FlagValue for serde_json::Value {
    fn variation(
        engine: &dyn Evaluator,
        key: &str,
        context: &Context,
        default: serde_json::Value,
    ) -> Evaluation<serde_json::Value> {
        engine.json_variation(key, context, default)
    }
}

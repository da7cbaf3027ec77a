use crate::{Context, EvaluationError};

/// Outcome of a single flag evaluation.
///
/// `value` always holds something usable: when `error` is set, it is the default value the
/// evaluation was requested with.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<T> {
    /// Evaluated value, or the default on failure.
    pub value: T,
    /// Why the evaluation failed, if it did.
    pub error: Option<EvaluationError>,
}

impl<T> Evaluation<T> {
    /// A successful evaluation.
    pub fn ok(value: T) -> Self {
        Evaluation { value, error: None }
    }

    /// A failed evaluation falling back to `default`.
    pub fn fallback(default: T, error: EvaluationError) -> Self {
        Evaluation {
            value: default,
            error: Some(error),
        }
    }

    /// Returns `true` if the evaluation succeeded.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Convert into a `Result`, dropping the fallback value on failure.
    pub fn into_result(self) -> std::result::Result<T, EvaluationError> {
        match self.error {
            None => Ok(self.value),
            Some(err) => Err(err),
        }
    }
}

/// A flag evaluation engine.
///
/// Implementations resolve a flag key for a context into a typed value. When a flag cannot be
/// resolved, implementations must return the supplied `default` along with the error.
///
/// [`Client`](crate::Client) is the engine shipped with this crate.
pub trait Evaluator {
    /// Evaluate a boolean flag.
    fn bool_variation(&self, key: &str, context: &Context, default: bool) -> Evaluation<bool>;

    /// Evaluate a string flag.
    fn string_variation(&self, key: &str, context: &Context, default: String)
        -> Evaluation<String>;

    /// Evaluate an integer flag.
    fn int_variation(&self, key: &str, context: &Context, default: i64) -> Evaluation<i64>;

    /// Evaluate a floating-point flag.
    fn float_variation(&self, key: &str, context: &Context, default: f64) -> Evaluation<f64>;

    /// Evaluate a flag holding arbitrary JSON.
    fn json_variation(
        &self,
        key: &str,
        context: &Context,
        default: serde_json::Value,
    ) -> Evaluation<serde_json::Value>;
}

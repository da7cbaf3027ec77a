use std::{fmt, sync::Arc};

use crate::{Context, Evaluation, EvaluationError, Evaluator};

use super::ErrorHandler;

/// Evaluation function bound to a [`Flag`].
///
/// Receives the engine, the flag key, the context and the flag's default value. Must return the
/// default along with the error when evaluation fails.
pub type EvalFn<T> = fn(&dyn Evaluator, &str, &Context, T) -> Evaluation<T>;

/// A boolean flag.
pub type BoolFlag = Flag<bool>;
/// A string flag.
pub type StringFlag = Flag<String>;
/// An integer flag.
pub type IntFlag = Flag<i64>;
/// A floating-point flag.
pub type FloatFlag = Flag<f64>;
/// A flag holding arbitrary JSON.
pub type JsonFlag = Flag<serde_json::Value>;

/// A typed feature flag: a key, a default value and the function evaluating it.
///
/// Flags are created by a [`Factory`](crate::Factory) and are immutable afterwards.
/// [`Flag::on_error`] returns a new flag instead of modifying the receiver.
#[derive(Clone)]
pub struct Flag<T> {
    key: String,
    default_value: T,
    eval_fn: EvalFn<T>,
    on_error: Option<ErrorHandler>,
}

impl<T: Clone> Flag<T> {
    pub(crate) fn new(
        key: String,
        default_value: T,
        eval_fn: EvalFn<T>,
        on_error: Option<ErrorHandler>,
    ) -> Self {
        Flag {
            key,
            default_value,
            eval_fn,
            on_error,
        }
    }

    /// Flag key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value the flag falls back to when evaluation fails.
    pub fn default_value(&self) -> &T {
        &self.default_value
    }

    /// Return a copy of this flag that reports evaluation failures to `handler`.
    ///
    /// The handler replaces whatever handler the flag inherited from its factory. `self` is left
    /// untouched.
    ///
    /// ```
    /// # use featflags::Factory;
    /// let flag = Factory::new()
    ///     .bool_flag("beta", false)
    ///     .on_error(|err| eprintln!("beta failed: {err}"));
    /// ```
    pub fn on_error(&self, handler: impl Fn(EvaluationError) + Send + Sync + 'static) -> Self {
        let mut flag = self.clone();
        flag.on_error = Some(Arc::new(handler));
        flag
    }

    /// Evaluate the flag for `context`.
    ///
    /// Never fails: if the engine reports an error, the returned [`Evaluation`] carries it next to
    /// the fallback value and the attached error handler (if any) is called once before returning.
    pub fn evaluate(&self, engine: &dyn Evaluator, context: &Context) -> Evaluation<T> {
        let evaluation = (self.eval_fn)(engine, &self.key, context, self.default_value.clone());
        if let (Some(error), Some(handler)) = (evaluation.error, &self.on_error) {
            handler(error);
        }
        evaluation
    }
}

impl<T: fmt::Debug> fmt::Debug for Flag<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag")
            .field("key", &self.key)
            .field("default_value", &self.default_value)
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

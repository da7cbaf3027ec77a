use std::sync::Arc;

use crate::EvaluationError;

/// Callback receiving evaluation failures of the flags it is attached to.
///
/// A handler attached to a [`Factory`](crate::Factory) is shared by every flag the factory creates,
/// so it may be invoked concurrently when those flags are evaluated from several threads.
pub type ErrorHandler = Arc<dyn Fn(EvaluationError) + Send + Sync>;

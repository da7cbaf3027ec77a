//! Typed flag descriptors and the factory producing them.

mod error_handler;
mod factory;
mod flag;
mod flag_value;

pub use error_handler::ErrorHandler;
pub use factory::Factory;
pub use flag::{BoolFlag, EvalFn, Flag, FloatFlag, IntFlag, JsonFlag, StringFlag};
pub use flag_value::FlagValue;

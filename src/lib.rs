//! Typed feature flags over a pluggable flag evaluation engine.
//!
//! # Overview
//!
//! Flags are declared once, at startup, through a [`Factory`]. Each [`Flag`] knows its key, its
//! default value and how to evaluate itself. Evaluation goes through an engine implementing
//! [`Evaluator`] and always produces a usable value: when the engine cannot resolve a flag, the
//! returned [`Evaluation`] carries the default value together with an [`EvaluationError`].
//!
//! ```
//! # use featflags::{Context, Factory, TestData};
//! let factory = Factory::new().on_error(|err| log::warn!("flag evaluation failed: {err}"));
//! let beta = factory.bool_flag("beta", false);
//! let motd = factory.string_flag("motd", "");
//!
//! let td = TestData::new();
//! td.update("beta", true);
//! let client = td.client();
//!
//! let context = Context::new("example-user");
//! assert_eq!(beta.evaluate(&client, &context).value, true);
//! assert_eq!(motd.evaluate(&client, &context).value, "");
//! ```
//!
//! # Error handlers
//!
//! A handler attached with [`Factory::on_error`] is inherited by every flag created afterwards
//! from the returned factory. [`Flag::on_error`] overrides it for a single flag. Both return new
//! values and leave the receiver untouched. Handlers are called once per failed evaluation and
//! never on success.
//!
//! # Engine
//!
//! [`Client`] is the bundled engine: it polls a flag values document from the server with a
//! background thread. Use [`TestData`] to serve flag values from memory in tests.
//!
//! # Logging
//!
//! The package uses the [`log`](https://docs.rs/log/latest/log/) crate for logging messages,
//! under the `featflags` target. Flag evaluation itself does not log; the [`Client`] logs
//! evaluation outcomes at trace and debug levels.

#![warn(rustdoc::missing_crate_level_docs)]
#![warn(missing_docs)]

mod client;
mod config;
mod configuration;
mod configuration_store;
mod context;
mod error;
mod evaluator;
mod flags;
mod poller;
mod test_data;
mod value;

pub use client::Client;
pub use config::ClientConfig;
pub use context::{AttributeValue, Attributes, Context};
pub use error::{Error, EvaluationError, Result};
pub use evaluator::{Evaluation, Evaluator};
pub use flags::{
    BoolFlag, ErrorHandler, EvalFn, Factory, Flag, FlagValue, FloatFlag, IntFlag, JsonFlag,
    StringFlag,
};
pub use test_data::TestData;
pub use value::ValueKind;

use std::collections::HashMap;

use derive_more::From;
use serde::{Deserialize, Serialize};

/// Attributes attached to an evaluation [`Context`].
pub type Attributes = HashMap<String, AttributeValue>;

/// Value of a single context attribute.
#[derive(Debug, Serialize, Deserialize, PartialEq, PartialOrd, From, Clone)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A string attribute.
    String(String),
    /// A numeric attribute.
    Number(f64),
    /// A boolean attribute.
    Boolean(bool),
    /// An explicit null.
    Null,
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

/// The identity a flag is evaluated for, e.g. a user or a session.
///
/// Contexts are opaque to [`Flag`](crate::Flag): they are handed to the engine unchanged.
///
/// [`Client`](crate::Client) only looks at the key. Attributes are carried for custom
/// [`Evaluator`](crate::Evaluator) implementations that target on them.
///
/// ```
/// # use featflags::Context;
/// let context = Context::new("example-user").with_attribute("plan", "pro");
/// assert_eq!(context.key(), "example-user");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    key: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    attributes: Attributes,
}

impl Context {
    /// Create a context with the given key and no attributes.
    pub fn new(key: impl Into<String>) -> Self {
        Context {
            key: key.into(),
            attributes: HashMap::new(),
        }
    }

    /// Return a copy of this context with an attribute added (or replaced).
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Unique key of the context.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Attributes of the context.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// A context is valid when its key is non-empty.
    pub fn is_valid(&self) -> bool {
        !self.key.is_empty()
    }
}

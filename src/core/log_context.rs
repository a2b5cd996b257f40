//! Request-scoped context values
//!
//! This module provides:
//! - `Context`: an immutable, parent-linked bag of typed values carried along
//!   a request
//! - `new_context` / `from_context`: the request id accessors used by the
//!   built-in middleware

use std::any::Any;
use std::fmt;
use std::sync::Arc;

const REQUEST_ID_KEY: &str = "request-id";

struct Node {
    key: &'static str,
    value: Arc<dyn Any + Send + Sync>,
    parent: Option<Arc<Node>>,
}

/// Immutable request-scoped values.
///
/// Deriving a context never changes the parent: [`Context::with_value`]
/// returns a child that shadows the key and shares everything else. The
/// default value is the empty root context.
///
/// # Example
///
/// ```
/// use logger_facade::core::Context;
///
/// let root = Context::background();
/// let ctx = root.with_value("tenant", 7u32);
///
/// assert_eq!(ctx.value::<u32>("tenant"), Some(&7));
/// assert_eq!(root.value::<u32>("tenant"), None);
/// ```
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Node>>,
}

impl Context {
    /// The empty root context.
    pub fn background() -> Self {
        Self::default()
    }

    /// Return a child context carrying `value` under `key`.
    #[must_use]
    pub fn with_value<T>(&self, key: &'static str, value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self {
            head: Some(Arc::new(Node {
                key,
                value: Arc::new(value),
                parent: self.head.clone(),
            })),
        }
    }

    /// Look up the nearest value stored under `key`.
    ///
    /// Returns `None` when the key is absent or when the nearest value has a
    /// different type.
    pub fn value<T: Any>(&self, key: &str) -> Option<&T> {
        let mut node = self.head.as_deref();
        while let Some(n) = node {
            if n.key == key {
                return n.value.downcast_ref::<T>();
            }
            node = n.parent.as_deref();
        }
        None
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys = Vec::new();
        let mut node = self.head.as_deref();
        while let Some(n) = node {
            keys.push(n.key);
            node = n.parent.as_deref();
        }
        f.debug_struct("Context").field("keys", &keys).finish()
    }
}

/// Return a child of `parent` carrying the request id.
pub fn new_context(parent: &Context, request_id: impl Into<String>) -> Context {
    parent.with_value(REQUEST_ID_KEY, request_id.into())
}

/// Return the request id stored in `ctx`, or an empty string.
pub fn from_context(ctx: &Context) -> String {
    ctx.value::<String>(REQUEST_ID_KEY)
        .cloned()
        .unwrap_or_default()
}

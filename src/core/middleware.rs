//! Context middlewares
//!
//! A middleware inspects a request [`Context`] and returns fields to bind on
//! the logger, as a flat sequence of alternating keys and values.

use super::field_value::FieldValue;
use super::log_context::{from_context, Context};
use std::sync::Arc;

/// Extracts log fields from a request context.
pub type CtxMiddleware = Arc<dyn Fn(&Context) -> Vec<FieldValue> + Send + Sync>;

/// Field key under which the request id is bound.
pub const REQUEST_ID_FIELD: &str = "request_id";

/// Bind `request_id` when the context carries a non-empty request id.
pub fn request_id_middleware(ctx: &Context) -> Vec<FieldValue> {
    let request_id = from_context(ctx);
    if request_id.is_empty() {
        return Vec::new();
    }
    vec![REQUEST_ID_FIELD.into(), request_id.into()]
}

/// Middlewares appended to every logger unless the configuration opts out.
pub fn default_middlewares() -> Vec<CtxMiddleware> {
    vec![Arc::new(request_id_middleware)]
}

/// Wrap a closure as a [`CtxMiddleware`].
pub fn middleware<F>(f: F) -> CtxMiddleware
where
    F: Fn(&Context) -> Vec<FieldValue> + Send + Sync + 'static,
{
    Arc::new(f)
}

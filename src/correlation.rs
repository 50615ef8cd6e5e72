//! Correlation-id header, generator, and force-setter.

use http::{HeaderName, HeaderValue, Request};
use uuid::Uuid;

/// The header every traced request carries: `x-correlation-id`.
///
/// Exposed so extractors, clients, and downstream services can agree on the
/// name without spelling it twice.
pub static CORRELATION_HEADER: HeaderName = HeaderName::from_static("x-correlation-id");

/// Generates a fresh correlation id: a UUID v4 with the dashes removed —
/// 32 lowercase hex characters.
///
/// Dashes are stripped because the downstream log pipeline (logstash) does
/// not tolerate them inside the id field. The v4 layout survives: the 13th
/// character is always `4`, the 17th one of `8 9 a b`.
///
/// This is a correlation token, not a security token. Uniqueness is
/// best-effort; unpredictability is not a requirement.
///
/// # Example
///
/// ```rust
/// let id = traza::correlation_id();
/// assert_eq!(id.len(), 32);
/// assert_eq!(id.as_bytes()[12], b'4');
/// ```
pub fn correlation_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Forces `id` onto `request`'s headers, overwriting any existing value.
///
/// For callers that already hold an id from an upstream hop and want to
/// propagate it rather than let the middleware mint a new one. An `id` that
/// is not a legal header value is silently ignored — instrumentation never
/// breaks the request it instruments.
pub fn extend<B>(request: &mut Request<B>, id: &str) {
    if let Ok(value) = HeaderValue::from_str(id) {
        request.headers_mut().insert(CORRELATION_HEADER.clone(), value);
    }
}

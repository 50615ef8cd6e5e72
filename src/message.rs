//! Log-line formatting.
//!
//! One request event, one line, fixed field order:
//!
//! ```text
//! <date> <correlation-id> <component> heroku <path> <method> <direction>\n
//! ```
//!
//! Every field degrades to a placeholder rather than an error: a missing
//! date renders as `no-date no-time`, a missing id as `no-correlation-id`,
//! a missing component as `no-component`. Downstream parsers key on field
//! position, so a line always has all seven fields or is empty.

use chrono::{DateTime, Utc};
use http::Request;

use crate::correlation::CORRELATION_HEADER;

/// `DD-MM-YYYY HH:mm:ss.SSS`, zero-padded, millisecond precision.
const DATE_FORMAT: &str = "%d-%m-%Y %H:%M:%S%.3f";

// ── Direction ─────────────────────────────────────────────────────────────────

/// Whether a line marks request arrival or request completion.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Direction {
    #[default]
    Incoming,
    Outgoing,
}

impl Direction {
    /// Returns the wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Incoming => "incoming",
            Self::Outgoing => "outgoing",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── RequestView ───────────────────────────────────────────────────────────────

/// The three request fields the formatter reads, borrowed.
///
/// Converts from any `&http::Request<B>`; the middleware also builds one
/// from captured strings after the request itself has moved on.
#[derive(Clone, Copy, Debug)]
pub struct RequestView<'a> {
    pub path: &'a str,
    pub method: &'a str,
    pub correlation_id: Option<&'a str>,
}

impl<'a, B> From<&'a Request<B>> for RequestView<'a> {
    fn from(req: &'a Request<B>) -> Self {
        Self {
            path: req.uri().path(),
            method: req.method().as_str(),
            correlation_id: req
                .headers()
                .get(&CORRELATION_HEADER)
                .and_then(|v| v.to_str().ok()),
        }
    }
}

// ── MessageOptions ────────────────────────────────────────────────────────────

/// Inputs to [`message`]. All fields optional; `Default` is all-absent.
#[derive(Clone, Copy, Debug, Default)]
pub struct MessageOptions<'a> {
    pub date: Option<DateTime<Utc>>,
    pub component: Option<&'a str>,
    pub req: Option<RequestView<'a>>,
    pub direction: Option<Direction>,
}

// ── message ───────────────────────────────────────────────────────────────────

/// Renders one newline-terminated log line. Pure string building, no side
/// effects.
///
/// Without a request there is nothing worth saying: `req: None` (which is
/// what [`MessageOptions::default()`] gives you) returns an empty string.
///
/// The literal `heroku` token is a vestigial deployment-platform tag,
/// preserved verbatim because position-keyed log parsers expect it.
///
/// # Example
///
/// ```rust
/// use traza::{MessageOptions, RequestView, message};
///
/// let line = message(&MessageOptions {
///     req: Some(RequestView { path: "/api", method: "GET", correlation_id: None }),
///     ..Default::default()
/// });
/// assert_eq!(line, "no-date no-time no-correlation-id no-component heroku /api GET incoming\n");
///
/// assert_eq!(message(&MessageOptions::default()), "");
/// ```
pub fn message(options: &MessageOptions<'_>) -> String {
    let Some(req) = options.req else {
        return String::new();
    };

    let date = match options.date {
        Some(date) => date.format(DATE_FORMAT).to_string(),
        None => "no-date no-time".to_owned(),
    };
    let id = req.correlation_id.unwrap_or("no-correlation-id");
    let component = options.component.unwrap_or("no-component");
    let direction = options.direction.unwrap_or_default();

    format!(
        "{date} {id} {component} heroku {path} {method} {direction}\n",
        path = req.path,
        method = req.method,
    )
}

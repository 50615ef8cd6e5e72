//! # traza
//!
//! Correlation-id tracing middleware for [`tower`] services.
//! Nothing more. Nothing less.
//!
//! ## The contract
//!
//! Every request that passes through the middleware leaves with an
//! `x-correlation-id` header. If the caller already sent one — an upstream
//! service, an edge proxy — it is preserved untouched. If not, a fresh
//! 32-character hex token is minted. Either way, the same token appears on
//! the two log lines the middleware can emit: one when the request arrives,
//! one when the response future completes.
//!
//! What traza intentionally does **not** do:
//!
//! - **Touch bodies** — the service is generic over the body type and never
//!   reads a byte of it.
//! - **Block the pipeline on logging** — the `incoming` line is written
//!   synchronously before the inner service is called; the `outgoing` line
//!   rides on the response future.
//! - **Fail the request** — there is no error type in this crate. Missing
//!   configuration disables logging; a malformed forced id is ignored. The
//!   request path is never broken by its own instrumentation.
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use traza::{StdoutSink, TraceConfig, TraceLayer};
//!
//! let layer = TraceLayer::new(
//!     TraceConfig::builder()
//!         .logger(Arc::new(StdoutSink))
//!         .component("orders-api")
//!         .build(),
//! );
//! // axum:        Router::new().route(…).layer(layer)
//! // plain tower: use tower::Layer; layer.layer(my_service)
//! ```
//!
//! Each request then produces:
//!
//! ```text
//! 27-08-2026 09:15:03.412 d2f1a9c04cf34b6b8f0e2b9d1a7c5e31 orders-api heroku /orders POST incoming
//! 27-08-2026 09:15:03.498 d2f1a9c04cf34b6b8f0e2b9d1a7c5e31 orders-api heroku /orders POST outgoing
//! ```
//!
//! ## Standalone pieces
//!
//! The building blocks are independently callable for callers that want the
//! parts without the layer:
//!
//! - [`CORRELATION_HEADER`] — the header name, for extractors and clients.
//! - [`correlation_id`] — the token generator.
//! - [`extend`] — force a known id onto a request (e.g. one received from an
//!   upstream hop) instead of minting a new one.
//! - [`message`] — the line formatter, for callers that render lines outside
//!   the middleware.

mod clock;
mod config;
mod correlation;
mod emit;
mod layer;
mod message;
mod sink;

pub use clock::{Clock, SystemClock};
pub use config::{TraceConfig, TraceConfigBuilder};
pub use correlation::{CORRELATION_HEADER, correlation_id, extend};
pub use layer::{TraceLayer, TraceService};
pub use message::{Direction, MessageOptions, RequestView, message};
pub use sink::{Sink, StdoutSink, TracingSink, WriterSink};

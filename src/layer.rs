//! The middleware itself: a [`tower::Layer`] + [`tower::Service`] pair.
//!
//! # Request lifecycle
//!
//! ```text
//! request arrives
//!        ↓ missing x-correlation-id?  mint one (never overwrite)
//!        ↓ emit "incoming"            synchronous, before the inner call
//! inner service runs                  the request pipeline is never blocked
//!        ↓ response future completes  Ok or Err, doesn't matter
//!        ↓ emit "outgoing"            at most once
//! response returned unchanged
//! ```
//!
//! If the response future is dropped before completion — the client hung up,
//! the connection task was aborted — the `outgoing` line is simply never
//! written. That is the contract, not a failure.
//!
//! The configuration is built once, wrapped in an `Arc`, and shared
//! read-only by every request the instance handles. Per-request state lives
//! entirely inside the response future.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use http::{HeaderValue, Request};
use tower::{Layer, Service};
use tracing::debug;

use crate::config::TraceConfig;
use crate::correlation::{CORRELATION_HEADER, correlation_id};
use crate::emit::emit;
use crate::message::{Direction, RequestView};

/// A heap-allocated, type-erased response future. Boxing costs one
/// allocation per request and spares the crate a hand-rolled pinned future.
type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

// ── TraceLayer ────────────────────────────────────────────────────────────────

/// Wraps services in [`TraceService`]. One layer, one shared config.
///
/// ```rust
/// use tower::Layer;
/// use traza::{TraceConfig, TraceLayer};
///
/// let layer = TraceLayer::new(TraceConfig::default());
/// # let svc = tower::service_fn(|_req: http::Request<()>| async {
/// #     Ok::<_, std::convert::Infallible>(http::Response::new(()))
/// # });
/// let traced = layer.layer(svc);
/// ```
pub struct TraceLayer {
    config: Arc<TraceConfig>,
}

impl TraceLayer {
    pub fn new(config: TraceConfig) -> Self {
        Self { config: Arc::new(config) }
    }
}

impl Clone for TraceLayer {
    fn clone(&self) -> Self {
        Self { config: Arc::clone(&self.config) }
    }
}

impl<S> Layer<S> for TraceLayer {
    type Service = TraceService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TraceService { inner, config: Arc::clone(&self.config) }
    }
}

// ── TraceService ──────────────────────────────────────────────────────────────

/// The traced service. Usually built through [`TraceLayer`]; use
/// [`TraceService::new`] to wrap a single service directly.
pub struct TraceService<S> {
    inner: S,
    config: Arc<TraceConfig>,
}

impl<S> TraceService<S> {
    pub fn new(inner: S, config: TraceConfig) -> Self {
        Self { inner, config: Arc::new(config) }
    }
}

impl<S: Clone> Clone for TraceService<S> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone(), config: Arc::clone(&self.config) }
    }
}

impl<S, B> Service<Request<B>> for TraceService<S>
where
    S: Service<Request<B>>,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<Result<S::Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        if !req.headers().contains_key(&CORRELATION_HEADER) {
            let id = correlation_id();
            debug!(target: "traza", %id, "generated correlation id");
            // freshly minted ids are plain hex, always a legal header value
            if let Ok(value) = HeaderValue::from_str(&id) {
                req.headers_mut().insert(CORRELATION_HEADER.clone(), value);
            }
        }

        // The request moves into the inner service; capture what the two
        // log lines need before handing it off.
        let path = req.uri().path().to_owned();
        let method = req.method().as_str().to_owned();
        let id = req
            .headers()
            .get(&CORRELATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        emit(
            RequestView { path: &path, method: &method, correlation_id: id.as_deref() },
            &self.config,
            Direction::Incoming,
        );

        let config = Arc::clone(&self.config);
        let fut = self.inner.call(req);

        Box::pin(async move {
            let result = fut.await;
            emit(
                RequestView { path: &path, method: &method, correlation_id: id.as_deref() },
                &config,
                Direction::Outgoing,
            );
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::sync::{Arc, Mutex};

    use chrono::{TimeZone, Utc};
    use http::Response;
    use tower::{Layer, Service, ServiceExt, service_fn};

    use super::*;
    use crate::sink::WriterSink;

    /// Always-ready inner service returning an empty 200.
    #[derive(Clone)]
    struct Ok200;

    impl Service<Request<()>> for Ok200 {
        type Response = Response<()>;
        type Error = Infallible;
        type Future = std::future::Ready<Result<Response<()>, Infallible>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Infallible>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, _req: Request<()>) -> Self::Future {
            std::future::ready(Ok(Response::new(())))
        }
    }

    /// Inner service that records the correlation header it observed.
    fn capture_header(seen: &Arc<Mutex<Option<String>>>) -> impl Service<
        Request<()>,
        Response = Response<()>,
        Error = Infallible,
        Future = std::future::Ready<Result<Response<()>, Infallible>>,
    > {
        let capture = Arc::clone(seen);
        service_fn(move |req: Request<()>| {
            *capture.lock().unwrap() = req
                .headers()
                .get(&CORRELATION_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            std::future::ready(Ok::<_, Infallible>(Response::new(())))
        })
    }

    #[tokio::test]
    async fn sets_correlation_header_when_missing() {
        let seen = Arc::new(Mutex::new(None));
        let traced = TraceLayer::new(TraceConfig::default()).layer(capture_header(&seen));

        traced
            .oneshot(Request::builder().uri("/api").body(()).unwrap())
            .await
            .unwrap();

        let id = seen.lock().unwrap().clone().expect("header not set");
        assert_eq!(id.len(), 32);
        assert!(id.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
    }

    #[tokio::test]
    async fn does_not_override_existing_correlation_header() {
        let seen = Arc::new(Mutex::new(None));
        let traced = TraceLayer::new(TraceConfig::default()).layer(capture_header(&seen));

        traced
            .oneshot(
                Request::builder()
                    .uri("/api")
                    .header(&CORRELATION_HEADER, "test")
                    .body(())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(seen.lock().unwrap().as_deref(), Some("test"));
    }

    #[tokio::test]
    async fn logs_incoming_then_outgoing_with_a_fixed_clock() {
        let sink = Arc::new(WriterSink::new(Vec::new()));
        let frozen = Utc.with_ymd_and_hms(2015, 4, 1, 16, 42, 23).unwrap();
        let config = TraceConfig::builder()
            .logger(sink.clone())
            .component("test_component")
            .clock(Arc::new(frozen))
            .build();
        let traced = TraceLayer::new(config).layer(Ok200);

        traced
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api")
                    .header(&CORRELATION_HEADER, "12341234")
                    .body(())
                    .unwrap(),
            )
            .await
            .unwrap();

        let out = Arc::try_unwrap(sink).ok().unwrap().into_inner();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "01-04-2015 16:42:23.000 12341234 test_component heroku /api GET incoming\n\
             01-04-2015 16:42:23.000 12341234 test_component heroku /api GET outgoing\n"
        );
    }

    #[tokio::test]
    async fn outgoing_is_logged_even_when_the_inner_service_fails() {
        let sink = Arc::new(WriterSink::new(Vec::new()));
        let frozen = Utc.with_ymd_and_hms(2015, 4, 1, 16, 42, 23).unwrap();
        let config = TraceConfig::builder()
            .logger(sink.clone())
            .component("test_component")
            .clock(Arc::new(frozen))
            .build();
        let failing = service_fn(|_req: Request<()>| async {
            Err::<Response<()>, &'static str>("boom")
        });
        let traced = TraceLayer::new(config).layer(failing);

        let result = traced
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api")
                    .header(&CORRELATION_HEADER, "12341234")
                    .body(())
                    .unwrap(),
            )
            .await;

        assert_eq!(result.unwrap_err(), "boom");
        let out = Arc::try_unwrap(sink).ok().unwrap().into_inner();
        let out = String::from_utf8(out).unwrap();
        assert!(out.ends_with("test_component heroku /api GET outgoing\n"));
    }

    #[test]
    fn incoming_is_synchronous_and_a_dropped_future_emits_no_outgoing() {
        let sink = Arc::new(WriterSink::new(Vec::new()));
        let frozen = Utc.with_ymd_and_hms(2015, 4, 1, 16, 42, 23).unwrap();
        let config = TraceConfig::builder()
            .logger(sink.clone())
            .component("test_component")
            .clock(Arc::new(frozen))
            .build();
        let mut traced = TraceService::new(Ok200, config);

        let fut = traced.call(
            Request::builder()
                .method("GET")
                .uri("/api")
                .header(&CORRELATION_HEADER, "12341234")
                .body(())
                .unwrap(),
        );
        // Incoming was written during `call`, before the future was polled.
        drop(fut);
        drop(traced);

        let out = Arc::try_unwrap(sink).ok().unwrap().into_inner();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "01-04-2015 16:42:23.000 12341234 test_component heroku /api GET incoming\n"
        );
    }
}

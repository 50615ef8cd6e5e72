//! Minimal traza example — an axum router with traced endpoints.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example basic
//!
//! Try:
//!   curl http://localhost:3000/users/42
//!   curl -H 'x-correlation-id: id-from-upstream' http://localhost:3000/users/42
//!
//! Each request prints an `incoming` and an `outgoing` line to stdout. The
//! second curl shows the upstream id preserved; the first shows a minted one.

use std::sync::Arc;

use axum::{Router, extract::Path, routing::get};
use traza::{StdoutSink, TraceConfig, TraceLayer};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let trace = TraceLayer::new(
        TraceConfig::builder()
            .logger(Arc::new(StdoutSink))
            .component("basic-example")
            .build(),
    );

    let app = Router::new()
        .route("/users/{id}", get(get_user))
        .layer(trace);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000")
        .await
        .expect("failed to bind");
    axum::serve(listener, app).await.expect("server error");
}

// GET /users/{id}
//
// Handlers are untouched by the middleware — the correlation id is already
// on the request headers by the time they run.
async fn get_user(Path(id): Path<String>) -> String {
    format!(r#"{{"id":"{id}","name":"alice"}}"#)
}

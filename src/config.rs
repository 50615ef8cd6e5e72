//! Middleware configuration.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::sink::Sink;

/// Configuration for one middleware instance.
///
/// Built once, then shared read-only across every request that instance
/// handles. Logging requires **both** a logger and a component name; with
/// either missing the middleware still manages correlation ids but emits
/// nothing.
///
/// ```rust
/// use std::sync::Arc;
/// use traza::{StdoutSink, TraceConfig};
///
/// // Logs enabled:
/// let config = TraceConfig::builder()
///     .logger(Arc::new(StdoutSink))
///     .component("orders-api")
///     .build();
///
/// // Correlation ids only, no log lines:
/// let silent = TraceConfig::default();
/// ```
pub struct TraceConfig {
    pub(crate) logger: Option<Arc<dyn Sink>>,
    pub(crate) component: Option<String>,
    pub(crate) clock: Arc<dyn Clock>,
}

impl TraceConfig {
    /// Builder for a config with logging enabled or a non-default clock.
    pub fn builder() -> TraceConfigBuilder {
        TraceConfigBuilder { logger: None, component: None, clock: None }
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self { logger: None, component: None, clock: Arc::new(SystemClock) }
    }
}

// ── TraceConfigBuilder ────────────────────────────────────────────────────────

/// Fluent builder for [`TraceConfig`].
///
/// Obtain via [`TraceConfig::builder()`]. Every field is optional; an unset
/// clock falls back to [`SystemClock`].
pub struct TraceConfigBuilder {
    logger: Option<Arc<dyn Sink>>,
    component: Option<String>,
    clock: Option<Arc<dyn Clock>>,
}

impl TraceConfigBuilder {
    /// Destination for the log lines.
    pub fn logger(mut self, logger: Arc<dyn Sink>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Name identifying this service on every line it emits.
    pub fn component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Time source for the line timestamps. A frozen `DateTime<Utc>` works
    /// here, which is how tests pin the clock.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> TraceConfig {
        TraceConfig {
            logger: self.logger,
            component: self.component,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
        }
    }
}

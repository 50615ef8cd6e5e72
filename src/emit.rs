//! Conditional line emission — the step between "a request event happened"
//! and "a line reached the sink".

use crate::config::TraceConfig;
use crate::message::{Direction, MessageOptions, RequestView, message};

/// Emits one log line for `req` if the config enables logging.
///
/// No-op unless both a logger and a component are configured. Stamps the
/// line with the configured clock and hands it to the sink fire-and-forget.
pub(crate) fn emit(req: RequestView<'_>, config: &TraceConfig, direction: Direction) {
    let (Some(logger), Some(component)) = (&config.logger, &config.component) else {
        return;
    };

    logger.write(&message(&MessageOptions {
        date: Some(config.clock.now()),
        component: Some(component),
        req: Some(req),
        direction: Some(direction),
    }));
}

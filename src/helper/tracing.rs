use std::future::Future;

#[cfg(feature = "tracing")]
use tracing::{Instrument, Level, instrument::Instrumented};

/// Attaches a `task_action` span to a future when the `tracing` feature is on.
pub(crate) trait MaybeInstrument: Future + Sized {
    #[cfg(feature = "tracing")]
    fn maybe_instrument(self, name: &'static str, tag: &str) -> Instrumented<Self> {
        let span = tracing::span!(Level::DEBUG, "task_action", action = name, tag = tag);
        self.instrument(span)
    }

    #[cfg(not(feature = "tracing"))]
    fn maybe_instrument(self, _name: &'static str, _tag: &str) -> Self {
        self
    }
}

impl<F: Future> MaybeInstrument for F {}

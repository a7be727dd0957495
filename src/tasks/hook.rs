use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    sync::{Arc, Mutex, PoisonError},
};

use crate::tasks::event::{EventContext, TaskEvent};

/// Callback registered for a [`TaskEvent`]
pub type Hook<A, R, E> = Arc<dyn Fn(&EventContext<A, R, E>) + Send + Sync>;

/// Append-only hook lists, one per [`TaskEvent`]
pub(crate) struct HookRegistry<A, R, E> {
    hooks: Mutex<[Vec<Hook<A, R, E>>; 6]>,
}

impl<A, R, E> HookRegistry<A, R, E> {
    pub(crate) fn new() -> Self {
        Self {
            hooks: Mutex::new(Default::default()),
        }
    }

    pub(crate) fn register(&self, event: TaskEvent, hook: Hook<A, R, E>) {
        let mut guard = self.hooks.lock().unwrap_or_else(PoisonError::into_inner);
        guard[event.index()].push(hook);
    }

    pub(crate) fn count(&self, event: TaskEvent) -> usize {
        let guard = self.hooks.lock().unwrap_or_else(PoisonError::into_inner);
        guard[event.index()].len()
    }

    /// Calls every hook of `event` in registration order.
    ///
    /// The list is copied before the first call so hooks may register more
    /// hooks or query the controller. A panicking hook is logged and skipped.
    pub(crate) fn dispatch(&self, tag: &str, event: TaskEvent, context: &EventContext<A, R, E>) {
        let hooks = {
            let guard = self.hooks.lock().unwrap_or_else(PoisonError::into_inner);
            guard[event.index()].clone()
        };

        for (index, hook) in hooks.iter().enumerate() {
            if catch_unwind(AssertUnwindSafe(|| hook(context))).is_err() {
                #[cfg(feature = "tracing")]
                tracing::error!(tag, event = ?event, index, "Task hook panicked");
                #[cfg(not(feature = "tracing"))]
                let _ = (tag, index);
            }
        }
    }
}

use std::{
    fmt::Debug,
    panic::{AssertUnwindSafe, catch_unwind},
};

use crate::tasks::{
    controller::TaskController,
    error::{AbortRejection, TaskError},
    event::TaskEvent,
    state::TaskState,
};

impl<A, R, E> TaskController<A, R, E>
where
    A: Clone + Debug + Send + Sync + 'static,
    R: Clone + Debug + Send + Sync + 'static,
    E: Clone + Debug + Send + Sync + 'static,
{
    /// Soft-abort the in-flight run
    ///
    /// Moves the controller to `Aborted`, calls the configured abort handler
    /// with the current argument and fires `on_aborted` then `on_finished`.
    /// The action itself keeps running unless the handler stops it; its
    /// eventual settlement is ignored. Result and error slots are not touched.
    /// A panicking handler is logged and the hooks still fire.
    ///
    /// # Errors
    ///
    /// [`TaskError::CannotAbort`] when not executing, when no abort handler is
    /// configured, or when the `can_abort` guard rejects the current argument.
    pub fn abort(&self) -> Result<(), TaskError<E>> {
        let tag = self.shared_context.tag();

        let (handler, argument, context) = {
            let slots = self.shared_context.lock_slots();
            let rejection = if self.shared_context.get_state() != TaskState::Executing {
                Some(AbortRejection::NotExecuting)
            } else if self.shared_context.config.abort.is_none() {
                Some(AbortRejection::NoAbortHandler)
            } else if !self.shared_context.check_can_abort(slots.argument.as_ref()) {
                Some(AbortRejection::GuardRejected)
            } else {
                None
            };
            if let Some(reason) = rejection {
                #[cfg(feature = "tracing")]
                tracing::warn!(tag = %tag, %reason, "Abort rejected");
                return Err(TaskError::CannotAbort { tag, reason });
            }

            self.shared_context.set_state(TaskState::Aborted);
            let context = self.shared_context.snapshot(&slots);
            self.announce(&tag, &context);
            (
                self.shared_context.config.abort.clone(),
                slots.argument.clone(),
                context,
            )
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(tag = %tag, "Task aborted");

        if let Some(handler) = handler {
            if catch_unwind(AssertUnwindSafe(|| handler(argument.as_ref()))).is_err() {
                #[cfg(feature = "tracing")]
                tracing::error!(tag = %tag, "Abort handler panicked");
            }
        }
        self.dispatch(&tag, &[TaskEvent::Aborted, TaskEvent::Finished], &context);
        Ok(())
    }
}

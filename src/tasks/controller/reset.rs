use std::fmt::Debug;

use crate::tasks::{
    controller::TaskController, error::TaskError, event::TaskEvent, state::TaskState,
};

impl<A, R, E> TaskController<A, R, E>
where
    A: Clone + Debug + Send + Sync + 'static,
    R: Clone + Debug + Send + Sync + 'static,
    E: Clone + Debug + Send + Sync + 'static,
{
    /// Return to `Idle` from any state except `Executing`
    ///
    /// Clears the result and error. The argument is replaced with the output of
    /// the configured `create_argument` factory, or cleared when there is none.
    /// Fires `on_idle`.
    ///
    /// # Errors
    ///
    /// [`TaskError::CannotReset`] if a run is in flight, including one started
    /// while the argument factory was pending.
    pub async fn reset(&self) -> Result<(), TaskError<E>> {
        let tag = self.shared_context.tag();
        if self.shared_context.get_state() == TaskState::Executing {
            #[cfg(feature = "tracing")]
            tracing::warn!(tag = %tag, "Reset rejected, task is executing");
            return Err(TaskError::CannotReset { tag });
        }

        let argument = match self.shared_context.config.create_argument.clone() {
            Some(factory) => factory().await,
            None => None,
        };

        let context = {
            let mut slots = self.shared_context.lock_slots();
            if self.shared_context.get_state() == TaskState::Executing {
                #[cfg(feature = "tracing")]
                tracing::warn!(tag = %tag, "Reset rejected, execution started while creating argument");
                return Err(TaskError::CannotReset { tag });
            }

            slots.argument = argument;
            slots.result = None;
            slots.error = None;
            self.shared_context.set_state(TaskState::Idle);
            let context = self.shared_context.snapshot(&slots);
            self.announce(&tag, &context);
            context
        };
        self.dispatch(&tag, &[TaskEvent::Idle], &context);
        Ok(())
    }
}

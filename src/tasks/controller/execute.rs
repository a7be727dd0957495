use std::{
    fmt::Debug,
    panic::{AssertUnwindSafe, resume_unwind},
};

use futures::FutureExt;

use crate::{
    helper::tracing::MaybeInstrument,
    tasks::{
        controller::TaskController, error::TaskError, event::TaskEvent, state::TaskState,
    },
};

impl<A, R, E> TaskController<A, R, E>
where
    A: Clone + Debug + Send + Sync + 'static,
    R: Clone + Debug + Send + Sync + 'static,
    E: Clone + Debug + Send + Sync + 'static,
{
    /// Run the action with the stored argument
    ///
    /// See [`execute_with`](Self::execute_with) for the outcome rules.
    pub async fn execute(&self) -> Result<Option<R>, TaskError<E>> {
        self.run(None).await
    }

    /// Store `argument` and run the action with it
    ///
    /// The guard sees the new argument; if the guard rejects it the stored
    /// argument is left untouched.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(result))` - the action resolved with a value
    /// * `Ok(None)` - the action resolved empty, failed without `throw_on_fail`,
    ///   or the run was aborted before it settled
    ///
    /// # Errors
    ///
    /// * [`TaskError::AlreadyExecuting`] if a run is in flight
    /// * [`TaskError::CannotExecute`] if the `can_execute` guard rejects the argument
    /// * [`TaskError::Action`] if the action failed and `throw_on_fail` is set
    pub async fn execute_with(&self, argument: A) -> Result<Option<R>, TaskError<E>> {
        self.run(Some(argument)).await
    }

    async fn run(&self, argument: Option<A>) -> Result<Option<R>, TaskError<E>> {
        let tag = self.shared_context.tag();

        let (argument, run_id, context) = {
            let mut slots = self.shared_context.lock_slots();
            if self.shared_context.get_state() == TaskState::Executing {
                #[cfg(feature = "tracing")]
                tracing::warn!(tag = %tag, "Execute rejected, task is already executing");
                return Err(TaskError::AlreadyExecuting { tag });
            }

            let effective = argument.as_ref().or(slots.argument.as_ref());
            if !self.shared_context.check_can_execute(effective) {
                #[cfg(feature = "tracing")]
                tracing::warn!(tag = %tag, "Execute rejected by can_execute guard");
                return Err(TaskError::CannotExecute { tag });
            }

            if let Some(argument) = argument {
                slots.argument = Some(argument);
            }
            slots.result = None;
            slots.error = None;
            slots.run_id += 1;
            self.shared_context.set_state(TaskState::Executing);

            let context = self.shared_context.snapshot(&slots);
            self.announce(&tag, &context);
            (slots.argument.clone(), slots.run_id, context)
        };
        let mut guard = RunGuard::new(self, &tag, run_id);
        self.dispatch(&tag, &[TaskEvent::Executing], &context);

        let outcome = AssertUnwindSafe(self.action.call(argument).maybe_instrument("execute", &tag))
            .catch_unwind()
            .await;
        guard.disarm();

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(panic) => {
                #[cfg(feature = "tracing")]
                tracing::error!(tag = %tag, run_id, "Task action panicked");
                self.abandon(&tag, run_id);
                resume_unwind(panic);
            }
        };

        let (events, context) = {
            let mut slots = self.shared_context.lock_slots();
            if slots.run_id != run_id || self.shared_context.get_state() != TaskState::Executing {
                #[cfg(feature = "tracing")]
                tracing::debug!(tag = %tag, run_id, "Ignoring settlement of an aborted run");
                return Ok(None);
            }

            let events = match &outcome {
                Ok(result) => {
                    slots.result = result.clone();
                    slots.error = None;
                    self.shared_context.set_state(TaskState::Completed);
                    [TaskEvent::Completed, TaskEvent::Finished]
                }
                Err(error) => {
                    slots.result = None;
                    slots.error = Some(error.clone());
                    self.shared_context.set_state(TaskState::Failed);
                    [TaskEvent::Failed, TaskEvent::Finished]
                }
            };
            let context = self.shared_context.snapshot(&slots);
            self.announce(&tag, &context);
            (events, context)
        };
        self.dispatch(&tag, &events, &context);

        match outcome {
            Ok(result) => Ok(result),
            Err(error) => {
                if self.shared_context.config.throw_on_fail.unwrap_or_default() {
                    Err(TaskError::Action(error))
                } else {
                    Ok(None)
                }
            }
        }
    }
}

/// Settles the run as `Aborted` if the `execute` future is dropped before
/// the action resolves.
struct RunGuard<'a, A, R, E>
where
    A: Clone + Debug + Send + Sync + 'static,
    R: Clone + Debug + Send + Sync + 'static,
    E: Clone + Debug + Send + Sync + 'static,
{
    controller: &'a TaskController<A, R, E>,
    tag: &'a str,
    run_id: u64,
    armed: bool,
}

impl<'a, A, R, E> RunGuard<'a, A, R, E>
where
    A: Clone + Debug + Send + Sync + 'static,
    R: Clone + Debug + Send + Sync + 'static,
    E: Clone + Debug + Send + Sync + 'static,
{
    fn new(controller: &'a TaskController<A, R, E>, tag: &'a str, run_id: u64) -> Self {
        Self {
            controller,
            tag,
            run_id,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl<A, R, E> Drop for RunGuard<'_, A, R, E>
where
    A: Clone + Debug + Send + Sync + 'static,
    R: Clone + Debug + Send + Sync + 'static,
    E: Clone + Debug + Send + Sync + 'static,
{
    fn drop(&mut self) {
        if self.armed {
            self.controller.abandon(self.tag, self.run_id);
        }
    }
}

use std::{fmt, fmt::Debug, sync::Arc};

#[cfg(feature = "tokio")]
use tokio::sync::watch;

use crate::tasks::{
    action::TaskAction,
    config::TaskConfig,
    context::TaskContext,
    diagnostics::record_transition,
    event::{EventContext, TaskEvent},
    state::TaskState,
};

mod abort;
mod execute;
mod reset;
mod status;

/// Lifecycle controller for one asynchronous action
///
/// Owns the state machine, the argument/result/error slots and six hook
/// lists. Runs at most one execution at a time; `abort` and `reset` are
/// mutually exclusive with an in-flight run by their guards.
///
/// The controller is a cheap handle: clones share the same state, so one
/// clone can `abort` while another is awaiting `execute`.
///
/// # Examples
///
/// ```rust
/// use tcrm_action::tasks::{
///     config::TaskConfig, control::TaskStatusInfo, controller::TaskController, state::TaskState,
/// };
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let controller = TaskController::new(
///         |arg: Option<u32>| async move { Ok::<_, String>(arg.map(|n| n + 1)) },
///         TaskConfig::new().tag("increment").argument(1),
///     );
///     controller.on_finished(|ctx| println!("finished in {}", ctx.state));
///
///     assert_eq!(controller.execute().await?, Some(2));
///     assert_eq!(controller.execute_with(41).await?, Some(42));
///     assert_eq!(controller.get_state(), TaskState::Completed);
///     assert_eq!(controller.get_argument(), Some(41));
///
///     controller.reset().await?;
///     assert!(controller.is_idle());
///     assert_eq!(controller.get_argument(), None);
///     Ok(())
/// }
/// ```
pub struct TaskController<A, R, E> {
    pub(crate) shared_context: Arc<TaskContext<A, R, E>>,
    pub(crate) action: Arc<dyn TaskAction<A, R, E>>,
}

impl<A, R, E> Clone for TaskController<A, R, E> {
    fn clone(&self) -> Self {
        Self {
            shared_context: Arc::clone(&self.shared_context),
            action: Arc::clone(&self.action),
        }
    }
}

impl<A, R, E> fmt::Debug for TaskController<A, R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskController")
            .field("tag", &self.shared_context.tag())
            .field("state", &self.shared_context.get_state())
            .finish_non_exhaustive()
    }
}

impl<A, R, E> TaskController<A, R, E>
where
    A: Clone + Debug + Send + Sync + 'static,
    R: Clone + Debug + Send + Sync + 'static,
    E: Clone + Debug + Send + Sync + 'static,
{
    /// Create a controller in the `Idle` state
    ///
    /// The configured initial argument becomes the stored argument.
    /// The configuration is not validated here; call
    /// [`TaskConfig::validate`] first when it comes from user input.
    pub fn new(action: impl TaskAction<A, R, E> + 'static, config: TaskConfig<A>) -> Self {
        Self {
            shared_context: Arc::new(TaskContext::new(config)),
            action: Arc::new(action),
        }
    }

    /// The configured tag, or the default placeholder
    pub fn tag(&self) -> String {
        self.shared_context.tag()
    }

    /// Whether `execute()` without an argument would pass its guards right now
    pub fn can_execute(&self) -> bool {
        if self.shared_context.get_state() == TaskState::Executing {
            return false;
        }
        let slots = self.shared_context.lock_slots();
        self.shared_context.check_can_execute(slots.argument.as_ref())
    }

    /// Whether `abort()` would succeed right now
    pub fn can_abort(&self) -> bool {
        if self.shared_context.get_state() != TaskState::Executing {
            return false;
        }
        let slots = self.shared_context.lock_slots();
        self.shared_context.check_can_abort(slots.argument.as_ref())
    }

    /// Register a hook for `event`. Hooks cannot be removed.
    pub fn on<F>(&self, event: TaskEvent, hook: F) -> &Self
    where
        F: Fn(&EventContext<A, R, E>) + Send + Sync + 'static,
    {
        self.shared_context.hooks.register(event, Arc::new(hook));
        self
    }

    pub fn on_idle<F>(&self, hook: F) -> &Self
    where
        F: Fn(&EventContext<A, R, E>) + Send + Sync + 'static,
    {
        self.on(TaskEvent::Idle, hook)
    }

    pub fn on_executing<F>(&self, hook: F) -> &Self
    where
        F: Fn(&EventContext<A, R, E>) + Send + Sync + 'static,
    {
        self.on(TaskEvent::Executing, hook)
    }

    pub fn on_completed<F>(&self, hook: F) -> &Self
    where
        F: Fn(&EventContext<A, R, E>) + Send + Sync + 'static,
    {
        self.on(TaskEvent::Completed, hook)
    }

    pub fn on_failed<F>(&self, hook: F) -> &Self
    where
        F: Fn(&EventContext<A, R, E>) + Send + Sync + 'static,
    {
        self.on(TaskEvent::Failed, hook)
    }

    pub fn on_aborted<F>(&self, hook: F) -> &Self
    where
        F: Fn(&EventContext<A, R, E>) + Send + Sync + 'static,
    {
        self.on(TaskEvent::Aborted, hook)
    }

    /// Fires after `on_completed`, `on_failed` and `on_aborted` hooks
    pub fn on_finished<F>(&self, hook: F) -> &Self
    where
        F: Fn(&EventContext<A, R, E>) + Send + Sync + 'static,
    {
        self.on(TaskEvent::Finished, hook)
    }

    /// Number of hooks registered for `event`
    pub fn hook_count(&self, event: TaskEvent) -> usize {
        self.shared_context.hooks.count(event)
    }

    /// Watch the latest snapshot, updated on every transition
    #[cfg(feature = "tokio")]
    pub fn subscribe(&self) -> watch::Receiver<EventContext<A, R, E>> {
        self.shared_context.watch_tx.subscribe()
    }

    /// Records the transition and publishes the snapshot to subscribers.
    ///
    /// Called with the slots lock held, so watchers observe transitions in
    /// the order they were committed.
    pub(crate) fn announce(&self, tag: &str, context: &EventContext<A, R, E>) {
        record_transition(tag, context);

        #[cfg(feature = "tokio")]
        self.shared_context.watch_tx.send_replace(context.clone());
    }

    /// Dispatches `events` in order with the same context. Never called
    /// with the slots lock held.
    pub(crate) fn dispatch(&self, tag: &str, events: &[TaskEvent], context: &EventContext<A, R, E>) {
        for event in events {
            self.shared_context.hooks.dispatch(tag, *event, context);
        }
    }

    /// Settles a run that ended without a result as `Aborted`.
    ///
    /// Used when the `execute` future is dropped mid-flight or the action
    /// panics. Does nothing if `run_id` is no longer the executing run.
    pub(crate) fn abandon(&self, tag: &str, run_id: u64) {
        let context = {
            let slots = self.shared_context.lock_slots();
            if slots.run_id != run_id || self.shared_context.get_state() != TaskState::Executing {
                return;
            }
            self.shared_context.set_state(TaskState::Aborted);
            let context = self.shared_context.snapshot(&slots);
            self.announce(tag, &context);
            context
        };

        #[cfg(feature = "tracing")]
        tracing::warn!(tag, run_id, "Run ended without settling, task marked aborted");

        self.dispatch(tag, &[TaskEvent::Aborted, TaskEvent::Finished], &context);
    }
}

use crate::tasks::state::TaskState;

/// Transition kinds a hook can be registered for
///
/// A compound transition fires more than one kind. Reaching a finished state
/// fires its own kind first, then `Finished`:
///
/// 1. `Executing` - `execute` passed its guards
/// 2. `Completed` / `Failed` / `Aborted` - the run settled or was aborted
/// 3. `Finished` - right after any of the three above
/// 4. `Idle` - `reset` succeeded
///
/// # Examples
///
/// ```rust
/// use tcrm_action::tasks::{event::TaskEvent, state::TaskState};
///
/// assert_eq!(TaskEvent::from_state(TaskState::Failed), TaskEvent::Failed);
/// assert_eq!(TaskEvent::ALL.len(), 6);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskEvent {
    Idle,
    Executing,
    Completed,
    Failed,
    Aborted,
    Finished,
}

impl TaskEvent {
    pub const ALL: [TaskEvent; 6] = [
        TaskEvent::Idle,
        TaskEvent::Executing,
        TaskEvent::Completed,
        TaskEvent::Failed,
        TaskEvent::Aborted,
        TaskEvent::Finished,
    ];

    /// The event fired when a controller enters `state`
    pub fn from_state(state: TaskState) -> Self {
        match state {
            TaskState::Idle => TaskEvent::Idle,
            TaskState::Executing => TaskEvent::Executing,
            TaskState::Completed => TaskEvent::Completed,
            TaskState::Failed => TaskEvent::Failed,
            TaskState::Aborted => TaskEvent::Aborted,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            TaskEvent::Idle => 0,
            TaskEvent::Executing => 1,
            TaskEvent::Completed => 2,
            TaskEvent::Failed => 3,
            TaskEvent::Aborted => 4,
            TaskEvent::Finished => 5,
        }
    }
}

/// Point-in-time copy of a controller, handed to hooks and watchers
///
/// Built after the transition's state mutation. Later changes to the
/// controller never show through an existing context.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EventContext<A, R, E> {
    pub state: TaskState,
    pub argument: Option<A>,
    pub result: Option<R>,
    pub error: Option<E>,
}

impl<A, R, E> EventContext<A, R, E> {
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }
}

impl<A, R, E> Default for EventContext<A, R, E> {
    fn default() -> Self {
        Self {
            state: TaskState::Idle,
            argument: None,
            result: None,
            error: None,
        }
    }
}

use std::fmt;

/// Lifecycle phase of a [`TaskController`](crate::tasks::controller::TaskController)
///
/// A controller starts in `Idle`, moves to `Executing` when its action runs and
/// settles in one of the three finished states. `reset` brings it back to `Idle`.
///
/// ```text
/// Idle ──execute──▶ Executing ──resolve──▶ Completed
///  ▲                    │ ╰────reject───▶ Failed
///  │                    ╰──────abort────▶ Aborted
///  ╰──────────────reset (from any state but Executing)
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskState {
    /// Not started yet, or reset
    #[default]
    Idle = 0,

    /// The action is in flight
    Executing = 1,

    /// The action resolved
    Completed = 2,

    /// The action rejected
    Failed = 3,

    /// The run was aborted before the action settled
    Aborted = 4,
}

impl TaskState {
    /// Whether the state is one of `Completed`, `Failed` or `Aborted`
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Failed | TaskState::Aborted
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Idle => "idle",
            TaskState::Executing => "executing",
            TaskState::Completed => "completed",
            TaskState::Failed => "failed",
            TaskState::Aborted => "aborted",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<u8> for TaskState {
    fn from(value: u8) -> Self {
        match value {
            1 => TaskState::Executing,
            2 => TaskState::Completed,
            3 => TaskState::Failed,
            4 => TaskState::Aborted,
            _ => TaskState::Idle,
        }
    }
}

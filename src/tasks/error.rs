use std::fmt;

use thiserror::Error;

/// Errors returned by controller operations
///
/// Guard violations are returned to the caller of the operation that broke
/// them. `Action` only shows up when the controller was configured with
/// `throw_on_fail`; otherwise a failing action is reported through
/// `TaskState::Failed` and the controller's error slot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TaskError<E> {
    #[error("Task '{tag}' is already executing")]
    AlreadyExecuting { tag: String },

    #[error("Task '{tag}' cannot execute with the current argument")]
    CannotExecute { tag: String },

    #[error("Task '{tag}' cannot abort: {reason}")]
    CannotAbort { tag: String, reason: AbortRejection },

    #[error("Task '{tag}' cannot reset while executing")]
    CannotReset { tag: String },

    #[error("Task action failed: {0}")]
    Action(E),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Why an `abort` call was rejected
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortRejection {
    NotExecuting,
    NoAbortHandler,
    GuardRejected,
}

impl fmt::Display for AbortRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            AbortRejection::NotExecuting => "not executing",
            AbortRejection::NoAbortHandler => "no abort handler configured",
            AbortRejection::GuardRejected => "abort guard rejected the current argument",
        };
        f.write_str(msg)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Global configuration has already been set")]
    AlreadyConfigured,
}

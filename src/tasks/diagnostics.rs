use std::fmt::Debug;

use crate::tasks::event::EventContext;
#[cfg(feature = "tracing")]
use crate::{helper::debug::is_debug, tasks::state::TaskState};

/// Writes a transition record to the `tracing` sink.
///
/// Failed records are always written; Executing and Completed records only
/// in debug mode. Other states are not recorded here.
pub(crate) fn record_transition<A, R, E>(tag: &str, context: &EventContext<A, R, E>)
where
    A: Debug,
    R: Debug,
    E: Debug,
{
    #[cfg(feature = "tracing")]
    write_record(tag, context, is_debug());

    #[cfg(not(feature = "tracing"))]
    let _ = (tag, context);
}

#[cfg(feature = "tracing")]
pub(crate) fn write_record<A, R, E>(tag: &str, context: &EventContext<A, R, E>, debug: bool)
where
    A: Debug,
    R: Debug,
    E: Debug,
{
    match context.state {
        TaskState::Failed => {
            tracing::error!(tag, state = %context.state, context = ?context, "Task failed");
        }
        TaskState::Executing if debug => {
            tracing::info!(tag, state = %context.state, context = ?context, "Task executing");
        }
        TaskState::Completed if debug => {
            tracing::info!(tag, state = %context.state, context = ?context, "Task completed");
        }
        _ => {}
    }
}

use std::time::SystemTime;

use crate::tasks::{event::EventContext, state::TaskState};

/// Read-only projections of a controller
///
/// Every projection is recomputed on each call; nothing is cached.
pub trait TaskStatusInfo {
    type Argument;
    type Output;
    type Error;

    fn get_tag(&self) -> String;
    fn get_state(&self) -> TaskState;
    fn get_argument(&self) -> Option<Self::Argument>;
    fn get_result(&self) -> Option<Self::Output>;
    fn get_error(&self) -> Option<Self::Error>;
    fn get_create_at(&self) -> SystemTime;
    fn get_executing_at(&self) -> Option<SystemTime>;
    fn get_finished_at(&self) -> Option<SystemTime>;

    /// Consistent snapshot of state, argument, result and error
    fn get_context(&self) -> EventContext<Self::Argument, Self::Output, Self::Error>;

    fn get_information(&self) -> TaskInformation<Self::Argument, Self::Output, Self::Error> {
        TaskInformation {
            tag: self.get_tag(),
            context: self.get_context(),
            created_at: self.get_create_at(),
            executing_at: self.get_executing_at(),
            finished_at: self.get_finished_at(),
        }
    }

    fn is_idle(&self) -> bool {
        self.get_state() == TaskState::Idle
    }
    fn is_executing(&self) -> bool {
        self.get_state() == TaskState::Executing
    }
    fn is_completed(&self) -> bool {
        self.get_state() == TaskState::Completed
    }
    fn is_failed(&self) -> bool {
        self.get_state() == TaskState::Failed
    }
    fn is_aborted(&self) -> bool {
        self.get_state() == TaskState::Aborted
    }
    fn is_finished(&self) -> bool {
        self.get_state().is_finished()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskInformation<A, R, E> {
    pub tag: String,
    pub context: EventContext<A, R, E>,
    pub created_at: SystemTime,
    pub executing_at: Option<SystemTime>,
    pub finished_at: Option<SystemTime>,
}

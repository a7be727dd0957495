use std::{fmt::Debug, time::SystemTime};

use crate::tasks::{
    control::TaskStatusInfo, controller::TaskController, event::EventContext, state::TaskState,
};

impl<A, R, E> TaskStatusInfo for TaskController<A, R, E>
where
    A: Clone + Debug + Send + Sync + 'static,
    R: Clone + Debug + Send + Sync + 'static,
    E: Clone + Debug + Send + Sync + 'static,
{
    type Argument = A;
    type Output = R;
    type Error = E;

    fn get_tag(&self) -> String {
        self.shared_context.tag()
    }

    fn get_state(&self) -> TaskState {
        self.shared_context.get_state()
    }

    fn get_argument(&self) -> Option<A> {
        self.shared_context.lock_slots().argument.clone()
    }

    fn get_result(&self) -> Option<R> {
        self.shared_context.lock_slots().result.clone()
    }

    fn get_error(&self) -> Option<E> {
        self.shared_context.lock_slots().error.clone()
    }

    fn get_create_at(&self) -> SystemTime {
        self.shared_context.get_create_at()
    }

    fn get_executing_at(&self) -> Option<SystemTime> {
        self.shared_context.get_executing_at()
    }

    fn get_finished_at(&self) -> Option<SystemTime> {
        self.shared_context.get_finished_at()
    }

    fn get_context(&self) -> EventContext<A, R, E> {
        let slots = self.shared_context.lock_slots();
        self.shared_context.snapshot(&slots)
    }
}

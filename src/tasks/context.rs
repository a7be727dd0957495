use std::{
    sync::{
        Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU8, AtomicU64, Ordering},
    },
    time::{Duration, SystemTime, UNIX_EPOCH},
};

#[cfg(feature = "tokio")]
use tokio::sync::watch;

use crate::tasks::{
    config::{DEFAULT_TAG, TaskConfig},
    event::EventContext,
    hook::HookRegistry,
    state::TaskState,
};

/// Mutable slots guarded together so transitions see a consistent view
pub(crate) struct TaskSlots<A, R, E> {
    pub(crate) argument: Option<A>,
    pub(crate) result: Option<R>,
    pub(crate) error: Option<E>,
    /// Bumped by every `execute`; settlements of older runs are ignored
    pub(crate) run_id: u64,
}

pub(crate) struct TaskContext<A, R, E> {
    /// Configuration with its initial argument moved into the slots
    pub(crate) config: TaskConfig<A>,
    state: AtomicU8,
    slots: Mutex<TaskSlots<A, R, E>>,
    created_at: AtomicU64,
    executing_at: AtomicU64,
    finished_at: AtomicU64,
    pub(crate) hooks: HookRegistry<A, R, E>,

    #[cfg(feature = "tokio")]
    pub(crate) watch_tx: watch::Sender<EventContext<A, R, E>>,
}

impl<A, R, E> TaskContext<A, R, E> {
    pub(crate) fn new(mut config: TaskConfig<A>) -> Self
    where
        A: Clone,
    {
        let argument = config.argument.take();
        Self {
            #[cfg(feature = "tokio")]
            watch_tx: watch::Sender::new(EventContext {
                argument: argument.clone(),
                ..Default::default()
            }),
            config,
            state: AtomicU8::new(TaskState::Idle as u8),
            slots: Mutex::new(TaskSlots {
                argument,
                result: None,
                error: None,
                run_id: 0,
            }),
            created_at: AtomicU64::new(Self::now_nanos()),
            executing_at: AtomicU64::new(0),
            finished_at: AtomicU64::new(0),
            hooks: HookRegistry::new(),
        }
    }

    /// Locks the slots. Hooks never run under this lock, so a poisoned
    /// mutex still holds consistent data and is recovered.
    pub(crate) fn lock_slots(&self) -> MutexGuard<'_, TaskSlots<A, R, E>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn tag(&self) -> String {
        self.config
            .tag
            .as_ref()
            .map(|tag| tag.resolve())
            .unwrap_or_else(|| DEFAULT_TAG.to_string())
    }

    pub(crate) fn check_can_execute(&self, argument: Option<&A>) -> bool {
        self.config
            .can_execute
            .as_ref()
            .is_none_or(|predicate| predicate(argument))
    }

    pub(crate) fn check_can_abort(&self, argument: Option<&A>) -> bool {
        self.config.abort.is_some()
            && self
                .config
                .can_abort
                .as_ref()
                .is_none_or(|predicate| predicate(argument))
    }

    pub(crate) fn snapshot(&self, slots: &TaskSlots<A, R, E>) -> EventContext<A, R, E>
    where
        A: Clone,
        R: Clone,
        E: Clone,
    {
        EventContext {
            state: self.get_state(),
            argument: slots.argument.clone(),
            result: slots.result.clone(),
            error: slots.error.clone(),
        }
    }

    pub(crate) fn get_state(&self) -> TaskState {
        self.state.load(Ordering::SeqCst).into()
    }

    /// Stores the new state and stamps the matching timestamps.
    ///
    /// Callers hold the slots lock so state and slots change together.
    pub(crate) fn set_state(&self, new_state: TaskState) -> SystemTime {
        self.state.store(new_state as u8, Ordering::SeqCst);
        let now = SystemTime::now();
        let nanos = Self::to_nanos(now);

        match new_state {
            TaskState::Idle => {
                self.executing_at.store(0, Ordering::SeqCst);
                self.finished_at.store(0, Ordering::SeqCst);
            }
            TaskState::Executing => {
                self.executing_at.store(nanos, Ordering::SeqCst);
                self.finished_at.store(0, Ordering::SeqCst);
            }
            TaskState::Completed | TaskState::Failed | TaskState::Aborted => {
                self.finished_at.store(nanos, Ordering::SeqCst);
            }
        }
        now
    }

    pub(crate) fn get_create_at(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_nanos(self.created_at.load(Ordering::SeqCst))
    }

    pub(crate) fn get_executing_at(&self) -> Option<SystemTime> {
        Self::get_time(&self.executing_at)
    }

    pub(crate) fn get_finished_at(&self) -> Option<SystemTime> {
        Self::get_time(&self.finished_at)
    }

    fn get_time(store: &AtomicU64) -> Option<SystemTime> {
        let nanos = store.load(Ordering::SeqCst);
        if nanos == 0 {
            None
        } else {
            Some(UNIX_EPOCH + Duration::from_nanos(nanos))
        }
    }

    fn now_nanos() -> u64 {
        Self::to_nanos(SystemTime::now())
    }

    fn to_nanos(time: SystemTime) -> u64 {
        time.duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64
    }
}

use crate::tasks::{
    event::{EventContext, TaskEvent},
    state::TaskState,
};

#[test]
fn from_state_maps_each_state_to_its_event() {
    assert_eq!(TaskEvent::from_state(TaskState::Idle), TaskEvent::Idle);
    assert_eq!(
        TaskEvent::from_state(TaskState::Executing),
        TaskEvent::Executing
    );
    assert_eq!(
        TaskEvent::from_state(TaskState::Completed),
        TaskEvent::Completed
    );
    assert_eq!(TaskEvent::from_state(TaskState::Failed), TaskEvent::Failed);
    assert_eq!(TaskEvent::from_state(TaskState::Aborted), TaskEvent::Aborted);
}

#[test]
fn indices_are_unique_and_dense() {
    let mut seen = [false; 6];
    for event in TaskEvent::ALL {
        assert!(!seen[event.index()], "Duplicate index for {:?}", event);
        seen[event.index()] = true;
    }
    assert!(seen.iter().all(|s| *s));
}

#[test]
fn default_context_is_empty_idle() {
    let context: EventContext<u32, u32, String> = EventContext::default();
    assert_eq!(context.state, TaskState::Idle);
    assert!(context.argument.is_none());
    assert!(context.result.is_none());
    assert!(context.error.is_none());
    assert!(!context.is_finished());
}

#[cfg(feature = "serde")]
#[test]
fn context_serializes_all_fields() {
    let context: EventContext<u32, u32, String> = EventContext {
        state: TaskState::Completed,
        argument: Some(1),
        result: Some(2),
        error: None,
    };
    let value = serde_json::to_value(&context).unwrap();
    assert_eq!(value["state"], "completed");
    assert_eq!(value["argument"], 1);
    assert_eq!(value["result"], 2);
    assert!(value["error"].is_null());
}

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use crate::tasks::{
    config::TaskConfig,
    control::TaskStatusInfo,
    event::TaskEvent,
    integration_tests::helper::{Range, failing_controller, sum_controller},
    state::TaskState,
};

#[tokio::test]
async fn hooks_run_in_registration_order() {
    let controller = sum_controller(TaskConfig::new().argument(Range::new(1, 2)));
    let order = Arc::new(Mutex::new(Vec::new()));

    for id in 0..3 {
        let order = Arc::clone(&order);
        controller.on_completed(move |_| order.lock().unwrap().push(id));
    }
    assert_eq!(controller.hook_count(TaskEvent::Completed), 3);

    controller.execute().await.unwrap();
    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
}

#[tokio::test]
async fn hooks_fire_once_per_transition() {
    let controller = sum_controller(TaskConfig::new().argument(Range::new(1, 2)));
    let executing = Arc::new(AtomicUsize::new(0));
    let finished = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&executing);
    controller.on_executing(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let counter = Arc::clone(&finished);
    controller.on_finished(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    controller.execute().await.unwrap();
    controller.execute().await.unwrap();
    assert_eq!(executing.load(Ordering::SeqCst), 2);
    assert_eq!(finished.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn snapshots_reflect_post_transition_state() {
    let controller = sum_controller(TaskConfig::new().argument(Range::new(1, 2)));
    let seen = Arc::new(Mutex::new(Vec::new()));

    let log = Arc::clone(&seen);
    controller.on_executing(move |ctx| log.lock().unwrap().push(ctx.clone()));
    let log = Arc::clone(&seen);
    controller.on_completed(move |ctx| log.lock().unwrap().push(ctx.clone()));
    let log = Arc::clone(&seen);
    controller.on_finished(move |ctx| log.lock().unwrap().push(ctx.clone()));

    controller.execute().await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[0].state, TaskState::Executing);
    assert!(seen[0].result.is_none());
    assert_eq!(seen[0].argument, Some(Range::new(1, 2)));
    assert_eq!(seen[1].state, TaskState::Completed);
    assert_eq!(seen[1].result, Some(3));
    assert_eq!(seen[1], seen[2]);
}

#[tokio::test]
async fn failed_run_fires_failed_then_finished() {
    let controller = failing_controller("boom", TaskConfig::new());
    let order = Arc::new(Mutex::new(Vec::new()));

    let log = Arc::clone(&order);
    controller.on_finished(move |ctx| log.lock().unwrap().push((TaskEvent::Finished, ctx.state)));
    let log = Arc::clone(&order);
    controller.on_failed(move |ctx| log.lock().unwrap().push((TaskEvent::Failed, ctx.state)));

    controller.execute().await.unwrap();
    assert_eq!(
        *order.lock().unwrap(),
        vec![
            (TaskEvent::Failed, TaskState::Failed),
            (TaskEvent::Finished, TaskState::Failed)
        ]
    );
}

#[tokio::test]
async fn panicking_hook_does_not_stop_dispatch() {
    let controller = sum_controller(TaskConfig::new().argument(Range::new(1, 2)));
    let reached = Arc::new(AtomicUsize::new(0));

    controller.on_completed(|_| panic!("hook failure"));
    let counter = Arc::clone(&reached);
    controller.on_completed(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let counter = Arc::clone(&reached);
    controller.on_finished(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(controller.execute().await, Ok(Some(3)));
    assert_eq!(reached.load(Ordering::SeqCst), 2);
    assert!(controller.is_completed());

    // The controller stays usable afterwards
    controller.reset().await.unwrap();
    assert!(controller.is_idle());
}

#[tokio::test]
async fn hook_can_read_controller() {
    let controller = sum_controller(TaskConfig::new().argument(Range::new(2, 2)));
    let observed = Arc::new(Mutex::new(None));

    let handle = controller.clone();
    let slot = Arc::clone(&observed);
    controller.on_completed(move |_| {
        *slot.lock().unwrap() = Some((handle.get_state(), handle.get_result()));
    });

    controller.execute().await.unwrap();
    assert_eq!(
        *observed.lock().unwrap(),
        Some((TaskState::Completed, Some(4)))
    );
}

#[tokio::test]
async fn hook_registered_during_dispatch_runs_next_time() {
    let controller = sum_controller(TaskConfig::new().argument(Range::new(1, 1)));
    let late_calls = Arc::new(AtomicUsize::new(0));

    let handle = controller.clone();
    let counter = Arc::clone(&late_calls);
    controller.on_executing(move |_| {
        if handle.hook_count(TaskEvent::Executing) == 1 {
            let counter = Arc::clone(&counter);
            handle.on_executing(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
    });

    controller.execute().await.unwrap();
    assert_eq!(late_calls.load(Ordering::SeqCst), 0);

    controller.execute().await.unwrap();
    assert_eq!(late_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rerun_after_failure_starts_with_empty_slots() {
    let controller = sum_controller(TaskConfig::new());
    let seen = Arc::new(Mutex::new(Vec::new()));

    let log = Arc::clone(&seen);
    controller.on_executing(move |ctx| log.lock().unwrap().push(ctx.clone()));

    controller.execute().await.unwrap();
    assert!(controller.is_failed());
    assert!(controller.get_error().is_some());

    assert_eq!(controller.execute_with(Range::new(1, 2)).await, Ok(Some(3)));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1].state, TaskState::Executing);
    assert_eq!(seen[1].argument, Some(Range::new(1, 2)));
    assert!(seen[1].result.is_none());
    assert!(seen[1].error.is_none());
}

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use crate::tasks::{
    config::{TaskConfig, TaskTag},
    error::ConfigError,
};

#[test]
fn validation() {
    // Empty config is valid
    let config = TaskConfig::<u32>::new();
    assert!(config.validate().is_ok());

    // Empty tag should fail
    let config = TaskConfig::<u32>::new().tag("");
    match config.validate() {
        Err(ConfigError::InvalidConfiguration(_)) => {}
        other => panic!("unexpected result: {:?}", other),
    }

    // Padded tag should fail
    let config = TaskConfig::<u32>::new().tag(" loader ");
    match config.validate() {
        Err(ConfigError::InvalidConfiguration(_)) => {}
        other => panic!("unexpected result: {:?}", other),
    }

    // Abort guard without handler should fail
    let config = TaskConfig::<u32>::new().can_abort(|_| true);
    match config.validate() {
        Err(ConfigError::InvalidConfiguration(_)) => {}
        other => panic!("unexpected result: {:?}", other),
    }

    // Abort guard with handler should pass
    let config = TaskConfig::<u32>::new().can_abort(|_| true).abort(|_| {});
    assert!(config.validate().is_ok());
}

#[test]
fn config_builder() {
    let config = TaskConfig::new()
        .tag("loader")
        .argument(7u32)
        .can_execute(|arg| arg.is_some())
        .can_abort(|_| true)
        .abort(|_| {})
        .create_argument(|| async { Some(1u32) })
        .throw_on_fail(true);

    assert!(matches!(config.tag, Some(TaskTag::Static(ref tag)) if tag == "loader"));
    assert_eq!(config.argument, Some(7));
    assert!(config.can_execute.is_some());
    assert!(config.can_abort.is_some());
    assert!(config.abort.is_some());
    assert!(config.create_argument.is_some());
    assert_eq!(config.throw_on_fail, Some(true));
}

#[test]
fn default_does_not_throw_on_fail() {
    let config = TaskConfig::<u32>::default();
    assert_eq!(config.throw_on_fail, Some(false));
    assert!(config.tag.is_none());
    assert!(config.argument.is_none());
}

#[test]
fn computed_tag_is_resolved_on_each_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let config = TaskConfig::<u32>::new().tag_fn(move || {
        format!("run-{}", counter.fetch_add(1, Ordering::SeqCst))
    });

    let tag = config.tag.unwrap();
    assert_eq!(tag.resolve(), "run-0");
    assert_eq!(tag.resolve(), "run-1");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn tag_from_str_is_static() {
    let tag = TaskTag::from("loader");
    assert!(matches!(tag, TaskTag::Static(_)));
    assert_eq!(format!("{:?}", tag), "Static(\"loader\")");
}

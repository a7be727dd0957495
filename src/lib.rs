//! # tcrm-action
//!
//! A Rust library for tracking the lifecycle of a single asynchronous action.
//! Built for UI and service code that needs to know whether an operation is
//! idle, running, done, failed or aborted, with the argument, result and error
//! that go with it.
//!
//! ## Features
//!
//! - **State machine**: `Idle → Executing → Completed | Failed | Aborted`, with
//!   `reset` back to `Idle`
//! - **Single flight**: a second `execute` while one is running fails fast
//! - **Guards**: `can_execute` / `can_abort` predicates over the argument
//! - **Hooks**: six lifecycle hook lists, dispatched synchronously in order
//! - **Soft abort**: abort the bookkeeping and signal real cancellation through
//!   your own abort handler
//! - **Watch channel**: subscribe to snapshots for reactive bindings
//!
//! ## Quick Start
//!
//! ```rust
//! use tcrm_action::tasks::{
//!     config::TaskConfig, control::TaskStatusInfo, controller::TaskController, state::TaskState,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TaskConfig::new()
//!         .tag("double")
//!         .argument(21)
//!         .can_execute(|arg: Option<&i32>| arg.is_some_and(|n| *n > 0));
//!     config.validate()?;
//!
//!     let controller = TaskController::new(
//!         |arg: Option<i32>| async move { Ok::<_, String>(arg.map(|n| n * 2)) },
//!         config,
//!     );
//!     controller.on_completed(|ctx| println!("completed: {:?}", ctx.result));
//!
//!     let result = controller.execute().await?;
//!     assert_eq!(result, Some(42));
//!     assert_eq!(controller.get_state(), TaskState::Completed);
//!     Ok(())
//! }
//! ```
//!
//! ## Failures
//!
//! A failing action does not make `execute` return an error by default. The
//! controller moves to `Failed` and keeps the error in its error slot:
//!
//! ```rust
//! use tcrm_action::tasks::{config::TaskConfig, control::TaskStatusInfo, controller::TaskController};
//!
//! #[tokio::main]
//! async fn main() {
//!     let controller = TaskController::new(
//!         |_: Option<()>| async { Err::<Option<()>, _>("boom".to_string()) },
//!         TaskConfig::new(),
//!     );
//!
//!     assert_eq!(controller.execute().await, Ok(None));
//!     assert!(controller.is_failed());
//!     assert_eq!(controller.get_error(), Some("boom".to_string()));
//! }
//! ```
//!
//! Set [`throw_on_fail`](tasks::config::TaskConfig::throw_on_fail) to also get
//! the error back from `execute` as [`TaskError::Action`](tasks::error::TaskError::Action).
//!
//! ## Optional Features
//!
//! - `tokio` (default): `TaskController::subscribe` watch channel
//! - `tracing` (default): transition records and action spans; see
//!   [`helper::debug`] for the process-wide debug switch
//! - `serde`: serialization support for states, events and snapshots

pub mod helper;
pub mod tasks;

pub mod action;
pub mod config;
pub mod control;
pub mod controller;
pub mod error;
pub mod event;
pub mod state;

pub(crate) mod context;
pub(crate) mod diagnostics;
pub(crate) mod hook;

pub use hook::Hook;

#[cfg(test)]
mod integration_tests;

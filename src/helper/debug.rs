//! Process-wide diagnostics switch.
//!
//! Executing and Completed transition records are only written to the
//! `tracing` sink once debug mode is turned on. Failed records are always
//! written.
//!
//! ```rust
//! use tcrm_action::helper::debug::{GlobalConfig, configure, is_debug};
//!
//! configure(GlobalConfig::new().debug(true)).unwrap();
//! assert!(is_debug());
//! assert!(configure(GlobalConfig::new()).is_err());
//! ```
use std::sync::OnceLock;

use crate::tasks::error::ConfigError;

static GLOBAL_CONFIG: OnceLock<GlobalConfig> = OnceLock::new();

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalConfig {
    /// Emit Executing and Completed transition records
    pub debug: bool,
}

impl GlobalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn debug(mut self, b: bool) -> Self {
        self.debug = b;
        self
    }
}

/// Sets the process-wide configuration. Only the first call wins.
///
/// # Errors
///
/// Returns [`ConfigError::AlreadyConfigured`] on every call after the first.
pub fn configure(config: GlobalConfig) -> Result<(), ConfigError> {
    GLOBAL_CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyConfigured)
}

/// The active configuration, or the default when `configure` was never called
pub fn global_config() -> GlobalConfig {
    GLOBAL_CONFIG.get().copied().unwrap_or_default()
}

pub fn is_debug() -> bool {
    global_config().debug
}

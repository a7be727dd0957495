use std::{fmt, future::Future, sync::Arc};

use futures::{FutureExt, future::BoxFuture};

use crate::tasks::error::ConfigError;

/// Tag used in diagnostics when a controller has none configured
pub const DEFAULT_TAG: &str = "anonymous-task";

/// Guard evaluated against the controller's argument
pub type ArgumentPredicate<A> = Arc<dyn Fn(Option<&A>) -> bool + Send + Sync>;

/// Invoked when a run is aborted; responsible for any real cancellation
pub type AbortHandler<A> = Arc<dyn Fn(Option<&A>) + Send + Sync>;

/// Produces a fresh argument when the controller is reset
pub type ArgumentFactory<A> = Arc<dyn Fn() -> BoxFuture<'static, Option<A>> + Send + Sync>;

/// Diagnostic identifier of a controller
#[derive(Clone)]
pub enum TaskTag {
    Static(String),
    Computed(Arc<dyn Fn() -> String + Send + Sync>),
}

impl TaskTag {
    pub fn resolve(&self) -> String {
        match self {
            TaskTag::Static(tag) => tag.clone(),
            TaskTag::Computed(f) => f(),
        }
    }
}

impl fmt::Debug for TaskTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskTag::Static(tag) => f.debug_tuple("Static").field(tag).finish(),
            TaskTag::Computed(_) => f.debug_tuple("Computed").field(&"<fn>").finish(),
        }
    }
}

impl From<&str> for TaskTag {
    fn from(tag: &str) -> Self {
        TaskTag::Static(tag.to_string())
    }
}

impl From<String> for TaskTag {
    fn from(tag: String) -> Self {
        TaskTag::Static(tag)
    }
}

/// Configuration of a single [`TaskController`](crate::tasks::controller::TaskController)
///
/// Every field is optional. Unset guards fall back to their defaults:
/// `can_execute` allows any argument, `can_abort` allows aborting only
/// when an `abort` handler is present.
///
/// Guards run while the controller's slots are locked and must not call back
/// into the controller.
///
/// # Examples
///
/// ```rust
/// use tcrm_action::tasks::config::TaskConfig;
///
/// let config = TaskConfig::new()
///     .tag("fetch-user")
///     .argument(42u64)
///     .can_execute(|id: Option<&u64>| id.is_some_and(|id| *id > 0))
///     .abort(|_id| println!("cancel requested"))
///     .create_argument(|| async { Some(1u64) })
///     .throw_on_fail(true);
///
/// assert!(config.validate().is_ok());
/// ```
pub struct TaskConfig<A> {
    /// Identifier used in diagnostics and guard errors
    pub tag: Option<TaskTag>,

    /// Initial argument
    pub argument: Option<A>,

    /// Guard for `execute`, evaluated against the effective argument
    pub can_execute: Option<ArgumentPredicate<A>>,

    /// Guard for `abort`, evaluated against the current argument
    pub can_abort: Option<ArgumentPredicate<A>>,

    /// Abort capability; without it `abort` always fails
    pub abort: Option<AbortHandler<A>>,

    /// Argument factory run by `reset`
    pub create_argument: Option<ArgumentFactory<A>>,

    /// Re-raise the action's error from `execute`
    pub throw_on_fail: Option<bool>,
}

impl<A> Default for TaskConfig<A> {
    fn default() -> Self {
        TaskConfig {
            tag: None,
            argument: None,
            can_execute: None,
            can_abort: None,
            abort: None,
            create_argument: None,
            throw_on_fail: Some(false),
        }
    }
}

impl<A: Clone> Clone for TaskConfig<A> {
    fn clone(&self) -> Self {
        TaskConfig {
            tag: self.tag.clone(),
            argument: self.argument.clone(),
            can_execute: self.can_execute.clone(),
            can_abort: self.can_abort.clone(),
            abort: self.abort.clone(),
            create_argument: self.create_argument.clone(),
            throw_on_fail: self.throw_on_fail,
        }
    }
}

impl<A: fmt::Debug> fmt::Debug for TaskConfig<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskConfig")
            .field("tag", &self.tag)
            .field("argument", &self.argument)
            .field("can_execute", &self.can_execute.is_some())
            .field("can_abort", &self.can_abort.is_some())
            .field("abort", &self.abort.is_some())
            .field("create_argument", &self.create_argument.is_some())
            .field("throw_on_fail", &self.throw_on_fail)
            .finish()
    }
}

impl<A> TaskConfig<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(TaskTag::Static(tag.into()));
        self
    }

    /// Tag recomputed every time a diagnostic or error needs it
    pub fn tag_fn<F>(mut self, f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.tag = Some(TaskTag::Computed(Arc::new(f)));
        self
    }

    pub fn argument(mut self, argument: A) -> Self {
        self.argument = Some(argument);
        self
    }

    pub fn can_execute<F>(mut self, predicate: F) -> Self
    where
        F: Fn(Option<&A>) -> bool + Send + Sync + 'static,
    {
        self.can_execute = Some(Arc::new(predicate));
        self
    }

    pub fn can_abort<F>(mut self, predicate: F) -> Self
    where
        F: Fn(Option<&A>) -> bool + Send + Sync + 'static,
    {
        self.can_abort = Some(Arc::new(predicate));
        self
    }

    pub fn abort<F>(mut self, handler: F) -> Self
    where
        F: Fn(Option<&A>) + Send + Sync + 'static,
    {
        self.abort = Some(Arc::new(handler));
        self
    }

    pub fn create_argument<F, Fut>(mut self, factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<A>> + Send + 'static,
    {
        self.create_argument = Some(Arc::new(move || factory().boxed()));
        self
    }

    pub fn throw_on_fail(mut self, b: bool) -> Self {
        self.throw_on_fail = Some(b);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        const MAX_TAG_LEN: usize = 256;

        // Validate tag
        if let Some(TaskTag::Static(tag)) = &self.tag {
            if tag.is_empty() {
                return Err(ConfigError::InvalidConfiguration(
                    "Tag cannot be empty".to_string(),
                ));
            }
            if tag.trim() != tag {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Tag '{}' cannot have leading/trailing whitespace",
                    tag
                )));
            }
            if tag.len() > MAX_TAG_LEN {
                return Err(ConfigError::InvalidConfiguration(
                    "Tag length exceeds maximum allowed length".to_string(),
                ));
            }
        }

        // Abort guard requires an abort handler
        if self.can_abort.is_some() && self.abort.is_none() {
            return Err(ConfigError::InvalidConfiguration(
                "can_abort guard configured without an abort handler".to_string(),
            ));
        }

        Ok(())
    }
}

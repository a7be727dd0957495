use std::future::Future;

use futures::{FutureExt, future::BoxFuture};

/// The asynchronous unit of work a controller wraps
///
/// Receives the controller's argument (if any) and resolves to an optional
/// result. Resolving to `None` is indistinguishable from "no result".
///
/// Any `Fn(Option<A>) -> impl Future<Output = Result<Option<R>, E>>` closure
/// implements this trait.
pub trait TaskAction<A, R, E>: Send + Sync {
    fn call(&self, argument: Option<A>) -> BoxFuture<'static, Result<Option<R>, E>>;
}

impl<A, R, E, F, Fut> TaskAction<A, R, E> for F
where
    F: Fn(Option<A>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Option<R>, E>> + Send + 'static,
{
    fn call(&self, argument: Option<A>) -> BoxFuture<'static, Result<Option<R>, E>> {
        (self)(argument).boxed()
    }
}

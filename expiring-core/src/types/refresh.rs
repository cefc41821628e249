//! Adapters turning closures into [`Refresh`] implementations.

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;

use async_trait::async_trait;

use crate::traits::Refresh;

/// Async closure refresher.
///
/// The closure is called once per refresh and its future awaited.
pub struct FnRefresh<F> {
    f: F,
}

impl<F> FnRefresh<F> {
    /// Wraps an async closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> fmt::Debug for FnRefresh<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRefresh").finish_non_exhaustive()
    }
}

#[async_trait]
impl<T, E, F, Fut> Refresh<T> for FnRefresh<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Option<T>, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    type Error = E;

    async fn refresh(&self) -> Result<Option<T>, E> {
        (self.f)().await
    }
}

/// Synchronous closure refresher.
///
/// The resulting refresh completes on its first poll.
pub struct SyncFnRefresh<F> {
    f: F,
}

impl<F> SyncFnRefresh<F> {
    /// Wraps a synchronous closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> fmt::Debug for SyncFnRefresh<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncFnRefresh").finish_non_exhaustive()
    }
}

#[async_trait]
impl<T, E, F> Refresh<T> for SyncFnRefresh<F>
where
    F: Fn() -> Result<Option<T>, E> + Send + Sync,
    T: Send + 'static,
    E: Send + 'static,
{
    type Error = E;

    async fn refresh(&self) -> Result<Option<T>, E> {
        (self.f)()
    }
}

/// Refresher installed when none is configured. Always yields `Ok(None)`.
pub struct NoRefresh<E> {
    _error: PhantomData<fn() -> E>,
}

impl<E> NoRefresh<E> {
    /// Creates the no-op refresher.
    pub fn new() -> Self {
        Self {
            _error: PhantomData,
        }
    }
}

impl<E> Default for NoRefresh<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for NoRefresh<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NoRefresh")
    }
}

#[async_trait]
impl<T, E> Refresh<T> for NoRefresh<E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    type Error = E;

    async fn refresh(&self) -> Result<Option<T>, E> {
        Ok(None)
    }
}

//! # Local tasks
//!
//! Composition is single-threaded, so async work started from effects runs
//! on a thread-local spawner. Platforms install one with [`set_spawner`];
//! tests and demos usually own a [`LocalExecutor`] and drive it by hand with
//! [`LocalExecutor::run_until_stalled`].
//!
//! ```rust
//! use mounted_core::*;
//!
//! let mut exec = LocalExecutor::new();
//! exec.install();
//!
//! spawn_local(async { /* ... */ }).unwrap();
//! exec.run_until_stalled();
//! ```

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use futures::executor::{LocalPool, LocalSpawner};
use futures::future::{FutureExt, LocalBoxFuture};
use futures::task::{LocalFutureObj, LocalSpawn};

#[derive(Debug, thiserror::Error)]
pub enum SpawnError {
    #[error("no local spawner installed on this thread")]
    NoSpawner,
    #[error("local executor has shut down")]
    Shutdown,
}

/// Something that can run `!Send` futures on the current thread.
pub trait Spawner: 'static {
    fn spawn_boxed(&self, task: LocalBoxFuture<'static, ()>) -> Result<(), SpawnError>;
}

impl Spawner for LocalSpawner {
    fn spawn_boxed(&self, task: LocalBoxFuture<'static, ()>) -> Result<(), SpawnError> {
        self.spawn_local_obj(LocalFutureObj::new(task))
            .map_err(|_| SpawnError::Shutdown)
    }
}

thread_local! {
    static SPAWNER: RefCell<Option<Rc<dyn Spawner>>> = const { RefCell::new(None) };
}

/// Install this thread's spawner, returning the one it replaces.
pub fn set_spawner(spawner: Rc<dyn Spawner>) -> Option<Rc<dyn Spawner>> {
    SPAWNER.with(|s| s.borrow_mut().replace(spawner))
}

/// Remove this thread's spawner.
pub fn clear_spawner() -> Option<Rc<dyn Spawner>> {
    SPAWNER.with(|s| s.borrow_mut().take())
}

pub fn current_spawner() -> Option<Rc<dyn Spawner>> {
    SPAWNER.with(|s| s.borrow().clone())
}

/// Spawn onto this thread's installed spawner.
pub fn spawn_local(task: impl Future<Output = ()> + 'static) -> Result<(), SpawnError> {
    let spawner = current_spawner().ok_or(SpawnError::NoSpawner)?;
    spawner.spawn_boxed(task.boxed_local())
}

/// Single-threaded executor backed by `futures`' `LocalPool`.
pub struct LocalExecutor {
    pool: LocalPool,
}

impl LocalExecutor {
    pub fn new() -> Self {
        Self {
            pool: LocalPool::new(),
        }
    }

    pub fn spawner(&self) -> Rc<dyn Spawner> {
        Rc::new(self.pool.spawner())
    }

    /// Make this executor the thread's spawner.
    pub fn install(&self) {
        if set_spawner(self.spawner()).is_some() {
            log::debug!("executor: replaced previously installed spawner");
        }
    }

    /// Polls every task until none can make progress.
    pub fn run_until_stalled(&mut self) {
        self.pool.run_until_stalled();
    }

    /// Runs until every spawned task has completed.
    pub fn run(&mut self) {
        self.pool.run();
    }

    pub fn run_until<F: Future>(&mut self, future: F) -> F::Output {
        self.pool.run_until(future)
    }
}

impl Default for LocalExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn spawn_without_spawner_fails() {
        clear_spawner();
        let err = spawn_local(async {}).unwrap_err();
        assert!(matches!(err, SpawnError::NoSpawner));
    }

    #[test]
    fn tasks_run_only_when_driven() {
        let mut exec = LocalExecutor::new();
        exec.install();

        let ran = Rc::new(Cell::new(false));
        let r = ran.clone();
        spawn_local(async move { r.set(true) }).unwrap();

        assert!(!ran.get());
        exec.run_until_stalled();
        assert!(ran.get());
        clear_spawner();
    }

    #[test]
    fn spawn_after_pool_dropped_reports_shutdown() {
        let exec = LocalExecutor::new();
        let spawner = exec.spawner();
        drop(exec);

        let err = spawner.spawn_boxed(async {}.boxed_local()).unwrap_err();
        assert!(matches!(err, SpawnError::Shutdown));
    }
}

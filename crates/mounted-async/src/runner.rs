use std::cell::{Cell, RefCell};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use mounted_core::{Dispose, SpawnError, Spawner, executor::current_spawner};

use crate::error::panic_message;
use crate::liveness::{LivenessGuard, LivenessToken, liveness};
use crate::{MountedError, Produced, ProducerFn, Reactions, RunnerOptions};

pub type ActivationId = u64;

/// Runs producers and delivers their results while the activation is live.
///
/// Each call to [`AsyncRunner::activate`] is one activation with its own
/// liveness flag. Tearing an activation down never cancels the future; it
/// only stops the result from reaching the reactions.
pub struct AsyncRunner {
    options: RunnerOptions,
    spawner: Option<Rc<dyn Spawner>>,
    next_id: Cell<ActivationId>,
}

impl AsyncRunner {
    /// A runner that spawns onto the thread's installed spawner.
    pub fn new(options: RunnerOptions) -> Self {
        Self {
            options,
            spawner: None,
            next_id: Cell::new(0),
        }
    }

    pub fn with_spawner(spawner: Rc<dyn Spawner>, options: RunnerOptions) -> Self {
        Self {
            options,
            spawner: Some(spawner),
            next_id: Cell::new(0),
        }
    }

    pub fn options(&self) -> &RunnerOptions {
        &self.options
    }

    /// Starts one activation of `producer`.
    ///
    /// The producer runs synchronously and registers its reactions. An
    /// `Idle` result ends the activation quietly. An `Immediate` result, or a
    /// panic inside the producer, is delivered to the `error` path right
    /// away. A `Pending` future is spawned and its outcome delivered once it
    /// settles, provided the returned [`Activation`] is still alive. If the
    /// future cannot be spawned, `MountedError::Spawn` goes to the `error`
    /// path instead.
    pub fn activate<T: 'static, E: 'static>(&self, producer: &ProducerFn<T, E>) -> Activation {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let label = self.options.label;

        let (guard, token) = liveness();
        let mut reactions = Reactions::new();

        match catch_unwind(AssertUnwindSafe(|| producer.call(&mut reactions))) {
            Ok(Produced::Idle) => {
                log::trace!("{label}: activation {id} idle");
            }
            Ok(Produced::Pending(future)) => {
                let delivery = Delivery {
                    id,
                    label,
                    trace_suppressed: self.options.trace_suppressed,
                    token,
                };
                self.spawn(delivery, reactions, future);
            }
            Ok(Produced::Immediate(_)) => {
                log::warn!("{label}: activation {id} producer returned an immediate value");
                reactions.dispatch(Err(MountedError::InvalidProducerResult));
            }
            Err(payload) => {
                let message = panic_message(&*payload);
                log::warn!("{label}: activation {id} producer panicked: {message}");
                reactions.dispatch(Err(MountedError::ProducerRejected(message)));
            }
        }

        Activation { id, label, guard }
    }

    fn spawn<T: 'static, E: 'static>(
        &self,
        delivery: Delivery,
        reactions: Reactions<T, E>,
        future: LocalBoxFuture<'static, Result<T, E>>,
    ) {
        let (id, label) = (delivery.id, delivery.label);

        let Some(spawner) = self.spawner.clone().or_else(current_spawner) else {
            log::error!("{label}: activation {id} has no spawner");
            reactions.dispatch(Err(MountedError::Spawn(SpawnError::NoSpawner)));
            return;
        };

        // Shared so a rejected spawn can still reach the handlers.
        let slot = Rc::new(RefCell::new(Some(reactions)));
        let task_slot = slot.clone();
        let spawned = spawner.spawn_boxed(
            async move {
                let outcome = settle(future).await;
                let reactions = task_slot.borrow_mut().take();
                if let Some(reactions) = reactions {
                    delivery.deliver(reactions, outcome);
                }
            }
            .boxed_local(),
        );

        match spawned {
            Ok(()) => log::debug!("{label}: activation {id} started"),
            Err(err) => {
                log::error!("{label}: activation {id} could not be spawned: {err}");
                let reactions = slot.borrow_mut().take();
                if let Some(reactions) = reactions {
                    reactions.dispatch(Err(MountedError::Spawn(err)));
                }
            }
        }
    }
}

impl Default for AsyncRunner {
    fn default() -> Self {
        Self::new(RunnerOptions::default())
    }
}

/// Handle to one activation. Dropping it tears the activation down.
#[derive(Debug)]
pub struct Activation {
    id: ActivationId,
    label: &'static str,
    guard: LivenessGuard,
}

impl Activation {
    pub fn id(&self) -> ActivationId {
        self.id
    }

    pub fn is_live(&self) -> bool {
        self.guard.is_live()
    }

    /// Suppresses delivery of this activation's result. The future keeps running.
    pub fn teardown(self) {
        log::trace!("{}: activation {} torn down", self.label, self.id);
        self.guard.end();
    }

    pub fn into_dispose(self) -> Dispose {
        Dispose::new(move || self.teardown())
    }
}

struct Delivery {
    id: ActivationId,
    label: &'static str,
    trace_suppressed: bool,
    token: LivenessToken,
}

impl Delivery {
    fn deliver<T: 'static, E: 'static>(
        self,
        reactions: Reactions<T, E>,
        outcome: Result<T, MountedError<E>>,
    ) {
        let Delivery {
            id,
            label,
            trace_suppressed,
            token,
        } = self;

        // Checked once; every handler below belongs to the same delivery.
        if !token.is_live() {
            if trace_suppressed {
                log::trace!("{label}: activation {id} settled after teardown; result dropped");
            }
            return;
        }

        log::debug!(
            "{label}: activation {id} settled ({})",
            if outcome.is_ok() { "success" } else { "error" }
        );
        reactions.dispatch(outcome);
    }
}

async fn settle<T, E>(future: LocalBoxFuture<'static, Result<T, E>>) -> Result<T, MountedError<E>> {
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(MountedError::Domain(err)),
        Err(payload) => Err(MountedError::ProducerRejected(panic_message(&*payload))),
    }
}

use std::future::Future;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};

use crate::Reactions;

/// What a producer hands back after registering its reactions.
pub enum Produced<T, E> {
    /// Nothing to do this time; no reaction fires.
    Idle,
    /// Work in flight; its result is delivered if still mounted.
    Pending(LocalBoxFuture<'static, Result<T, E>>),
    /// A value computed synchronously. Producers must defer their work, so
    /// this is reported as `MountedError::InvalidProducerResult`.
    Immediate(T),
}

impl<T, E> Produced<T, E> {
    pub fn pending(future: impl Future<Output = Result<T, E>> + 'static) -> Self {
        Produced::Pending(future.boxed_local())
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Produced::Idle)
    }
}

impl<T, E> From<Option<LocalBoxFuture<'static, Result<T, E>>>> for Produced<T, E> {
    fn from(future: Option<LocalBoxFuture<'static, Result<T, E>>>) -> Self {
        future.map_or(Produced::Idle, Produced::Pending)
    }
}

impl<T, E> std::fmt::Debug for Produced<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Produced::Idle => f.write_str("Idle"),
            Produced::Pending(_) => f.write_str("Pending(..)"),
            Produced::Immediate(_) => f.write_str("Immediate(..)"),
        }
    }
}

type ProducerBody<T, E> = dyn Fn(&mut Reactions<T, E>) -> Produced<T, E>;

/// A producer function with an identity.
///
/// Two handles are equal when they point at the same function, which is
/// how the hooks tell "same producer as last render" from "new producer".
pub struct ProducerFn<T, E> {
    body: Rc<ProducerBody<T, E>>,
}

impl<T, E> ProducerFn<T, E> {
    pub fn new(body: impl Fn(&mut Reactions<T, E>) -> Produced<T, E> + 'static) -> Self {
        Self {
            body: Rc::new(body),
        }
    }

    /// Wraps an already shared function without changing its identity.
    pub fn from_rc<F>(body: Rc<F>) -> Self
    where
        F: Fn(&mut Reactions<T, E>) -> Produced<T, E> + 'static,
    {
        Self { body }
    }

    pub(crate) fn call(&self, reactions: &mut Reactions<T, E>) -> Produced<T, E> {
        (self.body)(reactions)
    }
}

impl<T, E> Clone for ProducerFn<T, E> {
    fn clone(&self) -> Self {
        Self {
            body: self.body.clone(),
        }
    }
}

impl<T, E> PartialEq for ProducerFn<T, E> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body)
    }
}

impl<T, E> Eq for ProducerFn<T, E> {}

impl<T, E> std::fmt::Debug for ProducerFn<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ProducerFn")
            .field(&Rc::as_ptr(&self.body).cast::<()>())
            .finish()
    }
}

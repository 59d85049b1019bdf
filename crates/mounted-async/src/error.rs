use std::any::Any;

use mounted_core::SpawnError;

/// Why an activation ended on the `error` path.
#[derive(Debug, thiserror::Error)]
pub enum MountedError<E> {
    /// The producer handed back a value that was already computed instead of
    /// a pending future.
    #[error("producer returned an immediate value; expected a pending future or nothing")]
    InvalidProducerResult,
    /// The producer, or the future it returned, panicked.
    #[error("producer rejected: {0}")]
    ProducerRejected(String),
    /// The future resolved to `Err`.
    #[error("{0}")]
    Domain(E),
    /// The future could not be handed to an executor, so it never ran.
    #[error("could not start activation: {0}")]
    Spawn(SpawnError),
}

impl<E> MountedError<E> {
    /// True when the future itself resolved to `Err`.
    pub fn is_domain(&self) -> bool {
        matches!(self, MountedError::Domain(_))
    }

    /// The domain error, if this is one.
    pub fn into_domain(self) -> Option<E> {
        match self {
            MountedError::Domain(e) => Some(e),
            _ => None,
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    }
}

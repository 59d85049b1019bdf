use crate::MountedError;

type SuccessFn<T> = Box<dyn FnOnce(T)>;
type ErrorFn<E> = Box<dyn FnOnce(MountedError<E>)>;
type AlwaysFn = Box<dyn FnOnce(bool)>;
type FinallyFn = Box<dyn FnOnce()>;

/// Handlers a producer registers before it returns.
///
/// Each slot holds at most one handler; registering again replaces the
/// previous one. The whole set is consumed by a single delivery.
pub struct Reactions<T, E> {
    success: Option<SuccessFn<T>>,
    error: Option<ErrorFn<E>>,
    always: Option<AlwaysFn>,
    finally: Option<FinallyFn>,
}

impl<T: 'static, E: 'static> Reactions<T, E> {
    pub fn new() -> Self {
        Self {
            success: None,
            error: None,
            always: None,
            finally: None,
        }
    }

    /// Called with the resolved value.
    pub fn success(&mut self, handler: impl FnOnce(T) + 'static) -> &mut Self {
        self.success = Some(Box::new(handler));
        self
    }

    /// Called with the failure, whatever its cause.
    pub fn error(&mut self, handler: impl FnOnce(MountedError<E>) + 'static) -> &mut Self {
        self.error = Some(Box::new(handler));
        self
    }

    /// Called first on either path, with `true` on success.
    pub fn always(&mut self, handler: impl FnOnce(bool) + 'static) -> &mut Self {
        self.always = Some(Box::new(handler));
        self
    }

    /// Called last on either path.
    pub fn finally(&mut self, handler: impl FnOnce() + 'static) -> &mut Self {
        self.finally = Some(Box::new(handler));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.success.is_none()
            && self.error.is_none()
            && self.always.is_none()
            && self.finally.is_none()
    }

    /// Runs the registered handlers for `outcome`: `always`, then the
    /// terminal handler, then `finally`.
    pub(crate) fn dispatch(self, outcome: Result<T, MountedError<E>>) {
        let Reactions {
            success,
            error,
            always,
            finally,
        } = self;

        if let Some(always) = always {
            always(outcome.is_ok());
        }
        match outcome {
            Ok(value) => {
                if let Some(success) = success {
                    success(value);
                }
            }
            Err(err) => {
                if let Some(error) = error {
                    error(err);
                }
            }
        }
        if let Some(finally) = finally {
            finally();
        }
    }
}

impl<T: 'static, E: 'static> Default for Reactions<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> std::fmt::Debug for Reactions<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reactions")
            .field("success", &self.success.is_some())
            .field("error", &self.error.is_some())
            .field("always", &self.always.is_some())
            .field("finally", &self.finally.is_some())
            .finish()
    }
}

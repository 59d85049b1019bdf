use std::cell::Cell;
use std::rc::Rc;

/// Creates the two halves of one activation's liveness flag.
///
/// The flag starts out live. The guard is the only writer: dropping it (or
/// calling [`LivenessGuard::end`]) marks the activation dead, and since the
/// guard is neither `Clone` nor reusable that transition happens exactly
/// once. The token is the only reader and travels with the spawned task.
pub fn liveness() -> (LivenessGuard, LivenessToken) {
    let flag = Rc::new(Cell::new(true));
    (
        LivenessGuard { flag: flag.clone() },
        LivenessToken { flag },
    )
}

#[derive(Debug)]
pub struct LivenessGuard {
    flag: Rc<Cell<bool>>,
}

impl LivenessGuard {
    pub fn is_live(&self) -> bool {
        self.flag.get()
    }

    /// Marks the activation torn down.
    pub fn end(self) {
        drop(self);
    }
}

impl Drop for LivenessGuard {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

#[derive(Debug)]
pub struct LivenessToken {
    flag: Rc<Cell<bool>>,
}

impl LivenessToken {
    pub fn is_live(&self) -> bool {
        self.flag.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_live_and_dies_with_guard() {
        let (guard, token) = liveness();
        assert!(guard.is_live());
        assert!(token.is_live());

        guard.end();
        assert!(!token.is_live());
    }

    #[test]
    fn flags_are_per_activation() {
        let (first, first_token) = liveness();
        let (_second, second_token) = liveness();

        drop(first);
        assert!(!first_token.is_live());
        assert!(second_token.is_live());
    }
}

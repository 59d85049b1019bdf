use crate::{Dispose, on_unmount, remember, scoped_effect};
use std::cell::RefCell;
use std::rc::Rc;

/// cleanup on key change or unmount
///
/// `effect` runs on the first composition and again whenever `key` differs
/// from the previous render's key. The previous run's `Dispose` always runs
/// before the next `effect`, and the last one runs when the enclosing scope
/// is disposed.
pub fn disposable_effect<K: PartialEq + Clone + 'static>(
    key: K,
    effect: impl FnOnce() -> Dispose + 'static,
) {
    // Slot-based (like Compose). For branch-stability use `remember_with_key` variants later.
    let last_key = remember(|| RefCell::new(None::<K>));
    let cleanup_slot = remember(|| RefCell::new(None::<Dispose>));
    let installed = remember(|| RefCell::new(false));

    // Install a single unmount disposer for this callsite.
    if !installed.replace(true) {
        let cleanup_slot = cleanup_slot.clone();
        scoped_effect(move || {
            on_unmount(move || {
                let previous = cleanup_slot.borrow_mut().take();
                if let Some(d) = previous {
                    d.run();
                }
            })
        });
    }

    // Key change: cleanup previous + run new effect
    let changed = last_key.borrow().as_ref() != Some(&key);
    if changed {
        *last_key.borrow_mut() = Some(key);

        let previous = cleanup_slot.borrow_mut().take();
        if let Some(d) = previous {
            d.run();
        }

        let d = effect();
        *cleanup_slot.borrow_mut() = Some(d);
    }
}

/// Memoizes `callback` across renders.
///
/// Returns the `Rc` stored on an earlier render as long as `deps` compares
/// equal to that render's `deps`; the freshly built closure passed this time
/// is dropped. When `deps` changes, `callback` replaces the stored one.
pub fn remember_callback<D, F>(deps: D, callback: F) -> Rc<F>
where
    D: PartialEq + 'static,
    F: 'static,
{
    let slot = remember(|| RefCell::new(None::<(D, Rc<F>)>));
    let mut slot = slot.borrow_mut();

    if let Some((prev, cb)) = slot.as_ref()
        && *prev == deps
    {
        return cb.clone();
    }

    let cb = Rc::new(callback);
    *slot = Some((deps, cb.clone()));
    cb
}

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::scope::Scope;

thread_local! {
    pub static COMPOSER: RefCell<Composer> = RefCell::new(Composer::default());
}

/// Remembered slots for one composition.
#[derive(Default)]
pub struct Composer {
    pub slots: Vec<Box<dyn Any>>,
    pub cursor: usize,
    pub keyed_slots: HashMap<String, Box<dyn Any>>,
}

/// Installs a composition's slots as the thread's active `COMPOSER` for the
/// length of one render pass, and swaps them back out on drop.
pub struct ComposeGuard<'a> {
    composition: &'a Composition,
}

impl<'a> ComposeGuard<'a> {
    pub fn begin(composition: &'a Composition) -> Self {
        COMPOSER.with(|c| {
            let mut active = c.borrow_mut();
            std::mem::swap(&mut *active, &mut *composition.composer.borrow_mut());
            active.cursor = 0;
        });
        ComposeGuard { composition }
    }

    pub fn scope(&self) -> &Scope {
        &self.composition.scope
    }
}

impl Drop for ComposeGuard<'_> {
    fn drop(&mut self) {
        COMPOSER.with(|c| {
            std::mem::swap(
                &mut *c.borrow_mut(),
                &mut *self.composition.composer.borrow_mut(),
            );
        });
    }
}

/// A mounted component instance: its remembered slots plus the scope whose
/// disposal counts as unmount.
pub struct Composition {
    scope: Scope,
    composer: RefCell<Composer>,
    renders: Cell<u64>,
}

impl Composition {
    pub fn new() -> Self {
        Self {
            scope: Scope::new(),
            composer: RefCell::new(Composer::default()),
            renders: Cell::new(0),
        }
    }

    /// Runs one render pass. Slot-based `remember` calls resolve against
    /// this composition in call order.
    pub fn render<R>(&self, content: impl FnOnce() -> R) -> R {
        if self.scope.is_disposed() {
            log::warn!("composition: render after unmount; effects will not be retained");
        }
        let n = self.renders.get() + 1;
        self.renders.set(n);
        log::trace!("composition: render #{n}");

        let guard = ComposeGuard::begin(self);
        guard.scope().run(content)
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn render_count(&self) -> u64 {
        self.renders.get()
    }

    /// Unmounts: runs every cleanup registered during composition.
    pub fn dispose(self) {
        log::trace!("composition: unmount after {} render(s)", self.renders.get());
        self.scope.clone().dispose();
    }
}

impl Default for Composition {
    fn default() -> Self {
        Self::new()
    }
}

/// Slot-based remember (sequential composition only)
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    let cursor = COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let cursor = c.cursor;
        c.cursor += 1;
        cursor
    });

    let existing = COMPOSER.with(|c| {
        let c = c.borrow();
        c.slots
            .get(cursor)
            .map(|slot| slot.downcast_ref::<Rc<T>>().cloned())
    });

    match existing {
        Some(Some(rc)) => rc,
        found => {
            if found.is_some() {
                log::warn!(
                    "remember: slot {} type changed; replacing. \
                     If this is due to conditional composition, prefer remember_with_key.",
                    cursor
                );
            } else {
                // reserve the slot: init may itself remember
                COMPOSER.with(|c| c.borrow_mut().slots.push(Box::new(())));
            }
            let rc: Rc<T> = Rc::new(init());
            COMPOSER.with(|c| c.borrow_mut().slots[cursor] = Box::new(rc.clone()));
            rc
        }
    }
}

/// Key-based remember
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    let key = key.into();

    let existing = COMPOSER.with(|c| {
        let c = c.borrow();
        c.keyed_slots
            .get(&key)
            .map(|slot| slot.downcast_ref::<Rc<T>>().cloned())
    });

    match existing {
        Some(Some(rc)) => rc,
        found => {
            if found.is_some() {
                log::warn!(
                    "remember_with_key: key '{}' reused with a different type; replacing.",
                    key
                );
            }
            let rc: Rc<T> = Rc::new(init());
            COMPOSER.with(|c| {
                c.borrow_mut().keyed_slots.insert(key, Box::new(rc.clone()));
            });
            rc
        }
    }
}

pub fn remember_state<T: 'static>(init: impl FnOnce() -> T) -> Rc<RefCell<T>> {
    remember(|| RefCell::new(init()))
}

pub fn remember_state_with_key<T: 'static>(
    key: impl Into<String>,
    init: impl FnOnce() -> T,
) -> Rc<RefCell<T>> {
    remember_with_key(key, || RefCell::new(init()))
}

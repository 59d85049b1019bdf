//! # Composition, scopes and effects
//!
//! `mounted-core` is the small host runtime that `mounted-async` hooks run
//! inside. There are four pieces:
//!
//! - `Composition` — a mounted component instance; each `render` is one pass.
//! - `remember*` — lifecycle‑aware storage bound to a composition.
//! - `effect` / `scoped_effect` / `disposable_effect` — side‑effects with cleanup.
//! - `LocalExecutor` / `spawn_local` — single‑threaded async tasks.
//!
//! ## Remembered state
//!
//! ```rust
//! use mounted_core::*;
//!
//! let comp = Composition::new();
//! let first = comp.render(|| remember_state(|| 0));
//! *first.borrow_mut() += 1;
//!
//! let second = comp.render(|| remember_state(|| 0));
//! assert_eq!(*second.borrow(), 1);
//! ```
//!
//! - `remember` and `remember_state` are order‑based: the Nth call in a
//!   render always refers to the Nth stored value.
//! - `remember_with_key` and `remember_state_with_key` are key‑based and more
//!   stable across conditional branches.
//!
//! ## Effects and cleanup
//!
//! `disposable_effect(key, f)` runs `f` after the first render and whenever
//! `key` changes; the `Dispose` returned by the previous run is called first.
//! The last one runs when the composition is disposed:
//!
//! ```rust
//! use mounted_core::*;
//!
//! let comp = Composition::new();
//! comp.render(|| {
//!     disposable_effect("user-1", || on_unmount(|| println!("cleaned up")));
//! });
//! comp.dispose(); // prints "cleaned up"
//! ```
//!
//! `remember_callback(deps, f)` keeps handing back the first `Rc<F>` until
//! `deps` changes, which gives closures a stable identity across renders.

pub mod effects;
pub mod effects_ext;
pub mod executor;
pub mod prelude;
pub mod runtime;
pub mod scope;

#[cfg(test)]
mod tests;

pub use effects::*;
pub use effects_ext::*;
pub use executor::*;
pub use prelude::*;
pub use runtime::*;

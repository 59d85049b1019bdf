//! # Mounted async
//!
//! Start async work from a component, and hear about the result only if the
//! component is still mounted when it arrives.
//!
//! A producer registers its reactions, then hands back a future:
//!
//! ```rust
//! use mounted_async::*;
//! use mounted_core::{Composition, LocalExecutor};
//!
//! let mut exec = LocalExecutor::new();
//! exec.install();
//!
//! let comp = Composition::new();
//! comp.render(|| {
//!     use_mounted_async_with(7u32, |r: &mut Reactions<String, String>| {
//!         r.always(|ok| println!("loaded: {ok}"))
//!             .success(|name| println!("hello {name}"))
//!             .error(|e| println!("failed: {e}"))
//!             .finally(|| println!("done"));
//!         Produced::pending(async { Ok("ada".to_string()) })
//!     });
//! });
//!
//! exec.run_until_stalled(); // loaded: true, hello ada, done
//! comp.dispose();
//! ```
//!
//! - `always(ok)` runs first, then `success` or `error`, then `finally`.
//! - If the composition is disposed, or the dependencies change, before the
//!   future settles, none of them run. The future itself is not cancelled.
//! - `Produced::Idle` means "nothing to do": no reaction runs.
//! - Failures reach `error` as a [`MountedError`]: the future's own `Err`,
//!   a panic, or a producer that returned `Produced::Immediate`.
//!
//! [`AsyncRunner`] exposes the same activation logic without a composition.

pub mod error;
pub mod hooks;
pub mod liveness;
pub mod options;
pub mod producer;
pub mod reactions;
pub mod runner;


pub use error::MountedError;
pub use hooks::*;
pub use liveness::{LivenessGuard, LivenessToken, liveness};
pub use options::RunnerOptions;
pub use producer::{Produced, ProducerFn};
pub use reactions::Reactions;
pub use runner::{Activation, ActivationId, AsyncRunner};

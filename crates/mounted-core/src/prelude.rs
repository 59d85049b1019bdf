pub use crate::effects::{Dispose, effect, on_unmount};
pub use crate::effects_ext::{disposable_effect, remember_callback};
pub use crate::executor::{LocalExecutor, SpawnError, Spawner, set_spawner, spawn_local};
pub use crate::runtime::{
    ComposeGuard, Composition, remember, remember_state, remember_state_with_key,
    remember_with_key,
};
pub use crate::scope::{Scope, current_scope, scoped_effect};

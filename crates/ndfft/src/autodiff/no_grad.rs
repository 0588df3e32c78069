//! Scoped suspension of graph recording.
//!
//! While a [`NoGradGuard`] is alive, tracked operations compute their values
//! but register no nodes. The backward driver uses this to run rules without
//! growing the graph unless a differentiable backward pass was requested.

use std::cell::Cell;

thread_local! {
    static GRAD_ENABLED: Cell<bool> = const { Cell::new(true) };
}

/// Whether tracked operations currently record graph nodes.
pub fn is_grad_enabled() -> bool {
    GRAD_ENABLED.with(Cell::get)
}

/// RAII guard disabling recording until dropped.
///
/// Guards nest: dropping one restores the state that was active when it was
/// created.
#[derive(Debug)]
pub struct NoGradGuard {
    previous_state: bool,
}

impl NoGradGuard {
    pub fn new() -> Self {
        let previous_state = GRAD_ENABLED.with(|enabled| enabled.replace(false));
        Self { previous_state }
    }
}

impl Default for NoGradGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for NoGradGuard {
    fn drop(&mut self) {
        GRAD_ENABLED.with(|enabled| enabled.set(self.previous_state));
    }
}

/// Run `f` with recording disabled.
pub fn no_grad<R>(f: impl FnOnce() -> R) -> R {
    let _guard = NoGradGuard::new();
    f()
}

#[derive(Clone, Copy, Debug)]
pub struct RunnerOptions {
    /// Name used in log lines, e.g. the component or request the runner serves.
    pub label: &'static str,

    /// If true, a result dropped because its activation was torn down is
    /// logged at trace level. Off by default; superseded activations are routine.
    pub trace_suppressed: bool,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            label: "mounted-async",
            trace_suppressed: false,
        }
    }
}

impl RunnerOptions {
    pub fn labeled(label: &'static str) -> Self {
        Self {
            label,
            ..Self::default()
        }
    }
}

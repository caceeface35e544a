/// A trait for reporting progress of a harvest.
pub trait Progress: Send + Sync {
    /// Set the phase label for the current operation (e.g., "Searching", "Profiles").
    fn set_phase(&self, phase: &str);

    /// Set the amount of work in the current phase. Zero means the total is unknown.
    fn set_total(&self, total: u64);

    /// Record `delta` units of completed work, with a short message about the current item.
    fn advance(&self, delta: u64, message: &str);

    /// Finish and clear the progress indicator.
    fn done(&self);
}

/// Progress sink that reports nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn set_phase(&self, _phase: &str) {}
    fn set_total(&self, _total: u64) {}
    fn advance(&self, _delta: u64, _message: &str) {}
    fn done(&self) {}
}

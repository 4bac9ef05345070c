use pipemaze_core::Point;

/// Receives every path state the search processes, in processing order.
///
/// Observation cannot influence the search: the observer only sees the
/// cells of the path and its accumulated rotation count.
pub trait StepObserver {
    /// Called once per processed path state with its cells, start first.
    fn observe(&mut self, path: &[Point], cost: u32);
}

/// An observer that ignores every step.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoObserver;

impl StepObserver for NoObserver {
    #[inline]
    fn observe(&mut self, _path: &[Point], _cost: u32) {}
}

impl<F: FnMut(&[Point], u32)> StepObserver for F {
    #[inline]
    fn observe(&mut self, path: &[Point], cost: u32) {
        self(path, cost)
    }
}

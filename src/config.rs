use std::time::Duration;

/// Limits applied to a single [`Solver`](crate::Solver).
///
/// Both limits are cumulative over the lifetime of the solver. The default is
/// unbounded, which matches plain A*: it will run until one of the two searches
/// reaches its goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Maximum number of node expansions, counting both searches.
    pub max_expansions: Option<u64>,
    /// Maximum wall-clock time spent expanding nodes.
    pub time_limit: Option<Duration>,
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_expansions(mut self, max: u64) -> Self {
        self.max_expansions = Some(max);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn is_bounded(&self) -> bool {
        self.max_expansions.is_some() || self.time_limit.is_some()
    }
}

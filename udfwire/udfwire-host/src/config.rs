use udfwire_codec::DEFAULT_INITIAL_CAPACITY;

/// Tunables for a [`UdfHost`](crate::UdfHost) session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostConfig {
    /// Starting size of each result buffer, header included.
    pub initial_capacity: usize,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

use crate::PauseableQueue;

pub(crate) const DEFAULT_LANE_NAME: &str = "PauseableQueue lane";

/// Configures a [`PauseableQueue`] before creating it
///
/// # Example
///
/// ```rust
/// use pauseable_queue::Builder;
///
/// let queue = Builder::new()
///     .lane_name("jobs")
///     .lane_stack_size(64 * 1024)
///     .capacity(16)
///     .build::<String>();
///
/// queue.enqueue("first".to_owned());
/// assert_eq!(queue.count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    lane_name: Option<String>,
    lane_stack_size: Option<usize>,
    capacity: usize,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the thread running scheduled dequeues
    pub fn lane_name(mut self, name: impl Into<String>) -> Self {
        self.lane_name = Some(name.into());
        self
    }

    /// Stack size in bytes of the thread running scheduled dequeues
    pub fn lane_stack_size(mut self, size: usize) -> Self {
        self.lane_stack_size = Some(size);
        self
    }

    /// Number of elements to preallocate room for
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn build<T>(self) -> PauseableQueue<T> {
        let name = self
            .lane_name
            .unwrap_or_else(|| DEFAULT_LANE_NAME.to_owned());
        PauseableQueue::with_config(name, self.lane_stack_size, self.capacity)
    }
}

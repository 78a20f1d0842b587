use crate::QueueState;

/// Receives every successful pause/resume transition of a [`PauseableQueue`](crate::PauseableQueue).
///
/// The queue only keeps a weak reference to its observer, so the observer is free to be
/// dropped at any time. Notification happens while the queue holds its internal lock,
/// so an observer must not call back into the queue except for
/// [`state`](crate::PauseableQueue::state).
///
/// Closures of type `Fn(QueueState)` are observers too.
///
/// # Example
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use pauseable_queue::{PauseableQueue, QueueObserver, QueueState};
///
/// #[derive(Default)]
/// struct Recorder(Mutex<Vec<QueueState>>);
///
/// impl QueueObserver for Recorder {
///     fn on_state_changed(&self, state: QueueState) {
///         self.0.lock().unwrap().push(state);
///     }
/// }
///
/// let queue = PauseableQueue::<u8>::new();
/// let recorder = Arc::new(Recorder::default());
/// queue.set_observer(&recorder);
///
/// queue.pause();
/// queue.pause();
/// queue.resume();
///
/// assert_eq!(*recorder.0.lock().unwrap(), vec![QueueState::Pause, QueueState::Resume]);
/// ```
pub trait QueueObserver: Send + Sync {
    fn on_state_changed(&self, state: QueueState);
}

impl<F> QueueObserver for F
where
    F: Fn(QueueState) + Send + Sync,
{
    fn on_state_changed(&self, state: QueueState) {
        self(state)
    }
}

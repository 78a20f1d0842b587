use std::{
    collections::VecDeque,
    fmt,
    sync::{Arc, Weak},
};

use parking_lot::Mutex;

use crate::{
    builder::{Builder, DEFAULT_LANE_NAME},
    lane::{SuspendableLane, WorkItem, WorkItemHandle},
    queue_state::AtomicQueueState,
    QueueObserver, QueueState,
};

/// Pauseable Queue
///
/// A thread-safe First-In First-Out queue whose scheduled dequeues can be paused and resumed.
///
/// Elements are added with ``enqueue()`` and removed either directly with ``dequeue()`` or
/// by scheduling the removal on a dedicated lane with ``dispatch_dequeue()``.
///
/// Calling ``pause()`` holds back every scheduled dequeue that has not started yet, calling
/// ``resume()`` lets them run again in the order they were scheduled. Direct calls such as
/// ``enqueue()``, ``dequeue()`` and ``clear()`` are never affected by the queue's state.
///
/// The most recently scheduled dequeue can be cancelled with ``cancel_item()`` as long as it has not started.
pub struct PauseableQueue<T> {
    shared: Arc<Shared<T>>,
    lane: SuspendableLane,
}

struct Shared<T> {
    inner: Mutex<Inner<T>>,
    state: AtomicQueueState,
}

struct Inner<T> {
    elements: VecDeque<T>,
    work_item: Option<WorkItemHandle>,
    observer: Option<Weak<dyn QueueObserver>>,
}

impl<T> Default for PauseableQueue<T> {
    fn default() -> Self {
        Self::with_config(DEFAULT_LANE_NAME.to_owned(), None, 0)
    }
}

impl<T> PauseableQueue<T> {
    /// Creates an empty queue in the ``QueueState::Resume`` state
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a [`Builder`] for configuring the queue
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub(crate) fn with_config(
        lane_name: String,
        stack_size: Option<usize>,
        capacity: usize,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    elements: VecDeque::with_capacity(capacity),
                    work_item: None,
                    observer: None,
                }),
                state: AtomicQueueState::new(QueueState::Resume),
            }),
            lane: SuspendableLane::new(lane_name, stack_size),
        }
    }
}

impl<T> PauseableQueue<T> {
    /// Appends an element to the tail of the queue
    pub fn enqueue(&self, value: T) {
        self.enqueue_with(value, || {});
    }

    /// Appends an element to the tail of the queue then calls ``completion``
    ///
    /// # Parameters
    ///
    /// * `value`: element to append
    /// * `completion`: called once the element has been appended
    pub fn enqueue_with<F>(&self, value: T, completion: F)
    where
        F: FnOnce(),
    {
        {
            let mut inner = self.shared.inner.lock();
            inner.elements.push_back(value);
            tracing::debug!(count = inner.elements.len(), "element enqueued");
        }
        completion();
    }

    /// Removes and returns the head of the queue, or None if it is empty.
    ///
    /// Runs immediately on the calling thread even while the queue is paused.
    pub fn dequeue(&self) -> Option<T> {
        self.shared.dequeue()
    }

    /// Removes the head of the queue and hands it to ``completion``
    ///
    /// # Parameters
    ///
    /// * `completion`: receives the removed element, or None if the queue was empty
    pub fn dequeue_with<F>(&self, completion: F)
    where
        F: FnOnce(Option<T>),
    {
        completion(self.shared.dequeue());
    }

    /// Returns the number of elements currently in the queue
    pub fn count(&self) -> usize {
        self.shared.inner.lock().elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.inner.lock().elements.is_empty()
    }

    /// Removes all elements from the queue
    ///
    /// Leaves the state untouched and does not cancel scheduled dequeues, which will find the queue empty.
    pub fn clear(&self) {
        self.shared.inner.lock().elements.clear();
        tracing::debug!("elements cleared");
    }
}

impl<T: Clone> PauseableQueue<T> {
    /// Returns a copy of the first element, or None if the queue is empty.
    pub fn head(&self) -> Option<T> {
        self.shared.inner.lock().elements.front().cloned()
    }

    /// Returns a copy of the last element, or None if the queue is empty.
    pub fn tail(&self) -> Option<T> {
        self.shared.inner.lock().elements.back().cloned()
    }
}

impl<T: Send + 'static> PauseableQueue<T> {
    /// Schedules a dequeue on the queue's lane
    ///
    /// Returns without blocking. While the queue is paused the dequeue waits until ``resume()`` is called,
    /// scheduled dequeues always run in the order they were scheduled.
    ///
    /// The new dequeue becomes the one ``cancel_item()`` targets, the previously scheduled one stays scheduled.
    /// A cancelled dequeue never calls its ``completion`` and leaves the queue untouched,
    /// neither does a dequeue which runs after the queue was dropped.
    ///
    /// # Parameters
    ///
    /// * `completion`: receives the removed element, or None if the queue was empty
    pub fn dispatch_dequeue<F>(&self, completion: F)
    where
        F: FnOnce(Option<T>) + Send + 'static,
    {
        let shared = Arc::downgrade(&self.shared);
        let work_item = WorkItem::new(move || {
            let Some(shared) = shared.upgrade() else {
                return;
            };
            let value = shared.dequeue();
            drop(shared);
            completion(value);
        });

        let mut inner = self.shared.inner.lock();
        inner.work_item = Some(work_item.handle());
        self.lane.submit(work_item);
        tracing::trace!(scheduled = self.lane.scheduled_count(), "dequeue scheduled");
    }
}

impl<T> PauseableQueue<T> {
    /// Cancels the most recently scheduled dequeue unless it has already started.
    ///
    /// Only reliable while the queue is paused or before the lane reaches the dequeue,
    /// a resumed lane may start it before the cancellation lands.
    ///
    /// Does nothing when no dequeue was ever scheduled.
    pub fn cancel_item(&self) {
        let inner = self.shared.inner.lock();
        if let Some(work_item) = inner.work_item.as_ref().filter(|item| !item.is_cancelled()) {
            work_item.cancel();
            tracing::debug!("scheduled dequeue cancelled");
        }
    }

    /// Holds back scheduled dequeues until ``resume()`` is called
    ///
    /// Does nothing if the queue is already paused.
    pub fn pause(&self) {
        let inner = self.shared.inner.lock();
        if self.shared.state.load() == QueueState::Resume {
            self.lane.suspend();
            tracing::debug!("lane paused");
            self.shared.update_state(&inner, QueueState::Pause);
        }
    }

    /// Lets held back scheduled dequeues run again, in the order they were scheduled
    ///
    /// Does nothing if the queue is not paused.
    pub fn resume(&self) {
        let inner = self.shared.inner.lock();
        if self.shared.state.load() == QueueState::Pause {
            self.lane.resume();
            tracing::debug!("lane resumed");
            self.shared.update_state(&inner, QueueState::Resume);
        }
    }

    /// Returns the current state without taking the queue's lock
    pub fn state(&self) -> QueueState {
        self.shared.state.load()
    }

    /// Returns the number of scheduled dequeues that have not finished yet
    pub fn scheduled_count(&self) -> usize {
        self.lane.scheduled_count()
    }

    /// Blocks until every scheduled dequeue has run or been skipped
    ///
    /// # Note
    /// Never returns while the queue is paused and dequeues are waiting, call ``resume()`` first.
    ///
    /// Called from a ``dispatch_dequeue`` completion it returns immediately without waiting,
    /// since that completion is itself running on the lane.
    pub fn wait_for_scheduled(&self) {
        self.lane.wait_for_all();
    }
}

impl<T> PauseableQueue<T> {
    /// Registers the observer notified on every state transition
    ///
    /// Only a weak reference is kept, replacing any previous observer.
    pub fn set_observer<O>(&self, observer: &Arc<O>)
    where
        O: QueueObserver + 'static,
    {
        let observer: Arc<dyn QueueObserver> = observer.clone();
        self.shared.inner.lock().observer = Some(Arc::downgrade(&observer));
    }

    pub fn remove_observer(&self) {
        self.shared.inner.lock().observer = None;
    }
}

impl<T> Shared<T> {
    fn dequeue(&self) -> Option<T> {
        let mut inner = self.inner.lock();
        let Some(value) = inner.elements.pop_front() else {
            tracing::debug!("elements empty");
            return None;
        };
        tracing::debug!(count = inner.elements.len(), "element dequeued");
        Some(value)
    }

    // caller holds the lock guarding `inner`
    fn update_state(&self, inner: &Inner<T>, state: QueueState) {
        self.state.store(state);
        if let Some(observer) = inner.observer.as_ref().and_then(Weak::upgrade) {
            observer.on_state_changed(state);
        }
        tracing::debug!(%state, "state updated");
    }
}

impl<T> fmt::Debug for PauseableQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PauseableQueue")
            .field("count", &self.count())
            .field("state", &self.state())
            .field("scheduled", &self.scheduled_count())
            .field("lane_suspended", &self.lane.is_suspended())
            .finish()
    }
}

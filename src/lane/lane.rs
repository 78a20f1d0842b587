use std::{
    sync::Arc,
    thread::{self, ThreadId},
};

use parking_lot::Mutex;
use threadpool::{Builder, ThreadPool};

use super::{gate::Gate, WorkItem};

/// A single worker thread running submitted work items one after the other.
///
/// Suspending the lane stops the worker in front of the next item; everything
/// submitted afterwards stays queued behind it, so resuming continues in the
/// submission order.
pub(crate) struct SuspendableLane {
    pool: ThreadPool,
    gate: Arc<Gate>,
    worker: Arc<Mutex<Option<ThreadId>>>,
}

impl SuspendableLane {
    pub(crate) fn new(name: String, stack_size: Option<usize>) -> Self {
        let mut builder = Builder::new().num_threads(1).thread_name(name);
        if let Some(stack_size) = stack_size {
            builder = builder.thread_stack_size(stack_size);
        }
        Self {
            pool: builder.build(),
            gate: Arc::new(Gate::new()),
            worker: Arc::new(Mutex::new(None)),
        }
    }
}

impl SuspendableLane {
    pub(crate) fn submit(&self, item: WorkItem) {
        let gate = self.gate.clone();
        let worker = self.worker.clone();
        self.pool.execute(move || {
            // the pool replaces a worker whose job panicked
            *worker.lock() = Some(thread::current().id());
            if !gate.pass() {
                tracing::trace!("lane closed, dropping work item");
                return;
            }
            if !item.perform() {
                tracing::trace!("work item cancelled before it started");
            }
        });
    }

    pub(crate) fn suspend(&self) {
        self.gate.suspend();
    }

    pub(crate) fn resume(&self) {
        self.gate.resume();
    }

    pub(crate) fn is_suspended(&self) -> bool {
        self.gate.is_suspended()
    }

    /// Number of items waiting on or running in the lane.
    pub(crate) fn scheduled_count(&self) -> usize {
        self.pool.queued_count() + self.pool.active_count()
    }

    /// Blocks until every submitted item has finished. Never returns while suspended.
    ///
    /// Returns immediately when called from a work item, the worker cannot wait on itself.
    pub(crate) fn wait_for_all(&self) {
        if self.is_worker_thread() {
            tracing::warn!("waiting for the lane from its own worker, returning immediately");
            return;
        }
        self.pool.join();
    }

    pub(crate) fn is_worker_thread(&self) -> bool {
        *self.worker.lock() == Some(thread::current().id())
    }
}

impl Drop for SuspendableLane {
    fn drop(&mut self) {
        // release a worker parked at the gate, remaining items are skipped
        self.gate.close();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{mpsc, Arc};
    use std::time::Duration;

    use parking_lot::Mutex;

    use super::SuspendableLane;
    use crate::lane::WorkItem;

    fn lane() -> SuspendableLane {
        SuspendableLane::new("test lane".to_owned(), None)
    }

    #[test]
    fn runs_items_in_submission_order() {
        let lane = lane();
        let seen = Arc::new(Mutex::new(Vec::new()));
        for index in 0..10 {
            let seen = seen.clone();
            lane.submit(WorkItem::new(move || seen.lock().push(index)));
        }
        lane.wait_for_all();
        assert_eq!(*seen.lock(), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn suspended_lane_holds_items_until_resumed() {
        let lane = lane();
        lane.suspend();
        assert!(lane.is_suspended());

        let (sender, receiver) = mpsc::channel();
        for index in 0..3 {
            let sender = sender.clone();
            lane.submit(WorkItem::new(move || {
                _ = sender.send(index);
            }));
        }

        assert!(receiver.recv_timeout(Duration::from_millis(100)).is_err());
        assert_eq!(lane.scheduled_count(), 3);

        lane.resume();
        let received: Vec<_> = (0..3)
            .map(|_| receiver.recv_timeout(Duration::from_secs(5)).unwrap())
            .collect();
        assert_eq!(received, vec![0, 1, 2]);
    }

    #[test]
    fn cancelled_item_is_skipped_but_later_items_run() {
        let lane = lane();
        lane.suspend();

        let (sender, receiver) = mpsc::channel();
        let first = {
            let sender = sender.clone();
            WorkItem::new(move || {
                _ = sender.send("first");
            })
        };
        let handle = first.handle();
        lane.submit(first);
        lane.submit(WorkItem::new(move || {
            _ = sender.send("second");
        }));

        handle.cancel();
        lane.resume();

        assert_eq!(receiver.recv_timeout(Duration::from_secs(5)).unwrap(), "second");
        lane.wait_for_all();
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn waiting_from_a_work_item_returns_immediately() {
        let lane = Arc::new(lane());
        assert!(!lane.is_worker_thread());

        let (sender, receiver) = mpsc::channel();
        let cloned = lane.clone();
        lane.submit(WorkItem::new(move || {
            cloned.wait_for_all();
            _ = sender.send(cloned.is_worker_thread());
        }));

        assert_eq!(receiver.recv_timeout(Duration::from_secs(5)), Ok(true));
        lane.wait_for_all();
        assert_eq!(lane.scheduled_count(), 0);
    }
}

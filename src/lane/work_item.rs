use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

pub(crate) type Func = dyn FnOnce() + Send;

/// A unit of work scheduled on the lane which can be cancelled before it starts.
pub(crate) struct WorkItem {
    body: Box<Func>,
    cancelled: Arc<AtomicBool>,
}

/// Cancels the [`WorkItem`] it was taken from.
#[derive(Clone)]
pub(crate) struct WorkItemHandle {
    cancelled: Arc<AtomicBool>,
}

impl WorkItem {
    pub(crate) fn new<Body>(body: Body) -> Self
    where
        Body: FnOnce() + Send + 'static,
    {
        Self {
            body: Box::new(body),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub(crate) fn handle(&self) -> WorkItemHandle {
        WorkItemHandle {
            cancelled: self.cancelled.clone(),
        }
    }

    /// Runs the body unless the item was cancelled. Returns whether it ran.
    pub(crate) fn perform(self) -> bool {
        if self.cancelled.load(Ordering::Acquire) {
            return false;
        }
        (self.body)();
        true
    }
}

impl WorkItemHandle {
    pub(crate) fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::WorkItem;

    #[test]
    fn performs_body_when_not_cancelled() {
        let counter = Arc::new(AtomicUsize::new(0));
        let cloned = counter.clone();
        let item = WorkItem::new(move || {
            cloned.fetch_add(1, Ordering::SeqCst);
        });
        assert!(!item.handle().is_cancelled());
        assert!(item.perform());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cancelled_item_skips_body() {
        let counter = Arc::new(AtomicUsize::new(0));
        let cloned = counter.clone();
        let item = WorkItem::new(move || {
            cloned.fetch_add(1, Ordering::SeqCst);
        });
        let handle = item.handle();
        handle.cancel();
        handle.cancel();
        assert!(handle.is_cancelled());
        assert!(!item.perform());
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}

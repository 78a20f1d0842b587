use parking_lot::{Condvar, Mutex};

/// Latch every job on the lane has to pass before it runs.
pub(crate) struct Gate {
    inner: Inner,
}

impl Gate {
    pub(crate) fn new() -> Gate {
        Gate {
            inner: Inner {
                lock: Mutex::new(State::Open),
                cvar: Condvar::new(),
            },
        }
    }

    pub(crate) fn suspend(&self) {
        self.inner.suspend();
    }

    pub(crate) fn resume(&self) {
        self.inner.resume();
    }

    pub(crate) fn close(&self) {
        self.inner.close();
    }

    /// Blocks the calling thread while the gate is suspended.
    /// Returns `false` once the gate has been closed.
    pub(crate) fn pass(&self) -> bool {
        self.inner.pass()
    }

    pub(crate) fn is_suspended(&self) -> bool {
        *self.inner.lock.lock() == State::Suspended
    }
}

#[derive(PartialEq, Debug)]
enum State {
    Open,
    Suspended,
    Closed,
}

struct Inner {
    lock: Mutex<State>,
    cvar: Condvar,
}

impl Inner {
    fn suspend(&self) {
        // Acquire the lock first
        let mut lock = self.lock.lock();

        // a closed gate stays closed
        if *lock == State::Open {
            *lock = State::Suspended;
        }
    }

    fn resume(&self) {
        // Acquire the lock first
        let mut lock = self.lock.lock();

        if *lock == State::Suspended {
            *lock = State::Open;
            // wake the worker parked in `pass`
            self.cvar.notify_all();
        }
    }

    fn close(&self) {
        let mut lock = self.lock.lock();
        *lock = State::Closed;
        self.cvar.notify_all();
    }

    fn pass(&self) -> bool {
        let mut lock = self.lock.lock();

        // park this thread until the gate is opened or closed
        while *lock == State::Suspended {
            self.cvar.wait(&mut lock);
        }

        *lock == State::Open
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            atomic::{AtomicBool, Ordering},
            Arc,
        },
        thread,
        time::Duration,
    };

    use super::Gate;

    #[test]
    fn open_gate_passes_immediately() {
        let gate = Gate::new();
        assert!(gate.pass());
        assert!(!gate.is_suspended());
    }

    #[test]
    fn suspended_gate_blocks_until_resumed() {
        let gate = Arc::new(Gate::new());
        gate.suspend();
        assert!(gate.is_suspended());

        let passed = Arc::new(AtomicBool::new(false));
        let handle = {
            let gate = gate.clone();
            let passed = passed.clone();
            thread::spawn(move || {
                let open = gate.pass();
                passed.store(true, Ordering::Release);
                open
            })
        };

        thread::sleep(Duration::from_millis(50));
        assert!(!passed.load(Ordering::Acquire));

        gate.resume();
        assert!(handle.join().unwrap());
        assert!(passed.load(Ordering::Acquire));
    }

    #[test]
    fn closing_releases_a_suspended_waiter() {
        let gate = Arc::new(Gate::new());
        gate.suspend();

        let handle = {
            let gate = gate.clone();
            thread::spawn(move || gate.pass())
        };

        thread::sleep(Duration::from_millis(20));
        gate.close();
        assert!(!handle.join().unwrap());
    }

    #[test]
    fn closed_gate_ignores_suspend_and_resume() {
        let gate = Gate::new();
        gate.close();
        gate.suspend();
        assert!(!gate.is_suspended());
        gate.resume();
        assert!(!gate.pass());
    }
}

//! A thread-safe First-In First-Out queue whose scheduled dequeues can be paused, resumed and cancelled.
//!
//! # Installation
//! Add to your source code
//!
//! ```sh
//! cargo add pauseable_queue
//! ```
//!
//! # Example
//!
//! ```rust
//! use pauseable_queue::{PauseableQueue, QueueState};
//! use std::sync::mpsc;
//!
//! let queue = PauseableQueue::new();
//! queue.enqueue(1);
//! queue.enqueue(2);
//!
//! queue.pause();
//! assert_eq!(queue.state(), QueueState::Pause);
//!
//! // direct dequeues ignore the queue's state
//! assert_eq!(queue.dequeue(), Some(1));
//!
//! // scheduled dequeues wait for the queue to be resumed
//! let (sender, receiver) = mpsc::channel();
//! queue.dispatch_dequeue(move |value| sender.send(value).unwrap());
//! assert!(receiver.try_recv().is_err());
//!
//! queue.resume();
//! assert_eq!(receiver.recv().unwrap(), Some(2));
//! assert!(queue.is_empty());
//! ```
//!
//! # Usage
//!
//! * ``enqueue`` and ``enqueue_with`` append an element to the tail of the queue.
//!
//! * ``dequeue`` and ``dequeue_with`` remove the head of the queue right away on the calling thread.
//!
//! * ``dispatch_dequeue`` schedules the removal of the head on the queue's own lane and hands the
//! result to a completion closure once it has run.
//!
//! * ``pause`` and ``resume`` stop and restart the queue's lane. See [`QueueState`](self::QueueState)
//!
//! * ``cancel_item`` cancels the most recently scheduled dequeue if it has not started yet.
//!
//! * ``set_observer`` registers a [`QueueObserver`](self::QueueObserver) notified on every state transition.
//!
//! # Pausing
//!
//! Pausing only affects scheduled dequeues. A scheduled dequeue which has not started when the queue
//! is paused waits until the queue is resumed, and scheduled dequeues always run in the order
//! they were scheduled. Pausing never removes elements.
//!
//! # Cancellation
//!
//! Cancellation is cooperative: a cancelled dequeue that has not started yet is skipped, its
//! completion is never called and the head of the queue stays where it is. A dequeue which
//! is already running is not interrupted.
//!
//! ```rust
//! use pauseable_queue::PauseableQueue;
//! use std::sync::mpsc;
//!
//! let queue = PauseableQueue::new();
//! queue.enqueue(1);
//! queue.enqueue(2);
//! queue.pause();
//!
//! let (sender, receiver) = mpsc::channel();
//! let first = sender.clone();
//! queue.dispatch_dequeue(move |value| first.send(("first", value)).unwrap());
//! queue.cancel_item();
//! queue.dispatch_dequeue(move |value| sender.send(("second", value)).unwrap());
//!
//! queue.resume();
//! assert_eq!(receiver.recv().unwrap(), ("second", Some(1)));
//! assert_eq!(queue.head(), Some(2));
//! ```
//!
//! # Logging
//!
//! Every operation emits ``tracing`` events, install any ``tracing`` subscriber to see them.
//!
//! # Warning
//! * Completion closures of scheduled dequeues run on the queue's lane thread, a long running
//! completion delays every dequeue scheduled after it
//! * Observers are notified while the queue holds its internal lock, avoid calling back into the queue from an observer

mod builder;
mod lane;
mod observer;
mod pauseable_queue;
mod queue_state;

pub use builder::Builder;
pub use observer::QueueObserver;
pub use pauseable_queue::PauseableQueue;
pub use queue_state::QueueState;

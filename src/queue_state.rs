use std::{
    fmt,
    sync::atomic::{AtomicU8, Ordering},
};

/// Whether scheduled dequeues on a [`PauseableQueue`](crate::PauseableQueue) are allowed to run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum QueueState {
    /// Scheduled dequeues run as soon as the lane reaches them
    #[default]
    Resume = 0,
    /// Scheduled dequeues are held back until the queue is resumed
    Pause = 1,
}

impl QueueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueState::Resume => "resume",
            QueueState::Pause => "pause",
        }
    }
}

impl fmt::Display for QueueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for QueueState {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(QueueState::Resume),
            1 => Ok(QueueState::Pause),
            other => Err(other),
        }
    }
}

pub(crate) struct AtomicQueueState(AtomicU8);

impl AtomicQueueState {
    pub(crate) fn new(state: QueueState) -> Self {
        Self(AtomicU8::new(state as u8))
    }

    pub(crate) fn load(&self) -> QueueState {
        // only `store` writes the byte
        QueueState::try_from(self.0.load(Ordering::Acquire)).unwrap_or_default()
    }

    pub(crate) fn store(&self, state: QueueState) {
        self.0.store(state as u8, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::{AtomicQueueState, QueueState};

    #[test]
    fn names_match_raw_values() {
        assert_eq!(QueueState::Resume.to_string(), "resume");
        assert_eq!(QueueState::Pause.as_str(), "pause");
        assert_eq!(QueueState::default(), QueueState::Resume);
    }

    #[test]
    fn only_known_bytes_convert() {
        assert_eq!(QueueState::try_from(0), Ok(QueueState::Resume));
        assert_eq!(QueueState::try_from(1), Ok(QueueState::Pause));
        assert_eq!(QueueState::try_from(2), Err(2));
    }

    #[test]
    fn atomic_state_round_trips() {
        let state = AtomicQueueState::new(QueueState::Resume);
        state.store(QueueState::Pause);
        assert_eq!(state.load(), QueueState::Pause);
    }
}

use std::sync::{Arc, Mutex, PoisonError};

/// Single-slot, consume-once payload passed between views.
///
/// Nothing is persisted: once taken, the value cannot be recovered.
#[derive(Debug)]
pub struct Handoff<T> {
    slot: Arc<Mutex<Option<T>>>,
}

impl<T> Clone for Handoff<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Default for Handoff<T> {
    fn default() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
        }
    }
}

impl<T> Handoff<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `value` in the slot, replacing anything not yet taken.
    pub fn put(&self, value: T) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);
    }

    /// Remove and return the pending value.
    pub fn take(&self) -> Option<T> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_is_consumed_once() {
        let handoff = Handoff::new();
        handoff.put(7);
        assert!(handoff.is_pending());
        assert_eq!(handoff.take(), Some(7));
        assert_eq!(handoff.take(), None);
    }

    #[test]
    fn clones_share_the_slot() {
        let sender = Handoff::new();
        let receiver = sender.clone();
        sender.put("payload");
        sender.put("newer");
        assert_eq!(receiver.take(), Some("newer"));
        assert!(!sender.is_pending());
    }
}

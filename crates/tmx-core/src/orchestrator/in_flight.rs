//! Per-map-id serialization of acquisition runs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OwnedMutexGuard;
use tracing::debug;

/// One id's lock plus the number of runs holding or queued on it.
#[derive(Debug, Default)]
struct Slot {
    lock: Arc<tokio::sync::Mutex<()>>,
    users: usize,
}

/// Tracks which map ids currently have a run in progress.
///
/// A second run for the same id waits until the first releases its guard.
/// Runs for different ids do not contend.
#[derive(Debug, Default)]
pub(crate) struct InFlightRegistry {
    slots: Mutex<HashMap<String, Slot>>,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive ownership of `map_id`.
    ///
    /// Cancelling the returned future while it waits leaves no entry behind.
    pub async fn acquire(&self, map_id: &str) -> InFlightGuard<'_> {
        let (registration, lock) = self.register(map_id);

        if lock.try_lock().is_err() {
            debug!("Map {} already in flight, waiting for the previous run", map_id);
        }
        let permit = lock.lock_owned().await;

        InFlightGuard {
            _permit: permit,
            _registration: registration,
        }
    }

    /// Number of ids with a run in progress or queued.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn register(&self, map_id: &str) -> (Registration<'_>, Arc<tokio::sync::Mutex<()>>) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = slots.entry(map_id.to_string()).or_default();
        slot.users += 1;
        let lock = slot.lock.clone();

        let registration = Registration {
            registry: self,
            map_id: map_id.to_string(),
        };
        (registration, lock)
    }

    fn unregister(&self, map_id: &str) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(slot) = slots.get_mut(map_id) {
            slot.users = slot.users.saturating_sub(1);
            if slot.users == 0 {
                slots.remove(map_id);
            }
        }
    }
}

/// Counts one holder or waiter against an id until dropped.
struct Registration<'a> {
    registry: &'a InFlightRegistry,
    map_id: String,
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        self.registry.unregister(&self.map_id);
    }
}

/// Held for the duration of one run.
///
/// Fields drop in order: the lock is released before the count is lowered.
pub(crate) struct InFlightGuard<'a> {
    _permit: OwnedMutexGuard<()>,
    _registration: Registration<'a>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_entry_removed_after_release() {
        let registry = InFlightRegistry::new();
        {
            let _guard = registry.acquire("1").await;
            assert_eq!(registry.len(), 1);
        }
        assert_eq!(registry.len(), 0);
    }

    #[tokio::test]
    async fn test_different_ids_do_not_block() {
        let registry = InFlightRegistry::new();
        let _a = registry.acquire("1").await;
        let _b = tokio::time::timeout(Duration::from_secs(1), registry.acquire("2"))
            .await
            .expect("different ids must not contend");
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_id_waits_for_release() {
        let registry = Arc::new(InFlightRegistry::new());
        let first = registry.acquire("7").await;

        let waiter = {
            let registry = registry.clone();
            tokio::spawn(async move {
                let _guard = registry.acquire("7").await;
            })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!waiter.is_finished());

        drop(first);
        waiter.await.unwrap();
        assert_eq!(registry.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_waiter_leaves_no_entry() {
        let registry = InFlightRegistry::new();
        let first = registry.acquire("7").await;

        let gave_up = tokio::time::timeout(Duration::from_millis(50), registry.acquire("7")).await;
        assert!(gave_up.is_err());
        assert_eq!(registry.len(), 1);

        drop(first);
        assert_eq!(registry.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_aborted_waiter_task_leaves_no_entry() {
        let registry = Arc::new(InFlightRegistry::new());
        let first = registry.acquire("9").await;

        let waiter = {
            let registry = registry.clone();
            tokio::spawn(async move {
                let _guard = registry.acquire("9").await;
            })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        waiter.abort();
        assert!(waiter.await.unwrap_err().is_cancelled());

        drop(first);
        assert_eq!(registry.len(), 0);

        // The id is immediately usable again
        let again = tokio::time::timeout(Duration::from_millis(10), registry.acquire("9")).await;
        assert!(again.is_ok());
    }
}

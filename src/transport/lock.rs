//! Process-wide serialization of trap transport access.
//!
//! Construction, drop and send of every [`TrapSender`](crate::TrapSender)
//! run inside one critical section. The lock is a shared handle rather than
//! a bare global so that the scope of a critical section is always a guard
//! value: it is released on every exit path, early returns included.

use std::sync::{Arc, LazyLock};
use std::time::Instant;

use parking_lot::{Mutex, MutexGuard};

static GLOBAL: LazyLock<Arc<TransportLock>> = LazyLock::new(|| Arc::new(TransportLock::new()));

/// Serialization handle for transport access.
#[derive(Debug, Default)]
pub struct TransportLock {
    inner: Mutex<()>,
}

/// Scoped hold on a [`TransportLock`]; dropping it releases the lock.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct TransportGuard<'a> {
    _guard: MutexGuard<'a, ()>,
}

impl TransportLock {
    /// Create an independent lock.
    ///
    /// Senders sharing a lock exclude each other; senders built with
    /// different locks do not. Most callers want [`global()`](Self::global).
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(()),
        }
    }

    /// The lock shared by every sender in the process unless configured
    /// otherwise.
    pub fn global() -> Arc<TransportLock> {
        Arc::clone(&*GLOBAL)
    }

    /// Block until the lock is free and take it.
    pub fn acquire(&self) -> TransportGuard<'_> {
        let start = Instant::now();
        let guard = self.inner.lock();
        tracing::trace!(
            target: "snmp_trap_sender::transport",
            { snmp.lock_wait_us = start.elapsed().as_micros() as u64 },
            "acquired transport lock"
        );
        TransportGuard { _guard: guard }
    }

    /// Whether some thread currently holds the lock.
    pub fn is_locked(&self) -> bool {
        self.inner.is_locked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_guard_releases_on_drop() {
        let lock = TransportLock::new();
        {
            let _guard = lock.acquire();
            assert!(lock.is_locked());
        }
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_global_is_shared() {
        assert!(Arc::ptr_eq(&TransportLock::global(), &TransportLock::global()));
    }

    #[test]
    fn test_mutual_exclusion() {
        let lock = Arc::new(TransportLock::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let lock = Arc::clone(&lock);
                let inside = Arc::clone(&inside);
                let max_inside = Arc::clone(&max_inside);
                thread::spawn(move || {
                    for _ in 0..10 {
                        let _guard = lock.acquire();
                        let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                        max_inside.fetch_max(now, Ordering::SeqCst);
                        thread::sleep(Duration::from_micros(200));
                        inside.fetch_sub(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
    }
}

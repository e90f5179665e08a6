//! Recursive-owner lock
//!
//! The owning thread may acquire any number of times; each acquisition
//! increments a count and each release decrements it. Foreign threads
//! block until the count reaches zero. Release from a thread that does
//! not own the lock is refused.

use std::sync::{Condvar, Mutex};
use std::thread::{self, ThreadId};
use crate::error::LockError;

#[derive(Debug, Default)]
struct LockState {
    owner: Option<ThreadId>,
    count: u32,
}

/// Recursive lock with owner-checked release
#[derive(Debug, Default)]
pub struct OwnerLock {
    state: Mutex<LockState>,
    released: Condvar,
}

impl OwnerLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock, blocking while a foreign thread holds it
    pub fn acquire(&self) {
        let me = thread::current().id();
        let mut state = self.state.lock().expect("lock state poisoned");
        loop {
            match state.owner {
                None => {
                    state.owner = Some(me);
                    state.count = 1;
                    return;
                }
                Some(owner) if owner == me => {
                    state.count += 1;
                    return;
                }
                Some(_) => {
                    state = self.released.wait(state).expect("lock state poisoned");
                }
            }
        }
    }

    /// Acquire without blocking; false when a foreign thread holds the lock
    pub fn try_acquire(&self) -> bool {
        let me = thread::current().id();
        let mut state = self.state.lock().expect("lock state poisoned");
        match state.owner {
            None => {
                state.owner = Some(me);
                state.count = 1;
                true
            }
            Some(owner) if owner == me => {
                state.count += 1;
                true
            }
            Some(_) => false,
        }
    }

    /// Release one acquisition; refused when the caller is not the owner
    pub fn release(&self) -> Result<(), LockError> {
        let me = thread::current().id();
        let mut state = self.state.lock().expect("lock state poisoned");
        match state.owner {
            None => Err(LockError::NotHeld),
            Some(owner) if owner != me => Err(LockError::NotOwner),
            Some(_) => {
                state.count -= 1;
                if state.count == 0 {
                    state.owner = None;
                    self.released.notify_one();
                }
                Ok(())
            }
        }
    }

    /// Drop every acquisition held by the calling thread
    ///
    /// Used by token destruction; a lock held by a foreign thread is
    /// left untouched.
    pub fn release_all_if_owner(&self) {
        let me = thread::current().id();
        let mut state = self.state.lock().expect("lock state poisoned");
        if state.owner == Some(me) {
            state.owner = None;
            state.count = 0;
            self.released.notify_one();
        }
    }

    /// True while any thread holds the lock
    pub fn is_locked(&self) -> bool {
        self.state.lock().expect("lock state poisoned").count > 0
    }

    /// Current acquisition count
    pub fn count(&self) -> u32 {
        self.state.lock().expect("lock state poisoned").count
    }

    /// True when the calling thread owns the lock
    pub fn held_by_current(&self) -> bool {
        let me = thread::current().id();
        self.state.lock().expect("lock state poisoned").owner == Some(me)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn recursion_counts_up_and_down() {
        let lock = OwnerLock::new();
        lock.acquire();
        lock.acquire();
        assert_eq!(lock.count(), 2);
        assert!(lock.is_locked());

        lock.release().unwrap();
        assert!(lock.is_locked());
        lock.release().unwrap();
        assert!(!lock.is_locked());
        assert_eq!(lock.count(), 0);
    }

    #[test]
    fn release_without_hold_is_refused() {
        let lock = OwnerLock::new();
        assert_eq!(lock.release(), Err(LockError::NotHeld));
    }

    #[test]
    fn foreign_release_is_refused() {
        let lock = Arc::new(OwnerLock::new());
        lock.acquire();

        let peer = Arc::clone(&lock);
        let handle = thread::spawn(move || peer.release());
        assert_eq!(handle.join().unwrap(), Err(LockError::NotOwner));

        assert!(lock.is_locked());
        lock.release().unwrap();
    }

    #[test]
    fn foreign_acquire_blocks_until_released() {
        let lock = Arc::new(OwnerLock::new());
        let entered = Arc::new(AtomicBool::new(false));
        lock.acquire();

        let peer = Arc::clone(&lock);
        let flag = Arc::clone(&entered);
        let handle = thread::spawn(move || {
            peer.acquire();
            flag.store(true, Ordering::SeqCst);
            peer.release().unwrap();
        });

        thread::sleep(std::time::Duration::from_millis(20));
        assert!(!entered.load(Ordering::SeqCst));

        lock.release().unwrap();
        handle.join().unwrap();
        assert!(entered.load(Ordering::SeqCst));
        assert!(!lock.is_locked());
    }

    #[test]
    fn try_acquire_fails_across_threads() {
        let lock = Arc::new(OwnerLock::new());
        lock.acquire();

        let peer = Arc::clone(&lock);
        let handle = thread::spawn(move || peer.try_acquire());
        assert!(!handle.join().unwrap());

        assert!(lock.try_acquire());
        assert_eq!(lock.count(), 2);
    }
}

//! Page-wide scroll suppression shared by every overlay owner.
//!
//! Scrolling stays locked while at least one lease is alive. Each component
//! holds at most one lease and drops it when it no longer needs the lock, so
//! one component closing can never unlock scroll under another.

use std::{cell::Cell, rc::Rc};

/// Reference-counted scroll lock.
///
/// Cloning shares the same counter. Single-threaded by construction: the
/// page runs every event to completion on one thread.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Rc<Cell<usize>>,
}

impl ScrollLock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a lease. Scrolling stays locked until every lease is released.
    #[must_use = "dropping the lease releases the lock immediately"]
    pub fn acquire(&self) -> ScrollLease {
        self.holders.set(self.holders.get() + 1);
        ScrollLease {
            holders: Rc::clone(&self.holders),
        }
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.holders.get() > 0
    }

    #[must_use]
    pub fn holders(&self) -> usize {
        self.holders.get()
    }
}

/// One outstanding hold on a [`ScrollLock`]. Released on drop.
#[derive(Debug)]
pub struct ScrollLease {
    holders: Rc<Cell<usize>>,
}

impl ScrollLease {
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for ScrollLease {
    fn drop(&mut self) {
        self.holders.set(self.holders.get().saturating_sub(1));
    }
}

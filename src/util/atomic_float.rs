//! Lock-free `f64` cell.
//!
//! Stores the bit pattern of an `f64` in an [`AtomicU64`] so a value computed
//! outside a lock section can be published to concurrent readers without
//! taking the lock again.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// An `f64` that can be shared between threads.
pub struct AtomicF64 {
    bits: AtomicU64,
}

impl AtomicF64 {
    /// Create a new cell holding `value`.
    pub fn new(value: f64) -> Self {
        AtomicF64 {
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    /// Read the current value.
    pub fn load(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Replace the current value.
    pub fn store(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Release);
    }
}

impl fmt::Debug for AtomicF64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicF64").field(&self.load()).finish()
    }
}

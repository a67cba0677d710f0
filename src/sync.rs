//! Raw spin lock behind the logger's configuration lock
//!
//! Implements `lock_api::RawMutex` so callers get RAII guards through
//! `lock_api::Mutex`. Critical sections here are a prefix copy or a module
//! table scan, so the lock spins briefly and then yields to the OS
//! scheduler instead of parking.

use core::sync::atomic::{AtomicBool, Ordering};

/// Spins before each `yield_now` while contended
const SPINS_BEFORE_YIELD: u32 = 64;

/// Spin lock without a guard of its own; wrap it in [`Mutex`].
pub struct RawSpinLock {
    locked: AtomicBool,
}

impl RawSpinLock {
    /// Creates an unlocked lock
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }
}

impl Default for RawSpinLock {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl lock_api::RawMutex for RawSpinLock {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self::new();

    type GuardMarker = lock_api::GuardSend;

    fn lock(&self) {
        let mut spins = 0;
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            // Wait on a plain load so contended cores don't fight over the line.
            while self.locked.load(Ordering::Relaxed) {
                if spins < SPINS_BEFORE_YIELD {
                    spins += 1;
                    core::hint::spin_loop();
                } else {
                    std::thread::yield_now();
                }
            }
        }
    }

    fn try_lock(&self) -> bool {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    unsafe fn unlock(&self) {
        self.locked.store(false, Ordering::Release);
    }

    fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }
}

/// Mutex built on [`RawSpinLock`]
pub type Mutex<T> = lock_api::Mutex<RawSpinLock, T>;

/// Guard returned by `Mutex::lock`
pub type MutexGuard<'a, T> = lock_api::MutexGuard<'a, RawSpinLock, T>;

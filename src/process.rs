//! Process and thread identity

use core::sync::atomic::{AtomicU32, Ordering};
#[cfg(not(any(target_os = "linux", target_os = "android", target_vendor = "apple")))]
use core::sync::atomic::AtomicU64;

static CACHED_PID: AtomicU32 = AtomicU32::new(0);

/// Process id, resolved on first use and cached for the process lifetime.
///
/// The cache is not invalidated by `fork`; a forked child keeps reporting
/// its parent's pid.
pub fn pid() -> u32 {
    match CACHED_PID.load(Ordering::Acquire) {
        0 => {
            let pid = std::process::id();
            CACHED_PID.store(pid, Ordering::Release);
            pid
        }
        pid => pid,
    }
}

/// Id of the calling thread as the OS reports it (`gettid` on Linux).
///
/// On Apple targets this is `pthread_threadid_np`. Elsewhere each thread is
/// numbered from 1 in the order it first asks.
#[cfg(any(target_os = "linux", target_os = "android"))]
pub fn thread_id() -> u64 {
    // gettid cannot fail.
    unsafe { libc::syscall(libc::SYS_gettid) as u64 }
}

/// Id of the calling thread as the OS reports it (`gettid` on Linux).
///
/// On Apple targets this is `pthread_threadid_np`. Elsewhere each thread is
/// numbered from 1 in the order it first asks.
#[cfg(target_vendor = "apple")]
pub fn thread_id() -> u64 {
    let mut tid = 0u64;
    unsafe { libc::pthread_threadid_np(libc::pthread_self(), &mut tid) };
    tid
}

/// Id of the calling thread as the OS reports it (`gettid` on Linux).
///
/// On Apple targets this is `pthread_threadid_np`. Elsewhere each thread is
/// numbered from 1 in the order it first asks.
#[cfg(not(any(target_os = "linux", target_os = "android", target_vendor = "apple")))]
pub fn thread_id() -> u64 {
    static NEXT_ID: AtomicU64 = AtomicU64::new(1);

    std::thread_local! {
        static ID: u64 = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    }

    ID.with(|id| *id)
}

#[cfg(test)]
mod tests {
    use std::sync::Barrier;
    use std::thread;

    use super::*;

    #[test]
    fn test_pid_matches_process_and_is_cached() {
        assert_eq!(pid(), std::process::id());
        assert_eq!(CACHED_PID.load(Ordering::Acquire), std::process::id());
        assert_eq!(pid(), pid());
    }

    #[test]
    fn test_thread_id_is_stable_within_a_thread() {
        let id = thread_id();
        assert_ne!(id, 0);
        assert_eq!(thread_id(), id);
    }

    #[test]
    fn test_threads_report_different_ids() {
        // Both threads stay alive until each has read its id, so the OS
        // cannot hand a recycled id to the second one.
        let barrier = Barrier::new(2);
        let read_id = || {
            let id = thread_id();
            barrier.wait();
            id
        };

        let main = thread_id();
        let (first, second) = thread::scope(|s| {
            let first = s.spawn(read_id);
            let second = s.spawn(read_id);
            (first.join().unwrap(), second.join().unwrap())
        });

        assert_ne!(first, main);
        assert_ne!(second, main);
        assert_ne!(first, second);
    }
}

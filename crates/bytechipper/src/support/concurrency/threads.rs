//! # Thread Utilities

use core::sync::atomic::{AtomicUsize, Ordering};
use std::{num::NonZeroUsize, thread};

static NEXT_THREAD_SLOT: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static THREAD_SLOT: usize = NEXT_THREAD_SLOT.fetch_add(1, Ordering::Relaxed);
}

/// A small, stable-per-thread index.
///
/// Slots are handed out round-robin on first use, so consecutive
/// threads land in distinct pool entries.
pub fn current_thread_slot() -> usize {
    THREAD_SLOT.with(|slot| *slot)
}

/// Get the max parallelism available.
///
/// Honors ``RAYON_NUM_THREADS`` when the "rayon" feature is enabled.
pub fn est_max_parallelism() -> usize {
    #[cfg(feature = "rayon")]
    if let Some(x @ 1..) = std::env::var("RAYON_NUM_THREADS")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
    {
        return x;
    }

    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Resolve the max pool size.
///
/// ``min(max_pool, est_max_parallelism())``
pub fn resolve_max_pool(max_pool: Option<NonZeroUsize>) -> usize {
    let sys_max = est_max_parallelism();

    let max_pool = max_pool.map(|x| x.get()).unwrap_or(sys_max);

    core::cmp::min(max_pool, sys_max).max(1)
}

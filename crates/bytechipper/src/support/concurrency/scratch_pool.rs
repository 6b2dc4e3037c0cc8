//! # Scratch Pool
//!
//! Thread-slot hashed pool of mutable scratch state.

use core::fmt::Debug;
use std::num::NonZeroUsize;

use parking_lot::Mutex;

use crate::support::concurrency::threads::{current_thread_slot, resolve_max_pool};

/// Current Thread -> `Mutex<T>` Pool.
///
/// Rather than pure thread-local storage, the pool is a fixed vector of
/// locked items, and the current thread's slot picks the entry. Threads
/// only contend when more threads than entries are active; the lock then
/// serializes access to the scratch memory, never to shared results.
///
/// Instance names should prefer `${T-name}_pool`.
pub struct ScratchPool<T>
where
    T: Send,
{
    pool: Vec<Mutex<T>>,
}

impl<T> ScratchPool<T>
where
    T: Send,
{
    /// Build a pool by calling `builder` once per entry.
    ///
    /// ## Arguments
    /// * `builder` - the item factory.
    /// * `max_pool` - override the maximum pool size, see [`resolve_max_pool`].
    pub fn from_builder<F>(
        builder: F,
        max_pool: Option<NonZeroUsize>,
    ) -> Self
    where
        F: Fn() -> T,
    {
        let size = resolve_max_pool(max_pool);
        Self {
            pool: (0..size).map(|_| Mutex::new(builder())).collect(),
        }
    }

    /// Run `func` with exclusive access to the current thread's entry.
    pub fn with<R, F>(
        &self,
        func: F,
    ) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let slot = current_thread_slot() % self.pool.len();
        let mut guard = self.pool[slot].lock();
        func(&mut *guard)
    }

    /// Get the length of the pool.
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    /// Is this empty?
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}

impl<T> Debug for ScratchPool<T>
where
    T: Send,
{
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("ScratchPool")
            .field("len", &self.pool.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::*;

    #[test]
    fn test_scratch_pool() {
        let max_pool = NonZeroUsize::new(4);
        let pool = ScratchPool::from_builder(Vec::<u32>::new, max_pool);

        assert!(!pool.is_empty());
        assert_eq!(pool.len(), resolve_max_pool(max_pool));
        assert_eq!(
            format!("{pool:?}"),
            format!("ScratchPool {{ len: {} }}", pool.len())
        );

        pool.with(|buf| buf.push(3));
        assert_eq!(pool.with(|buf| buf.clone()), vec![3]);
    }

    #[test]
    fn test_scratch_pool_threads() {
        let pool = Arc::new(ScratchPool::from_builder(|| 0usize, None));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let pool = pool.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        pool.with(|n| *n += 1);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let total: usize = pool.pool.iter().map(|m| *m.lock()).sum();
        assert_eq!(total, 1600);
    }
}

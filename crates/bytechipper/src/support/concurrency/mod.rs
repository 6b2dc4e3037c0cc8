//! # Concurrency Support

mod scratch_pool;
pub mod threads;

#[doc(inline)]
pub use scratch_pool::ScratchPool;

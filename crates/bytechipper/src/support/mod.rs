//! # Support Utilities

pub mod concurrency;
pub mod strings;

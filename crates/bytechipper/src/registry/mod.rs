//! # Encoding Registry
//!
//! Named schemes are registered as [`SchemeConstructor`]s and built lazily.
//! Each name is constructed at most once per successful build; concurrent
//! first callers share that single construction.
//!
//! The global registry is filled from [`RegistryInventoryHook`]s, so linking
//! a crate that submits a hook is enough to make its schemes available to
//! [`get_encoding`].

mod encoding_registry;
mod global_registry;
mod scheme_descriptor;

#[doc(inline)]
pub use encoding_registry::*;
#[doc(inline)]
pub use global_registry::*;
#[doc(inline)]
pub use scheme_descriptor::*;

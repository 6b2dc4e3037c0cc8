//! Public `OpenAI` Patterns, Constants, and Models.

mod models;
pub mod patterns;
mod schemes;
pub mod specials;
mod vocab_config;

#[doc(inline)]
pub use models::*;
#[doc(inline)]
pub use patterns::*;
#[doc(inline)]
pub use schemes::*;
#[doc(inline)]
pub use vocab_config::*;

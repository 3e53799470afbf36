//! Builtin capability modules.
//!
//! Trivial leaves that show the declaration style: each constructor draws an
//! identifier from the injected [`crate::identity::IdAllocator`] and pairs
//! every implementation with its descriptor at construction time.

pub mod clock;
pub mod math;
pub mod social;

pub use clock::clock_module;
pub use math::math_module;
pub use social::social_module;

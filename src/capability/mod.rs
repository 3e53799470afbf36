//! Typed capability declaration and module-local dispatch.
//!
//! A capability is a single named, typed, callable operation. Modules bundle
//! capabilities behind a stable identifier; descriptors are the declarative
//! metadata the oracle advertises on their behalf.

pub mod descriptor;
pub mod error;
pub mod module;

pub use descriptor::{
    CapabilityDescriptor, ModuleDescriptorSet, ParamType, ParamValue, ParameterDescriptor,
    ResultDescriptor,
};
pub use error::CapabilityError;
pub use module::{CallArgs, CapabilityFn, CapabilityModule};

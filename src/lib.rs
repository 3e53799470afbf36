//! # capchat
//!
//! A conversational agent that can invoke a small set of statically declared,
//! typed "capabilities" exposed by pluggable modules, using a textual request
//! protocol embedded inside the conversation stream.
//!
//! The crate is organized around four layers, leaves first:
//!
//! - [`identity`] — stable, human-readable identifier allocation.
//! - [`capability`] — descriptor types plus [`capability::CapabilityModule`],
//!   a named bundle of typed implementations.
//! - [`oracle`] — the registry that aggregates every module's descriptors
//!   into one advertisable interface document and routes call requests.
//! - [`chat`] — the conversation loop that completes turns through an opaque
//!   [`llm::ChatModel`] and resolves embedded requests, bounded in depth.
//!
//! The builtin [`modules`] (math, clock, social) are trivial leaves that show
//! the declaration style.

pub mod capability;
pub mod chat;
pub mod identity;
pub mod llm;
pub mod modules;
pub mod oracle;

pub use capability::{
    CapabilityDescriptor, CapabilityError, CapabilityModule, ModuleDescriptorSet, ParamType,
    ParamValue, ParameterDescriptor, ResultDescriptor,
};
pub use chat::{Chat, ChatError};
pub use identity::IdAllocator;
pub use llm::{ChatModel, Message, ModelError, Role};
pub use oracle::{CallRequest, Oracle, OracleError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

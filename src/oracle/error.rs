//! Dispatch-time error taxonomy for the oracle.

use thiserror::Error;

use crate::capability::{CapabilityError, ParamType};

/// Errors surfaced by [`super::Oracle::dispatch`] and request parsing.
///
/// None of these are fatal to a conversation turn: the chat loop renders a
/// dispatch failure into a System entry so the model can self-correct, and a
/// malformed embedded payload is logged and treated as absent.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The requested module identifier is not registered.
    #[error("unknown module '{module}'")]
    UnknownModule { module: String },

    /// The module exists but does not advertise the requested capability.
    #[error("module '{module}' has no capability '{capability}'")]
    UnknownCapability { module: String, capability: String },

    /// A positional argument could not be coerced to its declared type.
    #[error("cannot coerce '{value}' to {param_type} for parameter '{parameter}'")]
    ArgumentCoercion {
        parameter: String,
        param_type: ParamType,
        value: String,
    },

    /// The declared parameter type tag has no coercion rule.
    #[error("declared type of parameter '{parameter}' is not supported")]
    UnsupportedType { parameter: String },

    /// The embedded request payload was not valid JSON of the expected shape.
    #[error("malformed capability request: {message}")]
    MalformedRequest { message: String },

    /// The owning module rejected or failed the call.
    #[error(transparent)]
    Capability(#[from] CapabilityError),
}

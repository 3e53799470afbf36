//! Module-local capability errors.

use thiserror::Error;

use super::descriptor::ParamType;

/// Errors raised inside a capability module during lookup or invocation.
///
/// `NotFound` should not normally surface through the oracle, whose dispatch
/// table is derived from the same registration table, but it is not swallowed:
/// a module called directly reports it like any other failure.
#[derive(Debug, Error)]
pub enum CapabilityError {
    /// No registered capability matches the requested name.
    #[error("could not find capability '{capability}' in module '{module}'")]
    NotFound { module: String, capability: String },

    /// A declared parameter was not supplied by the caller.
    #[error("capability '{capability}' is missing argument '{parameter}'")]
    MissingArgument {
        capability: String,
        parameter: String,
    },

    /// An argument was supplied with the wrong type.
    #[error("argument '{parameter}' has type {actual}, expected {expected}")]
    WrongType {
        parameter: String,
        expected: ParamType,
        actual: ParamType,
    },

    /// The capability body itself failed.
    #[error("capability failed: {message}")]
    Failed { message: String },
}

//! Descriptor types for capabilities and their typed signatures.
//!
//! A descriptor is the declarative half of a capability: its name, a
//! human-readable description, the ordered parameter list, and the result
//! shape. Descriptors are what the oracle advertises to the model; the
//! implementations stay behind [`super::module::CapabilityModule`].
//!
//! Serde field names here are wire contract: external tooling and the
//! model's own understanding of the protocol depend on them.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ParamType
// ---------------------------------------------------------------------------

/// The type tag a parameter or result declares on the wire.
///
/// Unknown tags deserialize to [`ParamType::Unsupported`] and are rejected
/// lazily, at coercion time, rather than at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParamType {
    Int,
    Float,
    Str,
    Bool,
    Unsupported,
}

impl From<String> for ParamType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "int" => Self::Int,
            "float" => Self::Float,
            "str" => Self::Str,
            "bool" => Self::Bool,
            _ => Self::Unsupported,
        }
    }
}

impl From<ParamType> for String {
    fn from(param_type: ParamType) -> Self {
        param_type.to_string()
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::Bool => "bool",
            Self::Unsupported => "unsupported",
        };
        f.write_str(tag)
    }
}

// ---------------------------------------------------------------------------
// ParamValue
// ---------------------------------------------------------------------------

/// A typed argument or result value.
///
/// `Display` is the canonical stringification used when a capability result
/// is spliced back into the transcript.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

impl ParamValue {
    /// The type tag this value inhabits.
    pub fn param_type(&self) -> ParamType {
        match self {
            Self::Int(_) => ParamType::Int,
            Self::Float(_) => ParamType::Float,
            Self::Str(_) => ParamType::Str,
            Self::Bool(_) => ParamType::Bool,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Str(v) => f.write_str(v),
            Self::Bool(v) => write!(f, "{}", v),
        }
    }
}

// ---------------------------------------------------------------------------
// Parameter and result descriptors
// ---------------------------------------------------------------------------

/// A single named, typed parameter of a capability. Immutable once declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Parameter name, used as the argument key at invocation.
    pub name: String,
    /// Declared type, driving argument coercion.
    #[serde(rename = "type")]
    pub param_type: ParamType,
    /// Human-readable description shown in the interface document.
    pub description: String,
}

impl ParameterDescriptor {
    pub fn new(
        name: impl Into<String>,
        param_type: ParamType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: description.into(),
        }
    }
}

/// The typed result of a capability. Immutable once declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultDescriptor {
    /// Declared result type.
    #[serde(rename = "type")]
    pub result_type: ParamType,
    /// Human-readable description shown in the interface document.
    pub description: String,
}

impl ResultDescriptor {
    pub fn new(result_type: ParamType, description: impl Into<String>) -> Self {
        Self {
            result_type,
            description: description.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// CapabilityDescriptor
// ---------------------------------------------------------------------------

/// The full declarative signature of one capability.
///
/// Equality and hashing are keyed on `name` alone: within a module the name
/// is the capability's identity, and lookups treat two descriptors with the
/// same name as the same capability even when other fields differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityDescriptor {
    /// Name, unique within the owning module.
    pub name: String,
    /// Description used to tell the model how and when to invoke it.
    pub description: String,
    /// Ordered parameter declarations; call arguments align positionally.
    pub parameters: Vec<ParameterDescriptor>,
    /// Result declaration.
    pub result: ResultDescriptor,
}

impl CapabilityDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Vec<ParameterDescriptor>,
        result: ResultDescriptor,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            result,
        }
    }
}

impl PartialEq for CapabilityDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for CapabilityDescriptor {}

impl Hash for CapabilityDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

// ---------------------------------------------------------------------------
// ModuleDescriptorSet
// ---------------------------------------------------------------------------

/// The advertised face of one module: its identifier, description, and the
/// ordered capability descriptors it exposes.
///
/// The interface document the oracle hands to the model is a JSON array of
/// these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDescriptorSet {
    /// Owning module identifier (wire name `module_name`).
    #[serde(rename = "module_name")]
    pub module_id: String,
    /// Human-readable module description.
    pub description: String,
    /// Capabilities in declaration order.
    pub capabilities: Vec<CapabilityDescriptor>,
}

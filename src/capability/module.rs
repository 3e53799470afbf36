//! Capability modules: named bundles of typed, callable operations.
//!
//! A module pairs each implementation closure with its descriptor in an
//! ordered registration table at construction time. The table is the single
//! source of truth both for advertisement ([`CapabilityModule::descriptor_set`])
//! and dispatch ([`CapabilityModule::call`]), so a capability can never be
//! advertised without being callable.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::descriptor::{CapabilityDescriptor, ModuleDescriptorSet, ParamType, ParamValue};
use super::error::CapabilityError;

// ---------------------------------------------------------------------------
// CallArgs
// ---------------------------------------------------------------------------

/// Named, typed arguments handed to a capability implementation.
///
/// Arguments arrive keyed by parameter name. The positional zip upstream
/// truncates to the shorter side, so a declared parameter may be absent here;
/// the typed accessors report that as [`CapabilityError::MissingArgument`].
pub struct CallArgs {
    capability: String,
    values: HashMap<String, ParamValue>,
}

impl CallArgs {
    pub fn new(capability: impl Into<String>, values: HashMap<String, ParamValue>) -> Self {
        Self {
            capability: capability.into(),
            values,
        }
    }

    fn get(&self, name: &str) -> Result<&ParamValue, CapabilityError> {
        self.values
            .get(name)
            .ok_or_else(|| CapabilityError::MissingArgument {
                capability: self.capability.clone(),
                parameter: name.to_string(),
            })
    }

    fn wrong_type(name: &str, expected: ParamType, actual: &ParamValue) -> CapabilityError {
        CapabilityError::WrongType {
            parameter: name.to_string(),
            expected,
            actual: actual.param_type(),
        }
    }

    /// Fetch an `int` argument by name.
    pub fn int(&self, name: &str) -> Result<i64, CapabilityError> {
        match self.get(name)? {
            ParamValue::Int(v) => Ok(*v),
            other => Err(Self::wrong_type(name, ParamType::Int, other)),
        }
    }

    /// Fetch a `float` argument by name.
    pub fn float(&self, name: &str) -> Result<f64, CapabilityError> {
        match self.get(name)? {
            ParamValue::Float(v) => Ok(*v),
            other => Err(Self::wrong_type(name, ParamType::Float, other)),
        }
    }

    /// Fetch a `str` argument by name.
    pub fn str(&self, name: &str) -> Result<&str, CapabilityError> {
        match self.get(name)? {
            ParamValue::Str(v) => Ok(v),
            other => Err(Self::wrong_type(name, ParamType::Str, other)),
        }
    }

    /// Fetch a `bool` argument by name.
    pub fn bool(&self, name: &str) -> Result<bool, CapabilityError> {
        match self.get(name)? {
            ParamValue::Bool(v) => Ok(*v),
            other => Err(Self::wrong_type(name, ParamType::Bool, other)),
        }
    }
}

// ---------------------------------------------------------------------------
// CapabilityModule
// ---------------------------------------------------------------------------

/// A capability implementation bound to its descriptor.
pub type CapabilityFn =
    Arc<dyn Fn(&CallArgs) -> Result<ParamValue, CapabilityError> + Send + Sync>;

/// A named, described bundle of capabilities.
///
/// Constructed once at process start; the registration table is fixed after
/// construction and dispatch takes `&self`, so a module is freely shareable.
pub struct CapabilityModule {
    id: String,
    description: String,
    table: Vec<(CapabilityDescriptor, CapabilityFn)>,
}

impl fmt::Debug for CapabilityModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityModule")
            .field("id", &self.id)
            .field("description", &self.description)
            .field(
                "capabilities",
                &self.table.iter().map(|(d, _)| &d.name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl CapabilityModule {
    /// Create an empty module with the given identifier and description.
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            table: Vec::new(),
        }
    }

    /// Register a capability, pairing its descriptor with an implementation.
    ///
    /// Registration order is advertisement order.
    pub fn register(
        mut self,
        descriptor: CapabilityDescriptor,
        implementation: impl Fn(&CallArgs) -> Result<ParamValue, CapabilityError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.table.push((descriptor, Arc::new(implementation)));
        self
    }

    /// The module's stable identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The module's human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Build the advertised descriptor set.
    ///
    /// Built on demand rather than cached, so it always reflects the current
    /// registration table.
    pub fn descriptor_set(&self) -> ModuleDescriptorSet {
        ModuleDescriptorSet {
            module_id: self.id.clone(),
            description: self.description.clone(),
            capabilities: self.table.iter().map(|(d, _)| d.clone()).collect(),
        }
    }

    /// Invoke the capability registered under `name` with named arguments.
    pub fn call(
        &self,
        name: &str,
        values: HashMap<String, ParamValue>,
    ) -> Result<ParamValue, CapabilityError> {
        let (descriptor, implementation) = self
            .table
            .iter()
            .find(|(d, _)| d.name == name)
            .ok_or_else(|| CapabilityError::NotFound {
                module: self.id.clone(),
                capability: name.to_string(),
            })?;
        implementation(&CallArgs::new(descriptor.name.clone(), values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::descriptor::{ParameterDescriptor, ResultDescriptor};

    fn test_module() -> CapabilityModule {
        CapabilityModule::new("TestModule_1", "A module for tests")
            .register(
                CapabilityDescriptor::new(
                    "double",
                    "Doubles an integer",
                    vec![ParameterDescriptor::new("n", ParamType::Int, "The number")],
                    ResultDescriptor::new(ParamType::Int, "Twice `n`"),
                ),
                |args| Ok(ParamValue::Int(args.int("n")? * 2)),
            )
            .register(
                CapabilityDescriptor::new(
                    "shout",
                    "Uppercases text",
                    vec![ParameterDescriptor::new("text", ParamType::Str, "The text")],
                    ResultDescriptor::new(ParamType::Str, "Uppercased text"),
                ),
                |args| Ok(ParamValue::Str(args.str("text")?.to_uppercase())),
            )
    }

    #[test]
    fn test_call_dispatches_by_name() {
        let module = test_module();
        let result = module
            .call("double", HashMap::from([("n".to_string(), ParamValue::Int(21))]))
            .unwrap();
        assert_eq!(result, ParamValue::Int(42));
    }

    #[test]
    fn test_call_unknown_capability() {
        let module = test_module();
        let err = module.call("missing", HashMap::new()).unwrap_err();
        assert!(matches!(err, CapabilityError::NotFound { .. }));
        assert!(err.to_string().contains("missing"));
        assert!(err.to_string().contains("TestModule_1"));
    }

    #[test]
    fn test_missing_argument_is_reported() {
        let module = test_module();
        let err = module.call("double", HashMap::new()).unwrap_err();
        match err {
            CapabilityError::MissingArgument { capability, parameter } => {
                assert_eq!(capability, "double");
                assert_eq!(parameter, "n");
            }
            other => panic!("expected MissingArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_type_is_reported() {
        let module = test_module();
        let err = module
            .call(
                "double",
                HashMap::from([("n".to_string(), ParamValue::Str("21".to_string()))]),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            CapabilityError::WrongType {
                expected: ParamType::Int,
                actual: ParamType::Str,
                ..
            }
        ));
    }

    #[test]
    fn test_descriptor_set_preserves_declaration_order() {
        let set = test_module().descriptor_set();
        assert_eq!(set.module_id, "TestModule_1");
        let names: Vec<&str> = set.capabilities.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["double", "shout"]);
    }
}

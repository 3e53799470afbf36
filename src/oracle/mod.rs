//! The oracle: single point of truth for what can be called and how.
//!
//! Aggregates descriptor sets from every registered module into one
//! machine-parseable interface document, and routes incoming call requests to
//! the owning module after validating and coercing their positional string
//! arguments.

pub mod error;
pub mod request;

pub use error::OracleError;
pub use request::{find_embedded, CallRequest, REQUEST_END, REQUEST_START};

use std::collections::HashMap;

use crate::capability::{
    CapabilityDescriptor, CapabilityModule, ModuleDescriptorSet, ParamType, ParamValue,
    ParameterDescriptor,
};

/// Registry over an ordered set of capability modules.
///
/// The interface document and both lookup tables are derived once, at
/// construction; they stay mutually consistent because nothing mutates the
/// module set afterwards.
#[derive(Debug)]
pub struct Oracle {
    modules: HashMap<String, CapabilityModule>,
    descriptors: HashMap<String, HashMap<String, CapabilityDescriptor>>,
    interface_doc: String,
}

impl Oracle {
    /// Build an oracle over an ordered list of modules.
    pub fn new(modules: Vec<CapabilityModule>) -> Self {
        let sets: Vec<ModuleDescriptorSet> =
            modules.iter().map(|m| m.descriptor_set()).collect();
        let interface_doc =
            serde_json::to_string_pretty(&sets).expect("descriptor sets serialize");

        let mut descriptors = HashMap::new();
        for set in sets {
            let by_name = set
                .capabilities
                .into_iter()
                .map(|c| (c.name.clone(), c))
                .collect();
            descriptors.insert(set.module_id, by_name);
        }

        let modules = modules
            .into_iter()
            .map(|m| (m.id().to_string(), m))
            .collect();

        Self {
            modules,
            descriptors,
            interface_doc,
        }
    }

    /// The aggregated interface document advertised to the model.
    ///
    /// A pretty-printed JSON array of module descriptor sets, preserving
    /// module registration order and each module's capability declaration
    /// order. Cached at construction; byte-identical across calls.
    pub fn interface_document(&self) -> &str {
        &self.interface_doc
    }

    /// Validate, coerce, and dispatch one call request, returning the
    /// stringified capability result.
    pub fn dispatch(&self, request: &CallRequest) -> Result<String, OracleError> {
        let module =
            self.modules
                .get(&request.module_name)
                .ok_or_else(|| OracleError::UnknownModule {
                    module: request.module_name.clone(),
                })?;
        let descriptor = self
            .descriptors
            .get(&request.module_name)
            .and_then(|capabilities| capabilities.get(&request.api_name))
            .ok_or_else(|| OracleError::UnknownCapability {
                module: request.module_name.clone(),
                capability: request.api_name.clone(),
            })?;

        let values = Self::coerce_arguments(descriptor, &request.parameters)?;
        tracing::debug!(
            module = %request.module_name,
            capability = %request.api_name,
            "dispatching capability request"
        );
        let result = module.call(&request.api_name, values)?;
        Ok(result.to_string())
    }

    /// Zip positional string arguments against the declared parameters and
    /// coerce each to its declared type.
    ///
    /// The zip truncates to the shorter side: extra arguments are dropped and
    /// extra parameters stay unbound, surfacing later inside the capability
    /// as `MissingArgument`.
    fn coerce_arguments(
        descriptor: &CapabilityDescriptor,
        arguments: &[String],
    ) -> Result<HashMap<String, ParamValue>, OracleError> {
        let mut values = HashMap::new();
        for (param, raw) in descriptor.parameters.iter().zip(arguments) {
            values.insert(param.name.clone(), Self::coerce(param, raw)?);
        }
        Ok(values)
    }

    fn coerce(param: &ParameterDescriptor, raw: &str) -> Result<ParamValue, OracleError> {
        let coercion_failed = || OracleError::ArgumentCoercion {
            parameter: param.name.clone(),
            param_type: param.param_type,
            value: raw.to_string(),
        };
        match param.param_type {
            ParamType::Int => raw
                .trim()
                .parse::<i64>()
                .map(ParamValue::Int)
                .map_err(|_| coercion_failed()),
            ParamType::Float => raw
                .trim()
                .parse::<f64>()
                .map(ParamValue::Float)
                .map_err(|_| coercion_failed()),
            ParamType::Str => Ok(ParamValue::Str(raw.to_string())),
            // Literal-string rule: any non-empty string is true, only the
            // empty string is false. Part of the advertised protocol contract.
            ParamType::Bool => Ok(ParamValue::Bool(!raw.is_empty())),
            ParamType::Unsupported => Err(OracleError::UnsupportedType {
                parameter: param.name.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{CapabilityError, ResultDescriptor};

    fn math_module() -> CapabilityModule {
        CapabilityModule::new("MathModule_1", "A module to do math operations").register(
            CapabilityDescriptor::new(
                "add",
                "Adds two integers together",
                vec![
                    ParameterDescriptor::new("a", ParamType::Int, "First number"),
                    ParameterDescriptor::new("b", ParamType::Int, "Second number"),
                ],
                ResultDescriptor::new(ParamType::Int, "The sum of `a` and `b`"),
            ),
            |args| Ok(ParamValue::Int(args.int("a")? + args.int("b")?)),
        )
    }

    fn flag_module() -> CapabilityModule {
        CapabilityModule::new("FlagModule_1", "Echoes booleans").register(
            CapabilityDescriptor::new(
                "echo",
                "Echoes a boolean flag",
                vec![ParameterDescriptor::new(
                    "flag",
                    ParamType::Bool,
                    "The flag",
                )],
                ResultDescriptor::new(ParamType::Bool, "The same flag"),
            ),
            |args| Ok(ParamValue::Bool(args.bool("flag")?)),
        )
    }

    fn oracle() -> Oracle {
        Oracle::new(vec![math_module(), flag_module()])
    }

    fn add_request(parameters: &[&str]) -> CallRequest {
        CallRequest::new(
            "MathModule_1",
            "add",
            parameters.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_dispatch_success() {
        let result = oracle().dispatch(&add_request(&["2", "3"])).unwrap();
        assert_eq!(result, "5");
    }

    #[test]
    fn test_dispatch_unknown_module() {
        let request = CallRequest::new("nope", "add", vec!["2".to_string(), "3".to_string()]);
        let err = oracle().dispatch(&request).unwrap_err();
        assert!(matches!(err, OracleError::UnknownModule { .. }));
    }

    #[test]
    fn test_dispatch_unknown_capability() {
        let request = CallRequest::new("MathModule_1", "subtract", vec![]);
        let err = oracle().dispatch(&request).unwrap_err();
        match err {
            OracleError::UnknownCapability { module, capability } => {
                assert_eq!(module, "MathModule_1");
                assert_eq!(capability, "subtract");
            }
            other => panic!("expected UnknownCapability, got {other:?}"),
        }
    }

    #[test]
    fn test_int_coercion_failure() {
        let err = oracle().dispatch(&add_request(&["two", "3"])).unwrap_err();
        match err {
            OracleError::ArgumentCoercion {
                parameter,
                param_type,
                value,
            } => {
                assert_eq!(parameter, "a");
                assert_eq!(param_type, ParamType::Int);
                assert_eq!(value, "two");
            }
            other => panic!("expected ArgumentCoercion, got {other:?}"),
        }
    }

    #[test]
    fn test_int_coercion_tolerates_whitespace() {
        let result = oracle().dispatch(&add_request(&[" 2 ", "3"])).unwrap();
        assert_eq!(result, "5");
    }

    #[test]
    fn test_bool_literal_coercion_rule() {
        // Any non-empty string is true, including the literal "false".
        let request = CallRequest::new("FlagModule_1", "echo", vec!["false".to_string()]);
        assert_eq!(oracle().dispatch(&request).unwrap(), "true");

        let request = CallRequest::new("FlagModule_1", "echo", vec![String::new()]);
        assert_eq!(oracle().dispatch(&request).unwrap(), "false");
    }

    #[test]
    fn test_extra_arguments_are_truncated() {
        let result = oracle().dispatch(&add_request(&["2", "3", "9"])).unwrap();
        assert_eq!(result, "5");
    }

    #[test]
    fn test_missing_arguments_fail_inside_capability() {
        let err = oracle().dispatch(&add_request(&["2"])).unwrap_err();
        match err {
            OracleError::Capability(CapabilityError::MissingArgument { parameter, .. }) => {
                assert_eq!(parameter, "b");
            }
            other => panic!("expected MissingArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_type_fails_at_coercion() {
        let module = CapabilityModule::new("OddModule_1", "Declares an unsupported type")
            .register(
                CapabilityDescriptor::new(
                    "noop",
                    "Does nothing",
                    vec![ParameterDescriptor::new(
                        "x",
                        ParamType::Unsupported,
                        "Unusable",
                    )],
                    ResultDescriptor::new(ParamType::Str, "Nothing"),
                ),
                |_args| Ok(ParamValue::Str(String::new())),
            );
        let oracle = Oracle::new(vec![module]);
        let request = CallRequest::new("OddModule_1", "noop", vec!["anything".to_string()]);
        let err = oracle.dispatch(&request).unwrap_err();
        assert!(matches!(err, OracleError::UnsupportedType { .. }));
    }

    #[test]
    fn test_interface_document_is_deterministic() {
        let first = oracle();
        let second = oracle();
        assert_eq!(first.interface_document(), second.interface_document());
        assert_eq!(first.interface_document(), first.interface_document());
    }

    #[test]
    fn test_interface_document_preserves_module_order() {
        let doc = oracle().interface_document().to_string();
        let math = doc.find("MathModule_1").unwrap();
        let flag = doc.find("FlagModule_1").unwrap();
        assert!(math < flag);

        let sets: Vec<ModuleDescriptorSet> = serde_json::from_str(&doc).unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].module_id, "MathModule_1");
        assert_eq!(sets[1].module_id, "FlagModule_1");
        assert_eq!(sets[0].capabilities[0].name, "add");
    }
}

//! Arithmetic capabilities.

use crate::capability::{
    CapabilityDescriptor, CapabilityModule, ParamType, ParamValue, ParameterDescriptor,
    ResultDescriptor,
};
use crate::identity::IdAllocator;

/// Type tag for math module identifiers.
pub const TYPE_TAG: &str = "MathModule";

/// Build the math module.
pub fn math_module(ids: &IdAllocator) -> CapabilityModule {
    CapabilityModule::new(ids.allocate(TYPE_TAG), "A module to do math operations").register(
        CapabilityDescriptor::new(
            "add",
            "Adds two integers together",
            vec![
                ParameterDescriptor::new("a", ParamType::Int, "First number"),
                ParameterDescriptor::new("b", ParamType::Int, "Second number"),
            ],
            ResultDescriptor::new(ParamType::Int, "An integer that is the sum of `a` and `b`"),
        ),
        |args| Ok(ParamValue::Int(args.int("a")? + args.int("b")?)),
    )
}

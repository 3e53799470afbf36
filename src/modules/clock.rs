//! Current date and time capability.

use chrono::Local;

use crate::capability::{
    CapabilityDescriptor, CapabilityModule, ParamType, ParamValue, ResultDescriptor,
};
use crate::identity::IdAllocator;

/// Type tag for clock module identifiers.
pub const TYPE_TAG: &str = "ClockModule";

/// Datetime rendering used by the `time` capability.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Build the clock module.
pub fn clock_module(ids: &IdAllocator) -> CapabilityModule {
    CapabilityModule::new(ids.allocate(TYPE_TAG), "A module to read the current datetime")
        .register(
            CapabilityDescriptor::new(
                "time",
                "Gets the current datetime",
                vec![],
                ResultDescriptor::new(
                    ParamType::Str,
                    "A string of the format '%Y-%m-%d %H:%M:%S' representing the current datetime",
                ),
            ),
            |_args| Ok(ParamValue::Str(Local::now().format(TIME_FORMAT).to_string())),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use std::collections::HashMap;

    #[test]
    fn test_time_is_formatted() {
        let module = clock_module(&IdAllocator::new());
        let result = module.call("time", HashMap::new()).unwrap();
        match result {
            ParamValue::Str(rendered) => {
                NaiveDateTime::parse_from_str(&rendered, TIME_FORMAT)
                    .expect("time renders in the advertised format");
            }
            other => panic!("expected a string, got {other:?}"),
        }
    }

    #[test]
    fn test_time_takes_no_parameters() {
        let set = clock_module(&IdAllocator::new()).descriptor_set();
        assert!(set.capabilities[0].parameters.is_empty());
    }
}

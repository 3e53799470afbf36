//! Public update posting capability.
//!
//! The publisher is a stub: it accepts the text and reports success without
//! contacting any network service.

use crate::capability::{
    CapabilityDescriptor, CapabilityModule, ParamType, ParamValue, ParameterDescriptor,
    ResultDescriptor,
};
use crate::identity::IdAllocator;

/// Type tag for social module identifiers.
pub const TYPE_TAG: &str = "SocialModule";

/// Build the social module.
pub fn social_module(ids: &IdAllocator) -> CapabilityModule {
    CapabilityModule::new(ids.allocate(TYPE_TAG), "A module to post public updates").register(
        CapabilityDescriptor::new(
            "post",
            "Posts a message to the public feed",
            vec![ParameterDescriptor::new(
                "text",
                ParamType::Str,
                "Text to post",
            )],
            ResultDescriptor::new(
                ParamType::Bool,
                "Whether or not the message was published successfully",
            ),
        ),
        |args| {
            let text = args.str("text")?;
            tracing::info!(%text, "publishing update");
            Ok(ParamValue::Bool(true))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_post_reports_success() {
        let module = social_module(&IdAllocator::new());
        let result = module
            .call(
                "post",
                HashMap::from([("text".to_string(), ParamValue::Str("hello".to_string()))]),
            )
            .unwrap();
        assert_eq!(result, ParamValue::Bool(true));
    }

    #[test]
    fn test_post_requires_text() {
        let module = social_module(&IdAllocator::new());
        let err = module.call("post", HashMap::new()).unwrap_err();
        assert!(err.to_string().contains("text"));
    }
}

//! Full configuration validation.
//!
//! Validates numeric ranges and animation descriptors. Each area has its own
//! submodule; this orchestrator calls them all and collects errors into a
//! single `ConfigError`.

mod animation;
mod helpers;
mod stack;


use crate::schema::CardStackConfig;
use cardstack_common::ConfigError;

/// Run all validations on a config, collecting all errors.
///
/// `stack.visible` is not checked; the controller normalizes window sizes
/// that don't fit the stack.
pub fn validate(config: &CardStackConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    stack::validate_stack(&mut errors, config);
    animation::validate_animation(&mut errors, "stack.animation", &config.stack.animation);
    if let Some(pre) = &config.stack.pre_animation {
        animation::validate_pre_animation(&mut errors, "stack.pre_animation.accept", &pre.accept);
        animation::validate_pre_animation(&mut errors, "stack.pre_animation.reject", &pre.reject);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

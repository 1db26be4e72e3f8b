//! Stack section validation.

use crate::schema::CardStackConfig;

use super::helpers::validate_range_u64;

pub(crate) fn validate_stack(errors: &mut Vec<String>, config: &CardStackConfig) {
    let stack = &config.stack;

    // (0, 10000]; NaN fails the comparison.
    if !(stack.perspective > 0.0 && stack.perspective <= 10_000.0) {
        errors.push(format!(
            "stack.perspective = {} is out of range (0, 10000]",
            stack.perspective
        ));
    }

    if stack.perspective_origin.trim().is_empty() {
        errors.push("stack.perspective_origin must not be empty".into());
    }

    validate_range_u64(errors, "stack.delay_ms", stack.delay_ms, 0, 60_000);
    validate_range_u64(
        errors,
        "stack.exit_timeout_ms",
        stack.exit_timeout_ms,
        0,
        600_000,
    );
}

//! Animation descriptor validation (durations, easing curves, pre-animation targets).

use crate::schema::{AnimationConfig, Easing, PreAnimationConfig};

use super::helpers::{validate_positive, validate_range_f64, validate_range_u64};

pub(crate) fn validate_animation(errors: &mut Vec<String>, prefix: &str, anim: &AnimationConfig) {
    validate_range_u64(
        errors,
        &format!("{prefix}.duration_ms"),
        anim.duration_ms,
        0,
        60_000,
    );

    match &anim.easing {
        Easing::Bezier { points } => {
            if points.len() < 2 {
                errors.push(format!(
                    "{prefix}.easing.points needs at least 2 points, got {}",
                    points.len()
                ));
            }
            for (i, point) in points.iter().enumerate() {
                let name = format!("{prefix}.easing.points[{i}].x");
                validate_range_f64(errors, &name, point.x, 0.0, 1.0);
                for (j, cp) in point.cp.iter().enumerate() {
                    let name = format!("{prefix}.easing.points[{i}].cp[{j}].x");
                    validate_range_f64(errors, &name, cp.x, 0.0, 1.0);
                }
            }
        }
        Easing::Spring {
            frequency,
            friction,
            ..
        } => {
            validate_positive(errors, &format!("{prefix}.easing.frequency"), *frequency);
            validate_positive(errors, &format!("{prefix}.easing.friction"), *friction);
        }
    }
}

pub(crate) fn validate_pre_animation(
    errors: &mut Vec<String>,
    prefix: &str,
    pre: &PreAnimationConfig,
) {
    for (property, value) in &pre.properties {
        if !value.is_finite() {
            errors.push(format!("{prefix}.properties.{property} = {value} must be finite"));
        }
    }
    validate_animation(errors, &format!("{prefix}.animation"), &pre.animation);
}

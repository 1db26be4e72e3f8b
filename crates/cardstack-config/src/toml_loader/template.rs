//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub fn default_config_toml() -> String {
    r##"# Card stack configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[stack]
# perspective = 1000.0             # px, 0-10000
# perspective_origin = "50% -50%"
# infinite = true                  # wrap around instead of ending
# visible = 3                      # items shown at once; out-of-range values fall back to 1
# delay_ms = 0                     # delay before the stack items move up, 0-60000
# exit_timeout_ms = 2000           # force the exit if no transition-end arrives, 0 disables

[stack.animation]
# duration_ms = 500

# [stack.animation.easing]
# type = "bezier"
# points = [
#   { x = 0.0, y = 0.0, cp = [{ x = 0.25, y = 0.1 }] },
#   { x = 1.0, y = 1.0, cp = [{ x = 0.25, y = 1.0 }] },
# ]
#
# type = "spring"
# frequency = 557.0
# friction = 459.0
# anticipation_size = 206.0
# anticipation_strength = 392.0

# Optional motion before items settle, per action.
# [stack.pre_animation.accept]
# elastic = true
# properties = { translateX = 100.0 }
# [stack.pre_animation.accept.animation]
# duration_ms = 300
#
# [stack.pre_animation.reject]
# elastic = true
# properties = { translateX = -100.0 }

[logging]
# level = "INFO"                   # TRACE, DEBUG, INFO, WARNING, ERROR
# with_target = false
"##
    .to_string()
}

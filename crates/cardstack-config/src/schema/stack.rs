//! Stack behaviour configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::AnimationConfig;

/// Motion applied to items before they settle into their new slot.
///
/// With `elastic = true` the property values are spread across the window:
/// for `translateX = 100` and `visible = 4` the slots receive 100, 75, 50
/// and 25.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreAnimationConfig {
    pub elastic: bool,
    /// Target values keyed by animated property name (`translateX`, `rotateZ`, ...).
    pub properties: BTreeMap<String, f64>,
    pub animation: AnimationConfig,
}

/// Pre-animations for each action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreAnimationSet {
    pub accept: PreAnimationConfig,
    pub reject: PreAnimationConfig,
}

/// Stack controller settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    /// Perspective distance in px (valid range: 0-10000, exclusive of 0).
    pub perspective: f64,
    pub perspective_origin: String,
    /// Wrap back to the first item instead of ending.
    pub infinite: bool,
    /// Number of items shown at once. Values that don't fit the stack are
    /// normalized to 1 when the controller is built.
    pub visible: i64,
    /// Settle animation for items moving up one slot.
    pub animation: AnimationConfig,
    /// Delay before the per-slot animations start (valid range: 0-60000).
    pub delay_ms: u64,
    /// How long to wait for the outgoing item's exit signal before forcing
    /// the exit to complete. 0 disables the watchdog (valid range: 0-600000).
    pub exit_timeout_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_animation: Option<PreAnimationSet>,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            perspective: 1000.0,
            perspective_origin: "50% -50%".into(),
            infinite: true,
            visible: 3,
            animation: AnimationConfig::default(),
            delay_ms: 0,
            exit_timeout_ms: 2000,
            pre_animation: None,
        }
    }
}

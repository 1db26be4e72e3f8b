//! Animation descriptor types.
//!
//! These are handed to the animation scheduler as-is; the controller never
//! interprets the easing curve itself.

use serde::{Deserialize, Serialize};

/// A bezier control point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub x: f64,
    pub y: f64,
}

/// One anchor of a bezier easing curve with its control points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BezierPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub cp: Vec<ControlPoint>,
}

/// Easing curve for a tween.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Easing {
    /// Piecewise bezier curve from (0,0) to (1,1). At least two anchors.
    Bezier { points: Vec<BezierPoint> },
    /// Damped spring.
    Spring {
        frequency: f64,
        friction: f64,
        #[serde(default)]
        anticipation_size: f64,
        #[serde(default)]
        anticipation_strength: f64,
    },
}

impl Easing {
    /// The stock curve: a gentle ease-out.
    pub fn default_bezier() -> Self {
        Easing::Bezier {
            points: vec![
                BezierPoint {
                    x: 0.0,
                    y: 0.0,
                    cp: vec![ControlPoint { x: 0.25, y: 0.1 }],
                },
                BezierPoint {
                    x: 1.0,
                    y: 1.0,
                    cp: vec![ControlPoint { x: 0.25, y: 1.0 }],
                },
            ],
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Self::default_bezier()
    }
}

/// Duration + easing pair passed to the animation scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Tween length in milliseconds (valid range: 0-60000).
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 500,
            easing: Easing::default(),
        }
    }
}

//! Animation scheduler collaborator.
//!
//! The controller hands target property values and a descriptor to an
//! [`Animator`]; the tween itself happens elsewhere. When the controller
//! needs to chain work after a tween it passes an [`AnimationToken`], and the
//! host reports it back through
//! [`StackController::on_animation_complete`](crate::StackController::on_animation_complete).

use std::collections::BTreeMap;
use std::fmt;

use cardstack_common::ItemId;
use cardstack_config::AnimationConfig;
use serde::{Deserialize, Serialize};

/// Property name used for the depth offset.
pub const DEPTH_PROPERTY: &str = "translateZ";

/// Identifies one animation whose completion the controller is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimationToken(pub u64);

impl fmt::Display for AnimationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anim-{}", self.0)
    }
}

/// Final property values for one tween, keyed by property name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationTargets(BTreeMap<String, f64>);

impl AnimationTargets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Targets that only move the depth offset.
    pub fn depth(px: f64) -> Self {
        let mut targets = Self::new();
        targets.set_depth(px);
        targets
    }

    pub fn insert(&mut self, property: impl Into<String>, value: f64) {
        self.0.insert(property.into(), value);
    }

    pub fn set_depth(&mut self, px: f64) {
        self.insert(DEPTH_PROPERTY, px);
    }

    pub fn get(&self, property: &str) -> Option<f64> {
        self.0.get(property).copied()
    }

    pub fn depth_offset(&self) -> Option<f64> {
        self.get(DEPTH_PROPERTY)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Opaque animation scheduler.
pub trait Animator {
    /// Start tweening `item` towards `targets`. If `completion` is given the
    /// host must report it back exactly once when the tween finishes.
    fn animate(
        &mut self,
        item: ItemId,
        targets: &AnimationTargets,
        animation: &AnimationConfig,
        completion: Option<AnimationToken>,
    );
}

/// Animator that drops every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAnimator;

impl Animator for NoopAnimator {
    fn animate(
        &mut self,
        _item: ItemId,
        _targets: &AnimationTargets,
        _animation: &AnimationConfig,
        _completion: Option<AnimationToken>,
    ) {
    }
}

/// One recorded [`Animator::animate`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationRun {
    pub item: ItemId,
    pub targets: AnimationTargets,
    pub duration_ms: u64,
    pub completion: Option<AnimationToken>,
}

/// Animator that queues requests for a host (or test) to play back.
#[derive(Debug, Default)]
pub struct QueuedAnimator {
    runs: Vec<AnimationRun>,
}

impl QueuedAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests not yet taken.
    pub fn runs(&self) -> &[AnimationRun] {
        &self.runs
    }

    /// Take all queued requests.
    pub fn drain(&mut self) -> Vec<AnimationRun> {
        std::mem::take(&mut self.runs)
    }
}

impl Animator for QueuedAnimator {
    fn animate(
        &mut self,
        item: ItemId,
        targets: &AnimationTargets,
        animation: &AnimationConfig,
        completion: Option<AnimationToken>,
    ) {
        self.runs.push(AnimationRun {
            item,
            targets: targets.clone(),
            duration_ms: animation.duration_ms,
            completion,
        });
    }
}

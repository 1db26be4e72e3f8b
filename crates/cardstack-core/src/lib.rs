//! Card stack controller.
//!
//! A stack of items where only a small window is shown at once, each level
//! pushed further back in depth. The top item leaves with an accept or reject
//! action and the items behind it move up one slot. The controller owns the
//! index arithmetic and sequencing; styling, tweening and timers are
//! delegated to the [`Surface`], [`Animator`] and [`Timer`] collaborators,
//! which report back through [`StackController::on_transition_end`],
//! [`StackController::on_animation_complete`] and
//! [`StackController::on_timer`].

pub mod animation;
pub mod controller;
pub mod layout;
pub mod options;
pub mod subscription;
pub mod surface;
pub mod timer;

pub use animation::{
    AnimationRun, AnimationTargets, AnimationToken, Animator, NoopAnimator, QueuedAnimator,
};
pub use controller::{AdvanceOutcome, AdvancePlan, StackController, StackState};
pub use layout::{ItemLayout, SlotMove, DEPTH_STEP};
pub use options::{Callback, PreAnimation, StackOptions};
pub use subscription::OneShot;
pub use surface::{ExitToken, HeadlessSurface, ItemVisual, NoopSurface, Surface};
pub use timer::{NoopTimer, QueuedTimer, TaskId, Timer};

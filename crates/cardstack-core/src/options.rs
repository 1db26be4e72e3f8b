//! Construction options for [`StackController`](crate::StackController).

use std::fmt;
use std::time::Duration;

use cardstack_common::StackAction;
use cardstack_config::{AnimationConfig, PreAnimationConfig, PreAnimationSet, StackConfig};

/// Invoked once when an advance's exit completes.
pub type Callback = Box<dyn FnOnce()>;

/// Invoked when a finite stack runs out.
pub type EndStackHandler = Box<dyn FnMut()>;

/// Optional motion applied before items settle into their new slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PreAnimation {
    #[default]
    None,
    PerAction {
        accept: PreAnimationConfig,
        reject: PreAnimationConfig,
    },
}

impl PreAnimation {
    pub fn for_action(&self, action: StackAction) -> Option<&PreAnimationConfig> {
        match self {
            PreAnimation::None => None,
            PreAnimation::PerAction { accept, reject } => Some(match action {
                StackAction::Accept => accept,
                StackAction::Reject => reject,
            }),
        }
    }
}

impl From<Option<PreAnimationSet>> for PreAnimation {
    fn from(set: Option<PreAnimationSet>) -> Self {
        match set {
            Some(set) => PreAnimation::PerAction {
                accept: set.accept,
                reject: set.reject,
            },
            None => PreAnimation::None,
        }
    }
}

pub struct StackOptions {
    /// Perspective distance in px.
    pub perspective: f64,
    pub perspective_origin: String,
    pub infinite: bool,
    /// Requested window size, normalized against the item count on construction.
    pub visible: i64,
    pub on_end_stack: EndStackHandler,
    pub stack_items_animation: AnimationConfig,
    pub stack_items_animation_delay: Duration,
    pub stack_items_pre_animation: PreAnimation,
    /// Force the exit to complete if its transition-end never arrives.
    pub exit_timeout: Option<Duration>,
}

impl StackOptions {
    pub fn from_config(config: &StackConfig) -> Self {
        Self {
            perspective: config.perspective,
            perspective_origin: config.perspective_origin.clone(),
            infinite: config.infinite,
            visible: config.visible,
            on_end_stack: Box::new(|| {}),
            stack_items_animation: config.animation.clone(),
            stack_items_animation_delay: Duration::from_millis(config.delay_ms),
            stack_items_pre_animation: config.pre_animation.clone().into(),
            exit_timeout: (config.exit_timeout_ms > 0)
                .then(|| Duration::from_millis(config.exit_timeout_ms)),
        }
    }

    pub fn with_on_end_stack(mut self, handler: impl FnMut() + 'static) -> Self {
        self.on_end_stack = Box::new(handler);
        self
    }

    pub fn with_visible(mut self, visible: i64) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_infinite(mut self, infinite: bool) -> Self {
        self.infinite = infinite;
        self
    }

    pub fn with_exit_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.exit_timeout = timeout;
        self
    }
}

impl Default for StackOptions {
    fn default() -> Self {
        Self::from_config(&StackConfig::default())
    }
}

impl fmt::Debug for StackOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackOptions")
            .field("perspective", &self.perspective)
            .field("perspective_origin", &self.perspective_origin)
            .field("infinite", &self.infinite)
            .field("visible", &self.visible)
            .field("stack_items_animation", &self.stack_items_animation)
            .field("stack_items_animation_delay", &self.stack_items_animation_delay)
            .field("stack_items_pre_animation", &self.stack_items_pre_animation)
            .field("exit_timeout", &self.exit_timeout)
            .finish_non_exhaustive()
    }
}

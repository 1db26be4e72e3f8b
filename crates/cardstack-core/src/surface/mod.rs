//! Visual surface collaborator.
//!
//! The surface owns the stacked elements and their styling. The controller
//! only ever restyles items through this trait; it never creates or removes
//! them.

use std::fmt;

use cardstack_common::{ItemId, StackTag};
use serde::{Deserialize, Serialize};

use crate::layout::ItemLayout;

pub mod headless;
pub mod noop;

pub use headless::{HeadlessSurface, ItemVisual};
pub use noop::NoopSurface;

/// Identifies one exit of one item. An item leaves many times over the life
/// of an infinite stack; only the signal for its current exit counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExitToken(pub u64);

impl fmt::Display for ExitToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exit-{}", self.0)
    }
}

pub trait Surface {
    /// The stacked items in display order, as they exist right now.
    fn children(&self) -> Vec<ItemId>;

    fn set_perspective(&mut self, px: f64);
    fn set_perspective_origin(&mut self, origin: &str);

    fn set_opacity(&mut self, item: ItemId, opacity: f64);
    fn set_interactive(&mut self, item: ItemId, interactive: bool);
    fn set_stack_order(&mut self, item: ItemId, order: i32);
    fn set_depth_offset(&mut self, item: ItemId, px: f64);

    fn add_tag(&mut self, item: ItemId, tag: StackTag);
    fn remove_tag(&mut self, item: ItemId, tag: StackTag);

    /// Report the end of `item`'s current visual transition once, through
    /// [`StackController::on_transition_end`](crate::StackController::on_transition_end),
    /// passing `token` back unchanged. Transitions of other items must not be
    /// reported for this request.
    fn watch_transition_end(&mut self, item: ItemId, token: ExitToken);

    fn apply_layout(&mut self, item: ItemId, layout: &ItemLayout) {
        self.set_opacity(item, layout.opacity);
        self.set_interactive(item, layout.interactive);
        self.set_stack_order(item, layout.stack_order);
        self.set_depth_offset(item, layout.depth);
    }
}

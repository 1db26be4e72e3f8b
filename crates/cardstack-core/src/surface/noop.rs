//! No-op Surface implementation.
//!
//! Reports a fixed set of children and ignores every mutation. Useful when
//! only the controller's index bookkeeping matters.

use cardstack_common::{ItemId, StackTag};

use super::{ExitToken, Surface};

#[derive(Debug, Default, Clone)]
pub struct NoopSurface {
    children: Vec<ItemId>,
}

impl NoopSurface {
    /// A surface with items `item-0 .. item-{count-1}`.
    pub fn with_items(count: u32) -> Self {
        Self {
            children: (0..count).map(ItemId).collect(),
        }
    }
}

impl Surface for NoopSurface {
    fn children(&self) -> Vec<ItemId> {
        self.children.clone()
    }

    fn set_perspective(&mut self, _px: f64) {}

    fn set_perspective_origin(&mut self, _origin: &str) {}

    fn set_opacity(&mut self, _item: ItemId, _opacity: f64) {}

    fn set_interactive(&mut self, _item: ItemId, _interactive: bool) {}

    fn set_stack_order(&mut self, _item: ItemId, _order: i32) {}

    fn set_depth_offset(&mut self, _item: ItemId, _px: f64) {}

    fn add_tag(&mut self, _item: ItemId, _tag: StackTag) {}

    fn remove_tag(&mut self, _item: ItemId, _tag: StackTag) {}

    fn watch_transition_end(&mut self, _item: ItemId, _token: ExitToken) {}
}

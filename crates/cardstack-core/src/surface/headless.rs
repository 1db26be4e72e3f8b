//! In-memory surface that keeps the visual state of every item.
//!
//! Used by the simulation host and by tests to observe what the controller
//! did. Transition-end requests are queued in [`HeadlessSurface::take_watched`]
//! for the host to deliver.

use std::collections::BTreeSet;

use cardstack_common::{ItemId, StackTag};
use serde::Serialize;
use tracing::trace;

use super::{ExitToken, Surface};

/// Current styling of one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemVisual {
    pub id: ItemId,
    pub opacity: f64,
    pub interactive: bool,
    pub stack_order: i32,
    pub depth: f64,
    pub tags: BTreeSet<StackTag>,
}

impl ItemVisual {
    fn new(id: ItemId) -> Self {
        Self {
            id,
            opacity: 1.0,
            interactive: true,
            stack_order: 0,
            depth: 0.0,
            tags: BTreeSet::new(),
        }
    }

    pub fn has_tag(&self, tag: StackTag) -> bool {
        self.tags.contains(&tag)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HeadlessSurface {
    perspective: Option<f64>,
    perspective_origin: Option<String>,
    items: Vec<ItemVisual>,
    #[serde(skip)]
    watched: Vec<(ItemId, ExitToken)>,
    #[serde(skip)]
    mutations: usize,
}

impl HeadlessSurface {
    /// A surface with items `item-0 .. item-{count-1}`.
    pub fn with_items(count: u32) -> Self {
        Self {
            perspective: None,
            perspective_origin: None,
            items: (0..count).map(|i| ItemVisual::new(ItemId(i))).collect(),
            watched: Vec::new(),
            mutations: 0,
        }
    }

    pub fn perspective(&self) -> Option<f64> {
        self.perspective
    }

    pub fn perspective_origin(&self) -> Option<&str> {
        self.perspective_origin.as_deref()
    }

    pub fn item(&self, id: ItemId) -> Option<&ItemVisual> {
        self.items.iter().find(|v| v.id == id)
    }

    pub fn items(&self) -> &[ItemVisual] {
        &self.items
    }

    /// Items carrying `tag`, in display order.
    pub fn tagged(&self, tag: StackTag) -> Vec<ItemId> {
        self.items
            .iter()
            .filter(|v| v.has_tag(tag))
            .map(|v| v.id)
            .collect()
    }

    /// Number of style or tag mutations applied so far.
    pub fn mutation_count(&self) -> usize {
        self.mutations
    }

    /// Items whose next transition end must be reported, with the token to
    /// report it under, oldest first.
    pub fn take_watched(&mut self) -> Vec<(ItemId, ExitToken)> {
        std::mem::take(&mut self.watched)
    }

    fn visual_mut(&mut self, item: ItemId) -> Option<&mut ItemVisual> {
        self.mutations += 1;
        let visual = self.items.iter_mut().find(|v| v.id == item);
        if visual.is_none() {
            trace!("headless surface has no {item}");
        }
        visual
    }
}

impl Surface for HeadlessSurface {
    fn children(&self) -> Vec<ItemId> {
        self.items.iter().map(|v| v.id).collect()
    }

    fn set_perspective(&mut self, px: f64) {
        self.mutations += 1;
        self.perspective = Some(px);
    }

    fn set_perspective_origin(&mut self, origin: &str) {
        self.mutations += 1;
        self.perspective_origin = Some(origin.to_string());
    }

    fn set_opacity(&mut self, item: ItemId, opacity: f64) {
        if let Some(v) = self.visual_mut(item) {
            v.opacity = opacity;
        }
    }

    fn set_interactive(&mut self, item: ItemId, interactive: bool) {
        if let Some(v) = self.visual_mut(item) {
            v.interactive = interactive;
        }
    }

    fn set_stack_order(&mut self, item: ItemId, order: i32) {
        if let Some(v) = self.visual_mut(item) {
            v.stack_order = order;
        }
    }

    fn set_depth_offset(&mut self, item: ItemId, px: f64) {
        if let Some(v) = self.visual_mut(item) {
            v.depth = px;
        }
    }

    fn add_tag(&mut self, item: ItemId, tag: StackTag) {
        if let Some(v) = self.visual_mut(item) {
            v.tags.insert(tag);
        }
    }

    fn remove_tag(&mut self, item: ItemId, tag: StackTag) {
        if let Some(v) = self.visual_mut(item) {
            v.tags.remove(&tag);
        }
    }

    fn watch_transition_end(&mut self, item: ItemId, token: ExitToken) {
        self.watched.push((item, token));
    }
}

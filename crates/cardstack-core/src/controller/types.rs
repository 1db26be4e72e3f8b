//! Core types and constructors for StackController.

use std::collections::HashMap;
use std::fmt;

use cardstack_common::{ItemId, StackAction, StackTag};
use serde::Serialize;
use tracing::{debug, warn};

use crate::animation::{AnimationToken, Animator};
use crate::layout::{self, SlotMove};
use crate::options::{Callback, StackOptions};
use crate::subscription::OneShot;
use crate::surface::{ExitToken, Surface};
use crate::timer::{TaskId, Timer};

/// Index and guard state of a stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackState {
    pub total: usize,
    /// Index of the item on top, in `[0, total)`.
    pub current: usize,
    /// Normalized window size, in `[1, total]`.
    pub visible: usize,
    pub infinite: bool,
    pub has_ended: bool,
    pub is_animating: bool,
}

/// What one advance is going to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvancePlan {
    pub action: StackAction,
    pub outgoing: ItemId,
    pub moves: Vec<SlotMove>,
    /// Index of the new top item.
    pub next_current: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Started(AdvancePlan),
    /// Another advance is still in flight; nothing happened.
    Busy,
    /// A finite stack already ran out; nothing happened.
    Ended,
}

impl AdvanceOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, AdvanceOutcome::Started(_))
    }

    pub fn plan(&self) -> Option<&AdvancePlan> {
        match self {
            AdvanceOutcome::Started(plan) => Some(plan),
            _ => None,
        }
    }
}

/// Exit bookkeeping for the item currently leaving.
pub(super) struct PendingExit {
    pub(super) action: StackAction,
    pub(super) callback: Option<Callback>,
    pub(super) watchdog: Option<TaskId>,
}

impl fmt::Debug for PendingExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingExit")
            .field("action", &self.action)
            .field("callback", &self.callback.is_some())
            .field("watchdog", &self.watchdog)
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
pub(super) enum ScheduledTask {
    Slot { action: StackAction, slot: SlotMove },
    ExitWatchdog { item: ItemId, exit: ExitToken },
}

/// Drives one card stack over a [`Surface`], an [`Animator`] and a [`Timer`].
pub struct StackController<S, A, T> {
    pub(super) surface: S,
    pub(super) animator: A,
    pub(super) timer: T,
    pub(super) options: StackOptions,
    /// Items in original order; never reordered.
    pub(super) items: Vec<ItemId>,
    pub(super) state: StackState,
    /// Keyed by item and exit, so a late signal from an earlier exit of the
    /// same item finds nothing.
    pub(super) exits: OneShot<(ItemId, ExitToken), PendingExit>,
    pub(super) tasks: HashMap<TaskId, ScheduledTask>,
    pub(super) pre_animations: HashMap<AnimationToken, SlotMove>,
    pub(super) next_task: u64,
    pub(super) next_token: u64,
    pub(super) next_exit: u64,
}

impl<S: Surface, A: Animator, T: Timer> StackController<S, A, T> {
    /// Build a controller over the surface's current children.
    ///
    /// Returns `None` when there is no surface or it has no children; there
    /// is nothing to drive in either case.
    pub fn create(surface: Option<S>, animator: A, timer: T, options: StackOptions) -> Option<Self> {
        let Some(surface) = surface else {
            debug!("no surface given, stack not created");
            return None;
        };

        let items = surface.children();
        if items.is_empty() {
            warn!("surface has no items, stack not created");
            return None;
        }

        let total = items.len();
        let visible = layout::normalize_visible(options.visible, options.infinite, total);
        if visible as i64 != options.visible {
            debug!(
                "visible window {} normalized to {visible} for {total} items",
                options.visible
            );
        }

        let mut controller = Self {
            surface,
            animator,
            timer,
            state: StackState {
                total,
                current: 0,
                visible,
                infinite: options.infinite,
                has_ended: false,
                is_animating: false,
            },
            options,
            items,
            exits: OneShot::new(),
            tasks: HashMap::new(),
            pre_animations: HashMap::new(),
            next_task: 0,
            next_token: 0,
            next_exit: 0,
        };
        controller.apply_initial_layout();
        debug!("stack created with {total} items, {visible} visible");
        Some(controller)
    }

    /// Perspective, per-item layout by original order, and the current tag.
    pub(super) fn apply_initial_layout(&mut self) {
        self.surface.set_perspective(self.options.perspective);
        self.surface
            .set_perspective_origin(&self.options.perspective_origin);

        let layouts = layout::initial_layout(self.state.total, self.state.visible);
        for (item, item_layout) in self.items.iter().zip(&layouts) {
            self.surface.apply_layout(*item, item_layout);
        }

        self.surface
            .add_tag(self.items[self.state.current], StackTag::Current);
    }

    pub(super) fn alloc_task(&mut self) -> TaskId {
        self.next_task += 1;
        TaskId(self.next_task)
    }

    pub(super) fn alloc_exit(&mut self) -> ExitToken {
        self.next_exit += 1;
        ExitToken(self.next_exit)
    }

    pub(super) fn alloc_token(&mut self) -> AnimationToken {
        self.next_token += 1;
        AnimationToken(self.next_token)
    }

    // -- Accessors --

    pub fn state(&self) -> &StackState {
        &self.state
    }

    pub fn current(&self) -> usize {
        self.state.current
    }

    pub fn current_item(&self) -> ItemId {
        self.items[self.state.current]
    }

    pub fn visible(&self) -> usize {
        self.state.visible
    }

    pub fn total(&self) -> usize {
        self.state.total
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn has_ended(&self) -> bool {
        self.state.has_ended
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating
    }

    pub fn is_infinite(&self) -> bool {
        self.state.infinite
    }

    pub fn options(&self) -> &StackOptions {
        &self.options
    }

    /// Deferred tasks and animations the controller is still waiting on.
    pub fn pending_work(&self) -> usize {
        self.tasks.len() + self.pre_animations.len() + self.exits.len()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}

impl<S, A, T> fmt::Debug for StackController<S, A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackController")
            .field("items", &self.items)
            .field("state", &self.state)
            .field("pending_exits", &self.exits.len())
            .field("pending_tasks", &self.tasks.len())
            .finish_non_exhaustive()
    }
}

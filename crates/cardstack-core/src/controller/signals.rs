//! Signal entry points: transition ends, due timers, finished animations.

use cardstack_common::{ItemId, StackAction};
use tracing::{info, trace, warn};

use super::types::{PendingExit, ScheduledTask, StackController};
use crate::animation::{AnimationTargets, AnimationToken, Animator};
use crate::layout::{self, SlotMove};
use crate::surface::{ExitToken, Surface};
use crate::timer::{TaskId, Timer};

impl<S: Surface, A: Animator, T: Timer> StackController<S, A, T> {
    /// The surface finished `item`'s visual transition for exit `token`.
    /// Only the first report for the exit currently in progress does
    /// anything; reports for an earlier exit of the same item are dropped.
    pub fn on_transition_end(&mut self, item: ItemId, token: ExitToken) -> bool {
        let Some(exit) = self.exits.fire(&(item, token)) else {
            trace!("transition end for {item} ({token}) ignored, no such exit pending");
            return false;
        };
        if let Some(task) = exit.watchdog {
            self.tasks.remove(&task);
            self.timer.cancel(task);
        }
        self.finish_exit(item, exit);
        true
    }

    /// A task scheduled on the [`Timer`] is due. Unknown or already-run
    /// tasks are ignored.
    pub fn on_timer(&mut self, task: TaskId) -> bool {
        match self.tasks.remove(&task) {
            Some(ScheduledTask::Slot { action, slot }) => {
                self.run_slot(action, slot);
                true
            }
            Some(ScheduledTask::ExitWatchdog { item, exit }) => {
                match self.exits.fire(&(item, exit)) {
                    Some(pending) => {
                        warn!("no transition end for {item} before the exit timeout, forcing exit");
                        self.finish_exit(item, pending);
                        true
                    }
                    None => false,
                }
            }
            None => {
                trace!("{task} ignored, not pending");
                false
            }
        }
    }

    /// An animation started with `token` finished.
    pub fn on_animation_complete(&mut self, token: AnimationToken) -> bool {
        match self.pre_animations.remove(&token) {
            Some(slot) => {
                self.settle(slot);
                true
            }
            None => {
                trace!("{token} ignored, not pending");
                false
            }
        }
    }

    fn finish_exit(&mut self, item: ItemId, exit: PendingExit) {
        let visible = self.state.visible as i32;

        self.surface.set_opacity(item, 0.0);
        self.surface.set_interactive(item, false);
        self.surface.set_stack_order(item, -1);
        self.surface
            .set_depth_offset(item, layout::depth_offset(self.state.visible));
        self.surface.remove_tag(item, exit.action.tag());
        // Ready to come back in as the rearmost item.
        self.surface.set_stack_order(item, visible + 1);

        self.state.is_animating = false;

        if let Some(callback) = exit.callback {
            callback();
        }

        if !self.state.infinite && self.state.current == 0 {
            self.state.has_ended = true;
            info!("end of stack reached after {} items", self.state.total);
            (self.options.on_end_stack)();
        }
    }

    fn run_slot(&mut self, action: StackAction, slot: SlotMove) {
        let item = self.items[slot.position];
        let pre = self
            .options
            .stack_items_pre_animation
            .for_action(action)
            .map(|pre| {
                (
                    layout::pre_animation_targets(pre, slot.slot, self.state.visible),
                    pre.animation.clone(),
                )
            });

        match pre {
            Some((targets, animation)) => {
                let token = self.alloc_token();
                self.pre_animations.insert(token, slot);
                trace!("pre-animating {item} towards slot {}", slot.slot);
                self.animator
                    .animate(item, &targets, &animation, Some(token));
            }
            None => self.settle(slot),
        }
    }

    /// Final move of an item into its slot.
    fn settle(&mut self, slot: SlotMove) {
        let item = self.items[slot.position];
        let order = self.state.visible as i32 - slot.slot as i32;

        self.surface.set_interactive(item, true);
        self.surface.set_opacity(item, 1.0);
        self.surface.set_stack_order(item, order);
        self.animator.animate(
            item,
            &AnimationTargets::depth(layout::depth_offset(slot.slot)),
            &self.options.stack_items_animation,
            None,
        );
    }
}

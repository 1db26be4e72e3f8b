//! Advancing the stack: accept, reject, restart.

use cardstack_common::{StackAction, StackTag};
use tracing::{debug, trace};

use super::types::{AdvanceOutcome, AdvancePlan, PendingExit, ScheduledTask, StackController};
use crate::animation::Animator;
use crate::layout;
use crate::options::Callback;
use crate::surface::Surface;
use crate::timer::Timer;

impl<S: Surface, A: Animator, T: Timer> StackController<S, A, T> {
    /// Send the top item away as accepted. `callback` runs once its exit completes.
    pub fn accept(&mut self, callback: Option<Callback>) -> AdvanceOutcome {
        self.next(StackAction::Accept, callback)
    }

    /// Send the top item away as rejected. `callback` runs once its exit completes.
    pub fn reject(&mut self, callback: Option<Callback>) -> AdvanceOutcome {
        self.next(StackAction::Reject, callback)
    }

    /// Clear the end-of-stack flag and re-apply the initial layout at the
    /// current index. The index itself is kept.
    ///
    /// Ignored while an advance is in flight: until its exit has completed
    /// and every slot task and pre-animation has settled, the pending moves
    /// would overwrite the fresh layout. Returns whether the restart ran.
    pub fn restart(&mut self) -> bool {
        if self.state.is_animating {
            debug!("restart ignored while an advance is in flight");
            return false;
        }
        if !self.tasks.is_empty() || !self.pre_animations.is_empty() {
            debug!(
                "restart ignored, {} slot tasks and {} pre-animations pending",
                self.tasks.len(),
                self.pre_animations.len()
            );
            return false;
        }
        self.state.has_ended = false;
        self.apply_initial_layout();
        debug!("stack restarted at index {}", self.state.current);
        true
    }

    fn next(&mut self, action: StackAction, callback: Option<Callback>) -> AdvanceOutcome {
        if self.state.is_animating {
            trace!("{action} ignored, advance in flight");
            return AdvanceOutcome::Busy;
        }
        if !self.state.infinite && self.state.has_ended {
            trace!("{action} ignored, stack has ended");
            return AdvanceOutcome::Ended;
        }

        self.state.is_animating = true;

        let outgoing = self.items[self.state.current];
        self.surface.remove_tag(outgoing, StackTag::Current);
        self.surface.add_tag(outgoing, action.tag());

        let exit = self.alloc_exit();
        let watchdog = match self.options.exit_timeout {
            Some(timeout) => {
                let task = self.alloc_task();
                self.tasks.insert(
                    task,
                    ScheduledTask::ExitWatchdog {
                        item: outgoing,
                        exit,
                    },
                );
                self.timer.schedule(timeout, task);
                Some(task)
            }
            None => None,
        };
        self.exits.register(
            (outgoing, exit),
            PendingExit {
                action,
                callback,
                watchdog,
            },
        );
        self.surface.watch_transition_end(outgoing, exit);

        let moves = layout::plan_slots(
            self.state.current,
            self.state.total,
            self.state.visible,
            self.state.infinite,
        );
        let delay = self.options.stack_items_animation_delay;
        for slot in &moves {
            let task = self.alloc_task();
            self.tasks.insert(
                task,
                ScheduledTask::Slot {
                    action,
                    slot: *slot,
                },
            );
            self.timer.schedule(delay, task);
        }

        self.state.current = (self.state.current + 1) % self.state.total;
        self.surface
            .add_tag(self.items[self.state.current], StackTag::Current);

        debug!(
            "{action} {outgoing}: {} items move up, current is now {}",
            moves.len(),
            self.state.current
        );

        AdvanceOutcome::Started(AdvancePlan {
            action,
            outgoing,
            moves,
            next_current: self.state.current,
        })
    }
}

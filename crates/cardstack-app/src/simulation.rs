//! Virtual-clock host for a [`StackController`].
//!
//! Plays the part of the display layer: scheduled timers, animations and
//! exit transitions are queued by due time and fed back to the controller
//! in order, without any real waiting.

use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::fmt;
use std::rc::Rc;

use cardstack_common::{CardStackError, ItemId, Result};
use cardstack_config::StackConfig;
use cardstack_core::{
    AdvanceOutcome, AnimationToken, ExitToken, HeadlessSurface, QueuedAnimator, QueuedTimer,
    StackController, StackOptions, StackState, Surface, TaskId,
};
use serde::Serialize;
use tracing::{debug, info};

type Controller = StackController<HeadlessSurface, QueuedAnimator, QueuedTimer>;

/// One scripted user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Accept,
    Reject,
    Restart,
}

impl Step {
    /// Parse a script such as `"aars"`. Whitespace is ignored.
    pub fn parse_script(script: &str) -> Result<Vec<Step>> {
        script
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c.to_ascii_lowercase() {
                'a' => Ok(Step::Accept),
                'r' => Ok(Step::Reject),
                's' => Ok(Step::Restart),
                other => Err(CardStackError::Simulation(format!(
                    "unknown script step '{other}' (expected a, r or s)"
                ))),
            })
            .collect()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Accept => write!(f, "accept"),
            Step::Reject => write!(f, "reject"),
            Step::Restart => write!(f, "restart"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Event {
    Timer(TaskId),
    Animation {
        item: ItemId,
        depth: Option<f64>,
        completion: Option<AnimationToken>,
    },
    TransitionEnd(ItemId, ExitToken),
}

#[derive(Debug)]
struct Pending {
    due: u64,
    seq: u64,
    event: Event,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    // Reversed so the max-heap pops the earliest event first.
    fn cmp(&self, other: &Self) -> Ordering {
        (other.due, other.seq).cmp(&(self.due, self.seq))
    }
}

/// What one step did.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: String,
    pub outcome: String,
    pub current: usize,
    pub has_ended: bool,
    /// Virtual time at which the stack came to rest, in ms.
    pub at_ms: u64,
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:>6} ms] {:<7} {} (current {}{})",
            self.at_ms,
            self.step,
            self.outcome,
            self.current,
            if self.has_ended { ", ended" } else { "" }
        )
    }
}

/// Final state for `--json`.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub elapsed_ms: u64,
    pub end_of_stack_count: u32,
    pub state: &'a StackState,
    pub surface: &'a HeadlessSurface,
}

pub struct Simulation {
    controller: Controller,
    queue: BinaryHeap<Pending>,
    cancelled: HashSet<TaskId>,
    now_ms: u64,
    seq: u64,
    exit_ms: u64,
    drop_signals: bool,
    ends: Rc<Cell<u32>>,
}

impl Simulation {
    pub fn new(config: &StackConfig, items: u32, exit_ms: u64, drop_signals: bool) -> Result<Self> {
        let ends = Rc::new(Cell::new(0u32));
        let counter = ends.clone();
        let options = StackOptions::from_config(config).with_on_end_stack(move || {
            counter.set(counter.get() + 1);
            info!("end of stack");
        });

        let controller = StackController::create(
            Some(HeadlessSurface::with_items(items)),
            QueuedAnimator::new(),
            QueuedTimer::new(),
            options,
        )
        .ok_or_else(|| CardStackError::Simulation("the stack needs at least one item".into()))?;

        debug!(
            "simulation ready: {} items, {} visible",
            controller.total(),
            controller.visible()
        );

        Ok(Self {
            controller,
            queue: BinaryHeap::new(),
            cancelled: HashSet::new(),
            now_ms: 0,
            seq: 0,
            exit_ms,
            drop_signals,
            ends,
        })
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// How many times the end-of-stack handler ran.
    pub fn end_of_stack_count(&self) -> u32 {
        self.ends.get()
    }

    /// Run one step and let the stack come to rest.
    pub fn run_step(&mut self, step: Step) -> StepReport {
        let outcome = match step {
            Step::Accept => describe(self.controller.accept(None)),
            Step::Reject => describe(self.controller.reject(None)),
            Step::Restart => {
                if self.controller.restart() {
                    "restarted".to_string()
                } else {
                    "ignored, stack still moving".to_string()
                }
            }
        };
        self.run_until_idle();

        StepReport {
            step: step.to_string(),
            outcome,
            current: self.controller.current(),
            has_ended: self.controller.has_ended(),
            at_ms: self.now_ms,
        }
    }

    pub fn run_script(&mut self, steps: &[Step]) -> Vec<StepReport> {
        steps.iter().map(|step| self.run_step(*step)).collect()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            elapsed_ms: self.now_ms,
            end_of_stack_count: self.ends.get(),
            state: self.controller.state(),
            surface: self.controller.surface(),
        }
    }

    /// Deliver queued events in due order until nothing is left.
    fn run_until_idle(&mut self) {
        self.collect();
        while let Some(pending) = self.queue.pop() {
            if let Event::Timer(task) = pending.event {
                if self.cancelled.remove(&task) {
                    continue;
                }
            }
            self.now_ms = self.now_ms.max(pending.due);
            self.dispatch(pending.event);
            self.collect();
        }
    }

    fn dispatch(&mut self, event: Event) {
        match event {
            Event::Timer(task) => {
                self.controller.on_timer(task);
            }
            Event::Animation {
                item,
                depth,
                completion,
            } => {
                if let Some(px) = depth {
                    self.controller.surface_mut().set_depth_offset(item, px);
                }
                if let Some(token) = completion {
                    self.controller.on_animation_complete(token);
                }
            }
            Event::TransitionEnd(item, exit) => {
                self.controller.on_transition_end(item, exit);
            }
        }
    }

    /// Move everything the collaborators recorded onto the event queue.
    fn collect(&mut self) {
        let now = self.now_ms;

        self.cancelled
            .extend(self.controller.timer_mut().drain_cancelled());
        for (task, delay) in self.controller.timer_mut().drain() {
            let due = now.saturating_add(u64::try_from(delay.as_millis()).unwrap_or(u64::MAX));
            self.push(due, Event::Timer(task));
        }

        for run in self.controller.animator_mut().drain() {
            self.push(
                now.saturating_add(run.duration_ms),
                Event::Animation {
                    item: run.item,
                    depth: run.targets.depth_offset(),
                    completion: run.completion,
                },
            );
        }

        for (item, exit) in self.controller.surface_mut().take_watched() {
            if self.drop_signals {
                debug!("dropping transition end for {item}");
                continue;
            }
            self.push(
                now.saturating_add(self.exit_ms),
                Event::TransitionEnd(item, exit),
            );
        }
    }

    fn push(&mut self, due: u64, event: Event) {
        self.seq += 1;
        self.queue.push(Pending {
            due,
            seq: self.seq,
            event,
        });
    }
}

fn describe(outcome: AdvanceOutcome) -> String {
    match outcome {
        AdvanceOutcome::Started(plan) => format!(
            "{} {}, {} items move up",
            plan.action,
            plan.outgoing,
            plan.moves.len()
        ),
        AdvanceOutcome::Busy => "ignored, advance in flight".to_string(),
        AdvanceOutcome::Ended => "ignored, stack has ended".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(infinite: bool, visible: i64) -> StackConfig {
        StackConfig {
            infinite,
            visible,
            ..StackConfig::default()
        }
    }

    #[test]
    fn parse_script_accepts_known_steps() {
        let steps = Step::parse_script("aR s").unwrap();
        assert_eq!(steps, vec![Step::Accept, Step::Reject, Step::Restart]);
    }

    #[test]
    fn parse_script_rejects_unknown_steps() {
        let err = Step::parse_script("ax").unwrap_err();
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn empty_stack_is_an_error() {
        assert!(Simulation::new(&config(true, 3), 0, 400, false).is_err());
    }

    #[test]
    fn infinite_stack_cycles_back_to_start() {
        let mut sim = Simulation::new(&config(true, 3), 5, 400, false).unwrap();
        let steps = Step::parse_script("aaaaa").unwrap();
        let reports = sim.run_script(&steps);

        assert_eq!(reports.len(), 5);
        assert!(reports.iter().all(|r| r.outcome.contains("items move up")));
        assert_eq!(sim.controller().current(), 0);
        assert!(!sim.controller().is_animating());
        assert!(sim.now_ms() >= 5 * 400);
        assert_eq!(sim.end_of_stack_count(), 0);
    }

    #[test]
    fn settle_animations_land_on_surface() {
        let mut sim = Simulation::new(&config(true, 3), 5, 400, false).unwrap();
        sim.run_step(Step::Accept);
        let surface = sim.controller().surface();
        assert_eq!(surface.item(ItemId(1)).unwrap().depth, 0.0);
        assert_eq!(surface.item(ItemId(2)).unwrap().depth, -50.0);
        assert_eq!(surface.item(ItemId(3)).unwrap().depth, -100.0);
    }

    #[test]
    fn finite_stack_ends_and_restarts() {
        let mut sim = Simulation::new(&config(false, 1), 3, 100, false).unwrap();
        let steps = Step::parse_script("aaaas").unwrap();
        let reports = sim.run_script(&steps);

        assert!(reports[2].has_ended);
        assert_eq!(reports[3].outcome, "ignored, stack has ended");
        assert_eq!(reports[4].outcome, "restarted");
        assert!(!reports[4].has_ended);
        assert_eq!(sim.end_of_stack_count(), 1);
    }

    #[test]
    fn dropped_signals_fall_back_to_exit_timeout() {
        let stack = StackConfig {
            exit_timeout_ms: 1500,
            ..config(true, 2)
        };
        let mut sim = Simulation::new(&stack, 4, 400, true).unwrap();
        let report = sim.run_step(Step::Accept);

        assert_eq!(report.at_ms, 1500);
        assert!(!sim.controller().is_animating());
        assert_eq!(sim.run_step(Step::Reject).at_ms, 3000);
    }

    #[test]
    fn signals_arriving_after_the_exit_timeout_are_dropped() {
        let stack = StackConfig {
            exit_timeout_ms: 1000,
            ..config(true, 1)
        };
        let mut sim = Simulation::new(&stack, 2, 2500, false).unwrap();
        let steps = Step::parse_script("aaa").unwrap();
        let reports = sim.run_script(&steps);

        assert!(reports.iter().all(|r| r.outcome.contains("items move up")));
        assert_eq!(sim.controller().current(), 1);
        assert!(!sim.controller().is_animating());
        assert_eq!(sim.controller().pending_work(), 0);
    }

    #[test]
    fn cancelled_watchdog_does_not_advance_clock() {
        let mut sim = Simulation::new(&config(true, 2), 4, 400, false).unwrap();
        let report = sim.run_step(Step::Accept);
        // Settle animations (500 ms) outlast the exit; the 2000 ms watchdog never fires.
        assert_eq!(report.at_ms, 500);
    }

    #[test]
    fn snapshot_serializes() {
        let mut sim = Simulation::new(&config(true, 3), 4, 400, false).unwrap();
        sim.run_step(Step::Reject);
        let json = serde_json::to_string(&sim.snapshot()).unwrap();
        assert!(json.contains("\"current\":1"));
        assert!(json.contains("\"items\""));
        assert!(json.contains("\"elapsed_ms\":500"));
    }
}

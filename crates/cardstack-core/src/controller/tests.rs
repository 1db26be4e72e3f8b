//! Tests for advance sequencing, end-of-stack detection and restart.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use cardstack_common::{ItemId, StackAction, StackTag};
use cardstack_config::PreAnimationSet;

use super::*;
use crate::animation::{NoopAnimator, QueuedAnimator};
use crate::options::{PreAnimation, StackOptions};
use crate::surface::{ExitToken, HeadlessSurface, ItemVisual, NoopSurface};
use crate::timer::{NoopTimer, QueuedTimer};

type TestController = StackController<HeadlessSurface, QueuedAnimator, QueuedTimer>;

fn options(visible: i64, infinite: bool) -> StackOptions {
    StackOptions::default()
        .with_visible(visible)
        .with_infinite(infinite)
        .with_exit_timeout(None)
}

fn build_with(total: u32, options: StackOptions) -> TestController {
    StackController::create(
        Some(HeadlessSurface::with_items(total)),
        QueuedAnimator::new(),
        QueuedTimer::new(),
        options,
    )
    .unwrap()
}

fn build(total: u32, visible: i64, infinite: bool) -> TestController {
    build_with(total, options(visible, infinite))
}

/// Deliver every task currently scheduled on the timer.
fn fire_timers(ctrl: &mut TestController) {
    for (task, _) in ctrl.timer_mut().drain() {
        ctrl.on_timer(task);
    }
}

/// Report transition end for every item the surface was asked to watch.
fn finish_exits(ctrl: &mut TestController) {
    for (item, exit) in ctrl.surface_mut().take_watched() {
        ctrl.on_transition_end(item, exit);
    }
}

/// Complete every queued animation that carries a token.
fn complete_animations(ctrl: &mut TestController) {
    for run in ctrl.animator_mut().drain() {
        if let Some(token) = run.completion {
            ctrl.on_animation_complete(token);
        }
    }
}

/// Run one advance to quiescence.
fn advance(ctrl: &mut TestController, action: StackAction) -> AdvanceOutcome {
    let outcome = match action {
        StackAction::Accept => ctrl.accept(None),
        StackAction::Reject => ctrl.reject(None),
    };
    fire_timers(ctrl);
    complete_animations(ctrl);
    ctrl.animator_mut().drain();
    finish_exits(ctrl);
    outcome
}

fn positions(plan: &AdvancePlan) -> Vec<usize> {
    plan.moves.iter().map(|m| m.position).collect()
}

fn resting_layout(surface: &HeadlessSurface) -> Vec<(f64, bool, i32, f64)> {
    surface
        .items()
        .iter()
        .map(|v: &ItemVisual| (v.opacity, v.interactive, v.stack_order, v.depth))
        .collect()
}

// -- Construction --

#[test]
fn create_without_surface_yields_none() {
    let ctrl = StackController::<HeadlessSurface, NoopAnimator, NoopTimer>::create(
        None,
        NoopAnimator,
        NoopTimer,
        StackOptions::default(),
    );
    assert!(ctrl.is_none());
}

#[test]
fn create_with_empty_surface_yields_none() {
    let ctrl = StackController::create(
        Some(NoopSurface::default()),
        NoopAnimator,
        NoopTimer,
        StackOptions::default(),
    );
    assert!(ctrl.is_none());
}

#[test]
fn create_over_noop_collaborators() {
    let ctrl = StackController::create(
        Some(NoopSurface::with_items(4)),
        NoopAnimator,
        NoopTimer,
        StackOptions::default(),
    )
    .unwrap();
    assert_eq!(ctrl.total(), 4);
    assert_eq!(ctrl.visible(), 3);
    assert_eq!(ctrl.current(), 0);
    assert!(ctrl.is_infinite());
}

#[test]
fn create_sets_perspective_and_initial_layout() {
    let ctrl = build(5, 3, false);
    let surface = ctrl.surface();
    assert_eq!(surface.perspective(), Some(1000.0));
    assert_eq!(surface.perspective_origin(), Some("50% -50%"));

    let front = surface.item(ItemId(0)).unwrap();
    assert_eq!(front.stack_order, 4);
    assert_eq!(front.depth, 0.0);
    assert!(front.has_tag(StackTag::Current));

    assert_eq!(surface.item(ItemId(1)).unwrap().stack_order, 2);
    assert_eq!(surface.item(ItemId(2)).unwrap().depth, -100.0);

    let parked = surface.item(ItemId(4)).unwrap();
    assert_eq!(parked.depth, -150.0);
    assert_eq!(parked.opacity, 0.0);
    assert!(!parked.interactive);

    assert_eq!(surface.tagged(StackTag::Current), vec![ItemId(0)]);
}

#[test]
fn zero_visible_is_normalized_to_one() {
    assert_eq!(build(5, 0, true).visible(), 1);
    assert_eq!(build(2, 0, false).visible(), 1);
    assert_eq!(build(1, 0, true).visible(), 1);
}

#[test]
fn oversized_visible_is_normalized_to_one() {
    assert_eq!(build(4, 4, true).visible(), 1);
    assert_eq!(build(4, 4, false).visible(), 4);
    assert_eq!(build(4, 9, false).visible(), 1);
}

// -- Advance scenarios --

#[test]
fn finite_accept_from_start_moves_next_three_items() {
    let mut ctrl = build(5, 3, false);
    let outcome = ctrl.accept(None);
    let plan = outcome.plan().unwrap();

    assert_eq!(plan.action, StackAction::Accept);
    assert_eq!(plan.outgoing, ItemId(0));
    assert_eq!(positions(plan), vec![1, 2, 3]);
    assert_eq!(plan.next_current, 1);
    assert_eq!(ctrl.current(), 1);
    assert!(ctrl.is_animating());

    let outgoing = ctrl.surface().item(ItemId(0)).unwrap();
    assert!(outgoing.has_tag(StackTag::Accept));
    assert!(!outgoing.has_tag(StackTag::Current));
    assert_eq!(ctrl.surface().tagged(StackTag::Current), vec![ItemId(1)]);
}

#[test]
fn slot_tasks_settle_items_one_level_forward() {
    let mut ctrl = build(5, 3, false);
    ctrl.accept(None);
    assert!(ctrl.animator_mut().runs().is_empty());

    fire_timers(&mut ctrl);

    let runs = ctrl.animator_mut().drain();
    assert_eq!(runs.len(), 3);
    let settled: Vec<(ItemId, Option<f64>)> = runs
        .iter()
        .map(|r| (r.item, r.targets.depth_offset()))
        .collect();
    assert_eq!(
        settled,
        vec![
            (ItemId(1), Some(0.0)),
            (ItemId(2), Some(-50.0)),
            (ItemId(3), Some(-100.0)),
        ]
    );
    assert!(runs.iter().all(|r| r.completion.is_none() && r.duration_ms == 500));

    let surface = ctrl.surface();
    assert_eq!(surface.item(ItemId(1)).unwrap().stack_order, 3);
    assert_eq!(surface.item(ItemId(2)).unwrap().stack_order, 2);
    let entering = surface.item(ItemId(3)).unwrap();
    assert_eq!(entering.stack_order, 1);
    assert_eq!(entering.opacity, 1.0);
    assert!(entering.interactive);
}

#[test]
fn infinite_reject_from_last_index_wraps() {
    let mut ctrl = build(4, 3, true);
    for _ in 0..3 {
        assert!(advance(&mut ctrl, StackAction::Accept).is_started());
    }
    assert_eq!(ctrl.current(), 3);

    let outcome = ctrl.reject(None);
    let plan = outcome.plan().unwrap();
    assert_eq!(plan.outgoing, ItemId(3));
    assert_eq!(positions(plan), vec![0, 1, 2]);
    assert_eq!(plan.next_current, 0);
    assert_eq!(ctrl.current(), 0);
    assert!(ctrl.surface().item(ItemId(3)).unwrap().has_tag(StackTag::Reject));
}

#[test]
fn finite_stack_fills_fewer_slots_near_the_end() {
    let mut ctrl = build(5, 3, false);
    for _ in 0..3 {
        advance(&mut ctrl, StackAction::Accept);
    }
    assert_eq!(ctrl.current(), 3);
    let outcome = ctrl.accept(None);
    assert_eq!(positions(outcome.plan().unwrap()), vec![4]);
}

#[test]
fn slot_tasks_share_one_delay() {
    let opts = options(3, true);
    let opts = StackOptions {
        stack_items_animation_delay: Duration::from_millis(120),
        ..opts
    };
    let mut ctrl = build_with(6, opts);
    ctrl.accept(None);
    let scheduled = ctrl.timer_mut().drain();
    assert_eq!(scheduled.len(), 3);
    assert!(scheduled
        .iter()
        .all(|(_, delay)| *delay == Duration::from_millis(120)));
}

// -- Guard --

#[test]
fn advance_while_animating_changes_nothing() {
    let mut ctrl = build(5, 3, true);
    ctrl.accept(None);

    let state = ctrl.state().clone();
    let mutations = ctrl.surface().mutation_count();
    let scheduled = ctrl.timer_mut().scheduled().len();

    assert_eq!(ctrl.reject(None), AdvanceOutcome::Busy);
    assert_eq!(ctrl.accept(None), AdvanceOutcome::Busy);

    assert_eq!(ctrl.state(), &state);
    assert_eq!(ctrl.surface().mutation_count(), mutations);
    assert_eq!(ctrl.timer_mut().scheduled().len(), scheduled);
    assert!(ctrl.animator_mut().runs().is_empty());
}

#[test]
fn guard_releases_only_on_the_outgoing_items_exit() {
    let mut ctrl = build(5, 3, true);
    ctrl.accept(None);
    fire_timers(&mut ctrl);
    let (outgoing, exit) = ctrl.surface_mut().take_watched()[0];
    assert_eq!(outgoing, ItemId(0));

    // Slot animations finishing do not end the advance.
    assert!(!ctrl.on_transition_end(ItemId(1), exit));
    assert!(ctrl.is_animating());

    assert!(ctrl.on_transition_end(ItemId(0), exit));
    assert!(!ctrl.is_animating());
    assert!(ctrl.accept(None).is_started());
}

// -- Exit completion --

#[test]
fn exit_parks_item_behind_window() {
    let mut ctrl = build(5, 3, true);
    ctrl.accept(None);
    finish_exits(&mut ctrl);

    let exited = ctrl.surface().item(ItemId(0)).unwrap();
    assert_eq!(exited.opacity, 0.0);
    assert!(!exited.interactive);
    assert_eq!(exited.stack_order, 4);
    assert_eq!(exited.depth, -150.0);
    assert!(exited.tags.is_empty());
}

#[test]
fn exit_runs_callback_once() {
    let calls = Rc::new(Cell::new(0u32));
    let mut ctrl = build(3, 1, true);
    let counter = calls.clone();
    ctrl.reject(Some(Box::new(move || counter.set(counter.get() + 1))));
    assert_eq!(calls.get(), 0);

    let (item, exit) = ctrl.surface_mut().take_watched()[0];
    assert!(ctrl.on_transition_end(item, exit));
    assert!(!ctrl.on_transition_end(item, exit));
    assert_eq!(calls.get(), 1);
}

#[test]
fn exactly_one_current_item_at_rest() {
    let mut ctrl = build(5, 2, true);
    for step in 0..12 {
        let action = if step % 3 == 0 {
            StackAction::Reject
        } else {
            StackAction::Accept
        };
        advance(&mut ctrl, action);
        assert_eq!(
            ctrl.surface().tagged(StackTag::Current),
            vec![ctrl.current_item()]
        );
        assert_eq!(ctrl.pending_work(), 0);
    }
}

// -- Cycling and end of stack --

#[test]
fn infinite_stack_returns_to_start_after_full_cycle() {
    for total in 1..=7u32 {
        for visible in [0i64, 1, 2, 3, 9] {
            let mut ctrl = build(total, visible, true);
            for _ in 0..total {
                assert!(advance(&mut ctrl, StackAction::Accept).is_started());
                assert!(ctrl.current() < ctrl.total());
                assert!(!ctrl.has_ended());
            }
            assert_eq!(ctrl.current(), 0, "total={total} visible={visible}");
        }
    }
}

#[test]
fn finite_stack_ends_exactly_once() {
    let ended = Rc::new(Cell::new(0u32));
    let counter = ended.clone();
    let opts = options(2, false).with_on_end_stack(move || counter.set(counter.get() + 1));
    let mut ctrl = build_with(4, opts);

    for _ in 0..3 {
        advance(&mut ctrl, StackAction::Accept);
        assert!(!ctrl.has_ended());
        assert_eq!(ended.get(), 0);
    }

    ctrl.accept(None);
    assert_eq!(ctrl.current(), 0);
    assert!(!ctrl.has_ended(), "end is reported on exit completion");
    finish_exits(&mut ctrl);
    assert!(ctrl.has_ended());
    assert_eq!(ended.get(), 1);

    assert_eq!(ctrl.accept(None), AdvanceOutcome::Ended);
    assert_eq!(ctrl.reject(None), AdvanceOutcome::Ended);
    assert_eq!(ended.get(), 1);
}

#[test]
fn single_item_finite_stack_ends_on_first_advance() {
    let mut ctrl = build(1, 3, false);
    let outcome = advance(&mut ctrl, StackAction::Accept);
    assert!(outcome.plan().unwrap().moves.is_empty());
    assert!(ctrl.has_ended());
}

// -- Restart --

#[test]
fn restart_clears_end_and_relays_out() {
    let mut ctrl = build(3, 2, false);
    for _ in 0..3 {
        advance(&mut ctrl, StackAction::Reject);
    }
    assert!(ctrl.has_ended());

    assert!(ctrl.restart());
    assert!(!ctrl.has_ended());
    assert!(ctrl.accept(None).is_started());
}

#[test]
fn restart_keeps_current_index() {
    let mut ctrl = build(5, 3, true);
    advance(&mut ctrl, StackAction::Accept);
    advance(&mut ctrl, StackAction::Accept);
    assert!(ctrl.restart());

    let fresh = build(5, 3, true);
    assert_eq!(ctrl.current(), 2);
    assert_eq!(
        resting_layout(ctrl.surface()),
        resting_layout(fresh.surface())
    );
    assert_eq!(ctrl.surface().tagged(StackTag::Current), vec![ItemId(2)]);
}

#[test]
fn restart_waits_for_slot_tasks_outlasting_the_exit() {
    let opts = StackOptions {
        stack_items_animation_delay: Duration::from_millis(800),
        ..options(3, true)
    };
    let mut ctrl = build_with(5, opts);
    ctrl.accept(None);
    finish_exits(&mut ctrl);
    assert!(!ctrl.is_animating());

    let mutations = ctrl.surface().mutation_count();
    assert!(!ctrl.restart());
    assert_eq!(ctrl.surface().mutation_count(), mutations);

    fire_timers(&mut ctrl);
    ctrl.animator_mut().drain();
    assert!(ctrl.restart());

    let fresh = build(5, 3, true);
    assert_eq!(
        resting_layout(ctrl.surface()),
        resting_layout(fresh.surface())
    );
}

#[test]
fn restart_waits_for_pending_pre_animations() {
    let mut ctrl = build_with(6, elastic_options());
    ctrl.accept(None);
    finish_exits(&mut ctrl);
    fire_timers(&mut ctrl);
    assert!(!ctrl.restart());

    complete_animations(&mut ctrl);
    assert!(ctrl.restart());
}

#[test]
fn restart_is_ignored_mid_advance() {
    let mut ctrl = build(5, 3, true);
    ctrl.accept(None);
    let mutations = ctrl.surface().mutation_count();
    assert!(!ctrl.restart());
    assert_eq!(ctrl.surface().mutation_count(), mutations);
    assert!(ctrl.is_animating());
}

// -- Pre-animation --

fn elastic_options() -> StackOptions {
    let mut set = PreAnimationSet::default();
    set.accept.elastic = true;
    set.accept.properties.insert("translateX".into(), 100.0);
    set.accept.animation.duration_ms = 300;
    set.reject.properties.insert("translateX".into(), -40.0);
    StackOptions {
        stack_items_pre_animation: PreAnimation::from(Some(set)),
        ..options(4, true)
    }
}

#[test]
fn elastic_pre_animation_runs_before_settle() {
    let mut ctrl = build_with(6, elastic_options());
    ctrl.accept(None);
    fire_timers(&mut ctrl);

    let pre_runs = ctrl.animator_mut().drain();
    assert_eq!(pre_runs.len(), 4);
    let spread: Vec<Option<f64>> = pre_runs
        .iter()
        .map(|r| r.targets.get("translateX"))
        .collect();
    assert_eq!(
        spread,
        vec![Some(100.0), Some(75.0), Some(50.0), Some(25.0)]
    );
    let depths: Vec<Option<f64>> = pre_runs.iter().map(|r| r.targets.depth_offset()).collect();
    assert_eq!(
        depths,
        vec![Some(-50.0), Some(-100.0), Some(-150.0), Some(-200.0)]
    );
    assert!(pre_runs
        .iter()
        .all(|r| r.completion.is_some() && r.duration_ms == 300));

    for run in &pre_runs {
        assert!(ctrl.on_animation_complete(run.completion.unwrap()));
    }
    let settle_runs = ctrl.animator_mut().drain();
    assert_eq!(settle_runs.len(), 4);
    assert!(settle_runs.iter().all(|r| r.completion.is_none()));
    assert_eq!(settle_runs[0].targets.depth_offset(), Some(0.0));
    assert_eq!(settle_runs[3].targets.depth_offset(), Some(-150.0));
}

#[test]
fn reject_uses_its_own_pre_animation() {
    let mut ctrl = build_with(6, elastic_options());
    ctrl.reject(None);
    fire_timers(&mut ctrl);
    let runs = ctrl.animator_mut().drain();
    assert!(runs.iter().all(|r| r.targets.get("translateX") == Some(-40.0)));
}

#[test]
fn animation_completion_is_single_use() {
    let mut ctrl = build_with(6, elastic_options());
    ctrl.accept(None);
    fire_timers(&mut ctrl);
    let token = ctrl.animator_mut().drain()[0].completion.unwrap();
    assert!(ctrl.on_animation_complete(token));
    assert!(!ctrl.on_animation_complete(token));
}

// -- Watchdog --

#[test]
fn watchdog_forces_missing_exit() {
    let opts = options(3, true).with_exit_timeout(Some(Duration::from_secs(2)));
    let mut ctrl = build_with(5, opts);
    ctrl.accept(None);

    let scheduled = ctrl.timer_mut().drain();
    let (watchdog, _) = *scheduled
        .iter()
        .find(|(_, delay)| *delay == Duration::from_secs(2))
        .unwrap();
    assert!(ctrl.is_animating());
    let (item, exit) = ctrl.surface_mut().take_watched()[0];

    assert!(ctrl.on_timer(watchdog));
    assert!(!ctrl.is_animating());
    assert_eq!(ctrl.surface().item(ItemId(0)).unwrap().opacity, 0.0);

    // The late signal finds nothing to do.
    assert!(!ctrl.on_transition_end(item, exit));
}

#[test]
fn late_signal_from_forced_exit_does_not_end_next_exit_of_same_item() {
    let opts = options(1, true).with_exit_timeout(Some(Duration::from_secs(2)));
    let mut ctrl = build_with(2, opts);

    // Item 0 leaves; its transition end never arrives, the watchdog forces it.
    ctrl.accept(None);
    let (_, late) = ctrl.surface_mut().take_watched()[0];
    fire_timers(&mut ctrl);
    assert!(!ctrl.is_animating());

    // Item 1 leaves normally.
    ctrl.accept(None);
    finish_exits(&mut ctrl);
    fire_timers(&mut ctrl);
    assert!(!ctrl.is_animating());

    // Item 0 leaves again, then the first exit's signal shows up.
    assert!(ctrl.accept(None).is_started());
    let (item, current) = ctrl.surface_mut().take_watched()[0];
    assert_eq!(item, ItemId(0));
    assert_ne!(current, late);

    assert!(!ctrl.on_transition_end(ItemId(0), late));
    assert!(ctrl.is_animating());
    let leaving = ctrl.surface().item(ItemId(0)).unwrap();
    assert!(leaving.has_tag(StackTag::Accept));

    assert!(ctrl.on_transition_end(ItemId(0), current));
    assert!(!ctrl.is_animating());
}

#[test]
fn watchdog_is_cancelled_by_transition_end() {
    let opts = options(3, true).with_exit_timeout(Some(Duration::from_secs(2)));
    let mut ctrl = build_with(5, opts);
    ctrl.accept(None);
    let watchdog = ctrl
        .timer_mut()
        .scheduled()
        .iter()
        .find(|(_, delay)| *delay == Duration::from_secs(2))
        .map(|(task, _)| *task)
        .unwrap();

    finish_exits(&mut ctrl);
    assert_eq!(ctrl.timer_mut().drain_cancelled(), vec![watchdog]);
    assert!(!ctrl.on_timer(watchdog));
}

#[test]
fn unknown_signals_are_ignored() {
    let mut ctrl = build(5, 3, true);
    assert!(!ctrl.on_timer(crate::timer::TaskId(99)));
    assert!(!ctrl.on_animation_complete(crate::animation::AnimationToken(99)));
    assert!(!ctrl.on_transition_end(ItemId(3), ExitToken(99)));
    assert!(!ctrl.is_animating());
}

#[test]
fn state_serializes() {
    let ctrl = build(4, 2, false);
    let json = serde_json::to_string(ctrl.state()).unwrap();
    assert!(json.contains("\"current\":0"));
    assert!(json.contains("\"visible\":2"));
    assert!(json.contains("\"has_ended\":false"));
}

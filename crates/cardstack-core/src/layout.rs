//! Index and depth arithmetic for the stack window.
//!
//! Everything here is pure: given the stack size, the current index and the
//! window size it says where each item goes. The controller turns the
//! results into surface and animator calls.

use cardstack_config::PreAnimationConfig;
use serde::{Deserialize, Serialize};

use crate::animation::AnimationTargets;

/// Depth distance between two consecutive window levels, in px.
pub const DEPTH_STEP: f64 = 50.0;

/// Depth offset of window level `level` (0 is the front).
pub fn depth_offset(level: usize) -> f64 {
    -DEPTH_STEP * level as f64
}

/// Clamp a requested window size to something the stack can show.
///
/// A window at least as large as the stack makes wraparound ambiguous for an
/// infinite stack and overruns a finite one, so both fall back to a single
/// visible item, as does any non-positive request.
pub fn normalize_visible(visible: i64, infinite: bool, total: usize) -> usize {
    if visible <= 0 {
        return 1;
    }
    let visible = usize::try_from(visible).unwrap_or(usize::MAX);
    if infinite && visible >= total {
        return 1;
    }
    if !infinite && visible > total {
        return 1;
    }
    visible
}

/// Visual state of one item at rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemLayout {
    pub opacity: f64,
    pub interactive: bool,
    pub stack_order: i32,
    pub depth: f64,
}

impl ItemLayout {
    /// Shown in window level `level`.
    pub fn shown(level: usize, visible: usize) -> Self {
        let stack_order = if level == 0 {
            visible as i32 + 1
        } else {
            visible as i32 - level as i32
        };
        Self {
            opacity: 1.0,
            interactive: true,
            stack_order,
            depth: depth_offset(level),
        }
    }

    /// Present but hidden, parked just behind the window.
    pub fn parked(visible: usize) -> Self {
        Self {
            opacity: 0.0,
            interactive: false,
            stack_order: 0,
            depth: depth_offset(visible),
        }
    }
}

/// Layout applied at construction and on restart, by original item order.
pub fn initial_layout(total: usize, visible: usize) -> Vec<ItemLayout> {
    (0..total)
        .map(|i| {
            if i < visible {
                ItemLayout::shown(i, visible)
            } else {
                ItemLayout::parked(visible)
            }
        })
        .collect()
}

/// An item moving up into window slot `slot` during an advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotMove {
    pub slot: usize,
    /// Index of the item in the stack's original order.
    pub position: usize,
}

/// Which item fills window slot `slot` once the item at `current` leaves.
///
/// Returns `None` when a finite stack has no item left for this slot; later
/// slots are then empty as well.
pub fn slot_position(slot: usize, current: usize, total: usize, infinite: bool) -> Option<usize> {
    if infinite {
        if current + slot < total - 1 {
            Some(current + slot + 1)
        } else {
            Some(slot - (total - current - 1))
        }
    } else if current + slot >= total - 1 {
        None
    } else {
        Some(current + slot + 1)
    }
}

/// All slot moves for one advance, front slot first.
pub fn plan_slots(current: usize, total: usize, visible: usize, infinite: bool) -> Vec<SlotMove> {
    (0..visible)
        .map_while(|slot| {
            slot_position(slot, current, total, infinite).map(|position| SlotMove { slot, position })
        })
        .collect()
}

/// Pre-animation targets for an item moving into `slot`.
///
/// With `elastic` each property is scaled down by `slot / visible` of its
/// value; otherwise every slot gets the full value. The depth target is
/// always one level behind the final slot.
pub fn pre_animation_targets(
    pre: &PreAnimationConfig,
    slot: usize,
    visible: usize,
) -> AnimationTargets {
    let mut targets = AnimationTargets::new();
    for (property, &value) in &pre.properties {
        let interval = if pre.elastic {
            value / visible as f64
        } else {
            0.0
        };
        targets.insert(property.as_str(), value - slot as f64 * interval);
    }
    targets.set_depth(depth_offset(slot + 1));
    targets
}

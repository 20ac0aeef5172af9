//! Shift planning for the per-scope slide sequence.
//!
//! Every scope keeps its slides at positions `{1, 2, .., N}` with no
//! duplicates and no gaps. The planners below take the current scope
//! snapshot (reduced to id/position pairs) and one requested mutation, and
//! return the full set of position changes as pure data. Applying the plan
//! is the store's job; computing it needs no I/O, which keeps the invariant
//! testable without a database.
//!
//! Out-of-range requested positions are clamped to the nearest valid bound
//! instead of rejected. This is operator-facing tooling: "move it to the
//! front" and "push it to the end" are the intents behind out-of-range
//! input, so the planners honor them.

use crate::types::SlideId;

/// One slide's spot in the sequence. Snapshots are reduced to this before
/// planning so the planner never sees (or depends on) display fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub id: SlideId,
    pub position: i32,
}

/// Plan for inserting a new slide.
///
/// `position` is where the new slide lands; `shifts` holds the *new*
/// positions of every existing slide that must move to make room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertPlan {
    pub position: i32,
    pub shifts: Vec<Placement>,
}

/// Plan for moving an existing slide to a new position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub position: i32,
    pub shifts: Vec<Placement>,
}

/// Plan for removing a slide and compacting the gap it leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovePlan {
    pub position: i32,
    pub shifts: Vec<Placement>,
}

// ---------------------------------------------------------------------------
// Planners
// ---------------------------------------------------------------------------

/// Plan the insertion of a new slide.
///
/// Without a requested position the slide is appended at `N + 1`. A
/// requested position is clamped to `[1, N + 1]`. Every existing slide at
/// or above the target moves up by one.
pub fn plan_insert(current: &[Placement], requested: Option<i32>) -> InsertPlan {
    let count = current.len() as i32;
    let position = requested.unwrap_or(count + 1).clamp(1, count + 1);

    let shifts = current
        .iter()
        .filter(|p| p.position >= position)
        .map(|p| Placement {
            id: p.id,
            position: p.position + 1,
        })
        .collect();

    InsertPlan { position, shifts }
}

/// Plan moving slide `id` to `requested` (clamped to `[1, N]`).
///
/// Returns `None` when `id` is not in the scope. Moving down the list
/// shifts the slides in `(old, new]` back by one; moving up shifts
/// `[new, old)` forward by one. A move to the current position is an empty
/// plan.
pub fn plan_move(current: &[Placement], id: SlideId, requested: i32) -> Option<MovePlan> {
    let count = current.len() as i32;
    let old = current.iter().find(|p| p.id == id)?.position;
    let new = requested.clamp(1, count);

    let shifts: Vec<Placement> = if new > old {
        current
            .iter()
            .filter(|p| p.position > old && p.position <= new)
            .map(|p| Placement {
                id: p.id,
                position: p.position - 1,
            })
            .collect()
    } else if new < old {
        current
            .iter()
            .filter(|p| p.position >= new && p.position < old)
            .map(|p| Placement {
                id: p.id,
                position: p.position + 1,
            })
            .collect()
    } else {
        Vec::new()
    };

    Some(MovePlan {
        position: new,
        shifts,
    })
}

/// Plan the removal of slide `id` and the compaction of the gap it leaves.
///
/// Returns `None` when `id` is not in the scope. Every slide above the
/// removed position moves down by one.
pub fn plan_remove(current: &[Placement], id: SlideId) -> Option<RemovePlan> {
    let position = current.iter().find(|p| p.id == id)?.position;

    let shifts = current
        .iter()
        .filter(|p| p.position > position)
        .map(|p| Placement {
            id: p.id,
            position: p.position - 1,
        })
        .collect();

    Some(RemovePlan { position, shifts })
}

/// Check the invariant: positions are exactly `{1, 2, .., N}`.
pub fn is_gap_free(current: &[Placement]) -> bool {
    let mut positions: Vec<i32> = current.iter().map(|p| p.position).collect();
    positions.sort_unstable();
    positions
        .iter()
        .enumerate()
        .all(|(i, &pos)| pos == i as i32 + 1)
}

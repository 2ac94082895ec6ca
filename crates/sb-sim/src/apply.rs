//! Tree builder: apply a fired event to the pool and the tree.

use sb_core::{NodeId, SimRng, State};
use sb_events::Event;
use sb_pool::LineagePool;
use sb_tree::SeedbankTree;

use crate::{SimError, SimResult};

/// Apply `event` and return the new coalescence node, if one was created.
///
/// Lineages are picked uniformly from the live set of the relevant state;
/// for coalescence every unordered pair is equally likely.
///
/// # Errors
///
/// [`SimError::NullEventApplied`] for [`Event::Null`];
/// [`SimError::NotEnoughLineages`] if the source set is too small; pool and
/// tree errors if the bookkeeping is inconsistent.
pub fn apply_event(
    event: &Event,
    pool:  &mut LineagePool,
    tree:  &mut SeedbankTree,
    rng:   &mut SimRng,
) -> SimResult<Option<NodeId>> {
    match *event {
        Event::Coalescence { state, time } => coalesce(state, time, pool, tree, rng).map(Some),
        Event::Migration { from, to, time } => {
            migrate(from, to, time, pool, tree, rng)?;
            Ok(None)
        }
        Event::Null => Err(SimError::NullEventApplied),
    }
}

fn coalesce(
    state: State,
    time:  f64,
    pool:  &mut LineagePool,
    tree:  &mut SeedbankTree,
    rng:   &mut SimRng,
) -> SimResult<NodeId> {
    let live = pool.live(state);
    let not_enough = SimError::NotEnoughLineages {
        event:  "coalescence",
        state,
        needed: 2,
        live:   live.len(),
    };
    let Some((i, j)) = rng.distinct_pair(live.len()) else {
        return Err(not_enough);
    };
    let (Some(left), Some(right)) = (live.get(i), live.get(j)) else {
        return Err(not_enough);
    };

    let parent = tree.coalesce(left, right, state, time)?;
    pool.remove_live(state, left)?;
    pool.remove_live(state, right)?;
    pool.add_live(state, parent)?;
    Ok(parent)
}

fn migrate(
    from: State,
    to:   State,
    time: f64,
    pool: &mut LineagePool,
    tree: &mut SeedbankTree,
    rng:  &mut SimRng,
) -> SimResult<()> {
    let count = pool.live(from).len();
    if count == 0 {
        return Err(SimError::NotEnoughLineages {
            event:  "migration",
            state:  from,
            needed: 1,
            live:   0,
        });
    }
    let lineage = pool
        .live_at(from, rng.index(count))
        .ok_or(SimError::NotEnoughLineages { event: "migration", state: from, needed: 1, live: count })?;

    tree.record_change(lineage, to, time)?;
    pool.switch_state(from, lineage)?;
    Ok(())
}

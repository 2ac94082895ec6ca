//! Gillespie step: exponential waiting time plus one categorical pick.

use sb_core::SimRng;

use crate::{Event, EventError, EventKind, EventResult, Propensities};

/// The sampled event and the categorical draw `U` in `[0, total)` that chose
/// it.  `uniform` is `None` for [`Event::Null`], where nothing is drawn.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Draw {
    pub event:   Event,
    pub uniform: Option<f64>,
}

/// Draw the next candidate event after `now`.
///
/// Consumes exactly two random numbers (waiting time, then `U`) unless the
/// total propensity is zero, in which case it consumes none and returns
/// [`Event::Null`].
///
/// # Errors
///
/// [`EventError::InvalidPropensity`] if any rate is negative or not finite;
/// [`EventError::FellThrough`] if `U` lands outside every interval.
pub fn next_event(p: &Propensities, now: f64, rng: &mut SimRng) -> EventResult<Draw> {
    let total = p.total();
    let rates = [p.coalescence, p.dormant_to_active, p.active_to_dormant];
    if !total.is_finite() || rates.iter().any(|r| !(*r >= 0.0)) {
        return Err(EventError::InvalidPropensity(total));
    }
    if total == 0.0 {
        return Ok(Draw { event: Event::Null, uniform: None });
    }

    let wait = rng.exponential(total).ok_or(EventError::InvalidPropensity(total))?;
    let draw = rng.uniform() * total;
    let kind = pick(p, draw).ok_or(EventError::FellThrough { draw, total })?;
    Ok(Draw { event: kind.at(now + wait), uniform: Some(draw) })
}

/// First kind whose cumulative upper bound exceeds `draw`.  Zero-width
/// intervals can never be chosen.
pub(crate) fn pick(p: &Propensities, draw: f64) -> Option<EventKind> {
    let rates = [p.coalescence, p.dormant_to_active, p.active_to_dormant];
    let mut upper = 0.0;
    for (kind, rate) in EventKind::ORDER.into_iter().zip(rates) {
        upper += rate;
        if draw < upper {
            return Some(kind);
        }
    }
    None
}


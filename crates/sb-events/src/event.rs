//! The closed set of things a step can do.

use sb_core::State;

/// One candidate event produced by the sampler.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Event {
    /// Two live lineages of `state` merge at `time`.
    Coalescence { state: State, time: f64 },
    /// One live lineage switches from `from` to `to` at `time`.
    Migration { from: State, to: State, time: f64 },
    /// Nothing can happen: every propensity is zero.
    Null,
}

impl Event {
    pub fn migration(from: State, time: f64) -> Self {
        Event::Migration { from, to: from.other(), time }
    }

    /// Event time; `+inf` for [`Event::Null`].
    pub fn time(&self) -> f64 {
        match *self {
            Event::Coalescence { time, .. } | Event::Migration { time, .. } => time,
            Event::Null => f64::INFINITY,
        }
    }

    pub fn kind(&self) -> Option<EventKind> {
        match *self {
            Event::Coalescence { .. } => Some(EventKind::Coalescence),
            Event::Migration { from: State::Active, .. } => Some(EventKind::ActiveToDormant),
            Event::Migration { from: State::Dormant, .. } => Some(EventKind::DormantToActive),
            Event::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Event::Null)
    }
}

/// Event category, in categorical sampling order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EventKind {
    Coalescence,
    DormantToActive,
    ActiveToDormant,
}

impl EventKind {
    pub const ORDER: [EventKind; 3] =
        [EventKind::Coalescence, EventKind::DormantToActive, EventKind::ActiveToDormant];

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Coalescence     => "coalescence",
            EventKind::DormantToActive => "dormant_to_active",
            EventKind::ActiveToDormant => "active_to_dormant",
        }
    }

    /// Build the concrete event of this kind at `time`.
    pub fn at(self, time: f64) -> Event {
        match self {
            EventKind::Coalescence     => Event::Coalescence { state: State::Active, time },
            EventKind::DormantToActive => Event::migration(State::Dormant, time),
            EventKind::ActiveToDormant => Event::migration(State::Active, time),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

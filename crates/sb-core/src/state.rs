//! The two lineage states of the seedbank model and a map keyed by them.
//!
//! Lineages coalesce only while [`State::Active`].  Everything that used to be
//! "two parallel lists indexed 0/1" is a [`StateMap`] instead, so the compiler
//! rather than an integer convention decides which list is which.

use std::ops::{Index, IndexMut};

/// State of a lineage at a point in (backward) time.
///
/// The declaration order is significant: it is the tie-break order for
/// samples that activate at the same time and the iteration order of
/// [`StateMap`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum State {
    /// Part of the reproducing population; can coalesce.
    #[default]
    Active,
    /// In the seedbank; cannot coalesce.
    Dormant,
}

impl State {
    /// Both states in tie-break order.
    pub const ALL: [State; 2] = [State::Active, State::Dormant];

    /// The state a migration out of `self` leads to.
    #[inline]
    pub fn other(self) -> State {
        match self {
            State::Active  => State::Dormant,
            State::Dormant => State::Active,
        }
    }

    /// Label used in `[&type="..."]` annotations and CSV columns.
    pub fn as_str(self) -> &'static str {
        match self {
            State::Active  => "active",
            State::Dormant => "dormant",
        }
    }

    /// Inverse of [`as_str`](Self::as_str).
    pub fn parse(s: &str) -> Option<State> {
        match s {
            "active"  => Some(State::Active),
            "dormant" => Some(State::Dormant),
            _ => None,
        }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── StateMap ──────────────────────────────────────────────────────────────────

/// One `T` per [`State`], indexed by the state itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateMap<T> {
    pub active:  T,
    pub dormant: T,
}

impl<T> StateMap<T> {
    pub fn new(active: T, dormant: T) -> Self {
        Self { active, dormant }
    }

    /// Build both entries from a per-state constructor.
    pub fn from_fn(mut f: impl FnMut(State) -> T) -> Self {
        Self {
            active:  f(State::Active),
            dormant: f(State::Dormant),
        }
    }

    /// `(state, &value)` pairs in [`State::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (State, &T)> {
        [(State::Active, &self.active), (State::Dormant, &self.dormant)].into_iter()
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> StateMap<U> {
        StateMap {
            active:  f(&self.active),
            dormant: f(&self.dormant),
        }
    }
}

impl<T> Index<State> for StateMap<T> {
    type Output = T;

    #[inline]
    fn index(&self, state: State) -> &T {
        match state {
            State::Active  => &self.active,
            State::Dormant => &self.dormant,
        }
    }
}

impl<T> IndexMut<State> for StateMap<T> {
    #[inline]
    fn index_mut(&mut self, state: State) -> &mut T {
        match state {
            State::Active  => &mut self.active,
            State::Dormant => &mut self.dormant,
        }
    }
}

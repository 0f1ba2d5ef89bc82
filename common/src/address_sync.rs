//! Two-way mapping between [`QueryState`] and the query part of the page address.
//!
//! Each event has exactly one authoritative direction:
//! * navigation (initial load, back/forward, pasted link): address -> state
//! * local commit: state -> address
//!
//! The synchronizer never reacts to its own pushes, so the two directions
//! cannot feed each other.

use url::form_urlencoded;

use crate::{mutation_scheduler::MutationScheduler, query_state::QueryState};

/// Parses the query part of an address (with or without a leading `?`).
pub fn parse_address(query: &str) -> QueryState {
    let query = query.strip_prefix('?').unwrap_or(query);
    QueryState::from_address_params(form_urlencoded::parse(query.as_bytes()))
}

/// Serializes a state to the query part of an address, without a leading `?`.
/// The default state serializes to the empty string.
pub fn serialize_address(state: &QueryState) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(state.to_address_params())
        .finish()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationOutcome {
    /// True if the published state differs from the previous one.
    pub state_changed: bool,
    /// Set when the incoming address was not in canonical form; the view may
    /// replace (not push) the history entry with it.
    pub canonical_address: Option<String>,
}

/// What the view has to do after [`AddressSynchronizer::navigate`].
#[derive(Debug, PartialEq)]
pub struct Navigation<H> {
    /// Timers of the pending edits made for the state navigated away from.
    pub dropped_timers: Vec<H>,
    /// Canonical address to replace the history entry with.
    pub replace_with: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSynchronizer {
    current: QueryState,
    current_address: String,
}

impl AddressSynchronizer {
    /// Seeds the synchronizer from the address the page was loaded with.
    pub fn from_address(query: &str) -> Self {
        let current = parse_address(query);
        let current_address = serialize_address(&current);
        Self { current, current_address }
    }

    pub fn current(&self) -> &QueryState {
        &self.current
    }

    /// Address -> state. Always wins and is never deferred.
    pub fn on_navigation(&mut self, query: &str) -> NavigationOutcome {
        let next = parse_address(query);
        let canonical = serialize_address(&next);
        let state_changed = next != self.current;
        let incoming = query.strip_prefix('?').unwrap_or(query);
        let canonical_address = (incoming != canonical).then(|| canonical.clone());
        if state_changed {
            tracing::debug!(address = %canonical, "navigation published a new query state");
        }
        self.current = next;
        self.current_address = canonical;
        self.check_round_trip();
        NavigationOutcome { state_changed, canonical_address }
    }

    /// Navigation event with the view's debounce scheduler. Pending edits are
    /// dropped when the navigation lands on another state; the echo of this
    /// synchronizer's own push leaves them pending.
    pub fn navigate<H>(&mut self, query: &str, scheduler: &mut MutationScheduler<H>) -> Navigation<H> {
        let outcome = self.on_navigation(query);
        let dropped_timers = if outcome.state_changed { scheduler.discard_all() } else { Vec::new() };
        if !dropped_timers.is_empty() {
            tracing::debug!(count = dropped_timers.len(), "navigation discarded pending edits");
        }
        Navigation { dropped_timers, replace_with: outcome.canonical_address }
    }

    /// State -> address. Returns the address to push, or `None` when the
    /// committed state is already current.
    pub fn on_commit(&mut self, next: QueryState) -> Option<String> {
        if next == self.current {
            return None;
        }
        let address = serialize_address(&next);
        tracing::debug!(address = %address, "committing query state to address");
        self.current = next;
        self.current_address = address.clone();
        self.check_round_trip();
        Some(address)
    }

    fn check_round_trip(&self) {
        debug_assert_eq!(parse_address(&self.current_address), self.current);
    }
}

//! Debounced commits for continuously edited filter fields.
//!
//! The scheduler is timer-agnostic: callers start a timer of their choice
//! (`H` is its cancellation handle) and report back with the ticket they were
//! given once it elapses. A ticket that no longer matches the field's pending
//! edit is stale and fires as a no-op, so a late timer can never commit an
//! outdated value even if cancelling it failed.

use std::collections::BTreeMap;

use crate::{price_format::parse_price_input, query_state::QueryPatch, search_const::DEBOUNCE_WINDOW_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EditableField {
    SearchText,
    PriceFrom,
    PriceTo,
}

pub type Ticket = u64;

#[derive(Debug)]
pub struct PendingEdit<H> {
    pub field: EditableField,
    pub value: String,
    pub ticket: Ticket,
    timer: H,
}

/// Result of a timer firing for the current edit.
#[derive(Debug, PartialEq)]
pub struct Commit<H> {
    /// Patch built from every field that was pending.
    pub patch: QueryPatch,
    /// Timers of the other consumed fields; cancel them.
    pub orphaned_timers: Vec<H>,
}

#[derive(Debug)]
pub struct MutationScheduler<H> {
    window_ms: u32,
    pending: BTreeMap<EditableField, PendingEdit<H>>,
    last_ticket: Ticket,
}

impl<H> Default for MutationScheduler<H> {
    fn default() -> Self {
        Self::new(DEBOUNCE_WINDOW_MS)
    }
}

impl<H> MutationScheduler<H> {
    pub fn new(window_ms: u32) -> Self {
        Self { window_ms, pending: BTreeMap::new(), last_ticket: 0 }
    }

    pub fn window_ms(&self) -> u32 {
        self.window_ms
    }

    /// Records an edit and starts its timer through `start_timer`. Returns the
    /// handle of the edit it superseded on the same field, which the caller
    /// must cancel.
    pub fn schedule(
        &mut self,
        field: EditableField,
        value: impl Into<String>,
        start_timer: impl FnOnce(Ticket, u32) -> H,
    ) -> Option<H> {
        self.last_ticket += 1;
        let ticket = self.last_ticket;
        let timer = start_timer(ticket, self.window_ms);
        let edit = PendingEdit { field, value: value.into(), ticket, timer };
        self.pending.insert(field, edit).map(|previous| previous.timer)
    }

    /// Value awaiting commit for `field`, for immediate local echo.
    pub fn pending_value(&self, field: EditableField) -> Option<&str> {
        self.pending.get(&field).map(|edit| edit.value.as_str())
    }

    /// Called when the timer for `ticket` elapses. Consumes every pending
    /// field into one patch, or returns `None` if the ticket was superseded.
    pub fn fire(&mut self, field: EditableField, ticket: Ticket) -> Option<Commit<H>> {
        if self.pending.get(&field).map(|edit| edit.ticket) != Some(ticket) {
            tracing::debug!(?field, ticket, "ignoring superseded debounce timer");
            return None;
        }
        let mut patch = QueryPatch::default();
        let mut orphaned_timers = Vec::new();
        for (pending_field, edit) in std::mem::take(&mut self.pending) {
            match pending_field {
                EditableField::SearchText => patch.search_text = Some(edit.value.trim().to_string()),
                EditableField::PriceFrom => patch.price_from = Some(parse_price_input(&edit.value)),
                EditableField::PriceTo => patch.price_to = Some(parse_price_input(&edit.value)),
            }
            if pending_field != field {
                orphaned_timers.push(edit.timer);
            }
        }
        tracing::debug!(?patch, "debounced edits committed");
        Some(Commit { patch, orphaned_timers })
    }

    /// Drops every pending edit without committing and hands back their
    /// timers for cancellation. Used on view teardown and on navigation.
    pub fn discard_all(&mut self) -> Vec<H> {
        std::mem::take(&mut self.pending).into_values().map(|edit| edit.timer).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Fake timer: remembers the ticket it was started for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct FakeTimer(Ticket);

    fn start(ticket: Ticket, _window: u32) -> FakeTimer {
        FakeTimer(ticket)
    }

    #[test]
    fn rapid_edits_coalesce_into_one_commit_with_the_last_value() {
        let mut scheduler = MutationScheduler::default();
        let mut timers = Vec::new();
        for value in ["1", "12", "120", "1200", "120000", "95000"] {
            let mut started = None;
            let superseded = scheduler.schedule(EditableField::PriceFrom, value, |ticket, _| {
                started = Some(ticket);
                FakeTimer(ticket)
            });
            if let Some(t) = started {
                timers.push(t);
            }
            assert_eq!(superseded.is_some(), timers.len() > 1);
        }
        assert_eq!(scheduler.pending_value(EditableField::PriceFrom), Some("95000"));

        let commits: Vec<_> = timers.iter().filter_map(|t| scheduler.fire(EditableField::PriceFrom, *t)).collect();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].patch, QueryPatch { price_from: Some(Some(95000)), ..Default::default() });
        assert_eq!(scheduler.pending_value(EditableField::PriceFrom), None);
    }

    #[test]
    fn simultaneous_price_edits_share_one_commit() {
        let mut scheduler = MutationScheduler::default();
        scheduler.schedule(EditableField::PriceFrom, "100 000", start);
        scheduler.schedule(EditableField::PriceTo, "500 000", start);

        let commit = scheduler.fire(EditableField::PriceTo, 2);
        let Some(commit) = commit else { panic!("expected a commit") };
        assert_eq!(commit.patch.price_from, Some(Some(100_000)));
        assert_eq!(commit.patch.price_to, Some(Some(500_000)));
        assert_eq!(commit.orphaned_timers, vec![FakeTimer(1)]);

        // the orphaned price-from timer fires later and finds nothing
        assert_eq!(scheduler.fire(EditableField::PriceFrom, 1), None);
    }

    #[test]
    fn fields_are_independent_slots() {
        let mut scheduler = MutationScheduler::new(10);
        assert_eq!(scheduler.schedule(EditableField::SearchText, "кв", start), None);
        assert_eq!(scheduler.schedule(EditableField::PriceTo, "5", start), None);
        assert_eq!(scheduler.schedule(EditableField::SearchText, "квартира", start), Some(FakeTimer(1)));
        assert_eq!(scheduler.pending_value(EditableField::PriceTo), Some("5"));
    }

    #[test]
    fn search_text_is_trimmed_and_empty_price_clears_the_bound() {
        let mut scheduler = MutationScheduler::default();
        scheduler.schedule(EditableField::SearchText, "  гараж  ", start);
        scheduler.schedule(EditableField::PriceTo, "", start);
        let commit = scheduler.fire(EditableField::SearchText, 1);
        assert_eq!(
            commit.map(|c| c.patch),
            Some(QueryPatch { search_text: Some("гараж".into()), price_to: Some(None), ..Default::default() })
        );
    }

    #[test]
    fn teardown_discards_without_committing() {
        let mut scheduler = MutationScheduler::default();
        scheduler.schedule(EditableField::SearchText, "дом", start);
        scheduler.schedule(EditableField::PriceFrom, "10", start);
        let cancelled = scheduler.discard_all();
        assert_eq!(cancelled.len(), 2);
        assert_eq!(scheduler.fire(EditableField::SearchText, 1), None);
        assert_eq!(scheduler.fire(EditableField::PriceFrom, 2), None);
    }

    #[test]
    fn timer_receives_the_configured_window() {
        let mut scheduler: MutationScheduler<u32> = MutationScheduler::new(750);
        let mut seen = 0;
        scheduler.schedule(EditableField::SearchText, "x", |_, window| {
            seen = window;
            0
        });
        assert_eq!(seen, 750);
    }
}

//! Ordering of catalog fetches, pagination bookkeeping and scroll restoration.
//!
//! Fetches may resolve in any order. Every fetch is issued against a
//! [`FetchTicket`]; a response is applied only if its ticket is the newest one
//! and its state is still the committed state (last committed state wins).

use serde::{Deserialize, Serialize};

use crate::{
    access_gate::{BannerDismissal, GatedResult, apply_gate},
    address_sync::serialize_address,
    fetch_error::FetchError,
    query_state::QueryState,
    search_result::FetchResult,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    state: QueryState,
}

impl FetchTicket {
    pub fn state(&self) -> &QueryState {
        &self.state
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    StaleDiscarded,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultController {
    committed: Option<QueryState>,
    latest_generation: u64,
    in_flight: bool,
    displayed: Option<FetchResult>,
    error: Option<FetchError>,
}

impl ResultController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a newly committed state and returns the ticket to fetch it
    /// with. Returns `None` when a configuration error is latched or the state
    /// is already displayed or being fetched.
    pub fn begin(&mut self, state: QueryState) -> Option<FetchTicket> {
        if self.is_fatal() {
            return None;
        }
        let same_state = self.committed.as_ref() == Some(&state);
        if same_state && (self.in_flight || self.displayed.is_some()) {
            return None;
        }
        self.committed = Some(state);
        Some(self.issue())
    }

    /// Re-issues the committed state after a transient failure. The user has
    /// to ask for it; failures are never retried on their own.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        if self.in_flight || !matches!(self.error, Some(FetchError::TransientNetwork { .. })) {
            return None;
        }
        self.committed.is_some().then(|| self.issue())
    }

    fn issue(&mut self) -> FetchTicket {
        self.latest_generation += 1;
        self.in_flight = true;
        let state = self.committed.clone().unwrap_or_default();
        tracing::info!(generation = self.latest_generation, address = %serialize_address(&state), "fetching listings");
        FetchTicket { generation: self.latest_generation, state }
    }

    pub fn resolve(&mut self, ticket: FetchTicket, outcome: Result<FetchResult, FetchError>) -> Resolution {
        let is_current = ticket.generation == self.latest_generation && self.committed.as_ref() == Some(&ticket.state);
        if !is_current {
            tracing::debug!(
                generation = ticket.generation,
                latest = self.latest_generation,
                "discarding stale listing response"
            );
            return Resolution::StaleDiscarded;
        }
        self.in_flight = false;
        match outcome {
            Ok(result) => {
                self.displayed = Some(result);
                self.error = None;
            }
            Err(error @ FetchError::Configuration(_)) => {
                tracing::error!(%error, "listing fetch misconfigured");
                self.displayed = None;
                self.error = Some(error);
            }
            Err(error) => {
                tracing::warn!(%error, "listing fetch failed");
                // the tier stays whatever the service last reported
                let access_level = self.displayed.as_ref().map(|result| result.access_level).unwrap_or_default();
                self.displayed = Some(FetchResult { access_level, ..FetchResult::empty(ticket.state) });
                self.error = Some(error);
            }
        }
        Resolution::Applied
    }

    pub fn committed(&self) -> Option<&QueryState> {
        self.committed.as_ref()
    }

    /// Last applied result. Kept on screen while a newer fetch is in flight.
    pub fn displayed(&self) -> Option<&FetchResult> {
        self.displayed.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn is_fatal(&self) -> bool {
        self.error.as_ref().is_some_and(FetchError::is_fatal)
    }

    pub fn can_retry(&self) -> bool {
        !self.in_flight && matches!(self.error, Some(FetchError::TransientNetwork { .. }))
    }

    /// Displayed result after the access gate. No banner while an error is
    /// shown: the placeholder result carries no counts from the service.
    pub fn gated(&self, dismissal: &BannerDismissal) -> Option<GatedResult<'_>> {
        let mut gated = apply_gate(self.displayed.as_ref()?, dismissal);
        if self.error.is_some() {
            gated.banner = None;
        }
        Some(gated)
    }

    pub fn total_pages(&self) -> Option<u64> {
        self.displayed.as_ref().map(|result| result.total_pages)
    }

    /// True when the displayed result has fewer pages than the requested one.
    /// The page is left as is; the view offers a way back instead.
    pub fn page_out_of_range(&self) -> bool {
        match (&self.displayed, &self.error) {
            (Some(result), None) => result.query.page() > result.total_pages.max(1),
            _ => false,
        }
    }
}

/// List view a lot page was opened from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListView {
    Catalog,
    Map,
}

/// Scroll offset of a list view, recorded right before opening a detail
/// view and consumed when that view is shown again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollSnapshot {
    pub view: ListView,
    pub offset: f64,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScrollRestoration {
    pending: Option<ScrollSnapshot>,
}

impl ScrollRestoration {
    pub fn record(&mut self, view: ListView, offset: f64, state: &QueryState) {
        self.pending = Some(ScrollSnapshot { view, offset, address: serialize_address(state) });
    }

    /// View and address of the list the snapshot belongs to, for "back to
    /// results".
    pub fn back_target(&self) -> Option<(ListView, &str)> {
        self.pending.as_ref().map(|snapshot| (snapshot.view, snapshot.address.as_str()))
    }

    /// Returns the offset to scroll `view` to once `displayed` holds results
    /// for the recorded state. While nothing is displayed yet, or the snapshot
    /// belongs to the other view, it is kept; a different result set drops it.
    pub fn take_when_loaded(&mut self, view: ListView, displayed: Option<&FetchResult>) -> Option<f64> {
        let result = displayed?;
        if self.pending.as_ref()?.view != view {
            return None;
        }
        let snapshot = self.pending.take()?;
        (snapshot.address == serialize_address(&result.query)).then_some(snapshot.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access_gate::BannerKind;
    use crate::query_state::QueryPatch;
    use crate::search_result::AccessLevel;
    use pretty_assertions::assert_eq;

    fn state(text: &str) -> QueryState {
        QueryState::default().with_patch(QueryPatch { search_text: Some(text.into()), ..Default::default() })
    }

    fn result_for(state: &QueryState, total_pages: u64) -> FetchResult {
        FetchResult {
            total_pages,
            total_count: total_pages * 20,
            access_level: AccessLevel::Full,
            ..FetchResult::empty(state.clone())
        }
    }

    #[test]
    fn late_response_for_an_older_state_is_discarded() {
        let mut controller = ResultController::new();
        let (a, b) = (state("a"), state("b"));
        let ticket_a = controller.begin(a.clone()).expect("ticket for a");
        let ticket_b = controller.begin(b.clone()).expect("ticket for b");

        assert_eq!(controller.resolve(ticket_b, Ok(result_for(&b, 3))), Resolution::Applied);
        assert_eq!(controller.resolve(ticket_a, Ok(result_for(&a, 9))), Resolution::StaleDiscarded);
        assert_eq!(controller.displayed().map(|r| &r.query), Some(&b));
        assert_eq!(controller.total_pages(), Some(3));
    }

    #[test]
    fn response_for_a_superseded_state_is_discarded_even_if_it_arrives_first() {
        let mut controller = ResultController::new();
        let (a, b) = (state("a"), state("b"));
        let ticket_a = controller.begin(a.clone()).expect("ticket for a");
        let _ticket_b = controller.begin(b).expect("ticket for b");
        assert_eq!(controller.resolve(ticket_a, Ok(result_for(&a, 1))), Resolution::StaleDiscarded);
        assert!(controller.displayed().is_none());
        assert!(controller.is_loading());
    }

    #[test]
    fn same_state_is_not_fetched_twice() {
        let mut controller = ResultController::new();
        let ticket = controller.begin(state("a")).expect("ticket");
        assert_eq!(controller.begin(state("a")), None);
        controller.resolve(ticket, Ok(result_for(&state("a"), 1)));
        assert_eq!(controller.begin(state("a")), None);
    }

    #[test]
    fn transient_failure_shows_empty_results_and_waits_for_retry() {
        let mut controller = ResultController::new();
        let ticket = controller.begin(state("a")).expect("ticket");
        controller.resolve(ticket, Err(FetchError::transient("Сервис недоступен")));

        assert_eq!(controller.displayed().map(|r| r.items.len()), Some(0));
        assert!(controller.can_retry());
        assert_eq!(controller.committed(), Some(&state("a")));

        let retry = controller.retry().expect("retry ticket");
        assert_eq!(retry.state(), &state("a"));
        assert_eq!(controller.retry(), None);
        controller.resolve(retry, Ok(result_for(&state("a"), 2)));
        assert_eq!(controller.error(), None);
    }

    #[test]
    fn configuration_error_is_latched() {
        let mut controller = ResultController::new();
        let ticket = controller.begin(state("a")).expect("ticket");
        controller.resolve(ticket, Err(FetchError::Configuration("CATALOG_API_URL is not set".into())));
        assert!(controller.is_fatal());
        assert_eq!(controller.begin(state("b")), None);
        assert_eq!(controller.retry(), None);
    }

    #[test]
    fn out_of_range_page_is_reported_not_clamped() {
        let mut controller = ResultController::new();
        let requested = state("a").with_page(7);
        let ticket = controller.begin(requested.clone()).expect("ticket");
        controller.resolve(ticket, Ok(result_for(&requested, 2)));
        assert!(controller.page_out_of_range());
        assert_eq!(controller.committed().map(QueryState::page), Some(7));
    }

    #[test]
    fn scroll_is_restored_only_after_matching_results_load() {
        let list = state("дом").with_page(2);
        let mut restoration = ScrollRestoration::default();
        restoration.record(ListView::Catalog, 1840.0, &list);
        assert_eq!(restoration.back_target(), Some((ListView::Catalog, "searchQuery=%D0%B4%D0%BE%D0%BC&page=2")));

        assert_eq!(restoration.take_when_loaded(ListView::Catalog, None), None);
        assert_eq!(restoration.take_when_loaded(ListView::Catalog, Some(&result_for(&list, 4))), Some(1840.0));
        assert_eq!(restoration.take_when_loaded(ListView::Catalog, Some(&result_for(&list, 4))), None);
    }

    #[test]
    fn scroll_snapshot_for_another_list_is_dropped() {
        let mut restoration = ScrollRestoration::default();
        restoration.record(ListView::Catalog, 300.0, &state("a"));
        assert_eq!(restoration.take_when_loaded(ListView::Catalog, Some(&result_for(&state("b"), 1))), None);
        assert_eq!(restoration.back_target(), None);
    }

    #[test]
    fn map_snapshot_is_not_applied_to_the_catalog() {
        let mut restoration = ScrollRestoration::default();
        restoration.record(ListView::Map, 620.0, &state("a"));
        let loaded = result_for(&state("a"), 1);

        assert_eq!(restoration.take_when_loaded(ListView::Catalog, Some(&loaded)), None);
        assert_eq!(restoration.back_target(), Some((ListView::Map, "searchQuery=a")));
        assert_eq!(restoration.take_when_loaded(ListView::Map, Some(&loaded)), Some(620.0));
    }

    #[test]
    fn network_error_keeps_the_reported_tier_and_hides_the_banner() {
        let mut controller = ResultController::new();
        let ticket = controller.begin(state("a")).expect("ticket for a");
        controller.resolve(ticket, Ok(result_for(&state("a"), 2)));
        let shown = controller.gated(&BannerDismissal::default()).expect("gated result");
        assert_eq!(shown.banner.map(|banner| banner.kind), Some(BannerKind::Informational));

        let ticket = controller.begin(state("b")).expect("ticket for b");
        controller.resolve(ticket, Err(FetchError::transient("Сервис недоступен")));

        assert_eq!(controller.displayed().map(|r| r.access_level), Some(AccessLevel::Full));
        let gated = controller.gated(&BannerDismissal::default()).expect("gated placeholder");
        assert_eq!(gated.banner, None);
        assert!(gated.items.is_empty());
    }
}

//! Hooks binding the route address, the filter panel and the result fetcher.

use std::future::Future;

use common::{
    address_sync::AddressSynchronizer,
    fetch_controller::{FetchTicket, ResultController},
    fetch_error::FetchError,
    mutation_scheduler::MutationScheduler,
    query_state::{QueryPatch, QueryState},
    search_result::FetchResult,
};
use dioxus::{core::Task, prelude::*};

use crate::{
    components::filter_components::filter_panel::FilterContext,
    data_definitions::url_param::AddressQuery,
    routes::Route,
};

/// Keeps the committed query state in step with the address and provides the
/// [`FilterContext`] for the filter panel below.
///
/// `route_for` builds the route of the current view for a new address, so the
/// catalog and the map share the same state handling.
pub fn use_filter_state(address: ReadSignal<AddressQuery>, route_for: fn(AddressQuery) -> Route) -> FilterContext {
    let mut sync = use_signal(|| AddressSynchronizer::from_address(address.peek().as_str()));
    let mut scheduler = use_signal(MutationScheduler::<Task>::default);
    let committed = use_memo(move || sync.read().current().clone());

    // address -> state; the synchronizer decides which pending edits go
    use_effect(move || {
        let incoming = address.read().clone();
        let navigation = sync.write().navigate(incoming.as_str(), &mut *scheduler.write());
        for timer in navigation.dropped_timers {
            timer.cancel();
        }
        if let Some(canonical) = navigation.replace_with {
            navigator().replace(route_for(AddressQuery(canonical)));
        }
    });

    // state -> address
    let commit = use_callback(move |patch: QueryPatch| {
        let next = sync.peek().current().with_patch(patch);
        let pushed = sync.write().on_commit(next);
        if let Some(address) = pushed {
            navigator().push(route_for(AddressQuery(address)));
        }
    });

    use_drop(move || {
        if let Ok(mut pending) = scheduler.try_write() {
            for timer in pending.discard_all() {
                timer.cancel();
            }
        }
    });

    use_context_provider(move || FilterContext { committed: committed.into(), scheduler, commit })
}

#[derive(Clone, Copy, PartialEq)]
pub struct ListingFetch {
    pub controller: Signal<ResultController>,
    pub retry: Callback<()>,
}

/// Fetches the committed state whenever it changes. Out-of-order responses are
/// sorted out by the controller; the previous task is also cancelled.
pub fn use_listing_fetch<F, Fut>(committed: ReadSignal<QueryState>, fetch: F) -> ListingFetch
where
    F: Fn(QueryState) -> Fut + Copy + 'static,
    Fut: Future<Output = Result<FetchResult, FetchError>> + 'static,
{
    let mut controller = use_signal(ResultController::new);
    let mut in_flight = use_signal(|| None::<Task>);

    let start_fetch = use_callback(move |ticket: FetchTicket| {
        if let Some(task) = in_flight.take() {
            task.cancel();
        }
        let task = spawn(async move {
            let outcome = fetch(ticket.state().clone()).await;
            controller.write().resolve(ticket, outcome);
        });
        in_flight.set(Some(task));
    });

    use_effect(move || {
        let state = committed.read().clone();
        let ticket = controller.write().begin(state);
        if let Some(ticket) = ticket {
            start_fetch.call(ticket);
        }
    });

    let retry = use_callback(move |_: ()| {
        let ticket = controller.write().retry();
        if let Some(ticket) = ticket {
            start_fetch.call(ticket);
        }
    });

    ListingFetch { controller, retry }
}

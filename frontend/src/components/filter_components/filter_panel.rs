//! Filter panel: free text, price range, category tree, bidding and ownership.
//!
//! Text and price edits go through the debounce scheduler. Every other control
//! commits right away.

use std::collections::BTreeSet;

use common::{
    mutation_scheduler::{EditableField, MutationScheduler},
    price_format::{digits_only, format_price_input, group_digits},
    query_state::{BiddingType, Ownership, QueryPatch, QueryState},
};
use dioxus::{core::Task, prelude::*};
use dioxus_free_icons::{Icon, icons::{md_action_icons::MdSearch, md_content_icons::MdClear}};
use gloo_timers::future::TimeoutFuture;

use crate::components::filter_components::category_tree_select::CategoryTreeSelect;

/// Shared by the catalog and map pages.
#[derive(Clone, Copy)]
pub struct FilterContext {
    pub committed: ReadSignal<QueryState>,
    pub scheduler: Signal<MutationScheduler<Task>>,
    pub commit: Callback<QueryPatch>,
}

#[component]
pub fn FilterPanel() -> Element {
    let FilterContext { committed, commit, .. } = use_context::<FilterContext>();
    let selected_categories = use_memo(move || committed.read().categories().clone());

    rsx! {
        div {
            id: "x-filter-panel",
            style: "
                display: flex;
                flex-direction: column;
                gap: 18px;
                padding: 16px;
                background-color: white;
                border-radius: 8px;
                border: 1px solid rgba(0,0,0,0.1);
                width: 320px;
                flex-shrink: 0;
            ",
            SearchTextInput {}
            FilterGroup {
                title: "Категории",
                CategoryTreeSelect {
                    selected: selected_categories,
                    on_change: move |categories: BTreeSet<String>| commit.call(QueryPatch::categories(categories)),
                }
            }
            FilterGroup {
                title: "Начальная цена, ₽",
                div {
                    style: "display: flex; flex-direction: row; gap: 8px;",
                    PriceInput { field: EditableField::PriceFrom, placeholder: "от" }
                    PriceInput { field: EditableField::PriceTo, placeholder: "до" }
                }
            }
            FilterGroup {
                title: "Тип торгов",
                ChoiceStrip {
                    labels: BiddingType::CHOICES.iter().map(|b| b.label().to_string()).collect::<Vec<_>>(),
                    active: BiddingType::CHOICES.iter().position(|b| *b == committed.read().bidding_type()).unwrap_or(0),
                    on_select: move |index: usize| {
                        if let Some(bidding_type) = BiddingType::CHOICES.get(index) {
                            commit.call(QueryPatch::bidding_type(*bidding_type));
                        }
                    },
                }
            }
            FilterGroup {
                title: "Форма собственности",
                ChoiceStrip {
                    labels: Ownership::CHOICES.iter().map(|o| o.label().to_string()).collect::<Vec<_>>(),
                    active: Ownership::CHOICES.iter().position(|o| *o == committed.read().ownership()).unwrap_or(0),
                    on_select: move |index: usize| {
                        if let Some(ownership) = Ownership::CHOICES.get(index) {
                            commit.call(QueryPatch::ownership(*ownership));
                        }
                    },
                }
            }
        }
    }
}

/// Records an edit; its timer commits every pending field once the window
/// passes without a newer edit on the same field.
fn use_schedule_edit() -> Callback<(EditableField, String)> {
    let FilterContext { mut scheduler, commit, .. } = use_context::<FilterContext>();
    use_callback(move |(field, value): (EditableField, String)| {
        let mut timer_scheduler = scheduler;
        let superseded = scheduler.write().schedule(field, value, move |ticket, window_ms| {
            spawn(async move {
                TimeoutFuture::new(window_ms).await;
                let fired = timer_scheduler.write().fire(field, ticket);
                if let Some(fired) = fired {
                    for timer in fired.orphaned_timers {
                        timer.cancel();
                    }
                    commit.call(fired.patch);
                }
            })
        });
        if let Some(timer) = superseded {
            timer.cancel();
        }
    })
}

#[component]
fn SearchTextInput() -> Element {
    let FilterContext { committed, scheduler, .. } = use_context::<FilterContext>();
    let schedule_edit = use_schedule_edit();
    let shown = use_memo(move || {
        scheduler
            .read()
            .pending_value(EditableField::SearchText)
            .map(str::to_string)
            .unwrap_or_else(|| committed.read().search_text().to_string())
    });

    rsx! {
        div {
            style: "
                display:flex;
                align-items:center;
                gap: 10px;
                background-color: white;
                border-radius: 9999px;
                padding: 8px 14px;
                border: 1px solid rgba(101, 101, 101, 0.8);
            ",
            Icon { icon: MdSearch, style: "width: 20px; height: 20px; color:#6B7280; flex-shrink: 0;" }
            input {
                r#type: "text",
                placeholder: "Поиск по лотам",
                style: "
                    flex:1;
                    min-width: 0;
                    border: none;
                    outline: none;
                    background: transparent;
                    font-size: 16px;
                    font-family: Roboto, sans-serif;
                ",
                value: "{shown}",
                oninput: move |event: Event<FormData>| schedule_edit.call((EditableField::SearchText, event.value())),
            }
            if !shown.read().is_empty() {
                ClearButton { onclick: move |_| schedule_edit.call((EditableField::SearchText, String::new())) }
            }
        }
    }
}

#[component]
fn PriceInput(field: EditableField, placeholder: String) -> Element {
    let FilterContext { committed, scheduler, .. } = use_context::<FilterContext>();
    let schedule_edit = use_schedule_edit();
    let shown = use_memo(move || {
        if let Some(pending) = scheduler.read().pending_value(field) {
            return format_price_input(pending);
        }
        let state = committed.read();
        let bound = match field {
            EditableField::PriceTo => state.price_to(),
            _ => state.price_from(),
        };
        bound.map(group_digits).unwrap_or_default()
    });

    rsx! {
        div {
            style: "
                display: flex;
                align-items: center;
                flex: 1;
                border: 1px solid rgba(101, 101, 101, 0.8);
                border-radius: 6px;
                padding: 6px 8px;
            ",
            input {
                r#type: "text",
                inputmode: "numeric",
                placeholder: "{placeholder}",
                style: "border: none; outline: none; width: 100%; font-size: 15px;",
                value: "{shown}",
                oninput: move |event: Event<FormData>| schedule_edit.call((field, digits_only(&event.value()))),
            }
            if !shown.read().is_empty() {
                ClearButton { onclick: move |_| schedule_edit.call((field, String::new())) }
            }
        }
    }
}

#[component]
fn ClearButton(onclick: Callback<()>) -> Element {
    rsx! {
        button {
            title: "Очистить",
            style: "border: none; background: none; cursor: pointer; padding: 0; display: flex;",
            onclick: move |_| onclick.call(()),
            Icon { icon: MdClear, style: "width: 18px; height: 18px; color: rgba(0,0,0,0.5);" }
        }
    }
}

#[component]
fn ChoiceStrip(labels: Vec<String>, active: usize, on_select: Callback<usize>) -> Element {
    rsx! {
        div {
            style: "display: flex; flex-direction: row; flex-wrap: wrap; gap: 6px;",
            for (index, label) in labels.into_iter().enumerate() {
                button {
                    key: "{label}",
                    style: "{choice_style(index == active)}",
                    onclick: move |_| on_select.call(index),
                    "{label}"
                }
            }
        }
    }
}

fn choice_style(active: bool) -> &'static str {
    if active {
        "border: 2px solid rgba(0,0,255,0.9); background: #E8F0FF; border-radius: 1000px; padding: 4px 12px; cursor: pointer;"
    } else {
        "border: 2px solid rgba(0,0,0,0.2); background: white; border-radius: 1000px; padding: 4px 12px; cursor: pointer;"
    }
}

#[component]
fn FilterGroup(title: String, children: Element) -> Element {
    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 8px;",
            span {
                style: "font-size: 14px; font-weight: 500; color: rgb(75, 87, 112);",
                "{title}"
            }
            {children}
        }
    }
}

//! Collapsible tri-state category picker.

use std::collections::BTreeSet;

use common::category_tree::{
    CategoryNode, ExpansionState, SelectionState, compute_parent_state, selection_summary, toggle_leaf, toggle_parent,
};
use dioxus::prelude::*;
use dioxus_free_icons::{
    Icon,
    icons::{
        md_navigation_icons::{MdArrowDropDown, MdChevronRight, MdExpandMore},
        md_toggle_icons::{MdCheckBox, MdCheckBoxOutlineBlank, MdIndeterminateCheckBox},
    },
};

use crate::data_definitions::category_taxonomy::load_taxonomy;

#[derive(Clone, Copy)]
struct CategoryTreeContext {
    selected: ReadSignal<BTreeSet<String>>,
    expansion: Signal<ExpansionState>,
    on_change: Callback<BTreeSet<String>>,
}

#[component]
pub fn CategoryTreeSelect(selected: ReadSignal<BTreeSet<String>>, on_change: Callback<BTreeSet<String>>) -> Element {
    let taxonomy = use_hook(load_taxonomy);
    let mut is_open = use_signal(|| false);
    let expansion = use_signal(ExpansionState::default);
    // parent names never reach the query state
    let leaf_taxonomy = taxonomy.clone();
    let emit_leaves = use_callback(move |next: BTreeSet<String>| on_change.call(leaf_taxonomy.retain_leaves(&next)));
    use_context_provider(move || CategoryTreeContext { selected, expansion, on_change: emit_leaves });

    let summary = use_memo(move || selection_summary(selected.read().len()));
    let tooltip = use_memo(move || selected.read().iter().cloned().collect::<Vec<_>>().join(", "));

    rsx! {
        button {
            title: "{tooltip}",
            style: "
                display: flex;
                align-items: center;
                justify-content: space-between;
                width: 100%;
                border: 1px solid rgba(101, 101, 101, 0.8);
                border-radius: 6px;
                padding: 6px 8px;
                background: white;
                cursor: pointer;
                font-size: 15px;
            ",
            onclick: move |_| is_open.toggle(),
            "{summary}"
            Icon { icon: MdArrowDropDown, style: "width: 20px; height: 20px;" }
        }
        if is_open() {
            ul {
                style: "list-style: none; margin: 0; padding: 0; max-height: 360px; overflow-y: auto;",
                for node in taxonomy.roots.iter().cloned() {
                    ParentRow { key: "{node.name}", node }
                }
            }
        }
    }
}

#[component]
fn ParentRow(node: ReadSignal<CategoryNode>) -> Element {
    let CategoryTreeContext { selected, mut expansion, on_change } = use_context::<CategoryTreeContext>();
    let state = use_memo(move || compute_parent_state(&node.read(), &selected.read()));
    let is_expanded = use_memo(move || expansion.read().is_expanded(&node.read().name));
    let childless = node.read().is_leaf();

    rsx! {
        li {
            div {
                class: "x-category-row",
                style: "display: flex; flex-direction: row; align-items: center; gap: 4px; padding: 2px;",
                button {
                    disabled: childless,
                    style: "border: none; background: none; padding: 0; display: flex; cursor: pointer;",
                    onclick: move |_| expansion.write().toggle(&node.read().name),
                    if is_expanded() {
                        Icon { icon: MdExpandMore, style: "width: 20px; height: 20px;" }
                    } else {
                        Icon { icon: MdChevronRight, style: "width: 20px; height: 20px;" }
                    }
                }
                button {
                    disabled: childless,
                    style: "border: none; background: none; padding: 0; display: flex; align-items: center; gap: 6px; cursor: pointer; font-size: 15px;",
                    onclick: move |_| {
                        let node = node.read();
                        let next = toggle_parent(&node, &selected.read());
                        expansion.write().after_parent_toggle(&node, &next);
                        on_change.call(next);
                    },
                    SelectionIcon { state: state() }
                    "{node.read().name}"
                }
            }
            if is_expanded() {
                ul {
                    style: "list-style: none; margin: 0; padding-left: 28px;",
                    for child in node.read().children.iter().cloned() {
                        if child.is_leaf() {
                            LeafRow { key: "{child.name}", name: child.name }
                        } else {
                            ParentRow { key: "{child.name}", node: child }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn LeafRow(name: ReadSignal<String>) -> Element {
    let CategoryTreeContext { selected, on_change, .. } = use_context::<CategoryTreeContext>();
    let state = use_memo(move || {
        if selected.read().contains(&*name.read()) { SelectionState::Checked } else { SelectionState::Unchecked }
    });
    rsx! {
        li {
            class: "x-category-row",
            style: "display: flex; align-items: center; gap: 6px; padding: 2px; cursor: pointer; font-size: 15px;",
            onclick: move |_| on_change.call(toggle_leaf(&name.read(), &selected.read())),
            SelectionIcon { state: state() }
            "{name}"
        }
    }
}

#[component]
fn SelectionIcon(state: SelectionState) -> Element {
    match state {
        SelectionState::Checked => rsx! { Icon { icon: MdCheckBox, style: "width: 22px; height: 22px; color: rgb(28, 33, 45); flex-shrink: 0;" } },
        SelectionState::Indeterminate => rsx! { Icon { icon: MdIndeterminateCheckBox, style: "width: 22px; height: 22px; color: rgb(28, 33, 45); flex-shrink: 0;" } },
        SelectionState::Unchecked => rsx! { Icon { icon: MdCheckBoxOutlineBlank, style: "width: 22px; height: 22px; color: black; flex-shrink: 0;" } },
    }
}

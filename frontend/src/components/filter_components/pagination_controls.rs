use common::pagination::{PageItem, has_next, has_previous, page_strip};
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_navigation_icons::{MdArrowBack, MdArrowForward}};

#[component]
pub fn PaginationControls(current: ReadSignal<u64>, total_pages: ReadSignal<u64>, on_select: Callback<u64>) -> Element {
    let strip = use_memo(move || page_strip(*current.read(), *total_pages.read()));
    let can_go_back = use_memo(move || has_previous(*current.read()));
    let can_go_forward = use_memo(move || has_next(*current.read(), *total_pages.read()));

    if *total_pages.read() <= 1 {
        return rsx! {};
    }
    rsx! {
        nav {
            style: "
                display: flex;
                flex-direction: row;
                align-items: center;
                justify-content: center;
                gap: 6px;
                padding: 16px;
            ",
            button {
                class: "x-page-button",
                title: "Предыдущая страница",
                disabled: !can_go_back(),
                style: "{PAGE_BUTTON_STYLE}",
                onclick: move |_| on_select.call(current() - 1),
                Icon { icon: MdArrowBack, style: "width: 18px; height: 18px;" }
            }
            for (index, item) in strip().into_iter().enumerate() {
                {match item {
                    PageItem::Page(page) => rsx! {
                        button {
                            key: "page-{page}",
                            class: "x-page-button",
                            style: "{page_button_style(page == current())}",
                            onclick: move |_| on_select.call(page),
                            "{page}"
                        }
                    },
                    PageItem::Gap => rsx! {
                        span { key: "gap-{index}", style: "color: rgba(0,0,0,0.5);", "..." }
                    },
                }}
            }
            button {
                class: "x-page-button",
                title: "Следующая страница",
                disabled: !can_go_forward(),
                style: "{PAGE_BUTTON_STYLE}",
                onclick: move |_| on_select.call(current() + 1),
                Icon { icon: MdArrowForward, style: "width: 18px; height: 18px;" }
            }
        }
    }
}

fn page_button_style(active: bool) -> String {
    if active {
        format!("{PAGE_BUTTON_STYLE} background: #1C212D; color: white;")
    } else {
        PAGE_BUTTON_STYLE.to_string()
    }
}

const PAGE_BUTTON_STYLE: &str = "
    min-width: 32px;
    height: 32px;
    background: white;
    border: none;
    border-radius: 8px;
    padding: 4px 8px;
    box-shadow: 0 2px 4px 0 rgba(0, 0, 0, 0.16);
    cursor: pointer;
";

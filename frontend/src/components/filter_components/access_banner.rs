use common::{
    access_gate::{Banner, BannerKind},
    search_result::AccessLevel,
};
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_content_icons::MdClear};

#[component]
pub fn AccessBanner(banner: ReadSignal<Banner>, on_dismiss: Callback<AccessLevel>) -> Element {
    let Banner { kind, level, text, links, .. } = banner.read().clone();
    let (background, border) = match kind {
        BannerKind::SignInPrompt => ("#FFF7E6", "#FFB020"),
        BannerKind::SubscribePrompt => ("#F0F5FF", "#367ED8"),
        BannerKind::Informational => ("white", "rgba(0,0,0,0.1)"),
    };

    rsx! {
        div {
            id: "x-access-banner",
            style: "
                display: flex;
                flex-direction: row;
                align-items: center;
                gap: 12px;
                background-color: {background};
                border: 1px solid {border};
                border-radius: 8px;
                padding: 10px 14px;
                font-size: 15px;
            ",
            span { style: "flex-grow: 1;", "{text}" }
            for link in links {
                a {
                    key: "{link.href}",
                    href: link.href,
                    style: "font-weight: 500; white-space: nowrap;",
                    "{link.label}"
                }
            }
            if kind == BannerKind::Informational {
                button {
                    title: "Скрыть",
                    style: "border: none; background: none; cursor: pointer; display: flex; padding: 0;",
                    onclick: move |_| on_dismiss.call(level),
                    Icon { icon: MdClear, style: "width: 18px; height: 18px; color: rgba(0,0,0,0.5);" }
                }
            }
        }
    }
}

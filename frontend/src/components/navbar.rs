//! Top navigation bar component.

use dioxus::prelude::*;

use crate::components::error_boundary::SectionErrorBoundary;
use crate::routes::Route;
use common::access_gate::SIGN_IN_HREF;
use common::query_state::QueryState;

use dioxus_free_icons::icons::md_action_icons::{MdAccountCircle, MdViewList};
use dioxus_free_icons::icons::md_maps_icons::MdMap;
use dioxus_free_icons::{Icon, IconShape};


/// Shared navbar component.
#[component]
pub fn Navbar() -> Element {
    rsx! {

        div {
            id:"x-nav-container",

            style:"
                display:flex;
                flex-direction: row;
                width: 100%;
                min-height: 100vh;
            ",


            div {
                id:"x-nav-sidebar",
                style:"
                    display:flex;
                    flex-direction: column;
                    gap: 40px;
                    width: 70px;
                    flex-shrink: 0;
                    background-color: #1C212D;
                    border: 1px solid #000000;
                    padding: 16px;
                    position: sticky;
                    top: 0;
                    height: 100vh;
                ",

                NavbarTopIconLinks{},

                // empty space
                div {
                    style: "flex-grow:1;"
                }
                // bottom part
                a {
                    href: SIGN_IN_HREF,
                    title: "Войти",
                    style: "color:white;",
                    Icon { icon: MdAccountCircle, style: "width: 26px; height: 26px;" }
                }
            },

            div {
                id:"x-page-container",
                style: "flex-grow:1; min-width: 100px;",
                SectionErrorBoundary {
                    section: "Страница",
                    Outlet::<Route> {}
                }
            }
        }

    }
}

#[component]
fn NavbarTopIconLinks() -> Element {
    rsx! {
        div {
            style: "
                display:flex;
                flex-direction: column;
                gap: 24px;
                width: 38px;
                align-items: center;
                justify-content: center;
            ",
            IconLink { to: Route::catalog_from_state(&QueryState::default()), icon: MdViewList, label: "Каталог" }
            IconLink { to: Route::map_from_state(&QueryState::default()), icon: MdMap, label: "Карта" }
        }
    }
}

#[component]
fn IconLink<T: IconShape + Clone + PartialEq + 'static> (to: Route, icon: T, label: String) -> Element {
    rsx! {
        Link {
            to: to,
            span {
                title: "{label}",
                style: "color:white;",
                Icon { icon: icon, style: "width: 26px; height: 26px;" }
            }
        }
    }
}

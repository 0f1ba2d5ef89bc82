//! Fallback rendering for failed views and failed catalog requests.

use dioxus::prelude::*;

const NOTICE_STYLE: &str = "
    display: flex;
    flex-direction: column;
    gap: 10px;
    background: white;
    border: 1px solid red;
    border-radius: 8px;
    padding: 14px 18px;
";

/// Catches render errors below it. The view can be retried in place or left
/// for the unfiltered catalog.
#[component]
pub fn SectionErrorBoundary(section: &'static str, children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: move |errors: ErrorContext| {
                let message = match errors.error() {
                    Some(error) => {
                        dioxus::logger::tracing::error!(section, error = ?error.0, "view failed to render");
                        format!("{:#?}", error.0)
                    }
                    None => "Неизвестная ошибка".to_string(),
                };
                rsx! {
                    ErrorNotice {
                        title: "Раздел «{section}» не удалось показать",
                        message,
                        div {
                            style: "display: flex; gap: 12px;",
                            button {
                                class: "x-page-button",
                                onclick: move |_| errors.clear_errors(),
                                "Повторить"
                            }
                            a { href: "/", "Вернуться к списку лотов" }
                        }
                    }
                }
            },
            {children}
        }
    }
}

#[component]
pub fn ErrorNotice(title: String, message: String, children: Element) -> Element {
    rsx! {
        div {
            style: NOTICE_STYLE,
            span { style: "color: red; font-size: 20px; font-weight: 500;", "{title}" }
            span { style: "color: darkred; white-space: pre-wrap;", "{message}" }
            {children}
        }
    }
}

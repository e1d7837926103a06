use dioxus::prelude::*;

use crate::app::Route;
use crate::infra::report::COMPANY_NAME;
use crate::ui::theme;
use crate::util::version::{version_label, APP_NAME};

#[component]
pub fn Shell(children: Element) -> Element {
    let current_route = use_route::<Route>();
    let nav = use_navigator();

    rsx! {
        div { class: "app-shell",
            header { class: "app-header",
                div {
                    h1 { "{APP_NAME}" }
                    p { class: "field-hint", "China → Nepal customs, freight and cargo tracking" }
                }
                nav { class: "nav",
                    NavButton { active: matches!(current_route, Route::Calculator {}), onclick: move |_| { nav.push(Route::Calculator {}); }, label: "Calculator" }
                    NavButton { active: matches!(current_route, Route::Tracking {}), onclick: move |_| { nav.push(Route::Tracking {}); }, label: "Tracking" }
                    NavButton { active: matches!(current_route, Route::Shipments {}), onclick: move |_| { nav.push(Route::Shipments {}); }, label: "Shipments" }
                    NavButton { active: matches!(current_route, Route::Contact {}), onclick: move |_| { nav.push(Route::Contact {}); }, label: "Contact" }
                    NavButton { active: matches!(current_route, Route::Settings {}), onclick: move |_| { nav.push(Route::Settings {}); }, label: "Settings" }
                }
            }
            main { class: "app-main",
                {children}
            }
            footer { class: "app-footer",
                "{COMPANY_NAME} · {version_label()}"
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    rsx! {
        button {
            class: "{theme::nav_button(active)}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}

//! Top navigation bar

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_location, use_navigate};

use crate::core::session::LOGIN_PATH;
use crate::ui::auth::use_auth_context;
use crate::ui::icon::{Icon, icons};

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth_context();

    view! {
        <nav class="navbar">
            <h1 class="navbar-title">
                <A href="/" attr:class="text-white">"Bin Collection"</A>
            </h1>
            {move || {
                if auth.is_authenticated() {
                    view! { <LoggedInLinks /> }.into_any()
                } else {
                    view! { <LoggedOutLinks /> }.into_any()
                }
            }}
        </nav>
    }
}

#[component]
fn LoggedInLinks() -> impl IntoView {
    let auth = use_auth_context();
    let navigate = use_navigate();

    let on_logout = move |_| {
        auth.logout();
        navigate(LOGIN_PATH, Default::default());
    };

    view! {
        <div class="navbar-links">
            <NavLink href="/profile">"Profile"</NavLink>
            <button class="navbar-button" on:click=on_logout>
                <Icon name=icons::LOGOUT class="w-4 h-4" />
                "Logout"
            </button>
        </div>
    }
}

#[component]
fn LoggedOutLinks() -> impl IntoView {
    view! {
        <div class="navbar-links">
            <NavLink href=LOGIN_PATH>"Login"</NavLink>
            <NavLink href="/register">"Register"</NavLink>
        </div>
    }
}

/// Link highlighted while its path is the current location
#[component]
fn NavLink(href: &'static str, children: Children) -> impl IntoView {
    let location = use_location();
    let is_active = move || location.pathname.get() == href;

    view! {
        <A
            href=href
            attr:class=move || {
                if is_active() { "navbar-link navbar-link-active" } else { "navbar-link" }
            }
        >
            {children()}
        </A>
    }
}

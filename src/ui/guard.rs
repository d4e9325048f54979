//! Route gate
//!
//! Wraps a page and runs the navigation guard when the page is entered.
//! The server cannot see browser storage, so until hydration the gate
//! renders a spinner instead of guessing.

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::core::session::{Proceed, RedirectTo, RouteAccess};
use crate::ui::auth::use_auth_context;
use crate::ui::common::LoadingSpinner;

#[component]
pub fn Guarded(access: RouteAccess, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth_context();

    move || {
        if !auth.ready.get() {
            return view! { <LoadingSpinner /> }.into_any();
        }

        // Evaluated once per entry; session changes do not re-run it.
        match auth.evaluate(access) {
            Ok(Proceed) => children().into_any(),
            Err(RedirectTo { path }) => view! { <Redirect path=path /> }.into_any(),
        }
    }
}

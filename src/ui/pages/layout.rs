//! Shell shared by every page that requires a session

use leptos::prelude::*;

use crate::core::session::RouteAccess;
use crate::ui::guard::Guarded;
use crate::ui::navbar::Navbar;

#[component]
pub fn ProtectedLayout(children: ChildrenFn) -> impl IntoView {
    view! {
        <Guarded access=RouteAccess::Protected>
            <div class="w-full">
                <Navbar />
                <main class="page">{children()}</main>
            </div>
        </Guarded>
    }
}

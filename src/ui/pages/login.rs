//! Login page component
//!
//! Only reachable without a session; navigates home on success.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::core::session::{HOME_PATH, RouteAccess};
use crate::ui::auth::LoginForm;
use crate::ui::guard::Guarded;

#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <Guarded access=RouteAccess::LoginOnly>
            <LoginView />
        </Guarded>
    }
}

#[component]
fn LoginView() -> impl IntoView {
    let on_success = move |_| {
        let navigate = use_navigate();
        navigate(HOME_PATH, Default::default());
    };

    view! {
        <main class="min-h-screen flex items-center justify-center p-4">
            <div class="w-full max-w-md">
                <LoginForm on_success=Callback::new(on_success) />
            </div>
        </main>
    }
}

//! Home page: greeting and the next collection

use leptos::prelude::*;
use leptos_router::components::A;

use super::layout::ProtectedLayout;
use crate::core::session::CurrentUser;
use crate::ui::auth::use_current_user;
use crate::ui::common::{ErrorMessage, LoadingSpinner};
use crate::ui::next_collection::NextCollection;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <ProtectedLayout>
            <Overview />
        </ProtectedLayout>
    }
}

#[component]
fn Overview() -> impl IntoView {
    let query = use_current_user();

    move || match query.user.get() {
        CurrentUser::Ready(user) => view! {
            <section class="card">
                <h2 class="text-2xl font-semibold">{format!("Welcome back, {}", user.name)}</h2>
                <NextCollection />
                <A href="/profile" attr:class="text-accent-primary">"View your settings"</A>
            </section>
        }
        .into_any(),
        // Absent is transient here: the gate already required a session.
        CurrentUser::Pending | CurrentUser::Absent => view! {
            <ErrorMessage error=query.error />
            <Show when=move || query.error.get().is_none()>
                <LoadingSpinner />
            </Show>
        }
        .into_any(),
    }
}

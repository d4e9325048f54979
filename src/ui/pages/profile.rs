//! User profile page
//!
//! Read-only view of the signed-in user's reminder settings.

use leptos::prelude::*;

use super::layout::ProtectedLayout;
use crate::core::models::UserProfile;
use crate::core::session::CurrentUser;
use crate::ui::auth::use_current_user;
use crate::ui::common::{ErrorMessage, LoadingSpinner};
use crate::ui::next_collection::NextCollection;

/// Profile page component
#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <ProtectedLayout>
            <ProfileSettings />
        </ProtectedLayout>
    }
}

#[component]
fn ProfileSettings() -> impl IntoView {
    let query = use_current_user();

    move || match query.user.get() {
        CurrentUser::Ready(user) => view! { <SettingsCard user=user /> }.into_any(),
        CurrentUser::Pending | CurrentUser::Absent => view! {
            <ErrorMessage error=query.error />
            <Show when=move || query.error.get().is_none()>
                <LoadingSpinner />
            </Show>
        }
        .into_any(),
    }
}

#[component]
fn SettingsCard(user: UserProfile) -> impl IntoView {
    let phone = user.phone_number.clone().unwrap_or_default();
    let reminder = user.reminder_label();

    view! {
        <div class="flex justify-center gap-8">
            <section class="card">
                <p>{format!("Hi, {}, here are your settings", user.name)}</p>
                <dl class="settings">
                    <SettingRow label="Email" value=user.email />
                    <SettingRow label="Phone" value=phone />
                    <SettingRow label="Address" value=user.address />
                    <SettingRow
                        label="Preferred contact method"
                        value=user.preferred_contact_method.to_string()
                    />
                    <SettingRow label="Reminder time" value=reminder />
                </dl>
            </section>
            <section class="card">
                <NextCollection />
            </section>
        </div>
    }
}

#[component]
fn SettingRow(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="setting-row">
            <dt>{format!("{}:", label)}</dt>
            <dd>{value}</dd>
        </div>
    }
}

//! Inline form messages

use crate::ui::{Icon, icons};
use leptos::prelude::*;

/// Error message with an alert icon, hidden while `error` is `None`
#[component]
pub fn ErrorMessage(
    #[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some()>
            <div class="error-message" role="alert">
                <Icon name=icons::ALERT_CIRCLE class="icon-text"/>
                <span>{move || error.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

/// Field-level validation hint
#[component]
pub fn FieldError(
    #[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
    move || {
        error.get().map(|message| {
            view! { <p class="mt-1 text-sm text-red-500">{message}</p> }
        })
    }
}

//! Login form component
//!
//! Email/password form bound to the auth context.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::context::use_auth_context;
use crate::core::validation::{validate_email, validate_password};
use crate::ui::common::{FieldError, InlineSpinner};
use crate::ui::icon::{Icon, icons};

/// Login form component
#[component]
pub fn LoginForm(
    /// Callback when login is successful
    #[prop(optional, into)]
    on_success: Option<Callback<()>>,
) -> impl IntoView {
    let auth = use_auth_context();

    // Form state
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);

    // Form validation
    let email_error = RwSignal::new(None::<String>);
    let password_error = RwSignal::new(None::<String>);

    let validate_email_field = move || match validate_email(&email.get()) {
        Ok(()) => {
            email_error.set(None);
            true
        }
        Err(e) => {
            email_error.set(Some(e.to_string()));
            false
        }
    };

    let validate_password_field = move || match validate_password(&password.get()) {
        Ok(()) => {
            password_error.set(None);
            true
        }
        Err(e) => {
            password_error.set(Some(e.to_string()));
            false
        }
    };

    // Handle form submission
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        if auth.loading.get_untracked() {
            return;
        }

        auth.clear_error();

        let email_valid = validate_email_field();
        let password_valid = validate_password_field();
        if !email_valid || !password_valid {
            return;
        }

        let email_val = email.get_untracked().trim().to_string();
        let password_val = password.get_untracked();

        spawn_local(async move {
            // Failures are already recorded in the auth context
            if auth.login(email_val, password_val).await.is_ok() {
                if let Some(callback) = on_success {
                    callback.run(());
                }
            }
        });
    };

    view! {
        <form on:submit=on_submit class="login-form space-y-4" novalidate=true>
            <h1 class="text-3xl font-bold text-accent-primary text-center">
                "Bin Collection Reminders"
            </h1>

            // Email field
            <div>
                <input
                    type="email"
                    id="username"
                    name="username"
                    autocomplete="email"
                    placeholder="Email"
                    required=true
                    class="form-input"
                    class:border-red-500=move || email_error.get().is_some() || auth.error.get().is_some()
                    prop:value=move || email.get()
                    on:input=move |ev| {
                        email.set(event_target_value(&ev));
                        email_error.set(None);
                    }
                    on:blur=move |_| { validate_email_field(); }
                />
                <FieldError error=email_error />
            </div>

            // Password field
            <div>
                <div class="relative">
                    <input
                        type=move || if show_password.get() { "text" } else { "password" }
                        id="password"
                        name="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        required=true
                        class="form-input pr-10"
                        class:border-red-500=move || password_error.get().is_some() || auth.error.get().is_some()
                        prop:value=move || password.get()
                        on:input=move |ev| {
                            password.set(event_target_value(&ev));
                            password_error.set(None);
                        }
                    />
                    <button
                        type="button"
                        class="password-toggle absolute inset-y-0 right-0 pr-3 flex items-center"
                        aria-label=move || if show_password.get() { "Hide password" } else { "Show password" }
                        on:click=move |_| show_password.update(|v| *v = !*v)
                    >
                        {move || {
                            if show_password.get() {
                                view! { <Icon name=icons::EYE_CLOSED class="h-5 w-5" /> }.into_any()
                            } else {
                                view! { <Icon name=icons::EYE class="h-5 w-5" /> }.into_any()
                            }
                        }}
                    </button>
                </div>
                <FieldError error=password_error />
                <FieldError error=auth.error />
            </div>

            <a href="/recover-password" class="text-accent-primary">"Forgot password?"</a>

            // Submit button
            <button
                type="submit"
                class="btn-primary w-full"
                disabled=move || auth.loading.get()
            >
                {move || {
                    if auth.loading.get() {
                        view! {
                            <span class="flex items-center justify-center gap-2">
                                <InlineSpinner />
                                "Logging in..."
                            </span>
                        }.into_any()
                    } else {
                        view! { <span class="block">"Log In"</span> }.into_any()
                    }
                }}
            </button>

            <p class="text-center text-sm">
                "Don't have an account? "
                <a href="/signup" class="text-accent-primary font-medium">"Sign up"</a>
            </p>
        </form>
    }
}

#[cfg(test)]
mod tests {
    const STYLESHEET: &str = include_str!("../../../style/main.css");

    fn is_styled(class: &str) -> bool {
        STYLESHEET.contains(&format!(".{} {{", class)) || STYLESHEET.contains(&format!(".{} >", class))
    }

    #[test]
    fn test_password_toggle_classes_are_styled() {
        for class in [
            "relative",
            "absolute",
            "inset-y-0",
            "right-0",
            "pr-3",
            "pr-10",
            "password-toggle",
            "flex",
            "items-center",
        ] {
            assert!(is_styled(class), "missing rule for .{}", class);
        }
    }

    #[test]
    fn test_form_layout_classes_are_styled() {
        for class in ["space-y-4", "w-full", "text-center", "text-sm", "gap-2", "block"] {
            assert!(is_styled(class), "missing rule for .{}", class);
        }
    }
}

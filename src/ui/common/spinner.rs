use leptos::prelude::*;

/// Spinner size options
#[derive(Clone, Copy, PartialEq)]
pub enum SpinnerSize {
    Small,
    Medium,
    Large,
}

impl SpinnerSize {
    fn class(&self) -> &'static str {
        match self {
            SpinnerSize::Small => "spinner-sm",
            SpinnerSize::Medium => "spinner-md",
            SpinnerSize::Large => "spinner-xl",
        }
    }
}

/// Loading spinner component
#[component]
pub fn Spinner(
    #[prop(default = SpinnerSize::Medium)] size: SpinnerSize,
    /// Optional label text
    #[prop(default = String::new())]
    label: String,
    /// Center the spinner in the full viewport
    #[prop(default = false)]
    centered: bool,
) -> impl IntoView {
    let container_class = if centered {
        "spinner-container spinner-centered"
    } else {
        "spinner-container"
    };

    view! {
        <div class=container_class>
            <div class=format!("spinner {}", size.class()) role="status" aria-live="polite">
                <div class="spinner-circle-inner"></div>
                <span class="sr-only">"Loading..."</span>
            </div>
            {(!label.is_empty()).then(|| view! {
                <div class="spinner-label">{label.clone()}</div>
            })}
        </div>
    }
}

/// Full-height spinner shown while a page waits for data
#[component]
pub fn LoadingSpinner(
    #[prop(default = String::new())] message: String,
) -> impl IntoView {
    view! { <Spinner size=SpinnerSize::Large label=message centered=true /> }
}

/// Inline spinner for buttons
#[component]
pub fn InlineSpinner() -> impl IntoView {
    view! { <Spinner size=SpinnerSize::Small /> }
}

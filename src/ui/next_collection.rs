use chrono::Local;
use leptos::prelude::*;

use crate::ui::auth::use_next_collections;

/// "Your next collection is on: ..." line
#[component]
pub fn NextCollection() -> impl IntoView {
    let collections = use_next_collections();

    let summary = move || {
        let loaded = collections.get()?;
        let now = Local::now().naive_local();
        let next = loaded.next_after(now)?;
        Some(format!(
            "{} ({})",
            next.collection_date.format("%A %-d %B %Y"),
            next.bin_type.label()
        ))
    };

    view! {
        <div class="next-collection">
            "Your next collection is on: "
            <span class="font-semibold">
                {move || summary().unwrap_or_else(|| "-".to_string())}
            </span>
        </div>
    }
}

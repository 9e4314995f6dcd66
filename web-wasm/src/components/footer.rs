//! フッターコンポーネント

use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    let year = js_sys::Date::new_0().get_full_year();

    view! {
        <footer class="footer">
            <p class="text-muted">{format!("Copyright © Photo Gallery {}.", year)}</p>
        </footer>
    }
}

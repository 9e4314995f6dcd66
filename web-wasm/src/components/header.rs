//! ヘッダーコンポーネント（タイトル・検索欄・アップロード）

use leptos::prelude::*;

#[component]
pub fn Header<F>(search_input: Signal<String>, on_search: F, children: Children) -> impl IntoView
where
    F: Fn(String) + 'static,
{
    view! {
        <header class="header">
            <div class="brand">
                <span class="brand-icon">"📷"</span>
                <h1>"Photo Gallery"</h1>
            </div>
            <div class="header-actions">
                <input
                    type="search"
                    class="search-input"
                    placeholder="Search by Tag or Title"
                    prop:value=move || search_input.get()
                    on:input=move |ev| on_search(event_target_value(&ev))
                />
                {children()}
            </div>
        </header>
    }
}

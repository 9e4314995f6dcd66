//! ページ番号ボタン

use leptos::prelude::*;

/// 読み込み中はすべてのボタンを無効化する
#[component]
pub fn Pagination<F>(
    current_page: Signal<u32>,
    pages: Signal<Vec<u32>>,
    is_loading: Signal<bool>,
    on_page: F,
) -> impl IntoView
where
    F: Fn(u32) + Copy + Send + Sync + 'static,
{
    view! {
        <nav class="pagination">
            <For
                each=move || pages.get()
                key=|page| *page
                children=move |page| {
                    view! {
                        <button
                            class="btn btn-page"
                            class:active=move || current_page.get() == page
                            disabled=move || is_loading.get()
                            on:click=move |_| on_page(page)
                        >
                            {page}
                        </button>
                    }
                }
            />
        </nav>
    }
}

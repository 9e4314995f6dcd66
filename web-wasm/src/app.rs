//! メインアプリケーションコンポーネント
//!
//! 状態遷移はすべて [`GalleryController`] が持ち、ここではfetchとタイマーを繋ぐだけ。

use crate::api;
use crate::components::{
    footer::Footer,
    header::Header,
    image_dialog::DeleteErrorDialog,
    image_grid::ImageGrid,
    pagination::Pagination,
    uploader::Uploader,
};
use gloo::console;
use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use photo_gallery_common::{
    FetchOutcome, FetchRequest, GalleryController, GalleryView, PublicConfig, DEFAULT_PAGE_SIZE,
};

const TOAST_MILLIS: u32 = 3000;

/// 削除失敗ダイアログの内容
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteFailure {
    pub id: String,
    pub error: String,
}

/// 画面の表示状態（コントローラから都度導出）
#[derive(Debug, Clone, PartialEq)]
enum Screen {
    Loading,
    Failed(String),
    Empty { message: String, offer_upload: bool },
    Grid,
}

/// 一覧を取得してコントローラへ結果を渡す
///
/// 古いリクエストの結果はコントローラ側で破棄される。
fn run_fetch(controller: RwSignal<GalleryController>, request: FetchRequest) {
    if request.cursor_missing {
        console::warn!(format!(
            "page {}: cursor for previous page is unknown, fetching without it",
            request.page
        ));
    }
    console::log!(format!(
        "Fetching page {}, Search: \"{}\"",
        request.page, request.term
    ));

    spawn_local(async move {
        let result = api::list_images(&request.query).await;
        if let Err(e) = &result {
            console::error!(format!(
                "Error fetching page {} with search \"{}\": {}",
                request.page, request.term, e
            ));
        }

        let outcome = controller.try_update(|c| c.complete(request.seq, result));
        if outcome == Some(FetchOutcome::Stale) {
            console::log!(format!("discarded stale response (seq {})", request.seq));
        }
    });
}

#[component]
pub fn App() -> impl IntoView {
    let controller = RwSignal::new(GalleryController::new(DEFAULT_PAGE_SIZE));
    let public_config = RwSignal::new(None::<PublicConfig>);
    let toast = RwSignal::new(None::<String>);
    let delete_failure = RwSignal::new(None::<DeleteFailure>);

    // 差し替えると前のタイマーはdropされて取り消される
    let search_timer = StoredValue::new_local(None::<Timeout>);

    // 起動時: ページサイズを取得してから1ページ目を読み込む
    spawn_local(async move {
        let page_size = match api::public_config().await {
            Ok(config) => {
                let page_size = config.page_size;
                public_config.set(Some(config));
                page_size
            }
            Err(e) => {
                console::warn!(format!("Failed to load config: {}", e));
                DEFAULT_PAGE_SIZE
            }
        };

        // 入力中の検索語と保留中のデバウンスはそのまま残す
        let request = controller.try_update(|c| {
            c.set_page_size(page_size);
            c.start()
        });
        if let Some(request) = request {
            run_fetch(controller, request);
        }
    });

    let show_toast = move |message: String| {
        toast.set(Some(message));
        Timeout::new(TOAST_MILLIS, move || {
            toast.set(None);
        })
        .forget();
    };

    let on_search = move |value: String| {
        let Some(ticket) = controller.try_update(|c| c.edit_search(value)) else {
            return;
        };
        let delay = controller.with_untracked(|c| c.debounce_delay());

        let timer = Timeout::new(delay.as_millis() as u32, move || {
            if let Some(Some(request)) = controller.try_update(|c| c.settle_search(ticket)) {
                run_fetch(controller, request);
            }
        });
        search_timer.set_value(Some(timer));
    };

    let on_page = move |page: u32| {
        if let Some(Some(request)) = controller.try_update(|c| c.click_page(page)) {
            run_fetch(controller, request);
        }
    };

    let on_deleted = move || {
        show_toast("Image deleted successfully!".to_string());
        if let Some(request) = controller.try_update(|c| c.image_deleted()) {
            run_fetch(controller, request);
        }
    };

    let on_delete_failed = move |id: String, error: String| {
        console::error!(format!("Failed to delete \"{}\": {}", id, error));
        delete_failure.set(Some(DeleteFailure { id, error }));
    };

    let screen = Memo::new(move |_| {
        controller.with(|c| match c.view() {
            GalleryView::Loading => Screen::Loading,
            GalleryView::Failed(error) => Screen::Failed(error.to_string()),
            GalleryView::Empty => Screen::Empty {
                message: c.empty_message(),
                offer_upload: c.debounced_term().is_empty(),
            },
            GalleryView::Grid(_) => Screen::Grid,
        })
    });

    let images = Signal::derive(move || controller.with(|c| c.images().to_vec()));
    let search_input = Signal::derive(move || controller.with(|c| c.search_input().to_string()));
    let heading = move || controller.with(|c| c.results_heading()).unwrap_or_default();
    let config = Signal::derive(move || public_config.get());

    view! {
        <div class="container">
            <Header search_input=search_input on_search=on_search>
                <Uploader config=config on_notice=show_toast />
            </Header>

            <main class="gallery">
                <h2 class="results-heading">{heading}</h2>

                {move || match screen.get() {
                    Screen::Loading => view! {
                        <div class="loading">
                            <div class="spinner" />
                            <p>"Loading Images..."</p>
                        </div>
                    }.into_any(),
                    Screen::Failed(error) => view! {
                        <div class="error-state">{format!("Error: {}", error)}</div>
                    }.into_any(),
                    Screen::Empty { message, offer_upload } => view! {
                        <div class="empty-state">
                            <p>{message}</p>
                            {offer_upload.then(|| view! { <Uploader config=config on_notice=show_toast /> })}
                        </div>
                    }.into_any(),
                    Screen::Grid => view! {
                        <ImageGrid
                            images=images
                            on_deleted=on_deleted
                            on_delete_failed=on_delete_failed
                        />
                    }.into_any(),
                }}

                <Show when=move || controller.with(|c| c.show_pagination() && c.error().is_none())>
                    <Pagination
                        current_page=Signal::derive(move || controller.with(|c| c.current_page()))
                        pages=Signal::derive(move || controller.with(|c| c.page_numbers().collect::<Vec<_>>()))
                        is_loading=Signal::derive(move || controller.with(|c| c.is_loading()))
                        on_page=on_page
                    />
                </Show>
            </main>

            <Footer />

            <Show when=move || toast.get().is_some()>
                <div class="toast">{move || toast.get().unwrap_or_default()}</div>
            </Show>

            <DeleteErrorDialog failure=delete_failure />
        </div>
    }
}

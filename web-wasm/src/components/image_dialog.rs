//! 画像の詳細ダイアログと削除
//!
//! 削除は確認 → DELETE → 成功なら `on_deleted`、失敗なら `on_delete_failed`。
//! 一覧の取得失敗とは別に、削除の失敗は専用のダイアログで知らせる。

use crate::api;
use crate::app::DeleteFailure;
use leptos::prelude::*;
use leptos::task::spawn_local;
use photo_gallery_common::ImageResource;

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[component]
pub fn ImageDialog<FD, FE>(image: ImageResource, on_deleted: FD, on_delete_failed: FE) -> impl IntoView
where
    FD: Fn() + Copy + Send + Sync + 'static,
    FE: Fn(String, String) + Copy + Send + Sync + 'static,
{
    let (open, set_open) = signal(false);
    let (deleting, set_deleting) = signal(false);

    let handle_delete = {
        let public_id = image.public_id.clone();
        move |_| {
            if public_id.is_empty() || deleting.get_untracked() {
                return;
            }
            if !confirm(&format!("Are you sure you want to delete \"{}\"?", public_id)) {
                return;
            }

            let id = public_id.clone();
            set_deleting.set(true);
            spawn_local(async move {
                let result = api::delete_image(&id).await;
                set_deleting.try_set(false);
                match result {
                    Ok(_) => {
                        set_open.try_set(false);
                        on_deleted();
                    }
                    Err(error) => on_delete_failed(id, error),
                }
            });
        }
    };

    let title = image.title().to_string();
    let dimensions = format!("Dimensions: {}", image.dimensions());
    let url = image.secure_url.clone();
    let alt = image.display_name.clone();
    let (width, height) = (image.width.to_string(), image.height.to_string());

    view! {
        <button class="thumbnail" on:click=move |_| set_open.set(true)>
            <img src=url.clone() alt=alt.clone() width=width height=height loading="lazy" />
        </button>

        <Show when=move || open.get()>
            <div class="dialog-backdrop" on:click=move |_| set_open.set(false)>
                <div class="dialog" on:click=|ev| ev.stop_propagation()>
                    <div class="dialog-title">
                        <p>{title.clone()}</p>
                        <div class="dialog-actions">
                            <button
                                class="btn btn-danger"
                                title="Delete image"
                                disabled=move || deleting.get()
                                on:click=handle_delete.clone()
                            >
                                {move || if deleting.get() { "Deleting..." } else { "Delete" }}
                            </button>
                            <button
                                class="btn btn-secondary"
                                title="Close"
                                on:click=move |_| set_open.set(false)
                            >
                                "Close"
                            </button>
                        </div>
                    </div>
                    <div class="dialog-content">
                        <img src=url.clone() alt=alt.clone() />
                        <p class="text-muted">{dimensions.clone()}</p>
                    </div>
                </div>
            </div>
        </Show>
    }
}

/// 削除失敗の通知ダイアログ
#[component]
pub fn DeleteErrorDialog(failure: RwSignal<Option<DeleteFailure>>) -> impl IntoView {
    view! {
        {move || failure.get().map(|f| view! {
            <div class="dialog-backdrop">
                <div class="dialog dialog-error" role="alertdialog">
                    <div class="dialog-title">
                        <p>"Delete failed"</p>
                    </div>
                    <div class="dialog-content alert-error">
                        {format!("An error occurred while deleting item \"{}\":", f.id)}
                        <pre>{f.error}</pre>
                    </div>
                    <div class="dialog-actions">
                        <button class="btn" on:click=move |_| failure.set(None)>"Close"</button>
                    </div>
                </div>
            </div>
        })}
    }
}

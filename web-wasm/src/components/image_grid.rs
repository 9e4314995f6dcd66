//! 画像グリッド（マソンリー）

use crate::components::image_dialog::ImageDialog;
use leptos::prelude::*;
use photo_gallery_common::ImageResource;

#[component]
pub fn ImageGrid<FD, FE>(
    images: Signal<Vec<ImageResource>>,
    on_deleted: FD,
    on_delete_failed: FE,
) -> impl IntoView
where
    FD: Fn() + Copy + Send + Sync + 'static,
    FE: Fn(String, String) + Copy + Send + Sync + 'static,
{
    view! {
        <div class="image-grid">
            <For
                each=move || images.get()
                key=|image| image.asset_id.clone()
                children=move |image| {
                    view! {
                        <div class="image-item">
                            <ImageDialog
                                image=image
                                on_deleted=on_deleted
                                on_delete_failed=on_delete_failed
                            />
                        </div>
                    }
                }
            />
        </div>
    }
}

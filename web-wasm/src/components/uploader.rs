//! アップロードボタン
//!
//! 1枚以上アップロードされた状態でウィジェットが閉じられたら、
//! 通知を出して少し待ってからページを再読み込みする。

use crate::upload_widget;
use gloo::console;
use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use photo_gallery_common::PublicConfig;

const RELOAD_DELAY_MILLIS: u32 = 1200;

fn reload_page() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().reload() {
            console::error!(format!("reload failed: {:?}", e));
        }
    }
}

#[component]
pub fn Uploader<F>(config: Signal<Option<PublicConfig>>, on_notice: F) -> impl IntoView
where
    F: Fn(String) + Copy + Send + Sync + 'static,
{
    let (busy, set_busy) = signal(false);

    // クラウド名とプリセットが揃っていなければ押せない
    let target = move || {
        config.get().and_then(|c| match (c.cloud_name, c.upload_preset) {
            (Some(cloud), Some(preset)) if !cloud.is_empty() && !preset.is_empty() => Some((cloud, preset)),
            _ => None,
        })
    };

    let on_click = move |_| {
        let Some((cloud_name, upload_preset)) = target() else {
            return;
        };

        set_busy.set(true);
        spawn_local(async move {
            let result = upload_widget::open(&cloud_name, &upload_preset).await;
            set_busy.try_set(false);

            match result {
                Ok(0) => {}
                Ok(count) => {
                    console::log!(format!("uploaded {} file(s)", count));
                    on_notice("Successfully uploaded!".to_string());
                    Timeout::new(RELOAD_DELAY_MILLIS, reload_page).forget();
                }
                Err(e) => {
                    console::error!(e.clone());
                    on_notice(e);
                }
            }
        });
    };

    view! {
        <button
            class="btn btn-primary upload-button"
            disabled=move || busy.get() || target().is_none()
            on:click=on_click
        >
            "⬆ Upload files"
        </button>
    }
}

//! アップロードウィジェット（JS側に委譲）

use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/js/upload-widget.js")]
extern "C" {
    /// ウィジェットを開き、閉じられたら `{ uploaded: number }` で解決する
    #[wasm_bindgen(js_name = "openUploadWidget", catch)]
    async fn open_upload_widget_js(cloud_name: &str, upload_preset: &str) -> Result<JsValue, JsValue>;
}

#[derive(Debug, Default, Deserialize)]
struct WidgetClosed {
    #[serde(default)]
    uploaded: u32,
}

/// ウィジェットでアップロードし、成功した枚数を返す
pub async fn open(cloud_name: &str, upload_preset: &str) -> Result<u32, String> {
    let value = open_upload_widget_js(cloud_name, upload_preset)
        .await
        .map_err(|e| format!("アップロード失敗: {:?}", e))?;

    let closed: WidgetClosed =
        serde_wasm_bindgen::from_value(value).map_err(|e| format!("アップロード失敗: {}", e))?;
    Ok(closed.uploaded)
}

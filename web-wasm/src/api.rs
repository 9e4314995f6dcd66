//! ギャラリーAPI呼び出し（同一オリジンのサーバーへfetch）

use photo_gallery_common::{
    api_error_message, DeleteRequest, ListQuery, ListResponse, PublicConfig,
};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response, UrlSearchParams};

const IMAGES_PATH: &str = "/images";
const CONFIG_PATH: &str = "/config";

/// 一覧取得
pub async fn list_images(query: &ListQuery) -> Result<ListResponse, String> {
    let url = list_url(query)?;
    let response = send("GET", &url, None).await?;
    read_json(response, "Failed to fetch images").await
}

/// 削除（成功時はメディアサービスの結果をそのまま返す）
pub async fn delete_image(public_id: &str) -> Result<serde_json::Value, String> {
    let body = serde_json::to_string(&DeleteRequest::new(public_id)).map_err(|e| e.to_string())?;
    let response = send("DELETE", IMAGES_PATH, Some(body)).await?;
    read_json(response, "Failed to delete image").await
}

pub async fn public_config() -> Result<PublicConfig, String> {
    let response = send("GET", CONFIG_PATH, None).await?;
    read_json(response, "Failed to load config").await
}

/// `/images?max_results=..&next_cursor=..&search=..`
pub fn list_url(query: &ListQuery) -> Result<String, String> {
    let params = UrlSearchParams::new().map_err(js_error)?;
    params.append("max_results", &query.max_results.to_string());
    if let Some(cursor) = &query.next_cursor {
        params.append("next_cursor", cursor);
    }
    if let Some(search) = &query.search {
        params.append("search", search);
    }

    Ok(format!("{}?{}", IMAGES_PATH, String::from(params.to_string())))
}

async fn send(method: &str, url: &str, body: Option<String>) -> Result<Response, String> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::SameOrigin);
    if let Some(body) = &body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_error)?;
    }

    let window = web_sys::window().ok_or_else(|| "window is not available".to_string())?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    value.dyn_into::<Response>().map_err(js_error)
}

/// 失敗時も本文を読み、`{ "error": ... }` があればそれを使う
async fn read_json<T: DeserializeOwned>(response: Response, action: &str) -> Result<T, String> {
    let text = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    let body = text.as_string().unwrap_or_default();

    if !response.ok() {
        return Err(failure_message(&body, action, &response.status_text()));
    }

    serde_json::from_str(&body).map_err(|e| e.to_string())
}

fn failure_message(body: &str, action: &str, status_text: &str) -> String {
    api_error_message(body, &format!("{}: {}", action, status_text))
}

fn js_error(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message_prefers_body() {
        let message = failure_message(
            r#"{"error":"Failed to fetch images"}"#,
            "Failed to fetch images",
            "Internal Server Error",
        );
        assert_eq!(message, "Failed to fetch images");
    }

    #[test]
    fn test_failure_message_falls_back_to_status_text() {
        let message = failure_message("<html>bad gateway</html>", "Failed to fetch images", "Bad Gateway");
        assert_eq!(message, "Failed to fetch images: Bad Gateway");
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_list_url_encodes_search() {
        let query = ListQuery::new(12)
            .with_cursor(Some("abc123".into()))
            .with_search(Some("red car".into()));
        let url = list_url(&query).unwrap();
        assert_eq!(url, "/images?max_results=12&next_cursor=abc123&search=red+car");
    }

    #[wasm_bindgen_test]
    fn wasm_list_url_first_page() {
        let url = list_url(&ListQuery::new(12)).unwrap();
        assert_eq!(url, "/images?max_results=12");
    }
}

//! バックエンドAPI呼び出し（fetch）
//!
//! 応答の解釈は`UploadClient::complete_submit`に任せ、ここでは生の応答を返す。

use bg_remover_common::{ApiBase, HealthStatus, HttpReply, UploadError};
use futures::future::{self, Either};
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, RequestMode, Response};

/// 送信タイムアウト（ミリ秒）
pub const UPLOAD_TIMEOUT_MS: u32 = 60_000;

/// JSエラーを送信失敗に変換
fn js_error(value: JsValue) -> UploadError {
    let reason = value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value));
    UploadError::transport(reason)
}

async fn send(request: &Request) -> Result<Response, UploadError> {
    let window = web_sys::window().ok_or_else(|| UploadError::transport("window not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(js_error)?;
    resp_value.dyn_into::<Response>().map_err(js_error)
}

/// 画像を`file`フィールドのmultipartでPOST
pub async fn upload(url: &str, file: &File, timeout_ms: u32) -> Result<HttpReply, UploadError> {
    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(js_error)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form);

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;

    let fetch = Box::pin(async move {
        let resp = send(&request).await?;
        let status = resp.status();
        let buffer = JsFuture::from(resp.array_buffer().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        let body = js_sys::Uint8Array::new(&buffer).to_vec();
        Ok::<_, UploadError>(HttpReply::new(status, body))
    });

    match future::select(fetch, Box::pin(TimeoutFuture::new(timeout_ms))).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => Err(UploadError::transport(format!(
            "timed out after {}ms",
            timeout_ms
        ))),
    }
}

/// サーバーの稼働確認
pub async fn health(base: &ApiBase) -> Result<HealthStatus, UploadError> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(&base.health_url(), &opts).map_err(js_error)?;
    let resp = send(&request).await?;

    if !resp.ok() {
        return Err(UploadError::transport(format!("health check returned {}", resp.status())));
    }

    let json = JsFuture::from(resp.json().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    serde_wasm_bindgen::from_value(json).map_err(|e| UploadError::transport(e.to_string()))
}

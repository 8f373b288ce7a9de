//! ブラウザ機能（FileReader・ダウンロードリンク）

use bg_remover_common::DownloadRequest;
use wasm_bindgen::prelude::*;
use web_sys::{File, FileReader, HtmlAnchorElement};

/// ファイルをData URLとして読み込み、完了時に`on_load`を呼ぶ
pub fn read_as_data_url<F>(file: &File, on_load: F) -> Result<(), JsValue>
where
    F: Fn(String) + 'static,
{
    let reader = FileReader::new()?;

    let reader_clone = reader.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        if let Ok(result) = reader_clone.result() {
            if let Some(data_url) = result.as_string() {
                on_load(data_url);
            }
        }
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    reader.read_as_data_url(file)
}

/// 一時的な<a download>をクリックして保存させる
pub fn trigger_download(request: &DownloadRequest) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document not available"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("body not available"))?;

    let link: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    link.set_href(&request.url);
    link.set_download(&request.file_name);

    body.append_child(&link)?;
    link.click();
    body.remove_child(&link)?;

    Ok(())
}

//! アップロードエリアコンポーネント

use bg_remover_common::ACCEPT_FILTER;
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, File, HtmlInputElement};

#[component]
pub fn UploadArea<F>(
    input_ref: NodeRef<html::Input>,
    selected_name: Signal<Option<String>>,
    on_file_selected: F,
) -> impl IntoView
where
    F: Fn(String, File) + 'static + Clone,
{
    let on_change = move |ev: Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };

        // 1枚目のみ扱う
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            on_file_selected(input.value(), file);
        }
    };

    view! {
        <div class="upload-area">
            <input
                node_ref=input_ref
                id="file-upload"
                class="hidden"
                type="file"
                accept=ACCEPT_FILTER
                on:change=on_change
            />
            <label for="file-upload" class="upload-label">
                <div class="upload-icon">"📷"</div>
                <p>{move || selected_name.get().unwrap_or_else(|| "画像を選択".to_string())}</p>
                <p class="text-muted">"対応形式: JPG, PNG"</p>
            </label>
        </div>
    }
}

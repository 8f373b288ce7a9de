//! メインアプリケーションコンポーネント
//!
//! 状態は`UploadClient`ひとつに集約し、表示はそこから導出する。

use bg_remover_common::{
    Completion, PreviewHandle, SelectedFile, UiState, UploadClient, UploadError,
};
use gloo::console;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

use crate::api::backend::{self, UPLOAD_TIMEOUT_MS};
use crate::browser;
use crate::components::{
    action_buttons::ActionButtons,
    error_banner::ErrorBanner,
    header::Header,
    result_panel::ResultPanel,
    upload_area::UploadArea,
};

/// 状態表示用のクラス名
pub fn state_class(state: &UiState) -> &'static str {
    match state {
        UiState::Idle => "state-idle",
        UiState::FileSelected => "state-selected",
        UiState::Loading => "state-loading",
        UiState::Ready => "state-ready",
        UiState::Error(_) => "state-error",
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let client = RwSignal::new(UploadClient::default());
    // 送信用のブラウザFile。有効な選択のときだけ差し替える
    let current_file = StoredValue::new_local(None::<File>);
    let input_ref: NodeRef<html::Input> = NodeRef::new();
    let (server_ok, set_server_ok) = signal(None::<bool>);

    // サーバー稼働確認
    {
        let base = client.with_untracked(|c| c.api_base().clone());
        spawn_local(async move {
            let ok = match backend::health(&base).await {
                Ok(health) => health.is_healthy(),
                Err(e) => {
                    console::warn!(format!("health check failed: {:?}", e));
                    false
                }
            };
            set_server_ok.set(Some(ok));
        });
    }

    // 派生値
    let selected_name = Signal::derive(move || {
        client.with(|c| c.selected_file().map(|f| f.name.clone()))
    });
    let preview_url = Signal::derive(move || {
        client.with(|c| c.preview().map(|p| p.as_str().to_string()))
    });
    let result_url = Signal::derive(move || client.with(|c| c.result_handle()));
    let error_message = Signal::derive(move || {
        client.with(|c| c.state().error_message().map(str::to_string))
    });
    let can_submit = Signal::derive(move || client.with(|c| c.can_submit()));
    let is_loading = Signal::derive(move || client.with(|c| c.state().is_loading()));

    // ファイル選択ハンドラ
    let on_file_selected = move |input_value: String, file: File| {
        let selected = SelectedFile::new(file.name(), file.type_(), Vec::new());
        // 変更イベントごとに選択し直す（同名の別ファイルでも値は同じになる）
        let Some(result) = client.try_update(|c| c.pick(&input_value, selected)) else {
            return;
        };

        match result {
            Ok(ticket) => {
                current_file.set_value(Some(file.clone()));
                let read = browser::read_as_data_url(&file, move |data_url| {
                    client.update(|c| {
                        if !c.complete_preview(ticket, PreviewHandle::from_data_url(data_url)) {
                            console::log!("stale preview discarded");
                        }
                    });
                });
                if let Err(e) = read {
                    console::error!(format!("preview read failed: {:?}", e));
                }
            }
            Err(e) => console::log!(format!("selection rejected: {}", e)),
        }
    };

    // 送信ハンドラ
    let on_submit = move |_: ()| {
        let Some(started) = client.try_update(|c| c.begin_submit()) else {
            return;
        };
        let ticket = match started {
            Ok(ticket) => ticket,
            // 送信中の二重送信は黙って無視
            Err(e) if e.is_rejection() => return,
            Err(e) => {
                console::log!(format!("submit not started: {}", e));
                return;
            }
        };
        let Some(file) = current_file.get_value() else {
            client.update(|c| {
                let missing = UploadError::transport("selected file is no longer available");
                c.complete_submit(&ticket, Err(missing));
            });
            return;
        };

        console::log!(format!("uploading {}", ticket.file.name));
        spawn_local(async move {
            let outcome = backend::upload(&ticket.url, &file, UPLOAD_TIMEOUT_MS).await;
            client.update(|c| match c.complete_submit(&ticket, outcome) {
                Completion::Ready(file_id) => console::log!(format!("done: {}", file_id)),
                Completion::Failed(e) => console::error!(format!("upload failed: {:?}", e)),
                Completion::Stale => console::log!("stale response ignored"),
            });
        });
    };

    // ダウンロードハンドラ
    let on_download = move |_: ()| {
        let Some(request) = client.with_untracked(|c| c.download()) else {
            return;
        };
        if let Err(e) = browser::trigger_download(&request) {
            console::error!(format!("download failed: {:?}", e));
        }
    };

    // リセットハンドラ
    let on_reset = move |_: ()| {
        client.update(|c| c.reset());
        current_file.set_value(None);
        // 同じファイルを再選択できるように入力欄を空にする
        if let Some(input) = input_ref.get_untracked() {
            input.set_value("");
        }
    };

    view! {
        <div class=move || format!("container {}", client.with(|c| state_class(c.state())))>
            <Header server_ok=server_ok />

            <UploadArea
                input_ref=input_ref
                selected_name=selected_name
                on_file_selected=on_file_selected
            />

            <ActionButtons
                can_submit=can_submit
                is_loading=is_loading
                on_submit=on_submit
                on_reset=on_reset
            />

            <ErrorBanner message=error_message />

            <ResultPanel
                preview_url=preview_url
                result_url=result_url
                on_download=on_download
            />
        </div>
    }
}

//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header(server_ok: ReadSignal<Option<bool>>) -> impl IntoView {
    let badge = move || match server_ok.get() {
        None => ("server-badge pending", "サーバー確認中..."),
        Some(true) => ("server-badge ok", "サーバー接続OK"),
        Some(false) => ("server-badge down", "サーバーに接続できません"),
    };

    view! {
        <header class="header">
            <h1>"背景除去"</h1>
            <p class="subtitle">"画像をアップロードすると自動で背景を除去します"</p>
            <span class=move || badge().0>{move || badge().1}</span>
        </header>
    }
}

//! 操作ボタンコンポーネント

use leptos::prelude::*;

/// 送信ボタンの表示文言
pub fn submit_label(is_loading: bool) -> &'static str {
    if is_loading {
        "処理中..."
    } else {
        "背景を除去"
    }
}

#[component]
pub fn ActionButtons<FS, FR>(
    can_submit: Signal<bool>,
    is_loading: Signal<bool>,
    on_submit: FS,
    on_reset: FR,
) -> impl IntoView
where
    FS: Fn(()) + 'static + Clone,
    FR: Fn(()) + 'static + Clone,
{
    view! {
        <div class="action-buttons">
            <button
                class="btn btn-primary"
                disabled=move || !can_submit.get()
                on:click={
                    let on_submit = on_submit.clone();
                    move |_| on_submit(())
                }
            >
                {move || submit_label(is_loading.get())}
            </button>

            // リセットは送信中でも押せる
            <button
                class="btn btn-secondary"
                on:click={
                    let on_reset = on_reset.clone();
                    move |_| on_reset(())
                }
            >
                "リセット"
            </button>
        </div>
    }
}

//! 元画像と処理結果の表示

use leptos::prelude::*;

#[component]
pub fn ResultPanel<FD>(
    preview_url: Signal<Option<String>>,
    result_url: Signal<Option<String>>,
    on_download: FD,
) -> impl IntoView
where
    FD: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="result-grid">
            <Show when=move || preview_url.get().is_some()>
                <div class="result-card">
                    <h3>"元の画像"</h3>
                    <img src=move || preview_url.get().unwrap_or_default() alt="元の画像" />
                </div>
            </Show>

            <Show when=move || result_url.get().is_some()>
                <div class="result-card">
                    <h3>"結果"</h3>
                    <img src=move || result_url.get().unwrap_or_default() alt="背景除去後の画像" />
                    <button
                        class="btn btn-success"
                        on:click={
                            let on_download = on_download.clone();
                            move |_| on_download(())
                        }
                    >
                        "結果をダウンロード"
                    </button>
                </div>
            </Show>
        </div>
    }
}

//! エラー表示コンポーネント

use leptos::prelude::*;

#[component]
pub fn ErrorBanner(message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class="error-banner" role="alert">
                <span class="error-icon">"⚠"</span>
                <span class="error-text">{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

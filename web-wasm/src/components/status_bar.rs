//! 送信状態の表示

use leptos::prelude::*;
use cellscope_common::RequestState;

#[component]
pub fn StatusBar<F>(
    state: Signal<RequestState>,
    error: Signal<Option<String>>,
    on_dismiss: F,
) -> impl IntoView
where
    F: Fn() + 'static + Clone + Send + Sync,
{
    view! {
        <div class=move || format!("status-bar status-{}", state.get().as_str())>
            {move || match state.get() {
                RequestState::Idle => "画像を選択して送信してください".to_string(),
                RequestState::InFlight => "解析中...".to_string(),
                RequestState::Succeeded => "解析完了".to_string(),
                RequestState::Failed => error.get().unwrap_or_else(|| "解析に失敗しました".to_string()),
            }}
            <Show when=move || error.with(|e| e.is_some())>
                <button class="btn btn-link" on:click={
                    let on_dismiss = on_dismiss.clone();
                    move |_| on_dismiss()
                }>
                    "閉じる"
                </button>
            </Show>
        </div>
    }
}

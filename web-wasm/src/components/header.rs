//! ヘッダーコンポーネント

use leptos::prelude::*;
use cellscope_common::ViewTab;

#[component]
pub fn Header<F>(tab: Signal<ViewTab>, on_select_tab: F) -> impl IntoView
where
    F: Fn(ViewTab) + 'static + Clone + Send + Sync,
{
    view! {
        <header class="header">
            <h1>"CellScope - 形質細胞判定"</h1>
            <nav class="tabs">
                {ViewTab::ALL
                    .into_iter()
                    .map(|t| {
                        let on_select_tab = on_select_tab.clone();
                        view! {
                            <button
                                class=move || if tab.get() == t { "tab active" } else { "tab" }
                                on:click=move |_| on_select_tab(t)
                            >
                                {t.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
        </header>
    }
}

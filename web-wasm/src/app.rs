//! メインアプリケーションコンポーネント
//!
//! 画面状態は UploadSession 1つに集約し、遷移はそのメソッド経由でのみ行う。

use leptos::prelude::*;
use leptos::task::spawn_local;
use cellscope_common::{
    render, Completion, MetricsCatalog, RenderOptions, RequestState, SelectedFile, UploadSession, ViewTab,
};
use crate::api::backend;
use crate::components::{
    header::Header,
    metrics_panel::MetricsPanel,
    result_view::ResultPanel,
    status_bar::StatusBar,
    timeseries_chart::TimeSeriesCharts,
    upload_area::UploadArea,
};
use crate::config;

#[component]
pub fn App() -> impl IntoView {
    let endpoints = config::endpoints();
    let predict_url = endpoints.predict_url();
    let metrics_url = endpoints.metrics_url();

    let session = RwSignal::new(UploadSession::new());
    let (metrics, set_metrics) = signal(None::<MetricsCatalog>);

    // 指標カタログは起動時に1回だけ取得（失敗はログのみ）
    spawn_local(async move {
        match backend::fetch_metrics(&metrics_url).await {
            Ok(catalog) => set_metrics.set(Some(catalog)),
            Err(e) => gloo::console::error!(format!("指標カタログの取得に失敗: {}", e)),
        }
    });

    // アンマウント後に届いた応答は捨てる
    on_cleanup(move || {
        session.try_update(|s| s.cancel_pending());
    });

    let on_file_selected = move |file: SelectedFile| {
        session.update(|s| {
            s.select_file(file);
        });
    };

    let on_submit = move |_| {
        let started = session.try_update(|s| s.begin_submit().map(|ticket| (ticket, s.file().cloned())));
        match started {
            Some(Ok((ticket, Some(file)))) => {
                let url = predict_url.clone();
                spawn_local(async move {
                    let outcome = backend::submit_prediction(&url, &file).await;
                    match session.try_update(|s| s.complete(ticket, outcome)) {
                        Some(Completion::Applied(RequestState::Failed)) => {
                            let message = session.with_untracked(|s| s.error().map(|e| e.user_message()));
                            gloo::dialogs::alert(&message.unwrap_or_else(|| "解析に失敗しました".to_string()));
                        }
                        Some(Completion::Stale) => {
                            gloo::console::log!(format!("古い応答を破棄しました (#{})", ticket.seq()));
                        }
                        _ => {}
                    }
                });
            }
            Some(Err(err)) => gloo::dialogs::alert(&err.user_message()),
            _ => {}
        }
    };

    let tab = Signal::derive(move || session.with(|s| s.tab()));
    let preview = Signal::derive(move || session.with(|s| s.preview().map(|p| p.to_string())));
    let file_name = Signal::derive(move || session.with(|s| s.file().map(|f| f.name.clone())));
    let state = Signal::derive(move || session.with(|s| s.state()));
    let error = Signal::derive(move || session.with(|s| s.error().map(|e| e.user_message())));
    let result = Signal::derive(move || {
        session.with(|s| s.result().map(|p| render(p, &RenderOptions::default())))
    });

    view! {
        <div class="container">
            <Header tab=tab on_select_tab=move |t| session.update(|s| s.set_tab(t)) />

            <Show when=move || tab.get() == ViewTab::Upload>
                <UploadArea preview=preview file_name=file_name on_file_selected=on_file_selected />
                <div class="actions">
                    <button
                        class="btn btn-primary"
                        disabled=move || state.get() == RequestState::InFlight
                        on:click=on_submit.clone()
                    >
                        {move || if state.get() == RequestState::InFlight { "解析中..." } else { "画像を送信" }}
                    </button>
                    <button
                        class="btn"
                        disabled=move || file_name.with(|f| f.is_none()) || state.get() == RequestState::InFlight
                        on:click=move |_| session.update(|s| s.clear_file())
                    >
                        "選択解除"
                    </button>
                </div>
                <StatusBar
                    state=state
                    error=error
                    on_dismiss=move || session.update(|s| s.dismiss_error())
                />
            </Show>

            <Show when=move || tab.get() == ViewTab::Results>
                <ResultPanel result=result />
            </Show>

            <Show when=move || tab.get() == ViewTab::Charts>
                <TimeSeriesCharts />
                <MetricsPanel catalog=metrics />
            </Show>
        </div>
    }
}

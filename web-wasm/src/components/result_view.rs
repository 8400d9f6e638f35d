//! 解析結果表示コンポーネント

use leptos::prelude::*;
use cellscope_common::{ResultView, Section};

#[component]
pub fn ResultPanel(result: Signal<Option<ResultView>>) -> impl IntoView {
    view! {
        <div class="result-panel">
            {move || match result.get() {
                Some(view) => render_view(view).into_any(),
                None => view! { <p class="text-muted">"まだ解析結果がありません"</p> }.into_any(),
            }}
        </div>
    }
}

fn render_view(result: ResultView) -> impl IntoView {
    let sections = result.sections.into_iter().map(render_section).collect_view();
    view! {
        <h2>{result.title}</h2>
        {sections}
    }
}

fn render_section(section: Section) -> AnyView {
    match section {
        Section::Label { label, confidence } => view! {
            <div class="result-label">
                <h3>"結果: " {label}</h3>
                {confidence.map(|c| view! { <p>"信頼度: " {c}</p> })}
            </div>
        }
        .into_any(),
        Section::Stats { rows } => view! {
            <table class="result-stats">
                <tbody>
                    {rows
                        .into_iter()
                        .map(|(key, value)| view! { <tr><th>{key}</th><td>{value}</td></tr> })
                        .collect_view()}
                </tbody>
            </table>
        }
        .into_any(),
        Section::Objects { heading, items } => view! {
            <div class="result-objects">
                <h4>{heading} " (" {items.len().to_string()} ")"</h4>
                <ul>
                    {items.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}
                </ul>
            </div>
        }
        .into_any(),
        Section::Image { caption, data_uri } => view! {
            <figure class="result-image">
                <img src=data_uri alt=caption.clone() />
                <figcaption>{caption}</figcaption>
            </figure>
        }
        .into_any(),
        Section::Raw { note, json } => view! {
            <div class="result-raw">
                <p class="text-warning">{note}</p>
                <pre>{json}</pre>
            </div>
        }
        .into_any(),
        Section::Notice(text) => view! { <p class="text-muted">{text}</p> }.into_any(),
    }
}

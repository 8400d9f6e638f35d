//! 時系列グラフコンポーネント
//!
//! 表示のたびに乱数で24点を生成する（解析結果とは無関係のサンプル）。

use leptos::prelude::*;
use cellscope_common::chart::{polyline_points, svg_points, value_range, ChartBox};
use cellscope_common::timeseries::{generate_random, series};
use cellscope_common::{SeriesKind, TimeSeriesSample};

#[component]
pub fn TimeSeriesCharts() -> impl IntoView {
    let samples = generate_random();

    view! {
        <div class="timeseries">
            <p class="text-muted">"※ 表示確認用の乱数データです"</p>
            {SeriesKind::ALL
                .into_iter()
                .map(|kind| view! { <LineChart samples=samples.clone() kind=kind /> })
                .collect_view()}
        </div>
    }
}

#[component]
fn LineChart(samples: Vec<TimeSeriesSample>, kind: SeriesKind) -> impl IntoView {
    let bounds = ChartBox::default();
    let data = series(&samples, kind);
    let points = svg_points(&polyline_points(&data, &bounds));
    let (y_min, y_max) = value_range(data.iter().map(|p| p.1)).unwrap_or((0.0, 0.0));

    let (w, h, pad) = (bounds.width, bounds.height, bounds.padding);

    view! {
        <figure class="line-chart">
            <figcaption>{format!("{} ({})", kind.label(), kind.unit())}</figcaption>
            <svg viewBox=format!("0 0 {} {}", w, h) width=w.to_string() height=h.to_string()>
                <line
                    x1=pad.to_string()
                    y1=(h - pad).to_string()
                    x2=(w - pad).to_string()
                    y2=(h - pad).to_string()
                    stroke="#ccc"
                />
                <polyline points=points fill="none" stroke=kind.color() stroke-width="2" />
                <text x="2" y=pad.to_string() font-size="10">{format!("{:.1}", y_max)}</text>
                <text x="2" y=(h - pad).to_string() font-size="10">{format!("{:.1}", y_min)}</text>
            </svg>
        </figure>
    }
}

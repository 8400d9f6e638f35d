//! 表示モデルを端末向けテキストに変換

use cellscope_common::{MetricsCatalog, ResultView, Section, SeriesKind, TimeSeriesSample};
use cellscope_common::MetricGroup;
use std::fmt::Write;

pub fn render_result_text(view: &ResultView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", view.title);

    for section in &view.sections {
        match section {
            Section::Label { label, confidence } => {
                let _ = writeln!(out, "結果: {}", label);
                if let Some(conf) = confidence {
                    let _ = writeln!(out, "信頼度: {}", conf);
                }
            }
            Section::Stats { rows } => {
                let width = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
                for (key, value) in rows {
                    let pad = width - key.chars().count();
                    let _ = writeln!(out, "{}{}  {}", key, " ".repeat(pad * 2), value);
                }
            }
            Section::Objects { heading, items } => {
                let _ = writeln!(out, "{} ({}件)", heading, items.len());
                for item in items {
                    let _ = writeln!(out, "  - {}", item);
                }
            }
            Section::Image { caption, data_uri } => {
                // Data URLは長いので大きさだけ表示
                let _ = writeln!(out, "{}: 画像あり ({} chars, --save-image で保存)", caption, data_uri.len());
            }
            Section::Raw { note, json } => {
                let _ = writeln!(out, "{}", note);
                let _ = writeln!(out, "{}", json);
            }
            Section::Notice(text) => {
                let _ = writeln!(out, "{}", text);
            }
        }
    }

    out
}

pub fn render_metrics_text(catalog: &MetricsCatalog) -> String {
    let mut out = String::new();
    for group in [MetricGroup::Morphological, MetricGroup::Migratory] {
        let metrics = catalog.group(group);
        let _ = writeln!(out, "[{}] {}件", group.label(), metrics.len());
        for metric in metrics {
            let _ = writeln!(out, "  {:<16} {}", metric.id, metric.display_name());
            if !metric.description.is_empty() {
                let _ = writeln!(out, "  {:<16} {}", "", metric.description);
            }
        }
    }
    out
}

pub fn render_timeseries_text(samples: &[TimeSeriesSample]) -> String {
    let mut out = String::new();
    let header: Vec<String> = SeriesKind::ALL
        .iter()
        .map(|k| format!("{}({})", k.label(), k.unit()))
        .collect();
    let _ = writeln!(out, "time  {}", header.join("  "));
    for sample in samples {
        let _ = writeln!(
            out,
            "{:>4}  {:>10.2}  {:>10.2}  {:>10.2}",
            sample.time, sample.area, sample.perimeter, sample.velocity
        );
    }
    out
}

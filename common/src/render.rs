//! 解析結果の表示モデル
//!
//! ペイロード → 表示ツリーの純粋関数。どのフィールドが欠けていても失敗しない。
//! CLIはテキストに、Webは DOM に変換する。

use crate::file::image_data_uri;
use crate::types::{BoundingBox, CellCount, Classification, DetectionItem, DetectionReport, PredictionPayload};

/// 座標の表示桁数
pub const COORDINATE_PRECISION: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// 信頼度の小数点以下桁数
    pub confidence_precision: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { confidence_precision: 2 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub title: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    /// 分類ラベルと信頼度
    Label { label: String, confidence: Option<String> },
    /// 項目名と値の表
    Stats { rows: Vec<(String, String)> },
    /// 検出オブジェクト一覧
    Objects { heading: String, items: Vec<String> },
    /// 埋め込み画像
    Image { caption: String, data_uri: String },
    /// 想定外の形状（JSONをそのまま表示）
    Raw { note: String, json: String },
    Notice(String),
}

pub fn render(payload: &PredictionPayload, options: &RenderOptions) -> ResultView {
    let mut sections = match payload {
        PredictionPayload::Classification(c) => render_classification(c, options),
        PredictionPayload::CellCount(c) => render_cell_count(c),
        PredictionPayload::Detection(d) => render_detection(d, options),
        PredictionPayload::Unknown(value) => vec![Section::Raw {
            note: "想定外のレスポンス形状です".to_string(),
            json: serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
        }],
    };

    if sections.is_empty() {
        sections.push(Section::Notice("表示できる項目がありません".to_string()));
    }

    ResultView {
        title: "解析結果".to_string(),
        sections,
    }
}

fn render_classification(c: &Classification, options: &RenderOptions) -> Vec<Section> {
    if c.label.is_none() && c.confidence.is_none() {
        return Vec::new();
    }
    vec![Section::Label {
        label: c.label.clone().unwrap_or_else(|| "-".to_string()),
        confidence: c.confidence.map(|v| format_confidence(v, options.confidence_precision)),
    }]
}

fn render_cell_count(c: &CellCount) -> Vec<Section> {
    let mut sections = Vec::new();

    let mut rows = Vec::new();
    if let Some(n) = c.plasma_cells {
        rows.push(("形質細胞".to_string(), n.to_string()));
    }
    if let Some(n) = c.non_plasma_cells {
        rows.push(("非形質細胞".to_string(), n.to_string()));
    }
    // 桁あふれする合計は出さない
    if let Some(total) = c.plasma_cells.zip(c.non_plasma_cells).and_then(|(a, b)| a.checked_add(b)) {
        rows.push(("合計".to_string(), total.to_string()));
    }
    if !rows.is_empty() {
        sections.push(Section::Stats { rows });
    }

    if let Some(boxes) = &c.boxes {
        sections.push(Section::Objects {
            heading: "検出オブジェクト".to_string(),
            items: boxes
                .iter()
                .enumerate()
                .map(|(i, b)| format!("#{} {}", i + 1, describe_box(b)))
                .collect(),
        });
    }

    if let Some(image) = non_empty(&c.image_base64) {
        sections.push(Section::Image {
            caption: "検出結果画像".to_string(),
            data_uri: image_data_uri(image),
        });
    }

    sections
}

fn render_detection(d: &DetectionReport, options: &RenderOptions) -> Vec<Section> {
    let mut sections = Vec::new();

    let mut rows = Vec::new();
    if let Some(n) = d.cell_count {
        rows.push(("細胞数".to_string(), n.to_string()));
    }
    if let Some(t) = d.inference_time {
        rows.push(("推論時間".to_string(), format!("{:.3} 秒", t)));
    }
    if !rows.is_empty() {
        sections.push(Section::Stats { rows });
    }

    if let Some(detections) = &d.detections {
        sections.push(Section::Objects {
            heading: "検出オブジェクト".to_string(),
            items: detections
                .iter()
                .enumerate()
                .map(|(i, item)| format!("#{} {}", i + 1, describe_detection(item, options)))
                .collect(),
        });
    }

    if let Some(image) = non_empty(&d.visualization) {
        sections.push(Section::Image {
            caption: "可視化結果".to_string(),
            data_uri: image_data_uri(image),
        });
    }

    sections
}

fn describe_box(b: &BoundingBox) -> String {
    let coords = format_coordinates(b);
    match &b.label {
        Some(label) => format!("{} {}", label, coords),
        None => coords,
    }
}

fn describe_detection(item: &DetectionItem, options: &RenderOptions) -> String {
    let mut parts = vec![item.class_name.clone().unwrap_or_else(|| "unknown".to_string())];
    if let Some(conf) = item.confidence {
        parts.push(format!("({:.*})", options.confidence_precision, conf));
    }
    if let Some(b) = &item.bbox {
        parts.push(format_coordinates(b));
    }
    parts.join(" ")
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

/// 信頼度を固定桁で表示
pub fn format_confidence(value: f64, precision: usize) -> String {
    format!("{:.*}%", precision, value)
}

/// 座標を小数点以下1桁で表示
pub fn format_coordinates(b: &BoundingBox) -> String {
    let p = COORDINATE_PRECISION;
    format!("({:.*}, {:.*}) - ({:.*}, {:.*})", p, b.x1, p, b.y1, p, b.x2, p, b.y2)
}

//! 予測サーバーのレスポンス型定義
//!
//! バックエンドの配備ごとにレスポンス形状が異なるため、
//! キーの有無で判定してタグ付き列挙型にまとめる:
//! - Detection: `{cell_count, inference_time, visualization, detections}`
//! - CellCount: `{plasma_cells, non_plasma_cells, boxes, image_base64}`
//! - Classification: `{label, confidence}`
//! - Unknown: 上記いずれにも当てはまらない形状
//!
//! `success` / `error` / `message` / `detail` はどの形状にも付き得る状態フィールドで、
//! 形状の判定には使わない。各フィールドは個別に読み、型が合わないものだけ捨てる。

use serde::{Deserialize, Deserializer, Serialize};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use crate::error::SubmitError;

const DETECTION_KEYS: &[&str] = &["detections", "visualization", "cell_count", "inference_time"];
const CELL_COUNT_KEYS: &[&str] = &["plasma_cells", "non_plasma_cells", "boxes", "image_base64"];
const CLASSIFICATION_KEYS: &[&str] = &["label", "confidence"];
const MESSAGE_KEYS: &[&str] = &["error", "message", "detail"];

/// 予測結果ペイロード
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictionPayload {
    Classification(Classification),
    CellCount(CellCount),
    Detection(DetectionReport),
    Unknown(Value),
}

/// 成否フラグとサーバーメッセージ（全形状共通）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResponseStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ResponseStatus {
    fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            success: map.get("success").and_then(Value::as_bool),
            message: MESSAGE_KEYS.iter().find_map(|k| text(map, k)),
        }
    }
}

/// 分類結果（ラベル＋信頼度）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Classification {
    pub label: Option<String>,
    pub confidence: Option<f64>,
    #[serde(flatten)]
    pub status: ResponseStatus,
}

/// 細胞数＋バウンディングボックス
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CellCount {
    pub plasma_cells: Option<u64>,
    pub non_plasma_cells: Option<u64>,
    pub boxes: Option<Vec<BoundingBox>>,
    pub image_base64: Option<String>,
    #[serde(flatten)]
    pub status: ResponseStatus,
}

/// 検出リスト＋可視化画像
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetectionReport {
    pub cell_count: Option<u64>,
    pub inference_time: Option<f64>,
    pub visualization: Option<String>,
    pub detections: Option<Vec<DetectionItem>>,
    #[serde(flatten)]
    pub status: ResponseStatus,
}

impl Classification {
    fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            label: map.get("label").and_then(label_text),
            confidence: number(map, "confidence"),
            status: ResponseStatus::from_map(map),
        }
    }
}

impl CellCount {
    fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            plasma_cells: count(map, "plasma_cells"),
            non_plasma_cells: count(map, "non_plasma_cells"),
            boxes: lenient_list(map, "boxes"),
            image_base64: text(map, "image_base64"),
            status: ResponseStatus::from_map(map),
        }
    }
}

impl DetectionReport {
    fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            cell_count: count(map, "cell_count"),
            inference_time: number(map, "inference_time"),
            visualization: text(map, "visualization"),
            detections: lenient_list(map, "detections"),
            status: ResponseStatus::from_map(map),
        }
    }
}

/// 検出された1オブジェクト
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionItem {
    #[serde(alias = "class", alias = "label")]
    pub class_name: Option<String>,
    pub confidence: Option<f64>,
    #[serde(alias = "box")]
    pub bbox: Option<BoundingBox>,
}

/// バウンディングボックス（左上・右下の座標）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoxRepr")]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// ワイヤ上のボックス表現
///
/// `[x1, y1, x2, y2, (conf)]` の配列、角座標オブジェクト、
/// `x/y/width/height` オブジェクトのいずれか。
#[derive(Deserialize)]
#[serde(untagged)]
enum BoxRepr {
    Array(Vec<f64>),
    Corners {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        #[serde(default, alias = "class")]
        label: Option<String>,
        #[serde(default)]
        confidence: Option<f64>,
    },
    Sized {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        #[serde(default, alias = "class")]
        label: Option<String>,
        #[serde(default)]
        confidence: Option<f64>,
    },
}

impl TryFrom<BoxRepr> for BoundingBox {
    type Error = String;

    fn try_from(repr: BoxRepr) -> Result<Self, Self::Error> {
        match repr {
            BoxRepr::Array(values) => {
                if values.len() < 4 {
                    return Err(format!("box needs 4 coordinates, got {}", values.len()));
                }
                Ok(BoundingBox {
                    x1: values[0],
                    y1: values[1],
                    x2: values[2],
                    y2: values[3],
                    label: None,
                    confidence: values.get(4).copied(),
                })
            }
            BoxRepr::Corners { x1, y1, x2, y2, label, confidence } => {
                Ok(BoundingBox { x1, y1, x2, y2, label, confidence })
            }
            BoxRepr::Sized { x, y, width, height, label, confidence } => Ok(BoundingBox {
                x1: x,
                y1: y,
                x2: x + width,
                y2: y + height,
                label,
                confidence,
            }),
        }
    }
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }
}

impl From<Value> for PredictionPayload {
    fn from(value: Value) -> Self {
        let Value::Object(map) = &value else {
            return PredictionPayload::Unknown(value);
        };

        if has_any_key(map, DETECTION_KEYS) {
            PredictionPayload::Detection(DetectionReport::from_map(map))
        } else if has_any_key(map, CELL_COUNT_KEYS) {
            PredictionPayload::CellCount(CellCount::from_map(map))
        } else if has_any_key(map, CLASSIFICATION_KEYS) {
            PredictionPayload::Classification(Classification::from_map(map))
        } else {
            PredictionPayload::Unknown(value)
        }
    }
}

impl<'de> Deserialize<'de> for PredictionPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}

fn has_any_key(map: &Map<String, Value>, keys: &[&str]) -> bool {
    keys.iter().any(|k| map.contains_key(*k))
}

fn text(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

/// 文字列以外（数値のクラスIDなど）はJSON表記のまま使う
fn label_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn number(map: &Map<String, Value>, key: &str) -> Option<f64> {
    map.get(key).and_then(Value::as_f64)
}

/// 個数（`3.0` のような浮動小数も受け付ける）
fn count(map: &Map<String, Value>, key: &str) -> Option<u64> {
    let value = map.get(key)?;
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.is_finite() && *n >= 0.0)
            .map(|n| n.round() as u64)
    })
}

/// 配列の要素を1つずつ読み、読めない要素は飛ばす
fn lenient_list<T: DeserializeOwned>(map: &Map<String, Value>, key: &str) -> Option<Vec<T>> {
    let items = map.get(key)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
    )
}

impl PredictionPayload {
    /// JSON文字列からパース
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from(value))
    }

    /// 形状名（ログ表示用）
    pub fn kind(&self) -> &'static str {
        match self {
            PredictionPayload::Classification(_) => "classification",
            PredictionPayload::CellCount(_) => "cell_count",
            PredictionPayload::Detection(_) => "detection",
            PredictionPayload::Unknown(_) => "unknown",
        }
    }

    /// 形状共通の状態フィールド（Unknownは生JSONから読む）
    pub fn status(&self) -> ResponseStatus {
        match self {
            PredictionPayload::Classification(c) => c.status.clone(),
            PredictionPayload::CellCount(c) => c.status.clone(),
            PredictionPayload::Detection(d) => d.status.clone(),
            PredictionPayload::Unknown(Value::Object(map)) => ResponseStatus::from_map(map),
            PredictionPayload::Unknown(_) => ResponseStatus::default(),
        }
    }

    /// `success: false` が明示されているか
    pub fn is_unsuccessful(&self) -> bool {
        self.status().success == Some(false)
    }

    /// サーバーが返したエラーメッセージ
    pub fn server_message(&self) -> Option<String> {
        self.status().message
    }

    /// 失敗フラグ付きのペイロードをApplicationエラーに変換
    pub fn into_outcome(self) -> Result<Self, SubmitError> {
        if self.is_unsuccessful() {
            Err(SubmitError::Application { message: self.server_message() })
        } else {
            Ok(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classification_variant() {
        let payload = PredictionPayload::from(json!({"label": "plasma", "confidence": 97.25}));
        match payload {
            PredictionPayload::Classification(c) => {
                assert_eq!(c.label.as_deref(), Some("plasma"));
                assert_eq!(c.confidence, Some(97.25));
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_cell_count_variant_with_array_boxes() {
        let payload = PredictionPayload::from(json!({
            "plasma_cells": 3,
            "non_plasma_cells": 5,
            "boxes": [[1.0, 2.0, 3.0, 4.0], [10.5, 20.25, 30.0, 40.0, 0.9]],
            "image_base64": "QUJD"
        }));
        let PredictionPayload::CellCount(c) = payload else { panic!("expected cell count") };
        let boxes = c.boxes.unwrap();
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[1].x1, 10.5);
        assert_eq!(boxes[1].confidence, Some(0.9));
        assert_eq!(c.plasma_cells, Some(3));
    }

    #[test]
    fn test_box_object_forms() {
        let corners: BoundingBox = serde_json::from_value(json!({"x1": 1, "y1": 2, "x2": 3, "y2": 4, "class": "plasma"})).unwrap();
        assert_eq!(corners.label.as_deref(), Some("plasma"));

        let sized: BoundingBox = serde_json::from_value(json!({"x": 10, "y": 20, "width": 5, "height": 6})).unwrap();
        assert_eq!((sized.x2, sized.y2), (15.0, 26.0));
        assert_eq!(sized.width(), 5.0);
    }

    #[test]
    fn test_short_box_array_is_rejected() {
        assert!(serde_json::from_value::<BoundingBox>(json!([1.0, 2.0])).is_err());
    }

    #[test]
    fn test_detection_variant_accepts_aliases() {
        let payload = PredictionPayload::from(json!({
            "success": true,
            "cell_count": 2,
            "inference_time": 0.42,
            "detections": [
                {"class": "plasma", "confidence": 0.91, "bbox": [0, 0, 10, 10]},
                {"label": "lymphocyte", "confidence": 0.5, "box": {"x1": 1, "y1": 1, "x2": 2, "y2": 2}}
            ]
        }));
        let PredictionPayload::Detection(report) = payload else { panic!("expected detection") };
        let detections = report.detections.unwrap();
        assert_eq!(detections[0].class_name.as_deref(), Some("plasma"));
        assert_eq!(detections[1].class_name.as_deref(), Some("lymphocyte"));
        assert!(detections[1].bbox.is_some());
    }

    #[test]
    fn test_unknown_shapes() {
        assert!(matches!(PredictionPayload::from(json!({"foo": 1})), PredictionPayload::Unknown(_)));
        assert!(matches!(PredictionPayload::from(json!([1, 2])), PredictionPayload::Unknown(_)));
        // 状態フィールドだけでは形状を決めない
        assert!(matches!(
            PredictionPayload::from(json!({"success": true})),
            PredictionPayload::Unknown(_)
        ));
    }

    #[test]
    fn test_success_flag_keeps_classification() {
        let payload = PredictionPayload::from(json!({"success": true, "label": "plasma", "confidence": 95.5}));
        let PredictionPayload::Classification(c) = &payload else { panic!("expected classification: {:?}", payload) };
        assert_eq!(c.label.as_deref(), Some("plasma"));
        assert_eq!(c.confidence, Some(95.5));
        assert_eq!(c.status.success, Some(true));
        assert!(payload.into_outcome().is_ok());
    }

    #[test]
    fn test_success_flag_keeps_cell_count() {
        let payload = PredictionPayload::from(json!({
            "success": true,
            "plasma_cells": 1,
            "non_plasma_cells": 1,
            "boxes": [[1, 2, 3, 4], [5, 6, 7, 8]]
        }));
        let PredictionPayload::CellCount(c) = &payload else { panic!("expected cell count: {:?}", payload) };
        assert_eq!((c.plasma_cells, c.non_plasma_cells), (Some(1), Some(1)));
        assert_eq!(c.boxes.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_failure_flag_on_cell_count_shape() {
        let payload = PredictionPayload::from(json!({"success": false, "plasma_cells": 0, "detail": "blurred image"}));
        assert_eq!(payload.kind(), "cell_count");
        assert_eq!(
            payload.into_outcome(),
            Err(SubmitError::Application { message: Some("blurred image".to_string()) })
        );
    }

    #[test]
    fn test_float_counts_are_accepted() {
        let payload = PredictionPayload::from(json!({"plasma_cells": 3.0, "non_plasma_cells": 2, "boxes": [[1, 2, 3, 4]]}));
        let PredictionPayload::CellCount(c) = payload else { panic!("expected cell count") };
        assert_eq!(c.plasma_cells, Some(3));
        assert_eq!(c.non_plasma_cells, Some(2));
        assert_eq!(c.boxes.map(|b| b.len()), Some(1));
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let payload = PredictionPayload::from(json!({
            "plasma_cells": 3,
            "boxes": [[1, 2, 3, 4], [1, 2]],
            "image_base64": "QUJD"
        }));
        let PredictionPayload::CellCount(c) = payload else { panic!("expected cell count") };
        assert_eq!(c.plasma_cells, Some(3));
        assert_eq!(c.boxes.map(|b| b.len()), Some(1));
        assert_eq!(c.image_base64.as_deref(), Some("QUJD"));
    }

    #[test]
    fn test_mistyped_field_is_dropped_alone() {
        let payload = PredictionPayload::from(json!({"label": 42, "confidence": "high"}));
        let PredictionPayload::Classification(c) = payload else { panic!("expected classification") };
        assert_eq!(c.label.as_deref(), Some("42"));
        assert_eq!(c.confidence, None);
    }

    #[test]
    fn test_unsuccessful_detection_becomes_application_error() {
        let payload = PredictionPayload::from(json!({"success": false, "error": "no cells found"}));
        assert!(payload.is_unsuccessful());
        assert_eq!(
            payload.into_outcome(),
            Err(SubmitError::Application { message: Some("no cells found".to_string()) })
        );
    }

    #[test]
    fn test_successful_payload_passes_through() {
        let payload = PredictionPayload::from(json!({"label": "normal"}));
        assert!(payload.clone().into_outcome().is_ok());
    }

    #[test]
    fn test_from_json_and_serialize_back() {
        let payload = PredictionPayload::from_json(r#"{"label":"plasma","confidence":88.0}"#).unwrap();
        assert_eq!(payload.kind(), "classification");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["label"], "plasma");
        assert!(PredictionPayload::from_json("{").is_err());
    }
}

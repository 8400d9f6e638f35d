//! 計測指標カタログ（形態・遊走指標の説明）
//!
//! 起動時に1回取得するだけの参照データ。変更はしない。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsCatalog {
    pub morphological: Vec<MetricInfo>,
    pub migratory: Vec<MetricInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricInfo {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricGroup {
    Morphological,
    Migratory,
}

impl MetricGroup {
    pub fn label(&self) -> &'static str {
        match self {
            MetricGroup::Morphological => "形態指標",
            MetricGroup::Migratory => "遊走指標",
        }
    }
}

impl MetricInfo {
    /// "面積 (µm²)" のような表示名
    pub fn display_name(&self) -> String {
        match self.unit.as_deref().filter(|u| !u.is_empty()) {
            Some(unit) => format!("{} ({})", self.name, unit),
            None => self.name.clone(),
        }
    }
}

impl MetricsCatalog {
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_empty(&self) -> bool {
        self.morphological.is_empty() && self.migratory.is_empty()
    }

    pub fn len(&self) -> usize {
        self.morphological.len() + self.migratory.len()
    }

    pub fn group(&self, group: MetricGroup) -> &[MetricInfo] {
        match group {
            MetricGroup::Morphological => &self.morphological,
            MetricGroup::Migratory => &self.migratory,
        }
    }

    /// グループ付きで全指標を列挙
    pub fn iter(&self) -> impl Iterator<Item = (MetricGroup, &MetricInfo)> {
        self.morphological
            .iter()
            .map(|m| (MetricGroup::Morphological, m))
            .chain(self.migratory.iter().map(|m| (MetricGroup::Migratory, m)))
    }

    pub fn find(&self, id: &str) -> Option<&MetricInfo> {
        self.iter().map(|(_, m)| m).find(|m| m.id == id)
    }
}

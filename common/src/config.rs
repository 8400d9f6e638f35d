//! 予測サーバーのエンドポイント設定
//!
//! ベースURLはビルド時・配備時に注入し、ビューのコードには直書きしない。

use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://pcmmd-backend.onrender.com";
pub const DEFAULT_PREDICT_PATH: &str = "/predict";
pub const DEFAULT_METRICS_PATH: &str = "/metrics";

/// ベースURLを上書きする環境変数名
pub const BASE_URL_ENV: &str = "CELLSCOPE_API_BASE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Endpoints {
    pub base_url: String,
    pub predict_path: String,
    pub metrics_path: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            predict_path: DEFAULT_PREDICT_PATH.into(),
            metrics_path: DEFAULT_METRICS_PATH.into(),
        }
    }
}

impl Endpoints {
    /// ベースURLだけ差し替えた設定
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// 空のベースURLはエラー、スキームなしも弾く
    pub fn validate(&self) -> Result<()> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(Error::Config("ベースURLが空です".into()));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(Error::Config(format!("ベースURLにはhttp(s)スキームが必要です: {}", base)));
        }
        Ok(())
    }

    pub fn predict_url(&self) -> String {
        join_url(&self.base_url, &self.predict_path)
    }

    pub fn metrics_url(&self) -> String {
        join_url(&self.base_url, &self.metrics_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    let path = path.trim().trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

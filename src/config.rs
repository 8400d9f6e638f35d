use crate::error::{CellScopeError, Result};
use cellscope_common::config::BASE_URL_ENV;
use cellscope_common::Endpoints;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub endpoints: Endpoints,
    pub confidence_precision: usize,
    /// 予測リクエストのタイムアウト（None = 無制限）
    pub timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            confidence_precision: 2,
            timeout_seconds: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CellScopeError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("cellscope").join("config.json"))
    }

    /// 実際に使うエンドポイント
    ///
    /// 優先順位: コマンドライン引数 > 環境変数 > 設定ファイル
    pub fn resolve_endpoints(&self, override_base: Option<&str>) -> Result<Endpoints> {
        let env_base = std::env::var(BASE_URL_ENV).ok().filter(|v| !v.trim().is_empty());
        self.resolve_endpoints_with(override_base, env_base.as_deref())
    }

    pub fn resolve_endpoints_with(&self, override_base: Option<&str>, env_base: Option<&str>) -> Result<Endpoints> {
        let mut endpoints = self.endpoints.clone();
        if let Some(base) = override_base.or(env_base) {
            endpoints.base_url = base.trim().to_string();
        }
        endpoints.validate()?;
        Ok(endpoints)
    }

    pub fn set_base_url(&mut self, base_url: String) -> Result<()> {
        let candidate = Endpoints {
            base_url,
            ..self.endpoints.clone()
        };
        candidate.validate()?;
        self.endpoints = candidate;
        self.save()
    }
}

//! 予測サーバーとの通信
//!
//! - 予測: multipart POST（フィールド名 `file` に1ファイル）
//! - 指標カタログ: GET

use crate::error::{CellScopeError, Result};
use cellscope_common::{Endpoints, MetricsCatalog, PredictionPayload, SelectedFile, SubmitError, FILE_FIELD};
use reqwest::multipart::{Form, Part};
use std::time::Duration;

pub struct PredictionClient {
    http: reqwest::Client,
    endpoints: Endpoints,
    timeout: Option<Duration>,
}

impl PredictionClient {
    pub fn new(endpoints: Endpoints) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("cellscope/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, endpoints, timeout: None })
    }

    /// 予測リクエストのタイムアウト（既定は無制限）
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// 画像を送信してペイロードを受け取る
    ///
    /// 通信失敗・非2xx・JSONでない応答はTransportエラー。
    /// `success: false` の判定は呼び出し側（UploadSession）で行う。
    pub async fn predict(&self, file: &SelectedFile) -> std::result::Result<PredictionPayload, SubmitError> {
        let url = self.endpoints.predict_url();
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| SubmitError::transport(format!("MIMEタイプが不正: {}", e)))?;
        let form = Form::new().part(FILE_FIELD, part);

        tracing::debug!(%url, file = %file.name, bytes = file.len(), "予測リクエスト送信");

        let mut request = self.http.post(&url).multipart(form);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(%url, error = %e, "予測リクエストの送信に失敗");
            SubmitError::transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%url, status = status.as_u16(), body = %body, "予測サーバーがエラーを返しました");
            return Err(SubmitError::http_status(status.as_u16(), status.to_string()));
        }

        let value: serde_json::Value = response.json().await.map_err(|e| {
            tracing::error!(%url, error = %e, "予測レスポンスがJSONではありません");
            SubmitError::transport(format!("レスポンスのパースに失敗: {}", e))
        })?;

        let payload = PredictionPayload::from(value);
        tracing::debug!(kind = payload.kind(), "予測レスポンス受信");
        Ok(payload)
    }

    /// 指標カタログを取得
    pub async fn fetch_metrics(&self) -> Result<MetricsCatalog> {
        let url = self.endpoints.metrics_url();
        tracing::debug!(%url, "指標カタログ取得");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CellScopeError::MetricsFetch(format!("HTTP {}", status)));
        }

        let catalog: MetricsCatalog = response.json().await?;
        Ok(catalog)
    }
}

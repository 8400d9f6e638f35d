//! 選択ファイルとプレビュー
//!
//! CLIではディスクから、WebではFileReaderのData URLから生成される。

use base64::{engine::general_purpose::STANDARD, Engine as _};
use crate::error::{Error, Result};

/// multipartリクエストでファイルを載せるフィールド名
pub const FILE_FIELD: &str = "file";

/// MIMEタイプ不明時のデフォルト
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// ユーザーが選択した画像ファイル（クライアント側のみ、永続化しない）
#[derive(Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let mime_type = mime_type.into();
        Self {
            name: name.into(),
            mime_type: if mime_type.is_empty() { FALLBACK_MIME_TYPE.to_string() } else { mime_type },
            bytes,
        }
    }

    /// Data URLからファイルを復元
    ///
    /// # Arguments
    /// * `name` - ファイル名
    /// * `data_uri` - "data:image/png;base64,iVBOR..." 形式のData URL
    pub fn from_data_uri(name: impl Into<String>, data_uri: &str) -> Result<Self> {
        let (mime_type, payload) = split_data_uri(data_uri)
            .ok_or_else(|| Error::Decode("Data URLの形式が不正です".into()))?;
        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| Error::Decode(format!("Base64デコード失敗: {}", e)))?;
        Ok(Self::new(name, mime_type, bytes))
    }

    /// 画像MIMEタイプかどうか（送信可否の判定には使わない）
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn preview(&self) -> PreviewDataUri {
        PreviewDataUri::encode(&self.mime_type, &self.bytes)
    }
}

impl std::fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// プレビュー表示用のData URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewDataUri(String);

impl PreviewDataUri {
    pub fn encode(mime_type: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn mime_type(&self) -> &str {
        split_data_uri(&self.0).map(|(mime, _)| mime).unwrap_or(FALLBACK_MIME_TYPE)
    }
}

impl std::fmt::Display for PreviewDataUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Data URLをMIMEタイプとBase64部分に分割
///
/// base64エンコードでないData URLはNone
pub fn split_data_uri(data_uri: &str) -> Option<(&str, &str)> {
    let rest = data_uri.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64")?;
    let mime = if mime.is_empty() { FALLBACK_MIME_TYPE } else { mime };
    Some((mime, payload))
}

/// サーバーが返す画像フィールドを表示用Data URLに正規化
///
/// 生のBase64ならPNGとみなす。すでにData URLならそのまま。
pub fn image_data_uri(field: &str) -> String {
    let trimmed = field.trim();
    if trimmed.starts_with("data:") {
        trimmed.to_string()
    } else {
        format!("data:image/png;base64,{}", trimmed)
    }
}

/// 表示用画像フィールドをバイト列にデコード
pub fn decode_image_field(field: &str) -> Result<Vec<u8>> {
    let normalized = image_data_uri(field);
    let (_, payload) = split_data_uri(&normalized)
        .ok_or_else(|| Error::Decode("画像データの形式が不正です".into()))?;
    STANDARD
        .decode(payload)
        .map_err(|e| Error::Decode(format!("Base64デコード失敗: {}", e)))
}

//! 画像ファイルの読み込み
//!
//! MIMEタイプは内容から判定し、だめなら拡張子、それも無理なら octet-stream。
//! 画像以外でも送信はできる（警告のみ）。

use crate::error::{CellScopeError, Result};
use cellscope_common::file::FALLBACK_MIME_TYPE;
use cellscope_common::SelectedFile;
use image::ImageFormat;
use std::path::Path;

pub fn load_selected_file(path: &Path) -> Result<SelectedFile> {
    if !path.is_file() {
        return Err(CellScopeError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload".to_string());
    let mime_type = detect_mime_type(path, &bytes);

    let file = SelectedFile::new(name, mime_type, bytes);
    if !file.is_image() {
        tracing::warn!(file = %file.name, mime = %file.mime_type, "画像ではないファイルを送信します");
    }
    tracing::debug!(file = %file.name, mime = %file.mime_type, bytes = file.len(), "ファイルを読み込みました");
    Ok(file)
}

pub fn detect_mime_type(path: &Path, bytes: &[u8]) -> String {
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type().to_string();
    }

    path.extension()
        .and_then(ImageFormat::from_extension)
        .map(|f| f.to_mime_type().to_string())
        .unwrap_or_else(|| FALLBACK_MIME_TYPE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0];

    #[test]
    fn test_detect_by_content() {
        assert_eq!(detect_mime_type(Path::new("cell.bin"), PNG_MAGIC), "image/png");
    }

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(detect_mime_type(Path::new("cell.jpg"), b"dummy"), "image/jpeg");
    }

    #[test]
    fn test_detect_fallback() {
        assert_eq!(detect_mime_type(Path::new("notes.txt"), b"hello"), FALLBACK_MIME_TYPE);
    }
}

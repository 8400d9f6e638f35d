//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// 送信処理のエラー分類
///
/// どれも現在の送信に対して終端で、自動リトライはしない。
/// ビューは操作可能なまま残り、ユーザーが再送信する。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// ファイル未選択のまま送信された（入力エラー）
    #[error("画像ファイルが選択されていません")]
    NoFileSelected,

    /// 通信失敗または2xx以外のステータス
    #[error("通信エラー{}: {}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default(), .detail)]
    Transport { status: Option<u16>, detail: String },

    /// レスポンスは届いたが `success: false` が返された
    #[error("解析に失敗しました: {}", .message.as_deref().unwrap_or("不明なエラー"))]
    Application { message: Option<String> },
}

impl SubmitError {
    pub fn transport(detail: impl Into<String>) -> Self {
        SubmitError::Transport { status: None, detail: detail.into() }
    }

    pub fn http_status(status: u16, detail: impl Into<String>) -> Self {
        SubmitError::Transport { status: Some(status), detail: detail.into() }
    }

    /// 画面に表示するメッセージ
    ///
    /// 通信エラーの詳細はログにのみ出し、ユーザーには汎用メッセージを見せる。
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::NoFileSelected => "画像ファイルを選択してください".to_string(),
            SubmitError::Transport { .. } => "サーバーへの画像送信中にエラーが発生しました".to_string(),
            SubmitError::Application { message: Some(msg) } if !msg.trim().is_empty() => msg.clone(),
            SubmitError::Application { .. } => "解析に失敗しました".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_config() {
        let error = Error::Config("ベースURLが空です".to_string());
        assert_eq!(format!("{}", error), "Config error: ベースURLが空です");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_transport_display_with_status() {
        let err = SubmitError::http_status(502, "Bad Gateway");
        let display = format!("{}", err);
        assert!(display.contains("HTTP 502"));
        assert!(display.contains("Bad Gateway"));
    }

    #[test]
    fn test_transport_user_message_hides_detail() {
        let err = SubmitError::transport("connection refused (os error 111)");
        assert!(!err.user_message().contains("os error"));
    }

    #[test]
    fn test_application_user_message() {
        let with_msg = SubmitError::Application { message: Some("モデル未ロード".to_string()) };
        assert_eq!(with_msg.user_message(), "モデル未ロード");

        let blank = SubmitError::Application { message: Some("  ".to_string()) };
        assert_eq!(blank.user_message(), "解析に失敗しました");

        let none = SubmitError::Application { message: None };
        assert_eq!(none.user_message(), "解析に失敗しました");
    }
}

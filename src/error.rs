use cellscope_common::SubmitError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CellScopeError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("送信エラー: {0}")]
    Submit(#[from] SubmitError),

    #[error("指標カタログの取得に失敗: {0}")]
    MetricsFetch(String),

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] cellscope_common::Error),
}

pub type Result<T> = std::result::Result<T, CellScopeError>;

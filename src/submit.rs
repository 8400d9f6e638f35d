//! 送信処理（状態遷移 + 1回のHTTPリクエスト）

use crate::client::PredictionClient;
use cellscope_common::{Completion, SubmitError, UploadSession};

/// 選択中のファイルを送信し、応答をセッションに反映する
///
/// ファイル未選択なら通信せずに `NoFileSelected` を返す。
pub async fn submit_selected(
    session: &mut UploadSession,
    client: &PredictionClient,
) -> Result<Completion, SubmitError> {
    let ticket = session.begin_submit()?;
    let file = session.file().cloned().ok_or(SubmitError::NoFileSelected)?;

    let outcome = client.predict(&file).await;
    let completion = session.complete(ticket, outcome);

    if let Some(err) = session.error() {
        tracing::warn!(seq = ticket.seq(), error = %err, "送信に失敗しました");
    } else {
        tracing::info!(seq = ticket.seq(), state = session.state().as_str(), "送信完了");
    }
    Ok(completion)
}

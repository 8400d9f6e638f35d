//! アップロード画面の状態管理
//!
//! 状態遷移は `UploadSession` のメソッド経由のみ:
//!
//! ```text
//! Idle ──submit──▶ InFlight ──2xx + 認識可能なペイロード──▶ Succeeded
//!                     │
//!                     └──通信失敗 / 非2xx / success:false──▶ Failed
//! ```
//!
//! 送信ごとに単調増加のチケットを発行し、最新でないチケットの応答は捨てる。

use crate::error::SubmitError;
use crate::file::{PreviewDataUri, SelectedFile};
use crate::types::PredictionPayload;

/// リクエストのライフサイクル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

impl RequestState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestState::Idle => "idle",
            RequestState::InFlight => "in-flight",
            RequestState::Succeeded => "succeeded",
            RequestState::Failed => "failed",
        }
    }
}

/// 画面のタブ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewTab {
    #[default]
    Upload,
    Results,
    Charts,
}

impl ViewTab {
    pub const ALL: [ViewTab; 3] = [ViewTab::Upload, ViewTab::Results, ViewTab::Charts];

    pub fn label(&self) -> &'static str {
        match self {
            ViewTab::Upload => "アップロード",
            ViewTab::Results => "解析結果",
            ViewTab::Charts => "時系列",
        }
    }
}

/// 送信1回分の識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTicket {
    seq: u64,
}

impl SubmitTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// 応答を反映した結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied(RequestState),
    /// 新しい送信に置き換えられたか、取り消し済み
    Stale,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadSession {
    file: Option<SelectedFile>,
    preview: Option<PreviewDataUri>,
    state: RequestState,
    result: Option<PredictionPayload>,
    error: Option<SubmitError>,
    tab: ViewTab,
    issued: u64,
    pending: Option<u64>,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// ファイルを選択（以前の選択とプレビューは丸ごと置き換え）
    pub fn select_file(&mut self, file: SelectedFile) -> &PreviewDataUri {
        let preview = file.preview();
        self.file = Some(file);
        self.preview.insert(preview)
    }

    pub fn clear_file(&mut self) {
        self.file = None;
        self.preview = None;
    }

    /// 送信開始
    ///
    /// ファイル未選択なら何もせず `NoFileSelected` を返す（リクエストは発行しない）。
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, SubmitError> {
        if self.file.is_none() {
            return Err(SubmitError::NoFileSelected);
        }
        self.issued += 1;
        self.pending = Some(self.issued);
        self.state = RequestState::InFlight;
        self.error = None;
        Ok(SubmitTicket { seq: self.issued })
    }

    /// 応答を反映
    ///
    /// 最新チケット以外の応答は `Stale` として破棄する。
    pub fn complete(
        &mut self,
        ticket: SubmitTicket,
        outcome: Result<PredictionPayload, SubmitError>,
    ) -> Completion {
        if self.pending != Some(ticket.seq) {
            return Completion::Stale;
        }
        self.pending = None;

        match outcome.and_then(PredictionPayload::into_outcome) {
            Ok(payload) => {
                self.result = Some(payload);
                self.error = None;
                self.state = RequestState::Succeeded;
                self.tab = ViewTab::Results;
            }
            Err(err) => {
                self.error = Some(err);
                self.state = RequestState::Failed;
            }
        }
        Completion::Applied(self.state)
    }

    /// 送信中のリクエストを取り消す（アンマウント時など）
    pub fn cancel_pending(&mut self) {
        self.pending = None;
        if self.state == RequestState::InFlight {
            self.state = RequestState::Idle;
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn set_tab(&mut self, tab: ViewTab) {
        self.tab = tab;
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn preview(&self) -> Option<&PreviewDataUri> {
        self.preview.as_ref()
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn is_in_flight(&self) -> bool {
        self.state == RequestState::InFlight
    }

    pub fn result(&self) -> Option<&PredictionPayload> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&SubmitError> {
        self.error.as_ref()
    }

    pub fn tab(&self) -> ViewTab {
        self.tab
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn png(name: &str, bytes: &[u8]) -> SelectedFile {
        SelectedFile::new(name, "image/png", bytes.to_vec())
    }

    #[test]
    fn test_submit_without_file_is_noop() {
        let mut session = UploadSession::new();
        assert_eq!(session.begin_submit(), Err(SubmitError::NoFileSelected));
        assert_eq!(session.state(), RequestState::Idle);
        assert!(session.result().is_none());
    }

    #[test]
    fn test_new_selection_replaces_preview() {
        let mut session = UploadSession::new();
        let first = session.select_file(png("a.png", &[1])).clone();
        let second = session.select_file(png("b.png", &[2])).clone();

        assert_ne!(first, second);
        assert_eq!(session.preview(), Some(&second));
        assert_eq!(session.file().map(|f| f.name.as_str()), Some("b.png"));
    }

    #[test]
    fn test_success_switches_to_results() {
        let mut session = UploadSession::new();
        session.select_file(png("a.png", &[1]));
        let ticket = session.begin_submit().unwrap();
        assert!(session.is_in_flight());

        let payload = PredictionPayload::from(json!({"label": "plasma", "confidence": 90.0}));
        let completion = session.complete(ticket, Ok(payload.clone()));

        assert_eq!(completion, Completion::Applied(RequestState::Succeeded));
        assert_eq!(session.result(), Some(&payload));
        assert_eq!(session.tab(), ViewTab::Results);
    }

    #[test]
    fn test_success_false_fails_without_tab_switch() {
        let mut session = UploadSession::new();
        session.select_file(png("a.png", &[1]));
        let ticket = session.begin_submit().unwrap();

        let payload = PredictionPayload::from(json!({"success": false, "message": "invalid image"}));
        session.complete(ticket, Ok(payload));

        assert_eq!(session.state(), RequestState::Failed);
        assert_eq!(session.tab(), ViewTab::Upload);
        assert!(session.result().is_none());
        assert_eq!(
            session.error(),
            Some(&SubmitError::Application { message: Some("invalid image".to_string()) })
        );
    }

    #[test]
    fn test_transport_error_fails() {
        let mut session = UploadSession::new();
        session.select_file(png("a.png", &[1]));
        let ticket = session.begin_submit().unwrap();
        session.complete(ticket, Err(SubmitError::http_status(500, "Internal Server Error")));

        assert_eq!(session.state(), RequestState::Failed);
        assert!(matches!(session.error(), Some(SubmitError::Transport { status: Some(500), .. })));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut session = UploadSession::new();
        session.select_file(png("a.png", &[1]));
        let first = session.begin_submit().unwrap();
        let second = session.begin_submit().unwrap();
        assert!(second.seq() > first.seq());

        let newer = PredictionPayload::from(json!({"label": "newer"}));
        assert_eq!(session.complete(second, Ok(newer.clone())), Completion::Applied(RequestState::Succeeded));

        let older = PredictionPayload::from(json!({"label": "older"}));
        assert_eq!(session.complete(first, Ok(older)), Completion::Stale);
        assert_eq!(session.result(), Some(&newer));
    }

    #[test]
    fn test_cancel_pending_discards_late_response() {
        let mut session = UploadSession::new();
        session.select_file(png("a.png", &[1]));
        let ticket = session.begin_submit().unwrap();
        session.cancel_pending();

        assert_eq!(session.state(), RequestState::Idle);
        let late = PredictionPayload::from(json!({"label": "late"}));
        assert_eq!(session.complete(ticket, Ok(late)), Completion::Stale);
        assert!(session.result().is_none());
    }

    #[test]
    fn test_resubmit_after_failure_clears_error() {
        let mut session = UploadSession::new();
        session.select_file(png("a.png", &[1]));
        let ticket = session.begin_submit().unwrap();
        session.complete(ticket, Err(SubmitError::transport("timeout")));
        assert!(session.error().is_some());

        session.begin_submit().unwrap();
        assert!(session.error().is_none());
        assert_eq!(session.state(), RequestState::InFlight);
    }

    #[test]
    fn test_dismiss_error_keeps_failed_state() {
        let mut session = UploadSession::new();
        session.select_file(png("a.png", &[1]));
        let ticket = session.begin_submit().unwrap();
        session.complete(ticket, Err(SubmitError::transport("timeout")));

        session.dismiss_error();
        assert!(session.error().is_none());
        assert_eq!(session.state(), RequestState::Failed);
    }

    #[test]
    fn test_clear_file_blocks_submit() {
        let mut session = UploadSession::new();
        session.select_file(png("a.png", &[1]));
        session.clear_file();

        assert!(session.file().is_none());
        assert!(session.preview().is_none());
        assert_eq!(session.begin_submit(), Err(SubmitError::NoFileSelected));
    }

    #[test]
    fn test_set_tab_keeps_result() {
        let mut session = UploadSession::new();
        session.select_file(png("a.png", &[1]));
        let ticket = session.begin_submit().unwrap();
        session.complete(ticket, Ok(PredictionPayload::from(json!({"count": 3}))));

        session.set_tab(ViewTab::Charts);
        assert_eq!(session.tab(), ViewTab::Charts);
        assert!(session.result().is_some());
    }
}

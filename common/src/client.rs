//! アップロードクライアントの状態機械
//!
//! 選択 → 検証 → プレビュー → 送信 → 結果表示 → ダウンロード → リセット
//! の流れを、I/Oを持たない純粋な状態遷移として表す。
//! 実際のファイル読み込みとHTTP通信はフロントエンド（CLI/WASM）が
//! `begin_*` と `complete_*` の間で行う。
//!
//! 遅れて届いた完了通知（リセット後・再選択後）は世代番号で判定して捨てる。

use crate::endpoints::{ApiBase, download_file_name};
use crate::error::{Result, UploadError};
use crate::preview::PreviewHandle;
use crate::reply::interpret_upload_reply;
use crate::types::{HttpReply, SelectedFile};
use crate::validation::validate_image;

/// UIの状態。常にどれか1つだけが有効
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    FileSelected,
    Loading,
    Ready,
    Error(String),
}

impl UiState {
    pub fn as_str(&self) -> &'static str {
        match self {
            UiState::Idle => "idle",
            UiState::FileSelected => "file-selected",
            UiState::Loading => "loading",
            UiState::Ready => "ready",
            UiState::Error(_) => "error",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            UiState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// ファイル入力欄の保持値
///
/// 変更検出はプラットフォーム側（ブラウザの変更イベント、CLIの`open`）に任せ、
/// ここでは最後に選ばれた値を覚えるだけ。リセットで空に戻す。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInput {
    value: Option<String>,
}

impl FileInput {
    pub fn set(&mut self, value: &str) {
        self.value = Some(value.to_string());
    }

    pub fn clear(&mut self) {
        self.value = None;
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// プレビュー生成の受付票
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewTicket {
    generation: u64,
}

/// 送信の受付票。`file`をmultipartの`file`フィールドとして`url`へPOSTする
#[derive(Debug, Clone)]
pub struct UploadTicket {
    generation: u64,
    pub url: String,
    /// 選択時のファイル
    ///
    /// ブラウザ版は`bytes`を空のまま持ち、送信本文は選択時に保持した
    /// `web_sys::File`から読む。名前とMIMEタイプはどちらの版でも有効。
    pub file: SelectedFile,
}

/// ダウンロード要求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub file_name: String,
    pub file_id: String,
}

/// 送信完了の適用結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// 成功。`file_id`を保持してReadyへ
    Ready(String),
    /// 失敗。Errorへ
    Failed(UploadError),
    /// 既に無関係になった応答。状態は変更しない
    Stale,
}

/// アップロードクライアント
#[derive(Debug, Clone)]
pub struct UploadClient {
    api_base: ApiBase,
    state: UiState,
    selected: Option<SelectedFile>,
    preview: Option<PreviewHandle>,
    file_id: Option<String>,
    file_input: FileInput,
    selection_generation: u64,
    upload_generation: u64,
}

impl Default for UploadClient {
    fn default() -> Self {
        Self::new(ApiBase::default())
    }
}

impl UploadClient {
    pub fn new(api_base: ApiBase) -> Self {
        Self {
            api_base,
            state: UiState::Idle,
            selected: None,
            preview: None,
            file_id: None,
            file_input: FileInput::default(),
            selection_generation: 0,
            upload_generation: 0,
        }
    }

    pub fn api_base(&self) -> &ApiBase {
        &self.api_base
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.as_ref()
    }

    pub fn file_id(&self) -> Option<&str> {
        self.file_id.as_deref()
    }

    pub fn file_input(&self) -> &FileInput {
        &self.file_input
    }

    /// 結果画像のURL（`{API_BASE}/download/{file_id}`）
    pub fn result_handle(&self) -> Option<String> {
        self.file_id
            .as_deref()
            .map(|id| self.api_base.download_url(id))
    }

    /// 送信ボタンを押せるか
    pub fn can_submit(&self) -> bool {
        self.selected.is_some() && !self.state.is_loading()
    }

    /// ファイル入力欄からの選択
    ///
    /// 入力欄の値を記録して毎回`select_file`を行う。
    /// 値が前回と同じでも中身は別ファイルのことがある（ブラウザの`C:\fakepath\`）。
    pub fn pick(&mut self, input_value: &str, file: SelectedFile) -> Result<PreviewTicket> {
        self.file_input.set(input_value);
        self.select_file(file)
    }

    /// ファイルを選択
    ///
    /// 検証に失敗した場合はErrorへ遷移し、以前の選択はそのまま残す。
    /// 成功時は以前のエラー・結果・プレビューを消し、送信中の応答を無効化する。
    pub fn select_file(&mut self, file: SelectedFile) -> Result<PreviewTicket> {
        if let Err(e) = validate_image(&file.name, &file.mime_type) {
            let err = UploadError::from(e);
            self.fail(&err);
            return Err(err);
        }

        self.selection_generation += 1;
        self.upload_generation += 1;
        self.selected = Some(file);
        self.preview = None;
        self.file_id = None;
        self.state = UiState::FileSelected;

        Ok(PreviewTicket {
            generation: self.selection_generation,
        })
    }

    /// プレビュー生成完了。古い受付票なら無視してfalse
    pub fn complete_preview(&mut self, ticket: PreviewTicket, handle: PreviewHandle) -> bool {
        if ticket.generation != self.selection_generation || self.selected.is_none() {
            return false;
        }
        self.preview = Some(handle);
        true
    }

    /// 送信開始
    ///
    /// 送信中なら`InFlight`で拒否（状態は変えない）。
    /// ファイル未選択ならErrorへ遷移し、通信は行わない。
    pub fn begin_submit(&mut self) -> Result<UploadTicket> {
        if self.state.is_loading() {
            return Err(UploadError::InFlight);
        }

        let Some(file) = self.selected.clone() else {
            let err = UploadError::NoFileSelected;
            self.fail(&err);
            return Err(err);
        };

        self.upload_generation += 1;
        self.file_id = None;
        self.state = UiState::Loading;

        Ok(UploadTicket {
            generation: self.upload_generation,
            url: self.api_base.remove_background_url(),
            file,
        })
    }

    /// 送信完了
    ///
    /// 受付票が現在の送信でなければ`Stale`を返し何もしない。
    pub fn complete_submit(
        &mut self,
        ticket: &UploadTicket,
        outcome: Result<HttpReply>,
    ) -> Completion {
        if ticket.generation != self.upload_generation || !self.state.is_loading() {
            return Completion::Stale;
        }

        match outcome.and_then(|reply| interpret_upload_reply(&reply)) {
            Ok(file_id) => {
                self.file_id = Some(file_id.clone());
                self.state = UiState::Ready;
                Completion::Ready(file_id)
            }
            Err(err) => {
                self.fail(&err);
                Completion::Failed(err)
            }
        }
    }

    /// 結果のダウンロード要求。結果が無ければNone
    pub fn download(&self) -> Option<DownloadRequest> {
        let file_id = self.file_id.as_deref()?;
        Some(DownloadRequest {
            url: self.api_base.download_url(file_id),
            file_name: download_file_name(file_id),
            file_id: file_id.to_string(),
        })
    }

    /// すべてを初期状態に戻す。送信中の応答とプレビューは無効化される
    pub fn reset(&mut self) {
        self.selection_generation += 1;
        self.upload_generation += 1;
        self.selected = None;
        self.preview = None;
        self.file_id = None;
        self.file_input.clear();
        self.state = UiState::Idle;
    }

    fn fail(&mut self, err: &UploadError) {
        self.state = UiState::Error(err.to_string());
    }
}

//! エラー型定義
//!
//! すべてのエラーはUIに表示する1行のメッセージに変換される。
//! Displayの文言がそのままユーザー向けメッセージになる。

use thiserror::Error;

/// 送信失敗時の汎用メッセージ
pub const GENERIC_TRANSPORT_MESSAGE: &str = "request failed, please try again";
/// 非2xxで`detail`が無い場合のメッセージ
pub const GENERIC_BACKEND_MESSAGE: &str = "error while processing the image";
/// `success: false`で`message`が無い場合のメッセージ
pub const GENERIC_LOGICAL_MESSAGE: &str = "unknown error";

/// ファイル選択時の検証エラー（ネットワーク送信前）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("please choose an image")]
    NotAnImage,

    #[error("only JPG and PNG are supported")]
    UnsupportedExtension,
}

/// クライアント共通エラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("please choose a file")]
    NoFileSelected,

    /// 送信中の再送信。状態は変更しない
    #[error("an upload is already in progress")]
    InFlight,

    /// 通信失敗・タイムアウト・解析不能なレスポンス
    #[error("request failed, please try again")]
    Transport { reason: String },

    /// 非2xxレスポンス
    #[error("{message}")]
    BackendDeclared { status: u16, message: String },

    /// 2xxだが`success: false`
    #[error("{0}")]
    LogicalFailure(String),
}

impl UploadError {
    pub fn transport(reason: impl Into<String>) -> Self {
        UploadError::Transport { reason: reason.into() }
    }

    /// UIの状態遷移を伴わない拒否かどうか
    pub fn is_rejection(&self) -> bool {
        matches!(self, UploadError::InFlight)
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, UploadError>;

use bg_remover_common::UploadError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BgRemoverError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    /// 状態機械からのエラー（メッセージはそのまま表示）
    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ダウンロード失敗 ({status}): {message}")]
    Download { status: u16, message: String },

    #[error("処理結果がありません。先に `remove` を実行してください")]
    NoResult,

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),
}

pub type Result<T> = std::result::Result<T, BgRemoverError>;

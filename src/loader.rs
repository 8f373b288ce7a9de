//! ローカル画像の読み込みとプレビュー生成
//!
//! ブラウザの`File.type`の代わりに、バイト列から形式を判定してMIMEタイプを付ける。

use crate::error::{BgRemoverError, Result};
use bg_remover_common::{PreviewHandle, SelectedFile};
use std::path::Path;
use tracing::debug;

const UNKNOWN_MIME: &str = "application/octet-stream";

/// プレビュー情報
#[derive(Debug, Clone)]
pub struct Preview {
    pub handle: PreviewHandle,
    /// 画像として解釈できた場合の (幅, 高さ)
    pub dimensions: Option<(u32, u32)>,
}

/// バイト列からMIMEタイプを判定
pub fn sniff_mime_type(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or(UNKNOWN_MIME)
}

/// ファイルを読み込んでSelectedFileを作る（検証は状態機械側）
pub async fn load_file(path: &Path) -> Result<SelectedFile> {
    if !path.is_file() {
        return Err(BgRemoverError::FileNotFound(path.display().to_string()));
    }

    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let mime_type = sniff_mime_type(&bytes);
    debug!("Loaded {} ({} bytes, {})", file_name, bytes.len(), mime_type);

    Ok(SelectedFile::new(file_name, mime_type, bytes))
}

/// プレビューを生成（デコードは別スレッド）
pub async fn generate_preview(file: &SelectedFile) -> Result<Preview> {
    let bytes = file.bytes.clone();
    let handle = PreviewHandle::from_bytes(&file.mime_type, &bytes);

    let dimensions = tokio::task::spawn_blocking(move || {
        image::load_from_memory(&bytes)
            .ok()
            .map(|img| (img.width(), img.height()))
    })
    .await
    .map_err(|e| BgRemoverError::ImageLoad(e.to_string()))?;

    Ok(Preview { handle, dimensions })
}

//! プレビュー用Data URL
//!
//! ブラウザのFileReader.readAsDataURLと同じ形式
//! （"data:image/png;base64,iVBORw0KGgo..."）を生成・分解する。

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// 選択ファイルのローカル表示用参照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewHandle(String);

impl PreviewHandle {
    /// 既存のData URL（FileReaderの結果など）から作成
    pub fn from_data_url(data_url: impl Into<String>) -> Self {
        Self(data_url.into())
    }

    /// バイト列からData URLを生成
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn mime_type(&self) -> &str {
        extract_mime_type_from_data_url(&self.0)
    }

    /// Base64部分をデコード
    pub fn decode(&self) -> Option<Vec<u8>> {
        let data = extract_base64_from_data_url(&self.0)?;
        STANDARD.decode(data).ok()
    }
}

/// Data URLからBase64データ部分を抽出
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    data_url.split(',').nth(1)
}

/// Data URLからMIMEタイプを抽出（失敗時は"application/octet-stream"）
pub fn extract_mime_type_from_data_url(data_url: &str) -> &str {
    data_url
        .strip_prefix("data:")
        .and_then(|s| s.split(';').next())
        .filter(|s| !s.is_empty())
        .unwrap_or("application/octet-stream")
}

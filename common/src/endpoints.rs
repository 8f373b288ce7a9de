//! バックエンドのエンドポイント
//!
//! 結果URLは`file_id`から決定的に導出する。

/// 既定のAPIベースURL
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// APIベースURL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(String);

impl ApiBase {
    /// 末尾のスラッシュは取り除く
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self(base.trim_end_matches('/').to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn remove_background_url(&self) -> String {
        format!("{}/remove-background", self.0)
    }

    pub fn download_url(&self, file_id: &str) -> String {
        format!("{}/download/{}", self.0, file_id)
    }

    pub fn health_url(&self) -> String {
        format!("{}/health", self.0)
    }

    pub fn cleanup_url(&self, file_id: &str) -> String {
        format!("{}/cleanup/{}", self.0, file_id)
    }
}

impl Default for ApiBase {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl std::fmt::Display for ApiBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// ダウンロード時の推奨ファイル名
pub fn download_file_name(file_id: &str) -> String {
    format!("removed_background_{}.png", file_id)
}

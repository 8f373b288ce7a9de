use crate::error::{BgRemoverError, Result};
use bg_remover_common::{ApiBase, DEFAULT_API_BASE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// APIベースURLを上書きする環境変数
pub const API_BASE_ENV: &str = "BG_REMOVER_API_BASE";

/// 送信タイムアウトの既定値（秒）
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_base: String,
    pub timeout_seconds: u64,
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            output_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| BgRemoverError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("bg-remover").join("config.json"))
    }

    /// 有効なAPIベースURL
    ///
    /// 優先順位: 引数 > 環境変数 > 設定ファイル
    pub fn resolve_api_base(&self, override_base: Option<&str>) -> ApiBase {
        if let Some(base) = override_base {
            return ApiBase::new(base);
        }
        if let Ok(base) = std::env::var(API_BASE_ENV) {
            if !base.trim().is_empty() {
                return ApiBase::new(base.trim());
            }
        }
        ApiBase::new(self.api_base.as_str())
    }

    /// 出力先ディレクトリ（未設定ならカレント）
    pub fn output_dir_or_default(&self, override_dir: Option<&Path>) -> PathBuf {
        override_dir
            .map(Path::to_path_buf)
            .or_else(|| self.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn set_api_base(&mut self, base: String) -> Result<()> {
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(BgRemoverError::Config(format!(
                "APIベースURLはhttp://またはhttps://で始まる必要があります: {}",
                base
            )));
        }
        self.api_base = base;
        Ok(())
    }

    /// 有効なタイムアウト秒数。引数 > 設定ファイル、0は拒否
    pub fn resolve_timeout(&self, override_secs: Option<u64>) -> Result<u64> {
        let seconds = override_secs.unwrap_or(self.timeout_seconds);
        check_timeout(seconds)?;
        Ok(seconds)
    }

    pub fn set_timeout(&mut self, seconds: u64) -> Result<()> {
        check_timeout(seconds)?;
        self.timeout_seconds = seconds;
        Ok(())
    }
}

fn check_timeout(seconds: u64) -> Result<()> {
    if seconds == 0 {
        return Err(BgRemoverError::Config("タイムアウトは1秒以上を指定してください".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_base, "http://localhost:8000");
        assert_eq!(config.timeout_seconds, 60);
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.set_api_base("http://remote:9000".into()).unwrap();
        config.set_timeout(15).unwrap();
        config.output_dir = Some(PathBuf::from("/tmp/out"));
        config.save_to(&path).expect("設定保存失敗");

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"timeout_seconds": 5}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        assert!(config.set_api_base("localhost:8000".into()).is_err());
        assert!(config.set_timeout(0).is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_resolve_timeout() {
        let config = Config::default();
        assert_eq!(config.resolve_timeout(None).unwrap(), DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(config.resolve_timeout(Some(5)).unwrap(), 5);
        assert!(matches!(config.resolve_timeout(Some(0)), Err(BgRemoverError::Config(_))));

        // 手で書き換えた設定ファイルの0も拒否
        let edited = Config {
            timeout_seconds: 0,
            ..Config::default()
        };
        assert!(edited.resolve_timeout(None).is_err());
    }

    #[test]
    fn test_override_wins() {
        let config = Config::default();
        let base = config.resolve_api_base(Some("http://override:1234/"));
        assert_eq!(base.as_str(), "http://override:1234");
    }

    #[test]
    fn test_output_dir_precedence() {
        let mut config = Config::default();
        assert_eq!(config.output_dir_or_default(None), PathBuf::from("."));
        config.output_dir = Some(PathBuf::from("/data"));
        assert_eq!(config.output_dir_or_default(None), PathBuf::from("/data"));
        assert_eq!(
            config.output_dir_or_default(Some(Path::new("/cli"))),
            PathBuf::from("/cli")
        );
    }
}

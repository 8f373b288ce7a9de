//! 1セッション分のアップロード操作
//!
//! `UploadClient`（状態機械）と`BackendClient`（通信）をつなぐ。

use crate::api::BackendClient;
use crate::error::{BgRemoverError, Result};
use crate::loader::{self, Preview};
use bg_remover_common::{Completion, UploadClient};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct Session {
    client: UploadClient,
    backend: BackendClient,
    show_progress: bool,
}

impl Session {
    pub fn new(backend: BackendClient) -> Self {
        let client = UploadClient::new(backend.base().clone());
        Self {
            client,
            backend,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn client(&self) -> &UploadClient {
        &self.client
    }

    pub fn backend(&self) -> &BackendClient {
        &self.backend
    }

    /// ファイルを読み直して選択し、プレビューを生成
    pub async fn select(&mut self, path: &Path) -> Result<Preview> {
        let file = loader::load_file(path).await?;
        let input_value = path.display().to_string();

        let ticket = self.client.pick(&input_value, file)?;

        let selected = self
            .client
            .selected_file()
            .cloned()
            .ok_or_else(|| BgRemoverError::CliExecution("選択状態が失われました".into()))?;
        let preview = loader::generate_preview(&selected).await?;

        if !self.client.complete_preview(ticket, preview.handle.clone()) {
            warn!("Discarded preview for {}", selected.name);
        }

        Ok(preview)
    }

    /// 選択中のファイルを送信し、成功なら`file_id`を返す
    pub async fn submit(&mut self) -> Result<String> {
        let ticket = self.client.begin_submit()?;

        let spinner = self.show_progress.then(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message(format!("背景を除去中: {}", ticket.file.name));
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });

        let outcome = self.backend.upload(&ticket).await;

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        let completion = self.client.complete_submit(&ticket, outcome);
        debug!("state -> {}", self.client.state().as_str());

        match completion {
            Completion::Ready(file_id) => {
                info!("Background removed, file_id={}", file_id);
                Ok(file_id)
            }
            Completion::Failed(err) => {
                if let bg_remover_common::UploadError::Transport { reason } = &err {
                    warn!("Upload failed: {}", reason);
                }
                Err(err.into())
            }
            Completion::Stale => Err(BgRemoverError::CliExecution(
                "送信結果は破棄されました".into(),
            )),
        }
    }

    /// 結果を`output_dir`に保存。結果が無ければNone
    pub async fn download(&self, output_dir: &Path) -> Result<Option<PathBuf>> {
        let Some(request) = self.client.download() else {
            return Ok(None);
        };

        let bytes = self.backend.download(&request).await?;
        tokio::fs::create_dir_all(output_dir).await?;
        let path = output_dir.join(&request.file_name);
        tokio::fs::write(&path, bytes).await?;
        info!("Saved {}", path.display());

        Ok(Some(path))
    }

    pub fn reset(&mut self) {
        self.client.reset();
    }
}

//! reqwestによるバックエンドクライアント
//!
//! 送信は生の`HttpReply`を返すだけで、解釈は状態機械側で行う。

use crate::error::{BgRemoverError, Result};
use bg_remover_common::{
    ApiBase, CleanupResponse, DownloadRequest, ErrorBody, HealthStatus, HttpReply,
    UploadError, UploadTicket,
};
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base: ApiBase,
    timeout: Duration,
}

impl BackendClient {
    pub fn new(base: ApiBase, timeout_secs: u64) -> Result<Self> {
        Self::with_timeout(base, Duration::from_secs(timeout_secs))
    }

    pub fn with_timeout(base: ApiBase, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base,
            timeout,
        })
    }

    pub fn base(&self) -> &ApiBase {
        &self.base
    }

    /// 画像を`file`フィールドのmultipartでPOST
    pub async fn upload(&self, ticket: &UploadTicket) -> bg_remover_common::Result<HttpReply> {
        let file = &ticket.file;
        info!("Uploading {} ({} bytes) to {}", file.name, file.len(), ticket.url);

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| UploadError::transport(e.to_string()))?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(&ticket.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();
        debug!("Server responded with status {}", status);

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        Ok(HttpReply::new(status, body.to_vec()))
    }

    /// 処理済み画像を取得
    pub async fn download(&self, request: &DownloadRequest) -> Result<Vec<u8>> {
        info!("Downloading {}", request.url);
        let response = self.http.get(&request.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(BgRemoverError::Download {
                status: status.as_u16(),
                message: detail_or(&body, status.canonical_reason().unwrap_or("unknown")),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self.http.get(self.base.health_url()).send().await?;
        let response = response.error_for_status()?;
        Ok(response.json::<HealthStatus>().await?)
    }

    /// サーバー側の処理済みファイルを削除
    pub async fn cleanup(&self, file_id: &str) -> Result<CleanupResponse> {
        let url = self.base.cleanup_url(file_id);
        info!("Cleaning up {}", url);
        let response = self.http.delete(url).send().await?;
        let response = response.error_for_status()?;
        Ok(response.json::<CleanupResponse>().await?)
    }

    fn transport_error(&self, e: reqwest::Error) -> UploadError {
        if e.is_timeout() {
            UploadError::transport(format!("timed out after {:?}", self.timeout))
        } else {
            UploadError::transport(e.to_string())
        }
    }
}

/// エラー本文の`detail`、無ければfallback
fn detail_or(body: &[u8], fallback: &str) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

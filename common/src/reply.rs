//! `/remove-background` 応答の解釈
//!
//! HTTP 200でも`success: false`なら失敗として扱う。

use crate::error::{
    GENERIC_BACKEND_MESSAGE, GENERIC_LOGICAL_MESSAGE, Result, UploadError,
};
use crate::types::{ErrorBody, HttpReply, UploadResponse};

/// 応答を解釈し、成功なら`file_id`を返す
pub fn interpret_upload_reply(reply: &HttpReply) -> Result<String> {
    if !reply.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&reply.body)
            .ok()
            .and_then(|body| body.detail)
            .filter(|detail| !detail.trim().is_empty())
            .unwrap_or_else(|| GENERIC_BACKEND_MESSAGE.to_string());

        return Err(UploadError::BackendDeclared {
            status: reply.status,
            message,
        });
    }

    let response: UploadResponse = serde_json::from_slice(&reply.body)
        .map_err(|e| UploadError::transport(format!("invalid response body: {}", e)))?;

    if !response.success {
        let message = if response.message.trim().is_empty() {
            GENERIC_LOGICAL_MESSAGE.to_string()
        } else {
            response.message
        };
        return Err(UploadError::LogicalFailure(message));
    }

    if response.file_id.trim().is_empty() {
        return Err(UploadError::transport("response did not include a file_id"));
    }

    Ok(response.file_id)
}

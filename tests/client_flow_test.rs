//! アップロードの一連の流れのテスト
//!
//! バックエンドの応答は`HttpReply`で模擬する。

use bg_remover_common::{
    ApiBase, Completion, HttpReply, PreviewHandle, SelectedFile, UiState, UploadClient,
    UploadError,
};

fn image(name: &str, mime: &str) -> SelectedFile {
    SelectedFile::new(name, mime, vec![0xFF, 0xD8, 0xFF, 0xE0])
}

fn client() -> UploadClient {
    UploadClient::new(ApiBase::new("http://localhost:8000"))
}

/// image/以外のMIMEは拒否され、以前の選択は変わらない
#[test]
fn test_non_image_mime_rejected() {
    let mut client = client();
    client.select_file(image("keep.jpg", "image/jpeg")).unwrap();

    for mime in ["text/plain", "application/octet-stream", "audio/png", ""] {
        let err = client.select_file(image("x.png", mime)).unwrap_err();
        assert!(matches!(err, UploadError::Validation(_)), "mime: {mime}");
        assert_eq!(client.selected_file().unwrap().name, "keep.jpg");
    }
}

/// 対応外の拡張子は image/* でも拒否
#[test]
fn test_disallowed_extension_rejected() {
    let mut client = client();
    for name in ["a.gif", "a.webp", "a.tiff", "README", "a.jpg.exe"] {
        let err = client.select_file(image(name, "image/jpeg")).unwrap_err();
        assert_eq!(err.to_string(), "only JPG and PNG are supported", "name: {name}");
        assert!(client.selected_file().is_none());
    }
}

/// 有効な画像ならプレビューが得られ、Errorにはならない
#[test]
fn test_valid_file_gets_preview() {
    let mut client = client();
    let file = image("Photo.JPEG", "image/jpeg");
    let bytes = file.bytes.clone();

    let ticket = client.select_file(file).unwrap();
    assert!(client.complete_preview(ticket, PreviewHandle::from_bytes("image/jpeg", &bytes)));

    assert!(client.preview().is_some());
    assert!(client.state().error_message().is_none());
    assert_eq!(client.preview().unwrap().decode(), Some(bytes));
}

/// 未選択での送信は通信せずエラー
#[test]
fn test_submit_without_file_never_uploads() {
    let mut client = client();
    let result = client.begin_submit();
    assert_eq!(result.unwrap_err(), UploadError::NoFileSelected);
    assert_eq!(client.state(), &UiState::Error("please choose a file".into()));
}

/// 200 + success:true → Ready
#[test]
fn test_success_reply() {
    let mut client = client();
    client.select_file(image("cat.png", "image/png")).unwrap();
    let ticket = client.begin_submit().unwrap();

    let reply = HttpReply::new(200, r#"{"success": true, "file_id": "abc123", "message": ""}"#);
    client.complete_submit(&ticket, Ok(reply));

    assert_eq!(client.state(), &UiState::Ready);
    assert_eq!(
        client.result_handle().as_deref(),
        Some("http://localhost:8000/download/abc123")
    );
}

/// 200 + success:false → Error(message)
#[test]
fn test_logical_failure_reply() {
    let mut client = client();
    client.select_file(image("cat.png", "image/png")).unwrap();
    let ticket = client.begin_submit().unwrap();

    let reply = HttpReply::new(200, r#"{"success": false, "message": "no foreground detected"}"#);
    client.complete_submit(&ticket, Ok(reply));

    assert_eq!(client.state(), &UiState::Error("no foreground detected".into()));
    assert!(client.result_handle().is_none());
}

/// 422 + detail → Error(detail)
#[test]
fn test_backend_detail_reply() {
    let mut client = client();
    client.select_file(image("cat.png", "image/png")).unwrap();
    let ticket = client.begin_submit().unwrap();

    let reply = HttpReply::new(422, r#"{"detail": "unsupported format"}"#);
    let completion = client.complete_submit(&ticket, Ok(reply));

    assert!(matches!(
        completion,
        Completion::Failed(UploadError::BackendDeclared { status: 422, .. })
    ));
    assert_eq!(client.state(), &UiState::Error("unsupported format".into()));
}

/// どの状態からでもリセットで初期状態に戻る
#[test]
fn test_reset_from_every_state() {
    let setups: Vec<Box<dyn Fn(&mut UploadClient)>> = vec![
        Box::new(|_: &mut UploadClient| {}),
        Box::new(|c: &mut UploadClient| {
            c.select_file(image("a.png", "image/png")).unwrap();
        }),
        Box::new(|c: &mut UploadClient| {
            c.pick("/a.png", image("a.png", "image/png")).unwrap();
            c.begin_submit().unwrap();
        }),
        Box::new(|c: &mut UploadClient| {
            c.pick("/a.png", image("a.png", "image/png")).unwrap();
            let t = c.begin_submit().unwrap();
            c.complete_submit(&t, Ok(HttpReply::new(200, r#"{"success":true,"file_id":"z"}"#)));
        }),
        Box::new(|c: &mut UploadClient| {
            let _ = c.select_file(image("a.gif", "image/gif"));
        }),
    ];

    for setup in setups {
        let mut client = client();
        setup(&mut client);
        client.reset();

        assert_eq!(client.state(), &UiState::Idle);
        assert!(client.selected_file().is_none());
        assert!(client.preview().is_none());
        assert!(client.result_handle().is_none());
        assert!(client.file_input().value().is_none());
        // 同じファイルを再選択できる
        assert!(client.pick("/a.png", image("a.png", "image/png")).is_ok());
        assert_eq!(client.state(), &UiState::FileSelected);
    }
}

/// リセット2回は1回と同じ
#[test]
fn test_reset_idempotent() {
    let mut once = client();
    once.select_file(image("a.png", "image/png")).unwrap();
    once.reset();

    let mut twice = client();
    twice.select_file(image("a.png", "image/png")).unwrap();
    twice.reset();
    twice.reset();

    assert_eq!(once.state(), twice.state());
    assert_eq!(once.selected_file(), twice.selected_file());
    assert_eq!(once.preview(), twice.preview());
    assert_eq!(once.result_handle(), twice.result_handle());
    assert_eq!(once.file_input(), twice.file_input());
}

/// 送信中の再送信は2つ目のリクエストを作らない
#[test]
fn test_no_concurrent_submit() {
    let mut client = client();
    client.select_file(image("a.png", "image/png")).unwrap();
    let first = client.begin_submit().unwrap();

    for _ in 0..3 {
        assert_eq!(client.begin_submit().unwrap_err(), UploadError::InFlight);
    }
    assert!(client.state().is_loading());

    let reply = HttpReply::new(200, r#"{"success": true, "file_id": "only"}"#);
    assert_eq!(client.complete_submit(&first, Ok(reply)), Completion::Ready("only".into()));
}

/// リセット中に届いた応答で状態が復活しない
#[test]
fn test_late_reply_does_not_resurrect() {
    let mut client = client();
    client.select_file(image("a.png", "image/png")).unwrap();
    let ticket = client.begin_submit().unwrap();
    client.reset();
    client.select_file(image("b.png", "image/png")).unwrap();

    let reply = HttpReply::new(200, r#"{"success": true, "file_id": "stale"}"#);
    assert_eq!(client.complete_submit(&ticket, Ok(reply)), Completion::Stale);
    assert_eq!(client.state(), &UiState::FileSelected);
    assert!(client.download().is_none());
}

/// Error/Readyからも再選択・再送信できる
#[test]
fn test_recover_after_error() {
    let mut client = client();
    client.select_file(image("a.png", "image/png")).unwrap();
    let ticket = client.begin_submit().unwrap();
    client.complete_submit(&ticket, Err(UploadError::transport("timed out after 60s")));
    assert!(client.state().error_message().is_some());

    let retry = client.begin_submit().unwrap();
    let reply = HttpReply::new(200, r#"{"success": true, "file_id": "retry"}"#);
    client.complete_submit(&retry, Ok(reply));
    assert_eq!(client.state(), &UiState::Ready);

    let download = client.download().unwrap();
    assert_eq!(download.file_name, "removed_background_retry.png");
}

/// 同じ入力値でも中身が違えば新しい選択として扱い、送信するのは新しい方
#[test]
fn test_same_input_value_new_bytes_is_uploaded() {
    let mut client = client();
    let value = "C:\\fakepath\\photo.png";

    client
        .pick(value, SelectedFile::new("photo.png", "image/png", vec![1, 1, 1]))
        .unwrap();
    client
        .pick(value, SelectedFile::new("photo.png", "image/png", vec![2, 2, 2]))
        .unwrap();

    let ticket = client.begin_submit().unwrap();
    assert_eq!(ticket.file.bytes, vec![2, 2, 2]);
}

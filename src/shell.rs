//! 対話モード
//!
//! 画面版と同じ操作（選択・送信・ダウンロード・リセット）をプロンプトで行う。

use crate::error::{BgRemoverError, Result};
use crate::session::Session;
use bg_remover_common::UiState;
use dialoguer::Input;
use std::path::{Path, PathBuf};

/// 対話コマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// ファイルを選択
    Open(PathBuf),
    /// 背景除去を実行
    Submit,
    /// 結果を保存
    Download,
    /// 初期状態に戻す
    Reset,
    /// 現在の状態を表示
    Status,
    Help,
    Quit,
    Unknown(String),
}

/// 入力行をコマンドに変換
pub fn parse_command(line: &str) -> ShellCommand {
    let trimmed = line.trim();
    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (trimmed, ""),
    };

    match head {
        "o" | "open" if !rest.is_empty() => ShellCommand::Open(PathBuf::from(rest)),
        "s" | "submit" => ShellCommand::Submit,
        "d" | "download" => ShellCommand::Download,
        "r" | "reset" => ShellCommand::Reset,
        "" | "status" => ShellCommand::Status,
        "h" | "help" | "?" => ShellCommand::Help,
        "q" | "quit" | "exit" => ShellCommand::Quit,
        _ => ShellCommand::Unknown(trimmed.to_string()),
    }
}

/// 状態を1行で表示
pub fn describe_state(session: &Session) -> String {
    let client = session.client();
    let file = client
        .selected_file()
        .map(|f| f.name.as_str())
        .unwrap_or("-");

    match client.state() {
        UiState::Idle => "待機中 (ファイル未選択)".to_string(),
        UiState::FileSelected => format!("選択済み: {}", file),
        UiState::Loading => format!("処理中: {}", file),
        UiState::Ready => format!(
            "完了: {} → {}",
            file,
            client.result_handle().unwrap_or_default()
        ),
        UiState::Error(message) => format!("エラー: {} (選択: {})", message, file),
    }
}

fn print_help() {
    println!("操作: open <パス> | submit | download | reset | status | quit");
    println!("  短縮: o <パス> / s / d / r / q");
}

/// 対話ループ
pub async fn run_shell(mut session: Session, output_dir: &Path) -> Result<()> {
    println!("🖼  bg-remover - 対話モード ({})", session.backend().base());
    print_help();

    loop {
        let line: String = Input::new()
            .with_prompt("bg-remover")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| BgRemoverError::CliExecution(e.to_string()))?;

        match parse_command(&line) {
            ShellCommand::Open(path) => match session.select(&path).await {
                Ok(preview) => match preview.dimensions {
                    Some((w, h)) => println!("✔ プレビュー: {}x{}", w, h),
                    None => println!("✔ 選択しました"),
                },
                Err(e) => println!("✖ {}", e),
            },
            ShellCommand::Submit => match session.submit().await {
                Ok(file_id) => println!("✔ 背景を除去しました (file_id: {})", file_id),
                Err(e) => println!("✖ {}", e),
            },
            ShellCommand::Download => match session.download(output_dir).await {
                Ok(Some(path)) => println!("✔ 保存しました: {}", path.display()),
                Ok(None) => println!("ダウンロードできる結果がありません"),
                Err(e) => println!("✖ {}", e),
            },
            ShellCommand::Reset => {
                session.reset();
                println!("✔ リセットしました");
            }
            ShellCommand::Status => println!("{}", describe_state(&session)),
            ShellCommand::Help => print_help(),
            ShellCommand::Quit => break,
            ShellCommand::Unknown(input) => {
                println!("不明な操作: {}", input);
                print_help();
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_open() {
        assert_eq!(
            parse_command("open /tmp/my cat.png"),
            ShellCommand::Open(PathBuf::from("/tmp/my cat.png"))
        );
        assert_eq!(parse_command("o a.jpg"), ShellCommand::Open(PathBuf::from("a.jpg")));
        assert_eq!(parse_command("open"), ShellCommand::Unknown("open".into()));
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!(parse_command("s"), ShellCommand::Submit);
        assert_eq!(parse_command(" download "), ShellCommand::Download);
        assert_eq!(parse_command("reset"), ShellCommand::Reset);
        assert_eq!(parse_command(""), ShellCommand::Status);
        assert_eq!(parse_command("?"), ShellCommand::Help);
        assert_eq!(parse_command("exit"), ShellCommand::Quit);
        assert_eq!(parse_command("fly"), ShellCommand::Unknown("fly".into()));
    }
}

//! bg-remover: 背景除去サービスのクライアント
//!
//! 状態機械は`bg-remover-common`にあり、ここでは通信・ファイル入出力・CLIを扱う。

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod session;
pub mod shell;

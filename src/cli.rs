use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bg-remover")]
#[command(about = "画像の背景除去サービスのクライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// APIベースURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// 送信タイムアウト（秒、1以上）
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像の背景を除去して保存
    Remove {
        /// 画像ファイル（JPG/PNG）
        #[arg(required = true)]
        image: PathBuf,

        /// 出力ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 保存後にサーバー側のファイルを削除
        #[arg(long)]
        cleanup: bool,
    },

    /// 処理済み画像をfile_idで取得
    Download {
        /// サーバーが返したfile_id
        #[arg(required = true)]
        file_id: String,

        /// 出力ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// サーバーの稼働確認
    Health,

    /// サーバー側の処理済みファイルを削除
    Cleanup {
        #[arg(required = true)]
        file_id: String,
    },

    /// 対話モード
    Shell {
        /// 出力ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// APIベースURLを設定
        #[arg(long)]
        set_api_base: Option<String>,

        /// タイムアウト（秒）を設定
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 既定の出力ディレクトリを設定
        #[arg(long)]
        set_output_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

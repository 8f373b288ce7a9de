use clap::Parser;
use bg_remover::{api, cli, config, error, session, shell};
use api::BackendClient;
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use session::Session;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;
    let api_base = config.resolve_api_base(cli.api_base.as_deref());
    let timeout = config.resolve_timeout(cli.timeout)?;

    match cli.command {
        Commands::Remove { image, output, cleanup } => {
            println!("🖼  bg-remover - 背景除去\n");

            let backend = BackendClient::new(api_base, timeout)?;
            let mut session = Session::new(backend).with_progress(true);

            // 1. 選択・検証・プレビュー
            println!("[1/3] 画像を読み込み中...");
            let preview = session.select(&image).await?;
            match preview.dimensions {
                Some((w, h)) => println!("✔ {} ({}x{})\n", image.display(), w, h),
                None => println!("✔ {}\n", image.display()),
            }

            // 2. 送信
            println!("[2/3] 背景を除去中...");
            let file_id = session.submit().await?;
            println!("✔ 処理完了 (file_id: {})\n", file_id);

            // 3. 保存
            println!("[3/3] 結果を保存中...");
            let output_dir = config.output_dir_or_default(output.as_deref());
            let saved = session
                .download(&output_dir)
                .await?
                .ok_or(error::BgRemoverError::NoResult)?;
            println!("✔ 結果を保存: {}", saved.display());

            if cleanup {
                let response = session.backend().cleanup(&file_id).await?;
                println!("✔ サーバー側: {}", response.message);
            }

            println!("\n✅ 完了");
        }

        Commands::Download { file_id, output } => {
            let backend = BackendClient::new(api_base.clone(), timeout)?;
            let request = bg_remover_common::DownloadRequest {
                url: api_base.download_url(&file_id),
                file_name: bg_remover_common::download_file_name(&file_id),
                file_id,
            };
            let bytes = backend.download(&request).await?;

            let output_dir = config.output_dir_or_default(output.as_deref());
            std::fs::create_dir_all(&output_dir)?;
            let path = output_dir.join(&request.file_name);
            std::fs::write(&path, bytes)?;
            println!("✔ 保存しました: {}", path.display());
        }

        Commands::Health => {
            let backend = BackendClient::new(api_base.clone(), timeout)?;
            let health = backend.health().await?;
            if health.is_healthy() {
                println!("✔ {} : {} ({})", api_base, health.status, health.message);
            } else {
                println!("⚠ {} : {} ({})", api_base, health.status, health.message);
            }
        }

        Commands::Cleanup { file_id } => {
            let backend = BackendClient::new(api_base, timeout)?;
            let response = backend.cleanup(&file_id).await?;
            println!("✔ {}", response.message);
        }

        Commands::Shell { output } => {
            let backend = BackendClient::new(api_base, timeout)?;
            let output_dir = config.output_dir_or_default(output.as_deref());
            shell::run_shell(Session::new(backend).with_progress(true), &output_dir).await?;
        }

        Commands::Config { set_api_base, set_timeout, set_output_dir, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(base) = set_api_base {
                config.set_api_base(base)?;
                changed = true;
            }
            if let Some(seconds) = set_timeout {
                config.set_timeout(seconds)?;
                changed = true;
            }
            if let Some(dir) = set_output_dir {
                config.output_dir = Some(dir);
                changed = true;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  APIベースURL: {}", config.api_base);
                println!("  有効なURL: {}", config.resolve_api_base(None));
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!(
                    "  出力先: {}",
                    config.output_dir_or_default(None).display()
                );
            }
        }
    }

    Ok(())
}

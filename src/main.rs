use anyhow::Context;
use cellscope::{cli, client, config, intake, logging, submit, view};
use cellscope_common::config::BASE_URL_ENV;
use cellscope_common::file::decode_image_field;
use cellscope_common::timeseries::{generate_random, generate_samples};
use cellscope_common::{render, RenderOptions, RequestState, Section, UploadSession};
use clap::Parser;
use cli::{Cli, Commands};
use client::PredictionClient;
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}", e);
    }
    let config = Config::load().context("設定ファイルの読み込みに失敗")?;

    match cli.command {
        Commands::Predict { image, json, precision, save_image, timeout } => {
            eprintln!("🔬 cellscope - 細胞画像解析\n");

            let endpoints = config.resolve_endpoints(cli.endpoint.as_deref())?;
            let timeout = timeout.or(config.timeout_seconds).map(Duration::from_secs);
            let client = PredictionClient::new(endpoints)?.with_timeout(timeout);

            // 進捗表示はstderr、結果はstdout

            // 1. ファイル読み込み
            let mut session = UploadSession::new();
            let file = intake::load_selected_file(&image)?;
            eprintln!("[1/2] {} ({}, {} bytes)", file.name, file.mime_type, file.len());
            session.select_file(file);

            // 2. 送信
            eprintln!("[2/2] 送信先: {}", client.endpoints().predict_url());
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
            spinner.set_message("解析中...");
            spinner.enable_steady_tick(Duration::from_millis(120));
            let completion = submit::submit_selected(&mut session, &client).await;
            spinner.finish_and_clear();
            completion?;

            if session.state() != RequestState::Succeeded {
                let message = session
                    .error()
                    .map(|e| e.user_message())
                    .unwrap_or_else(|| "解析に失敗しました".to_string());
                anyhow::bail!(message);
            }
            let Some(payload) = session.result() else {
                anyhow::bail!("解析結果がありません");
            };

            eprintln!("✔ 解析完了 ({})\n", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));

            if json {
                println!("{}", serde_json::to_string_pretty(payload)?);
            } else {
                let options = RenderOptions {
                    confidence_precision: precision.unwrap_or(config.confidence_precision),
                };
                let result_view = render(payload, &options);
                print!("{}", view::render_result_text(&result_view));

                if let Some(path) = save_image {
                    let image = result_view.sections.iter().find_map(|s| match s {
                        Section::Image { data_uri, .. } => Some(data_uri.as_str()),
                        _ => None,
                    });
                    match image {
                        Some(data_uri) => {
                            let bytes = decode_image_field(data_uri)?;
                            std::fs::write(&path, bytes)?;
                            eprintln!("✔ 画像を保存: {}", path.display());
                        }
                        None => eprintln!("保存できる画像がレスポンスに含まれていません"),
                    }
                }
            }
        }

        Commands::Metrics => {
            let endpoints = config.resolve_endpoints(cli.endpoint.as_deref())?;
            let client = PredictionClient::new(endpoints)?;
            match client.fetch_metrics().await {
                Ok(catalog) => print!("{}", view::render_metrics_text(&catalog)),
                Err(e) => {
                    tracing::error!(error = %e, "指標カタログの取得に失敗");
                    return Err(e.into());
                }
            }
        }

        Commands::Timeseries { seed } => {
            let samples = match seed {
                Some(seed) => generate_samples(&mut StdRng::seed_from_u64(seed)),
                None => generate_random(),
            };
            println!("※ 表示確認用の乱数データです\n");
            print!("{}", view::render_timeseries_text(&samples));
        }

        Commands::Config { set_endpoint, show } => {
            let mut config = config;

            if let Some(url) = set_endpoint {
                config.set_base_url(url)?;
                println!("✔ ベースURLを設定しました");
            }

            if show {
                let endpoints = config.resolve_endpoints(cli.endpoint.as_deref())?;
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!("  予測URL: {}", endpoints.predict_url());
                println!("  指標URL: {}", endpoints.metrics_url());
                println!("  信頼度の桁数: {}", config.confidence_precision);
                match config.timeout_seconds {
                    Some(secs) => println!("  タイムアウト: {}秒", secs),
                    None => println!("  タイムアウト: なし"),
                }
                if std::env::var(BASE_URL_ENV).is_ok() {
                    println!("  ({} で上書き中)", BASE_URL_ENV);
                }
            }
        }
    }

    Ok(())
}

use clap::Parser;
use dialoguer::{Confirm, Input, Select};
use photo_gallery::{browse, cli, client, config, server};
use photo_gallery_common::DEFAULT_PAGE_SIZE;
use browse::{error_message, render_page, Browser};
use cli::{Cli, Commands};
use client::GalleryClient;
use config::Config;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let client = GalleryClient::new(cli.server.clone());

    match cli.command {
        Commands::Serve { port, static_dir } => {
            let mut config = Config::load()?;
            if let Some(port) = port {
                config.port = port;
            }
            server::start_server(config, static_dir).await?;
        }

        Commands::List { page, search, json } => {
            let config = Config::load_or_default();
            let mut browser = Browser::new(client, config.page_size);
            browser.open(search.as_deref()).await?;
            browser.goto(page).await?;

            if json {
                let controller = browser.controller();
                let output = serde_json::json!({
                    "page": controller.current_page(),
                    "total_pages": controller.total_pages(),
                    "total_count": controller.total_count(),
                    "resources": controller.images(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{}", render_page(browser.controller()));
            }
        }

        Commands::Delete { id, yes } => {
            if !yes && !confirm_delete(&id)? {
                println!("キャンセルしました");
                return Ok(());
            }

            let result = client.delete(&id).await?;
            println!("✔ Image deleted successfully!");
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Browse { search } => {
            let page_size = match client.public_config().await {
                Ok(public) => public.page_size,
                Err(e) => {
                    tracing::warn!("Failed to load server config: {e}");
                    DEFAULT_PAGE_SIZE
                }
            };
            run_browse(Browser::new(client, page_size), search).await?;
        }

        Commands::Config {
            set_cloud_name,
            set_api_key,
            set_api_secret,
            set_upload_preset,
            show,
        } => {
            let mut config = Config::load_from(&Config::config_path()?)?;
            let mut changed = false;

            for (value, slot) in [
                (set_cloud_name, &mut config.cloud_name),
                (set_api_key, &mut config.api_key),
                (set_api_secret, &mut config.api_secret),
                (set_upload_preset, &mut config.upload_preset),
            ] {
                if let Some(value) = value {
                    *slot = Some(value);
                    changed = true;
                }
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                let status = |v: &Option<String>| if v.is_some() { "設定済み" } else { "未設定" };
                println!("設定:");
                println!("  クラウド名: {}", config.cloud_name.as_deref().unwrap_or("未設定"));
                println!("  APIキー: {}", status(&config.api_key));
                println!("  APIシークレット: {}", status(&config.api_secret));
                println!("  アップロードプリセット: {}", config.upload_preset.as_deref().unwrap_or("未設定"));
                println!("  フォルダ: {}", config.folder);
                println!("  ポート: {}", config.port);
                println!("  1ページの枚数: {}", config.page_size);
                println!("  一覧キャッシュ: {}秒", config.cache_seconds);
            }
        }
    }

    Ok(())
}

fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if matches!(cli.command, Commands::Serve { .. }) {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt().with_env_filter(filter).init();
}

fn confirm_delete(id: &str) -> dialoguer::Result<bool> {
    Confirm::new()
        .with_prompt(format!("Are you sure you want to delete \"{}\"?", id))
        .default(false)
        .interact()
}

async fn run_browse(mut browser: Browser, search: Option<String>) -> anyhow::Result<()> {
    println!("🖼  photo-gallery - ギャラリー閲覧\n");

    if let Err(e) = browser.open(search.as_deref()).await {
        println!("⚠ {}", error_message(&e));
    }

    let actions = [
        "次のページ",
        "前のページ",
        "ページ指定",
        "検索",
        "削除",
        "再読み込み",
        "終了",
    ];

    loop {
        println!("\n{}\n", render_page(browser.controller()));

        let choice = Select::new()
            .with_prompt("操作を選択")
            .items(&actions)
            .default(0)
            .interact()?;

        let result = match choice {
            0 => browser.next_page().await,
            1 => browser.previous_page().await,
            2 => {
                let page: u32 = Input::new().with_prompt("ページ番号").interact_text()?;
                browser.goto(page).await
            }
            3 => {
                let term: String = Input::new()
                    .with_prompt("検索語（空で解除）")
                    .allow_empty(true)
                    .interact_text()?;
                browser.search(&term).await
            }
            4 => {
                let images: Vec<(String, String)> = browser
                    .controller()
                    .images()
                    .iter()
                    .map(|img| (img.public_id.clone(), img.title().to_string()))
                    .collect();
                if images.is_empty() {
                    println!("削除できる画像がありません");
                    continue;
                }

                let labels: Vec<&str> = images.iter().map(|(_, title)| title.as_str()).collect();
                let index = Select::new()
                    .with_prompt("削除する画像")
                    .items(&labels)
                    .interact()?;
                let id = &images[index].0;

                if confirm_delete(id)? {
                    match browser.delete(id).await {
                        Ok(_) => {
                            println!("✔ Image deleted successfully!");
                            Ok(())
                        }
                        Err(e) => {
                            println!("An error occurred while deleting item \"{}\":", id);
                            Err(e)
                        }
                    }
                } else {
                    Ok(())
                }
            }
            5 => browser.refresh().await,
            _ => break,
        };

        if let Err(e) = result {
            println!("⚠ {}", error_message(&e));
        }
    }

    Ok(())
}

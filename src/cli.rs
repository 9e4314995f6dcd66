use clap::{Parser, Subcommand};
use crate::client::DEFAULT_SERVER_URL;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photo-gallery")]
#[command(about = "クラウド画像ギャラリーのサーバーとCLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// ギャラリーサーバーのURL
    #[arg(long, default_value = DEFAULT_SERVER_URL, global = true)]
    pub server: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ギャラリーAPIサーバーを起動
    Serve {
        /// 待ち受けポート（省略時は設定値）
        #[arg(short, long)]
        port: Option<u16>,

        /// Web(WASM)ビルドの配信ディレクトリ
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// 画像一覧を表示
    List {
        /// ページ番号（1始まり）
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// 検索語
        #[arg(short, long)]
        search: Option<String>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 画像を削除
    Delete {
        /// 画像のパブリックID
        #[arg(required = true)]
        id: String,

        /// 確認をスキップ
        #[arg(short, long)]
        yes: bool,
    },

    /// 対話的にギャラリーを閲覧
    Browse {
        /// 初期検索語
        #[arg(short, long)]
        search: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// クラウド名を設定
        #[arg(long)]
        set_cloud_name: Option<String>,

        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// APIシークレットを設定
        #[arg(long)]
        set_api_secret: Option<String>,

        /// 署名なしアップロードプリセットを設定
        #[arg(long)]
        set_upload_preset: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

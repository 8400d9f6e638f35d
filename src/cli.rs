use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cellscope")]
#[command(about = "細胞画像を解析サーバーに送信して結果を表示", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// サーバーのベースURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub endpoint: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像を送信して解析結果を表示
    Predict {
        /// 細胞画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// 生のJSONを出力
        #[arg(long)]
        json: bool,

        /// 信頼度の小数点以下桁数
        #[arg(long)]
        precision: Option<usize>,

        /// 検出結果画像の保存先
        #[arg(long)]
        save_image: Option<PathBuf>,

        /// タイムアウト秒数（省略時は無制限）
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// 計測指標カタログを表示
    Metrics,

    /// 時系列のサンプルデータを表示（乱数生成）
    Timeseries {
        /// 乱数シード（省略時は毎回異なる）
        #[arg(long)]
        seed: Option<u64>,
    },

    /// 設定を表示/編集
    Config {
        /// ベースURLを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

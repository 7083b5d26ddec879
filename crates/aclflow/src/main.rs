mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aclflow")]
#[command(about = "バケットACLを、宣言的に。", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// ACLポリシーを検証
    Validate {
        /// ACLポリシーのXMLファイル
        file: PathBuf,
    },
    /// ACLポリシーを正規形に並べ替えて出力
    Canonicalize {
        /// ACLポリシーのXMLファイル
        file: PathBuf,
        /// 出力先ファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// 2つのACLポリシーが意味的に等価か判定
    Diff {
        /// 現在のACLポリシー
        old: PathBuf,
        /// 希望するACLポリシー
        new: PathBuf,
    },
    /// ストア上のACLと希望するACLを比較してプランを表示
    Plan {
        /// リソースID（バケット名）
        resource: String,
        /// 希望するACLポリシーのXMLファイル
        file: PathBuf,
        /// ACLストアのディレクトリ
        #[arg(long, env = "ACLFLOW_STORE_DIR", default_value = ".aclflow")]
        store_dir: PathBuf,
        /// プランをJSONで出力
        #[arg(long)]
        json: bool,
    },
    /// プランを適用してストア上のACLを更新
    Apply {
        /// リソースID（バケット名）
        resource: String,
        /// 希望するACLポリシーのXMLファイル
        file: PathBuf,
        /// ACLストアのディレクトリ
        #[arg(long, env = "ACLFLOW_STORE_DIR", default_value = ".aclflow")]
        store_dir: PathBuf,
        /// 確認なしで実行
        #[arg(short, long)]
        yes: bool,
    },
    /// バージョンを表示
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Validate { file } => commands::validate::run(&file),
        Commands::Canonicalize { file, output } => {
            commands::canonicalize::run(&file, output.as_deref())
        }
        Commands::Diff { old, new } => commands::diff::run(&old, &new),
        Commands::Plan {
            resource,
            file,
            store_dir,
            json,
        } => commands::plan::run(&resource, &file, &store_dir, json).await,
        Commands::Apply {
            resource,
            file,
            store_dir,
            yes,
        } => commands::apply::run(&resource, &file, &store_dir, yes).await,
        Commands::Version => {
            println!("aclflow {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

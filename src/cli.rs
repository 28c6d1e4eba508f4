use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "brand-finder")]
#[command(about = "参照カタログ照合によるブランド名・MRP推定ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 商品ファイルのブランド名・MRPを推定して出力
    Find {
        /// 商品CSV/Excelファイル、またはそれらを含むフォルダ
        #[arg(required = true)]
        input: PathBuf,

        /// 参照カタログ（省略時は設定の reference_path）
        #[arg(short, long)]
        reference: Option<PathBuf>,

        /// 出力ファイル（入力が複数ファイルの場合は出力フォルダ）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (csv/excel)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// 参照データの商品名列
        #[arg(long)]
        product_column: Option<String>,

        /// 参照データのブランド名列
        #[arg(long)]
        brand_column: Option<String>,

        /// 参照データのMRP列
        #[arg(long)]
        mrp_column: Option<String>,

        /// 商品ファイル側の商品名列（省略時は Product_Name、無ければ先頭列）
        #[arg(short = 'c', long)]
        query_column: Option<String>,

        /// 商品ファイル側の判明済みブランド列（MRPのみ照合）
        #[arg(long)]
        known_brand_column: Option<String>,

        /// MRPを照合しない（ブランドのみ）
        #[arg(long)]
        no_mrp: bool,

        /// 列を対話的に選択
        #[arg(short, long)]
        interactive: bool,

        /// 集計結果をJSONで保存
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// 商品名1件を照合
    Lookup {
        /// 商品名
        #[arg(required = true)]
        name: String,

        /// 判明済みのブランド名（MRPのみ照合）
        #[arg(short, long)]
        brand: Option<String>,

        /// 参照カタログ（省略時は設定の reference_path）
        #[arg(short, long)]
        reference: Option<PathBuf>,

        /// MRPを照合しない（ブランドのみ）
        #[arg(long)]
        no_mrp: bool,
    },

    /// 表ファイルの列と先頭行を表示
    Preview {
        /// CSV/Excelファイル（省略時は参照カタログ）
        file: Option<PathBuf>,

        /// 表示行数
        #[arg(short = 'n', long, default_value = "5")]
        rows: usize,
    },

    /// 設定を表示/編集
    Config {
        /// 参照カタログのパスを設定
        #[arg(long)]
        set_reference: Option<PathBuf>,

        /// 設定を既定値に戻す
        #[arg(long)]
        reset: bool,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Excel,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            _ => Err(format!("Unknown format: {}. Use csv or excel", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Excel => write!(f, "excel"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("xlsx".parse::<ExportFormat>(), Ok(ExportFormat::Excel));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_cli_parses_find() {
        let cli = Cli::parse_from([
            "brand-finder", "find", "items.csv", "--no-mrp", "-f", "excel", "-c", "Item",
        ]);
        match cli.command {
            Commands::Find { input, no_mrp, format, query_column, .. } => {
                assert_eq!(input, PathBuf::from("items.csv"));
                assert!(no_mrp);
                assert_eq!(format, ExportFormat::Excel);
                assert_eq!(query_column.as_deref(), Some("Item"));
            }
            _ => panic!("find subcommand expected"),
        }
    }
}

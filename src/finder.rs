//! 照合パイプライン
//!
//! 参照カタログの読み込み → 索引構築 → 商品表の照合 → 結果列の付加 を行う。
//! 参照ファイルが無い場合は照合を行わずにエラーを返す。

use crate::columns::{self, ColumnKind, MappingRequest};
use crate::error::{FinderError, Result};
use crate::loader;
use brand_finder_common::{
    BatchProgress, BatchStats, ColumnMapping, MatchOptions, MatchResult, Matcher, Query,
    ReferenceIndex, Table, UNKNOWN,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// 出力に付加する列名
pub const BRAND_COLUMN: &str = "Brand_Name";
pub const MRP_COLUMN: &str = "MRP";

/// 読み込み済みの参照カタログ
#[derive(Debug)]
pub struct Reference {
    pub path: PathBuf,
    pub mapping: ColumnMapping,
    pub index: ReferenceIndex,
}

impl Reference {
    /// MRP列があるか
    pub fn has_mrp(&self) -> bool {
        self.mapping.mrp_column.is_some()
    }

    pub fn matcher(&self, resolve_mrp: bool) -> Matcher<'_> {
        Matcher::new(
            &self.index,
            MatchOptions {
                resolve_mrp: resolve_mrp && self.has_mrp(),
            },
        )
    }
}

/// 参照カタログを読み込んで索引を構築
pub fn load_reference(
    path: &Path,
    defaults: &ColumnMapping,
    request: &MappingRequest<'_>,
    interactive: bool,
) -> Result<Reference> {
    if !path.exists() {
        return Err(FinderError::ReferenceNotFound(path.display().to_string()));
    }

    let table = loader::load_table(path)?;
    let mapping = if interactive {
        let suggestion = columns::suggest_mapping(&table, defaults, request)?;
        columns::reference_mapping_interactive(&table, &suggestion)?
    } else {
        columns::reference_mapping(&table, defaults, request)?
    };

    let index = ReferenceIndex::from_table(&table, &mapping)?;
    info!(
        path = %path.display(),
        rows = index.len(),
        product = %mapping.product_name_column,
        brand = %mapping.brand_name_column,
        mrp = ?mapping.mrp_column,
        "reference loaded"
    );

    Ok(Reference {
        path: path.to_path_buf(),
        mapping,
        index,
    })
}

/// 商品表側の列指定
#[derive(Debug, Clone, Default)]
pub struct QueryColumns<'a> {
    /// 商品名列（省略時は既定名、無ければ先頭列）
    pub product: Option<&'a str>,
    /// 判明済みブランド列
    pub known_brand: Option<&'a str>,
}

/// 商品表から照合対象を作る
///
/// 戻り値の1つ目は商品名として使った列名。
pub fn build_queries(
    table: &Table,
    query_columns: &QueryColumns<'_>,
    default_product_column: &str,
) -> Result<(String, Vec<Query>)> {
    let product_col = columns::pick_column(
        table,
        query_columns.product,
        ColumnKind::Product,
        default_product_column,
        true,
    )?;
    let brand_col = match query_columns.known_brand {
        Some(name) => Some(table.resolve_column(Some(name), name, false)?),
        None => None,
    };

    let queries = (0..table.len())
        .map(|row| {
            Query::new(table.cell(row, product_col))
                .with_known_brand(brand_col.and_then(|col| table.cell(row, col)))
        })
        .collect();

    Ok((table.headers()[product_col].clone(), queries))
}

/// 照合を実行（進捗バー付き）
pub fn run_batch(matcher: &Matcher<'_>, queries: &[Query], show_progress: bool) -> Vec<MatchResult> {
    let bar = if show_progress {
        let bar = ProgressBar::new(queries.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} ({percent}%)") {
            bar.set_style(style);
        }
        bar
    } else {
        ProgressBar::hidden()
    };

    let results = matcher.resolve_batch(queries, |BatchProgress { done, .. }| {
        bar.set_position(done as u64);
    });
    bar.finish_and_clear();

    results
}

/// 商品表に照合結果の列を付加
///
/// 同名の列が既にあれば上書きする。`with_mrp` なら行数に関係なく MRP 列も付ける。
pub fn attach_results(table: &Table, results: &[MatchResult], with_mrp: bool) -> Table {
    let mut output = table.clone();

    output.set_column(
        BRAND_COLUMN,
        results.iter().map(|r| Some(r.brand.clone())).collect(),
    );

    if with_mrp {
        output.set_column(
            MRP_COLUMN,
            results
                .iter()
                .map(|r| Some(r.mrp.clone().unwrap_or_else(|| UNKNOWN.to_string())))
                .collect(),
        );
    }

    output
}

/// 1ファイル分の照合結果
#[derive(Debug)]
pub struct FindOutcome {
    pub query_column: String,
    pub output: Table,
    pub stats: BatchStats,
}

/// 商品表1つを照合
pub fn find_in_table(
    reference: &Reference,
    table: &Table,
    columns: &QueryColumns<'_>,
    resolve_mrp: bool,
    show_progress: bool,
) -> Result<FindOutcome> {
    let (query_column, queries) =
        build_queries(table, columns, &reference.mapping.product_name_column)?;
    let matcher = reference.matcher(resolve_mrp);

    let with_mrp = matcher.options().resolve_mrp;

    let results = run_batch(&matcher, &queries, show_progress);
    let mut stats = BatchStats::from_results(&results);
    stats.mrp_enabled = with_mrp;

    Ok(FindOutcome {
        query_column,
        output: attach_results(table, &results, with_mrp),
        stats,
    })
}

/// 集計結果（--summary 出力用）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub generated_at: String,
    pub reference: String,
    pub input: String,
    pub output: String,
    pub stats: BatchStats,
}

impl RunSummary {
    pub fn new(reference: &Path, input: &Path, output: &Path, stats: BatchStats) -> Self {
        Self {
            generated_at: chrono::Local::now().to_rfc3339(),
            reference: reference.display().to_string(),
            input: input.display().to_string(),
            output: output.display().to_string(),
            stats,
        }
    }
}

/// 集計を表示
pub fn print_stats(stats: &BatchStats) {
    println!("統計:");
    println!("  商品数: {}", stats.total);
    println!(
        "  ブランド特定: {} ({})",
        stats.brands_identified,
        stats.percent(stats.brands_identified)
    );
    println!(
        "  ブランド不明: {} ({})",
        stats.brands_unknown(),
        stats.percent(stats.brands_unknown())
    );
    if stats.mrp_enabled {
        println!(
            "  MRP特定: {} ({})",
            stats.mrp_identified,
            stats.percent(stats.mrp_identified)
        );
        println!(
            "  MRP不明: {} ({})",
            stats.mrp_unknown(),
            stats.percent(stats.mrp_unknown())
        );
    }
}

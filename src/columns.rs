//! 列対応の決定モジュール
//!
//! 列名の指定 → 既定の列名 → 列名パターン → 先頭列 の順に列を決める。
//! `--interactive` 時は dialoguer で列を選択させる。

use crate::error::{FinderError, Result};
use brand_finder_common::{ColumnMapping, Error as CommonError, Table};
use dialoguer::Select;
use regex::Regex;
use tracing::{debug, warn};

/// 照合で使う列の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Product,
    Brand,
    Mrp,
}

impl ColumnKind {
    fn label(&self) -> &'static str {
        match self {
            ColumnKind::Product => "商品名",
            ColumnKind::Brand => "ブランド名",
            ColumnKind::Mrp => "MRP",
        }
    }

    fn pattern(&self) -> &'static Regex {
        lazy_static::lazy_static! {
            static ref PRODUCT: Regex = Regex::new(
                r"(?i)^(product|item)([\s_-]*(name|title|description))?$"
            ).unwrap();
            static ref BRAND: Regex = Regex::new(
                r"(?i)^(brand|make|manufacturer)([\s_-]*name)?$"
            ).unwrap();
            static ref MRP: Regex = Regex::new(
                r"(?i)^(mrp|m\.r\.p\.?|price|max(imum)?[\s_-]*retail[\s_-]*price|selling[\s_-]*price)$"
            ).unwrap();
        }

        match self {
            ColumnKind::Product => &*PRODUCT,
            ColumnKind::Brand => &*BRAND,
            ColumnKind::Mrp => &*MRP,
        }
    }
}

/// 列名パターンで列を推定
pub fn detect_column(headers: &[String], kind: ColumnKind) -> Option<usize> {
    let pattern = kind.pattern();
    headers.iter().position(|h| pattern.is_match(h.trim()))
}

/// 列を決定する
///
/// `requested` が指定されていればその列（無ければエラー）。
/// それ以外は既定名 → パターン → 先頭列（`fallback_first` 時）の順。
pub fn pick_column(
    table: &Table,
    requested: Option<&str>,
    kind: ColumnKind,
    default_name: &str,
    fallback_first: bool,
) -> Result<usize> {
    match table.resolve_column(requested, default_name, false) {
        Ok(idx) => return Ok(idx),
        Err(CommonError::MalformedTable(_)) => {}
        Err(e) => return Err(e.into()),
    }

    if let Some(idx) = detect_column(table.headers(), kind) {
        debug!(column = %table.headers()[idx], kind = kind.label(), "column detected by name pattern");
        return Ok(idx);
    }

    Ok(table.resolve_column(None, default_name, fallback_first)?)
}

/// 参照表の列対応の指定
#[derive(Debug, Clone, Default)]
pub struct MappingRequest<'a> {
    pub product: Option<&'a str>,
    pub brand: Option<&'a str>,
    pub mrp: Option<&'a str>,
    /// MRP照合を行う
    pub resolve_mrp: bool,
}

/// 参照表の列対応を決定
///
/// MRP列が明示されておらず見つからない場合は、警告を出してブランドのみ照合にする。
pub fn reference_mapping(
    table: &Table,
    defaults: &ColumnMapping,
    request: &MappingRequest<'_>,
) -> Result<ColumnMapping> {
    let headers = table.headers();

    let product = pick_column(table, request.product, ColumnKind::Product, &defaults.product_name_column, true)?;

    let brand_default = defaults.brand_name_column.as_str();
    let brand = match pick_column(table, request.brand, ColumnKind::Brand, brand_default, false) {
        Ok(idx) => idx,
        Err(FinderError::Common(CommonError::MalformedTable(_))) => {
            return Err(CommonError::ColumnNotFound {
                column: brand_default.to_string(),
                available: headers.to_vec(),
            }
            .into());
        }
        Err(e) => return Err(e),
    };

    let mrp = if request.resolve_mrp {
        let mrp_default = defaults.mrp_column.as_deref().unwrap_or("MRP");
        match pick_column(table, request.mrp, ColumnKind::Mrp, mrp_default, false) {
            Ok(idx) => Some(headers[idx].as_str()),
            Err(FinderError::Common(CommonError::MalformedTable(_))) => {
                warn!("MRP列が見つからないため、ブランドのみ照合します");
                None
            }
            Err(e) => return Err(e),
        }
    } else {
        None
    };

    Ok(ColumnMapping::new(&headers[product], &headers[brand], mrp))
}

/// 対話式で列を選択
pub fn select_column_interactive(headers: &[String], prompt: &str, default: usize) -> Result<usize> {
    if headers.is_empty() {
        return Err(CommonError::MalformedTable("列がありません".into()).into());
    }

    Select::new()
        .with_prompt(prompt)
        .items(headers)
        .default(default.min(headers.len() - 1))
        .interact()
        .map_err(|e| FinderError::Prompt(e.to_string()))
}

/// 対話選択の初期位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingSuggestion {
    pub product: usize,
    pub brand: usize,
    /// MRP照合しない場合は `None`
    pub mrp: Option<usize>,
}

/// 対話選択の初期位置を決める
///
/// 自動判定できない列はエラーにせず先頭列を初期値にする。
/// MRPは `resolve_mrp` なら列が見つからなくても選択肢に出す。
pub fn suggest_mapping(
    table: &Table,
    defaults: &ColumnMapping,
    request: &MappingRequest<'_>,
) -> Result<MappingSuggestion> {
    let product = suggest_column(table, request.product, ColumnKind::Product, &defaults.product_name_column)?;
    let brand = suggest_column(table, request.brand, ColumnKind::Brand, &defaults.brand_name_column)?;
    let mrp = if request.resolve_mrp {
        let mrp_default = defaults.mrp_column.as_deref().unwrap_or("MRP");
        Some(suggest_column(table, request.mrp, ColumnKind::Mrp, mrp_default)?)
    } else {
        None
    };

    Ok(MappingSuggestion { product, brand, mrp })
}

fn suggest_column(
    table: &Table,
    requested: Option<&str>,
    kind: ColumnKind,
    default_name: &str,
) -> Result<usize> {
    match pick_column(table, requested, kind, default_name, true) {
        Ok(idx) => Ok(idx),
        Err(FinderError::Common(CommonError::ColumnNotFound { column, .. })) => {
            warn!(column = %column, kind = kind.label(), "指定列が無いため先頭列を初期値にします");
            Ok(0)
        }
        Err(e) => Err(e),
    }
}

/// 参照表の列対応を対話式で選択
pub fn reference_mapping_interactive(table: &Table, suggestion: &MappingSuggestion) -> Result<ColumnMapping> {
    let headers = table.headers();

    let product = select_column_interactive(headers, "参照データの商品名列を選択", suggestion.product)?;
    let brand = select_column_interactive(headers, "参照データのブランド名列を選択", suggestion.brand)?;
    let mrp = match suggestion.mrp {
        Some(initial) => Some(select_column_interactive(headers, "参照データのMRP列を選択", initial)?),
        None => None,
    };

    Ok(ColumnMapping::new(
        &headers[product],
        &headers[brand],
        mrp.map(|idx| headers[idx].as_str()),
    ))
}

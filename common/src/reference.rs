//! 参照カタログ索引モジュール
//!
//! 参照表を正規化して保持し、完全一致・部分一致の検索を提供する。
//! どの検索も元の行順で評価し、最初に条件を満たした行を返す。

use crate::error::{Error, Result};
use crate::table::Table;
use crate::types::{ColumnMapping, ReferenceRecord};
use std::collections::HashMap;
use tracing::debug;

/// 比較用の正規化（前後の空白除去＋大文字化）
pub fn normalize(value: &str) -> String {
    value.trim().to_uppercase()
}

/// 行ごとの正規化済みキー
#[derive(Debug, Clone, Default)]
struct NormalizedKeys {
    product: String,
    brand: String,
}

impl NormalizedKeys {
    fn from_record(record: &ReferenceRecord) -> Self {
        Self {
            product: record.product_name.as_deref().map(normalize).unwrap_or_default(),
            brand: record.brand_name.as_deref().map(normalize).unwrap_or_default(),
        }
    }
}

/// 参照カタログ索引（構築後は不変）
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    records: Vec<ReferenceRecord>,
    keys: Vec<NormalizedKeys>,
    /// 正規化商品名 → 最初の行番号
    by_product: HashMap<String, usize>,
    /// 正規化ブランド名 → 最初の行番号
    by_brand: HashMap<String, usize>,
}

impl ReferenceIndex {
    /// レコード列から索引を構築
    pub fn from_records(records: Vec<ReferenceRecord>) -> Self {
        let keys: Vec<NormalizedKeys> = records.iter().map(NormalizedKeys::from_record).collect();

        let mut by_product = HashMap::new();
        let mut by_brand = HashMap::new();
        for (idx, key) in keys.iter().enumerate() {
            if !key.product.is_empty() {
                by_product.entry(key.product.clone()).or_insert(idx);
            }
            if !key.brand.is_empty() {
                by_brand.entry(key.brand.clone()).or_insert(idx);
            }
        }

        debug!(
            rows = records.len(),
            products = by_product.len(),
            brands = by_brand.len(),
            "reference index built"
        );

        Self {
            records,
            keys,
            by_product,
            by_brand,
        }
    }

    /// 表と列対応から索引を構築
    ///
    /// 商品名列が無ければ `MalformedTable`、ブランド列・MRP列が無ければ
    /// `ColumnNotFound` を返す。
    pub fn from_table(table: &Table, mapping: &ColumnMapping) -> Result<Self> {
        let product_col = table.column_index(&mapping.product_name_column).ok_or_else(|| {
            Error::MalformedTable(format!(
                "商品名列 '{}' がありません (列: {})",
                mapping.product_name_column,
                table.headers().join(", ")
            ))
        })?;

        let brand_col = table
            .column_index(&mapping.brand_name_column)
            .ok_or_else(|| Error::column_not_found(&mapping.brand_name_column, table.headers()))?;

        let mrp_col = match &mapping.mrp_column {
            Some(name) => Some(
                table
                    .column_index(name)
                    .ok_or_else(|| Error::column_not_found(name, table.headers()))?,
            ),
            None => None,
        };

        let records = (0..table.len())
            .map(|row| ReferenceRecord {
                product_name: table.cell(row, product_col).map(str::to_string),
                brand_name: table.cell(row, brand_col).map(str::to_string),
                mrp: mrp_col.and_then(|col| table.cell(row, col)).map(str::to_string),
            })
            .collect();

        Ok(Self::from_records(records))
    }

    pub fn records(&self) -> &[ReferenceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 正規化商品名の完全一致
    pub fn exact_product_match(&self, normalized_name: &str) -> Option<&ReferenceRecord> {
        self.by_product
            .get(normalized_name)
            .map(|&idx| &self.records[idx])
    }

    /// 正規化ブランド名の完全一致
    pub fn exact_brand_match(&self, normalized_brand: &str) -> Option<&ReferenceRecord> {
        self.by_brand
            .get(normalized_brand)
            .map(|&idx| &self.records[idx])
    }

    /// ブランド名がクエリに含まれる最初の行
    pub fn scan_brand_in_query(&self, normalized_query: &str) -> Option<&ReferenceRecord> {
        self.keys
            .iter()
            .position(|k| !k.brand.is_empty() && normalized_query.contains(k.brand.as_str()))
            .map(|idx| &self.records[idx])
    }

    /// 商品名とクエリがどちらか一方に含まれる最初の行
    pub fn scan_product_substring(&self, normalized_query: &str) -> Option<&ReferenceRecord> {
        self.keys
            .iter()
            .position(|k| {
                !k.product.is_empty()
                    && (normalized_query.contains(k.product.as_str())
                        || k.product.contains(normalized_query))
            })
            .map(|idx| &self.records[idx])
    }

    /// 部分一致検索
    ///
    /// ブランド名の包含を全行で調べてから、商品名の包含を全行で調べる。
    pub fn scan_for_substring_match(&self, normalized_query: &str) -> Option<&ReferenceRecord> {
        self.scan_brand_in_query(normalized_query)
            .or_else(|| self.scan_product_substring(normalized_query))
    }
}

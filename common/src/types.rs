//! 照合で使用する型定義
//!
//! - ReferenceRecord: 参照カタログの1行
//! - ColumnMapping: 参照表の列対応
//! - Query: 照合対象の1件
//! - MatchResult: 照合結果

use serde::{Deserialize, Serialize};

/// 未特定を表すラベル
pub const UNKNOWN: &str = "Unknown";

/// 参照カタログの1行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferenceRecord {
    pub product_name: Option<String>,
    pub brand_name: Option<String>,
    pub mrp: Option<String>,
}

impl ReferenceRecord {
    pub fn new(product_name: &str, brand_name: &str, mrp: &str) -> Self {
        Self {
            product_name: non_blank(Some(product_name)).map(str::to_string),
            brand_name: non_blank(Some(brand_name)).map(str::to_string),
            mrp: non_blank(Some(mrp)).map(str::to_string),
        }
    }

    /// ブランド名（無ければ "Unknown"）
    pub fn brand_label(&self) -> String {
        label(self.brand_name.as_deref())
    }

    /// MRP（無ければ "Unknown"）
    pub fn mrp_label(&self) -> String {
        label(self.mrp.as_deref())
    }
}

/// 参照表の列対応
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    pub product_name_column: String,
    pub brand_name_column: String,
    /// 未指定ならブランドのみ照合
    #[serde(default)]
    pub mrp_column: Option<String>,
}

impl ColumnMapping {
    pub fn new(product_name_column: &str, brand_name_column: &str, mrp_column: Option<&str>) -> Self {
        Self {
            product_name_column: product_name_column.to_string(),
            brand_name_column: brand_name_column.to_string(),
            mrp_column: mrp_column.map(str::to_string),
        }
    }
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self::new("Product_Name", "Brand_Name", Some("MRP"))
    }
}

/// 照合対象の1件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// 商品名（欠損あり）
    pub name: Option<String>,
    /// 既に判明しているブランド名（MRPのみ照合する場合）
    pub known_brand: Option<String>,
}

impl Query {
    pub fn new(name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
            known_brand: None,
        }
    }

    pub fn with_known_brand(mut self, brand: Option<&str>) -> Self {
        self.known_brand = brand.map(str::to_string);
        self
    }

    /// 有効な既知ブランド（空・"Unknown" は除外）
    pub fn known_brand(&self) -> Option<&str> {
        non_blank(self.known_brand.as_deref()).filter(|b| *b != UNKNOWN)
    }
}

/// 照合結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub brand: String,
    /// MRP照合が無効な場合は `None`
    #[serde(default)]
    pub mrp: Option<String>,
}

impl MatchResult {
    pub fn unknown(with_mrp: bool) -> Self {
        Self {
            brand: UNKNOWN.to_string(),
            mrp: with_mrp.then(|| UNKNOWN.to_string()),
        }
    }

    pub fn has_brand(&self) -> bool {
        self.brand != UNKNOWN
    }

    pub fn has_mrp(&self) -> bool {
        self.mrp.as_deref().is_some_and(|m| m != UNKNOWN)
    }
}

/// 前後の空白を除いて空でなければ返す
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn label(value: Option<&str>) -> String {
    non_blank(value).unwrap_or(UNKNOWN).to_string()
}

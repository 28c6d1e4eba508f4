//! ブランド・MRP照合モジュール
//!
//! 1件ごとに次の順で照合する。
//!
//! ## ブランド
//! 1. 商品名の完全一致
//! 2. ブランド名がクエリに含まれる行（全行）
//! 3. 商品名がクエリと相互に包含する行（全行）
//!
//! ## MRP
//! 1. 商品名の完全一致
//! 2. 判明済みブランドの完全一致
//! 3. 商品名がクエリと相互に包含する行（全行）
//!
//! どこにも該当しなければ "Unknown"。

use crate::reference::{normalize, ReferenceIndex};
use crate::types::{non_blank, MatchResult, Query, ReferenceRecord, UNKNOWN};
use tracing::{debug, trace};

/// 照合オプション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// MRPも照合する
    pub resolve_mrp: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self { resolve_mrp: true }
    }
}

impl MatchOptions {
    pub fn brand_only() -> Self {
        Self { resolve_mrp: false }
    }
}

/// バッチ処理の進捗通知
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// 処理済み件数
    pub done: usize,
    /// 全件数
    pub total: usize,
}

/// 照合器
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    index: &'a ReferenceIndex,
    options: MatchOptions,
}

impl<'a> Matcher<'a> {
    pub fn new(index: &'a ReferenceIndex, options: MatchOptions) -> Self {
        Self { index, options }
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// ブランド名を推定
    pub fn resolve_brand(&self, query: Option<&str>) -> String {
        let Some(normalized) = normalized_query(query) else {
            return UNKNOWN.to_string();
        };

        if let Some(record) = self.index.exact_product_match(&normalized) {
            trace!(query = %normalized, "brand: exact product match");
            return record.brand_label();
        }

        match self.index.scan_for_substring_match(&normalized) {
            Some(record) => {
                trace!(query = %normalized, "brand: substring match");
                record.brand_label()
            }
            None => UNKNOWN.to_string(),
        }
    }

    /// MRPを推定
    ///
    /// `known_brand` は `resolve_brand` の結果、または呼び出し側で判明済みのブランド名。
    pub fn resolve_mrp(&self, query: Option<&str>, known_brand: Option<&str>) -> String {
        let Some(normalized) = normalized_query(query) else {
            return UNKNOWN.to_string();
        };

        if let Some(record) = self.index.exact_product_match(&normalized) {
            trace!(query = %normalized, "mrp: exact product match");
            return record.mrp_label();
        }

        let brand = non_blank(known_brand).filter(|b| *b != UNKNOWN);
        if let Some(record) = brand.and_then(|b| self.index.exact_brand_match(&normalize(b))) {
            trace!(query = %normalized, "mrp: exact brand match");
            return record.mrp_label();
        }

        self.index
            .scan_product_substring(&normalized)
            .map(ReferenceRecord::mrp_label)
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// 1件を照合（ブランド → MRP の順）
    pub fn resolve(&self, query: &Query) -> MatchResult {
        let name = query.name.as_deref();
        let brand = match query.known_brand() {
            Some(known) => known.to_string(),
            None => self.resolve_brand(name),
        };

        let mrp = self
            .options
            .resolve_mrp
            .then(|| self.resolve_mrp(name, Some(brand.as_str())));

        MatchResult { brand, mrp }
    }

    /// 複数件を順に照合
    ///
    /// 1件処理するごとに `on_progress` を呼ぶ。結果は入力と同じ順序。
    pub fn resolve_batch<F>(&self, queries: &[Query], mut on_progress: F) -> Vec<MatchResult>
    where
        F: FnMut(BatchProgress),
    {
        let total = queries.len();
        debug!(total, resolve_mrp = self.options.resolve_mrp, "batch started");

        let mut results = Vec::with_capacity(total);
        for (i, query) in queries.iter().enumerate() {
            results.push(self.resolve(query));
            on_progress(BatchProgress { done: i + 1, total });
        }

        results
    }
}

/// クエリを正規化（欠損・空白のみは None）
fn normalized_query(query: Option<&str>) -> Option<String> {
    non_blank(query).map(normalize)
}

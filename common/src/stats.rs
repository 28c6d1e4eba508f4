//! 照合結果の集計

use crate::error::Result;
use crate::types::MatchResult;
use serde::{Deserialize, Serialize};

/// バッチ全体の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStats {
    pub total: usize,
    pub brands_identified: usize,
    pub mrp_identified: usize,
    /// MRP照合を行ったか
    pub mrp_enabled: bool,
}

impl BatchStats {
    pub fn from_results(results: &[MatchResult]) -> Self {
        Self {
            total: results.len(),
            brands_identified: results.iter().filter(|r| r.has_brand()).count(),
            mrp_identified: results.iter().filter(|r| r.has_mrp()).count(),
            mrp_enabled: results.iter().any(|r| r.mrp.is_some()),
        }
    }

    pub fn brands_unknown(&self) -> usize {
        self.total - self.brands_identified
    }

    pub fn mrp_unknown(&self) -> usize {
        self.total - self.mrp_identified
    }

    /// 全件に対する割合（0.0〜1.0、0件なら0.0）
    pub fn ratio(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64
        }
    }

    /// 割合を "30.0%" 形式で返す
    pub fn percent(&self, count: usize) -> String {
        format!("{:.1}%", self.ratio(count) * 100.0)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

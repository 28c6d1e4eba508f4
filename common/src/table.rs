//! 表データモジュール
//!
//! CSV/Excelから読み込んだ表をメモリ上に保持する。
//! 先頭行をヘッダーとし、欠損セルは `None` で表す。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 読み込み済みの表
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// ヘッダーと行から表を作成
    ///
    /// 列数が足りない行は `None` で埋め、余分なセルは切り捨てる。
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// 文字列リテラルから表を作成（空文字は欠損扱い）
    pub fn from_strings(headers: &[&str], rows: &[&[&str]]) -> Self {
        let headers = headers.iter().map(|h| h.to_string()).collect();
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                    .collect()
            })
            .collect();
        Self::new(headers, rows)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    /// 行数（ヘッダー除く）
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 列名から列番号を取得
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// 列番号を解決する
    ///
    /// 1. `requested` が指定されていれば、その列（存在しなければエラー）
    /// 2. `default_name` の列があればその列
    /// 3. `fallback_first` なら先頭列
    /// 4. いずれも無ければ `MalformedTable`
    pub fn resolve_column(
        &self,
        requested: Option<&str>,
        default_name: &str,
        fallback_first: bool,
    ) -> Result<usize> {
        if let Some(name) = requested {
            return self
                .column_index(name)
                .ok_or_else(|| Error::column_not_found(name, &self.headers));
        }

        if let Some(idx) = self.column_index(default_name) {
            return Ok(idx);
        }

        if fallback_first && !self.headers.is_empty() {
            return Ok(0);
        }

        Err(Error::MalformedTable(format!(
            "'{}' 列が見つかりません (列: {})",
            default_name,
            self.headers.join(", ")
        )))
    }

    /// セル値を取得
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|c| c.as_deref())
    }

    /// 指定列の値を行順に返す
    pub fn column(&self, col: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows
            .iter()
            .map(move |r| r.get(col).and_then(|c| c.as_deref()))
    }

    /// 列を設定する
    ///
    /// 同名の列があれば上書き、無ければ末尾に追加する。
    pub fn set_column(&mut self, name: &str, values: Vec<Option<String>>) {
        let idx = match self.column_index(name) {
            Some(idx) => idx,
            None => {
                self.headers.push(name.to_string());
                for row in &mut self.rows {
                    row.push(None);
                }
                self.headers.len() - 1
            }
        };

        for (row, value) in self.rows.iter_mut().zip(values) {
            row[idx] = value;
        }
    }

    /// 先頭n行だけの表を返す（プレビュー用）
    pub fn head(&self, n: usize) -> Self {
        Self {
            headers: self.headers.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_strings(
            &["Product_Name", "Brand_Name", "MRP"],
            &[&["Colgate Total", "Colgate", "120"], &["Lux Soap", "", "35"]],
        )
    }

    #[test]
    fn test_empty_cell_is_missing() {
        let table = sample();
        assert_eq!(table.cell(1, 1), None);
        assert_eq!(table.cell(1, 2), Some("35"));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = Table::new(
            vec!["A".into(), "B".into()],
            vec![vec![Some("1".into())]],
        );
        assert_eq!(table.rows()[0].len(), 2);
        assert_eq!(table.cell(0, 1), None);
    }

    #[test]
    fn test_resolve_column_requested() {
        let table = sample();
        assert_eq!(table.resolve_column(Some("MRP"), "Product_Name", false).unwrap(), 2);
        let err = table.resolve_column(Some("Price"), "Product_Name", true).unwrap_err();
        assert!(matches!(err, Error::ColumnNotFound { .. }));
    }

    #[test]
    fn test_resolve_column_fallback_first() {
        let table = Table::from_strings(&["Item", "Qty"], &[&["Soap", "1"]]);
        assert_eq!(table.resolve_column(None, "Product_Name", true).unwrap(), 0);
        let err = table.resolve_column(None, "Product_Name", false).unwrap_err();
        assert!(matches!(err, Error::MalformedTable(_)));
    }

    #[test]
    fn test_resolve_column_no_headers() {
        let table = Table::default();
        let err = table.resolve_column(None, "Product_Name", true).unwrap_err();
        assert!(matches!(err, Error::MalformedTable(_)));
    }

    #[test]
    fn test_set_column_appends_and_overwrites() {
        let mut table = sample();
        table.set_column("Category", vec![Some("Oral".into()), None]);
        assert_eq!(table.headers().len(), 4);
        assert_eq!(table.cell(0, 3), Some("Oral"));

        table.set_column("Brand_Name", vec![Some("X".into()), Some("Y".into())]);
        assert_eq!(table.headers().len(), 4);
        assert_eq!(table.cell(1, 1), Some("Y"));
    }

    #[test]
    fn test_head() {
        let table = sample();
        assert_eq!(table.head(1).len(), 1);
        assert_eq!(table.head(10).len(), 2);
    }
}

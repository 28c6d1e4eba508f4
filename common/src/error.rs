//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 商品名列が特定できない表
    #[error("Malformed table: {0}")]
    MalformedTable(String),

    /// 指定された列が表に存在しない
    #[error("Column not found: {column} (available: {})", available.join(", "))]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn column_not_found(column: &str, headers: &[String]) -> Self {
        Error::ColumnNotFound {
            column: column.to_string(),
            available: headers.to_vec(),
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_malformed() {
        let error = Error::MalformedTable("列がありません".to_string());
        assert_eq!(format!("{}", error), "Malformed table: 列がありません");
    }

    #[test]
    fn test_error_display_column_not_found() {
        let headers = vec!["Name".to_string(), "Brand".to_string()];
        let error = Error::column_not_found("Product_Name", &headers);
        let display = format!("{}", error);
        assert!(display.contains("Product_Name"));
        assert!(display.contains("Name, Brand"));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }
}

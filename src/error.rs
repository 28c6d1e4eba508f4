use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("参照ファイルが見つかりません: {0}")]
    ReferenceNotFound(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("対応していないファイル形式です: {0} (csv/xlsx/xls/ods)")]
    UnsupportedFormat(String),

    #[error("CSV読み書きエラー: {0}。区切り文字と文字コード(UTF-8)を確認してください")]
    Csv(#[from] csv::Error),

    #[error("Excel読み込みエラー: {0}")]
    SpreadsheetRead(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("出力先が不正です: {0}")]
    InvalidOutput(String),

    #[error("入力ファイルがありません: {0}")]
    NoInputFiles(String),

    #[error("対話入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] brand_finder_common::Error),
}

pub type Result<T> = std::result::Result<T, FinderError>;

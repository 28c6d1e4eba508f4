use crate::error::{FinderError, Result};
use crate::loader::TableKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 出力ファイル名に付ける接尾辞（再スキャン時に除外する）
pub const OUTPUT_SUFFIX: &str = "_with_brands";

/// 入力パスから照合対象の表ファイルを列挙
///
/// ファイルならそのまま、フォルダなら直下の CSV/Excel ファイルを返す。
pub fn scan_inputs(input: &Path) -> Result<Vec<PathBuf>> {
    if !input.exists() {
        return Err(FinderError::FileNotFound(input.display().to_string()));
    }

    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|path| path.is_file())
        .filter(|path| TableKind::from_path(path).is_some())
        .filter(|path| !is_output_file(path))
        .collect();

    // ファイル名でソート
    files.sort();

    if files.is_empty() {
        return Err(FinderError::NoInputFiles(input.display().to_string()));
    }

    Ok(files)
}

/// 入力ファイルに対応する出力ファイル名
pub fn output_file_name(input: &Path, extension: &str) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "products".to_string());
    format!("{}{}.{}", stem, OUTPUT_SUFFIX, extension)
}

fn is_output_file(path: &Path) -> bool {
    path.file_stem()
        .map(|s| s.to_string_lossy().ends_with(OUTPUT_SUFFIX))
        .unwrap_or(false)
}

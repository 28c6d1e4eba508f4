pub mod csv_writer;
pub mod excel;

use crate::cli::ExportFormat;
use crate::error::{FinderError, Result};
use crate::scanner;
use brand_finder_common::Table;
use std::path::{Path, PathBuf};

/// 出力先パスを決定
///
/// ディレクトリ（または拡張子なし）が指定された場合は `file_name` を付け、
/// 拡張子を出力形式に合わせる。
pub fn output_path_for_format(output: &Path, file_name: &str, format: &ExportFormat) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(file_name).with_extension(format.extension())
    } else {
        output.to_path_buf()
    }
}

/// 入力ファイルごとの出力先を決める
///
/// 単一ファイルなら `output`（省略時は `default_file`）、
/// 複数ファイルなら `output` フォルダ（省略時は入力と同じフォルダ）に
/// `<元の名前>_with_brands.<拡張子>` で出力する。
/// 複数ファイルでファイル名らしい `output` が指定された場合はエラー。
pub fn resolve_output_path(
    input: &Path,
    output: Option<&Path>,
    single: bool,
    default_file: &str,
    format: &ExportFormat,
) -> Result<PathBuf> {
    if single {
        return Ok(match output {
            Some(path) => output_path_for_format(path, default_file, format),
            None => PathBuf::from(default_file).with_extension(format.extension()),
        });
    }

    let dir = match output {
        Some(path) if !path.is_dir() && path.extension().is_some() => {
            return Err(FinderError::InvalidOutput(format!(
                "{} (複数ファイルの場合はフォルダを指定してください)",
                path.display()
            )));
        }
        Some(path) => path.to_path_buf(),
        None => input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    Ok(dir.join(scanner::output_file_name(input, format.extension())))
}

/// 結果の表を書き出す
pub fn export_table(table: &Table, format: &ExportFormat, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match format {
        ExportFormat::Csv => csv_writer::write_csv(table, output_path),
        ExportFormat::Excel => excel::generate_excel(table, output_path),
    }
}

use super::{cell_value, header_name};
use crate::error::Result;
use brand_finder_common::Table;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub fn load_csv(path: &Path) -> Result<Table> {
    let file = File::open(path)?;
    read_csv(file)
}

/// 任意のリーダーからCSVを読み込む
///
/// 列数が揃っていない行も受け付ける（不足分は欠損扱い）。
pub fn read_csv<R: Read>(reader: R) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| header_name(h, i))
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(cell_value).collect());
    }

    Ok(Table::new(headers, rows))
}

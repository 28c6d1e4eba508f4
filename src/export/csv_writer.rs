use crate::error::Result;
use brand_finder_common::Table;
use std::io::Write;
use std::path::Path;

pub fn write_csv(table: &Table, output_path: &Path) -> Result<()> {
    let file = std::fs::File::create(output_path)?;
    write_csv_to(table, file)
}

/// 任意のライターへCSVを書き出す（欠損セルは空欄）
pub fn write_csv_to<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(table.headers())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }

    writer.flush()?;
    Ok(())
}

//! 表のプレビュー表示

use brand_finder_common::Table;

const MAX_CELL_WIDTH: usize = 30;

/// 先頭n行を列揃えのテキストにする
pub fn render_preview(table: &Table, rows: usize) -> String {
    let head = table.head(rows);
    let cells: Vec<Vec<String>> = head
        .rows()
        .iter()
        .map(|row| row.iter().map(|c| clip(c.as_deref().unwrap_or("NaN"))).collect())
        .collect();
    let headers: Vec<String> = head.headers().iter().map(|h| clip(h)).collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = vec![format_row(&headers, &widths)];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &cells {
        lines.push(format_row(row, &widths));
    }

    lines.join("\n")
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| {
            let pad = w.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

fn clip(value: &str) -> String {
    if value.chars().count() > MAX_CELL_WIDTH {
        let mut clipped: String = value.chars().take(MAX_CELL_WIDTH - 1).collect();
        clipped.push('…');
        clipped
    } else {
        value.to_string()
    }
}

//! 照合パイプラインの統合テスト
//!
//! 参照CSV・商品CSVを一時フォルダに作成し、読み込みから出力までを検証

use brand_finder::cli::ExportFormat;
use brand_finder::columns::MappingRequest;
use brand_finder::common::{BatchStats, ColumnMapping, Query, UNKNOWN};
use brand_finder::finder::{self, QueryColumns};
use brand_finder::{export, loader};
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const REFERENCE_CSV: &str = "\
Product_Name,Brand_Name,MRP
Colgate Total,Colgate,120
X,ACME,10
ACME WIDGET,OTHER,99
Dove Cream Bar,Dove,45
Maggi Masala Noodles,Nestle,14
Tide Detergent 1kg,Tide,
";

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("書き込み失敗");
    path
}

fn load_reference(path: &Path, resolve_mrp: bool) -> finder::Reference {
    let request = MappingRequest {
        resolve_mrp,
        ..Default::default()
    };
    finder::load_reference(path, &ColumnMapping::default(), &request, false)
        .expect("参照データ読み込み失敗")
}

#[test]
fn test_end_to_end_csv() {
    let dir = tempdir().expect("Failed to create temp dir");
    let reference_path = write_file(&dir, "products.csv", REFERENCE_CSV);
    let input_path = write_file(
        &dir,
        "items.csv",
        "SKU,Product_Name\n1,COLGATE TOTAL 100G\n2,acme widget pro\n3,\n4,maggi masala\n5,Unbranded thing\n",
    );

    let reference = load_reference(&reference_path, true);
    let table = loader::load_table(&input_path).unwrap();
    let outcome = finder::find_in_table(&reference, &table, &QueryColumns::default(), true, false).unwrap();

    let output = &outcome.output;
    assert_eq!(output.headers(), &["SKU", "Product_Name", "Brand_Name", "MRP"]);

    // ブランド包含 → 既知ブランドの完全一致でMRP
    assert_eq!(output.cell(0, 2), Some("Colgate"));
    assert_eq!(output.cell(0, 3), Some("120"));
    // ブランド包含が商品名包含より優先
    assert_eq!(output.cell(1, 2), Some("ACME"));
    assert_eq!(output.cell(1, 3), Some("10"));
    // 欠損
    assert_eq!(output.cell(2, 2), Some(UNKNOWN));
    assert_eq!(output.cell(2, 3), Some(UNKNOWN));
    // 商品名の包含（クエリが参照側に含まれる）
    assert_eq!(output.cell(3, 2), Some("Nestle"));
    assert_eq!(output.cell(3, 3), Some("14"));
    // 該当なし
    assert_eq!(output.cell(4, 2), Some(UNKNOWN));

    assert_eq!(
        outcome.stats,
        BatchStats {
            total: 5,
            brands_identified: 3,
            mrp_identified: 3,
            mrp_enabled: true,
        }
    );
}

#[test]
fn test_reference_row_without_mrp() {
    let dir = tempdir().expect("Failed to create temp dir");
    let reference_path = write_file(&dir, "products.csv", REFERENCE_CSV);
    let reference = load_reference(&reference_path, true);

    let result = reference
        .matcher(true)
        .resolve(&Query::new(Some("tide detergent 1kg")));
    assert_eq!(result.brand, "Tide");
    assert_eq!(result.mrp.as_deref(), Some(UNKNOWN));
}

#[test]
fn test_brand_only_output() {
    let dir = tempdir().expect("Failed to create temp dir");
    let reference_path = write_file(&dir, "products.csv", REFERENCE_CSV);
    let input_path = write_file(&dir, "items.csv", "Item\nDove cream bar\n");

    let reference = load_reference(&reference_path, false);
    assert!(!reference.has_mrp());

    let table = loader::load_table(&input_path).unwrap();
    let outcome = finder::find_in_table(&reference, &table, &QueryColumns::default(), true, false).unwrap();

    // Product_Name列が無ければ先頭列で照合
    assert_eq!(outcome.query_column, "Item");
    assert_eq!(outcome.output.headers(), &["Item", "Brand_Name"]);
    assert_eq!(outcome.output.cell(0, 1), Some("Dove"));
}

#[test]
fn test_known_brand_column_for_mrp_lookup() {
    let dir = tempdir().expect("Failed to create temp dir");
    let reference_path = write_file(&dir, "products.csv", REFERENCE_CSV);
    let input_path = write_file(
        &dir,
        "items.csv",
        "Product_Name,Brand\nbeauty soap,Dove\nsomething,\n",
    );

    let reference = load_reference(&reference_path, true);
    let table = loader::load_table(&input_path).unwrap();
    let columns = QueryColumns {
        product: Some("Product_Name"),
        known_brand: Some("Brand"),
    };
    let outcome = finder::find_in_table(&reference, &table, &columns, true, false).unwrap();

    assert_eq!(outcome.output.cell(0, 2), Some("Dove"));
    assert_eq!(outcome.output.cell(0, 3), Some("45"));
    assert_eq!(outcome.output.cell(1, 2), Some(UNKNOWN));
}

#[test]
fn test_renamed_reference_columns() {
    let dir = tempdir().expect("Failed to create temp dir");
    let reference_path = write_file(
        &dir,
        "catalog.csv",
        "Item Name,Make,Price\nParle-G Biscuit,Parle,10\n",
    );

    let reference = load_reference(&reference_path, true);
    assert_eq!(
        reference.mapping,
        ColumnMapping::new("Item Name", "Make", Some("Price"))
    );

    let result = reference.matcher(true).resolve(&Query::new(Some("PARLE-G BISCUIT")));
    assert_eq!(result.brand, "Parle");
    assert_eq!(result.mrp.as_deref(), Some("10"));
}

#[test]
fn test_empty_reference_table() {
    let dir = tempdir().expect("Failed to create temp dir");
    let reference_path = write_file(&dir, "products.csv", "Product_Name,Brand_Name,MRP\n");
    let reference = load_reference(&reference_path, true);

    let result = reference.matcher(true).resolve(&Query::new(Some("Anything")));
    assert_eq!(result.brand, UNKNOWN);
    assert_eq!(result.mrp.as_deref(), Some(UNKNOWN));
}

#[test]
fn test_csv_output_round_trip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let reference_path = write_file(&dir, "products.csv", REFERENCE_CSV);
    let input_path = write_file(&dir, "items.csv", "Product_Name\nColgate Total\n");
    let output_path = dir.path().join("out").join("products_with_brands.csv");

    let reference = load_reference(&reference_path, true);
    let table = loader::load_table(&input_path).unwrap();
    let outcome = finder::find_in_table(&reference, &table, &QueryColumns::default(), true, false).unwrap();

    export::export_table(&outcome.output, &ExportFormat::Csv, &output_path).unwrap();

    let written = std::fs::read_to_string(&output_path).unwrap();
    assert_eq!(written, "Product_Name,Brand_Name,MRP\nColgate Total,Colgate,120\n");
}

#[test]
fn test_excel_output_can_be_read_back() {
    let dir = tempdir().expect("Failed to create temp dir");
    let reference_path = write_file(&dir, "products.csv", REFERENCE_CSV);
    let input_path = write_file(&dir, "items.csv", "Product_Name\nDove Cream Bar\nmystery\n");
    let output_path = dir.path().join("result.xlsx");

    let reference = load_reference(&reference_path, true);
    let table = loader::load_table(&input_path).unwrap();
    let outcome = finder::find_in_table(&reference, &table, &QueryColumns::default(), true, false).unwrap();
    export::export_table(&outcome.output, &ExportFormat::Excel, &output_path).unwrap();

    let loaded = loader::load_table(&output_path).unwrap();
    assert_eq!(loaded.headers(), &["Product_Name", "Brand_Name", "MRP"]);
    assert_eq!(loaded.cell(0, 1), Some("Dove"));
    assert_eq!(loaded.cell(0, 2), Some("45"));
    assert_eq!(loaded.cell(1, 1), Some(UNKNOWN));
}

#[test]
fn test_batch_is_repeatable() {
    let dir = tempdir().expect("Failed to create temp dir");
    let reference_path = write_file(&dir, "products.csv", REFERENCE_CSV);
    let input_path = write_file(&dir, "items.csv", "Product_Name\nacme widget\nx\ncolgate\n");

    let reference = load_reference(&reference_path, true);
    let table = loader::load_table(&input_path).unwrap();

    let first = finder::find_in_table(&reference, &table, &QueryColumns::default(), true, false).unwrap();
    let second = finder::find_in_table(&reference, &table, &QueryColumns::default(), true, false).unwrap();
    assert_eq!(first.output, second.output);
}

#[test]
fn test_query_column_detected_by_header_pattern() {
    let dir = tempdir().expect("Failed to create temp dir");
    let reference_path = write_file(&dir, "products.csv", REFERENCE_CSV);
    let input_path = write_file(&dir, "items.csv", "SKU,Product Title\n1001,Colgate Total\n");

    let reference = load_reference(&reference_path, true);
    let table = loader::load_table(&input_path).unwrap();
    let outcome = finder::find_in_table(&reference, &table, &QueryColumns::default(), true, false).unwrap();

    assert_eq!(outcome.query_column, "Product Title");
    assert_eq!(outcome.output.cell(0, 2), Some("Colgate"));
    assert_eq!(outcome.output.cell(0, 3), Some("120"));
}

#[test]
fn test_header_only_input_keeps_output_columns() {
    let dir = tempdir().expect("Failed to create temp dir");
    let reference_path = write_file(&dir, "products.csv", REFERENCE_CSV);
    let input_path = write_file(&dir, "items.csv", "Product_Name\n");

    let reference = load_reference(&reference_path, true);
    let table = loader::load_table(&input_path).unwrap();
    let outcome = finder::find_in_table(&reference, &table, &QueryColumns::default(), true, false).unwrap();

    assert_eq!(outcome.output.headers(), &["Product_Name", "Brand_Name", "MRP"]);
    assert_eq!(outcome.stats.percent(0), "0.0%");
}

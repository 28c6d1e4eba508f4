use brand_finder::common::Query;
use brand_finder::{cli, columns, config, error, export, finder, loader, preview, scanner};
use clap::Parser;
use cli::{Cli, Commands};
use columns::{ColumnKind, MappingRequest};
use config::Config;
use error::{FinderError, Result};
use finder::{QueryColumns, RunSummary};
use tracing::Level;

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("✖ {}", e);
        if let FinderError::ReferenceNotFound(_) = e {
            eprintln!("  `brand-finder config --set-reference PATH` または --reference で参照カタログを指定してください");
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Find {
            input,
            reference,
            output,
            format,
            product_column,
            brand_column,
            mrp_column,
            query_column,
            known_brand_column,
            no_mrp,
            interactive,
            summary,
        } => {
            println!("🔎 brand-finder - ブランド照合\n");

            // 1. 参照データ
            println!("[1/3] 参照データを読み込み中...");
            let reference_path = reference.unwrap_or_else(|| config.reference_path.clone());
            let resolve_mrp = config.resolve_mrp && !no_mrp;
            let request = MappingRequest {
                product: product_column.as_deref(),
                brand: brand_column.as_deref(),
                mrp: mrp_column.as_deref(),
                resolve_mrp,
            };
            let reference =
                finder::load_reference(&reference_path, &config.column_mapping(), &request, interactive)?;
            println!(
                "✔ {}件 (商品名: {}, ブランド: {}, MRP: {})\n",
                reference.index.len(),
                reference.mapping.product_name_column,
                reference.mapping.brand_name_column,
                reference.mapping.mrp_column.as_deref().unwrap_or("-"),
            );
            if resolve_mrp && !reference.has_mrp() {
                println!("⚠ MRP列が無いため、ブランドのみ照合します\n");
            }

            // 2. 入力ファイル
            println!("[2/3] 商品ファイルをスキャン中...");
            let inputs = scanner::scan_inputs(&input)?;
            println!("✔ {}ファイルを検出\n", inputs.len());

            // 3. 照合と出力
            println!("[3/3] 照合中...");
            let single = inputs.len() == 1;
            let mut summaries = Vec::new();

            for file in &inputs {
                println!("- {}", file.display());
                let table = loader::load_table(file)?;

                let query_column = match query_column.as_deref() {
                    Some(name) => Some(name.to_string()),
                    None if interactive => {
                        let default = columns::pick_column(
                            &table,
                            None,
                            ColumnKind::Product,
                            &reference.mapping.product_name_column,
                            true,
                        )
                        .unwrap_or(0);
                        let idx = columns::select_column_interactive(
                            table.headers(),
                            "商品ファイルの商品名列を選択",
                            default,
                        )?;
                        Some(table.headers()[idx].clone())
                    }
                    None => None,
                };
                let query_columns = QueryColumns {
                    product: query_column.as_deref(),
                    known_brand: known_brand_column.as_deref(),
                };

                let outcome =
                    finder::find_in_table(&reference, &table, &query_columns, resolve_mrp, true)?;
                let output_path = export::resolve_output_path(
                    file,
                    output.as_deref(),
                    single,
                    &config.output_file,
                    &format,
                )?;

                export::export_table(&outcome.output, &format, &output_path)?;
                println!("✔ 出力: {} (商品名列: {})", output_path.display(), outcome.query_column);
                finder::print_stats(&outcome.stats);
                println!();

                summaries.push(RunSummary::new(&reference.path, file, &output_path, outcome.stats));
            }

            if let Some(summary_path) = summary {
                let json = serde_json::to_string_pretty(&summaries)?;
                std::fs::write(&summary_path, json)?;
                println!("✔ 集計を保存: {}", summary_path.display());
            }

            println!("\n✅ 照合完了");
        }

        Commands::Lookup { name, brand, reference, no_mrp } => {
            let reference_path = reference.unwrap_or_else(|| config.reference_path.clone());
            let resolve_mrp = config.resolve_mrp && !no_mrp;
            let request = MappingRequest {
                resolve_mrp,
                ..Default::default()
            };
            let reference =
                finder::load_reference(&reference_path, &config.column_mapping(), &request, false)?;

            let query = Query::new(Some(name.as_str())).with_known_brand(brand.as_deref());
            let result = reference.matcher(resolve_mrp).resolve(&query);

            println!("商品名: {}", name);
            println!("  ブランド: {}", result.brand);
            if let Some(mrp) = result.mrp {
                println!("  MRP: {}", mrp);
            }
        }

        Commands::Preview { file, rows } => {
            let path = file.unwrap_or_else(|| config.reference_path.clone());
            let table = loader::load_table(&path)?;

            println!("{} ({}行)", path.display(), table.len());
            println!("列: {}\n", table.headers().join(", "));
            println!("{}", preview::render_preview(&table, rows));
        }

        Commands::Config { set_reference, reset, show } => {
            let mut config = config;

            if reset {
                config = Config::default();
                config.save()?;
                println!("✔ 設定を既定値に戻しました");
            }

            if let Some(path) = set_reference {
                config.set_reference_path(path)?;
                println!("✔ 参照カタログを設定しました");
            }

            if show {
                println!("設定:");
                println!("  参照カタログ: {}", config.reference_path.display());
                println!("  商品名列: {}", config.product_column);
                println!("  ブランド名列: {}", config.brand_column);
                println!("  MRP列: {}", config.mrp_column);
                println!("  出力ファイル: {}", config.output_file);
                println!("  MRP照合: {}", if config.resolve_mrp { "有効" } else { "無効" });
            }
        }
    }

    Ok(())
}

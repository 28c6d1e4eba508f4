use crate::error::{FinderError, Result};
use brand_finder_common::ColumnMapping;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 参照カタログのパス
    pub reference_path: PathBuf,
    pub product_column: String,
    pub brand_column: String,
    pub mrp_column: String,
    /// 出力ファイル名
    pub output_file: String,
    /// MRPも照合する
    pub resolve_mrp: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference_path: PathBuf::from("public/products.csv"),
            product_column: "Product_Name".into(),
            brand_column: "Brand_Name".into(),
            mrp_column: "MRP".into(),
            output_file: "products_with_brands.csv".into(),
            resolve_mrp: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| FinderError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("brand-finder").join("config.json"))
    }

    pub fn set_reference_path(&mut self, path: PathBuf) -> Result<()> {
        self.reference_path = path;
        self.save()
    }

    /// 既定の列対応
    pub fn column_mapping(&self) -> ColumnMapping {
        ColumnMapping::new(&self.product_column, &self.brand_column, Some(self.mrp_column.as_str()))
    }
}

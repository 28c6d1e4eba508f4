//! Brand Finder Common Library
//!
//! 参照カタログとの照合でブランド名・MRPを推定するコアロジック。
//! ファイル入出力やCLIには依存しない。

pub mod error;
pub mod table;
pub mod types;
pub mod reference;
pub mod matcher;
pub mod stats;

pub use error::{Error, Result};
pub use table::Table;
pub use types::{ColumnMapping, MatchResult, Query, ReferenceRecord, UNKNOWN};
pub use reference::{normalize, ReferenceIndex};
pub use matcher::{BatchProgress, MatchOptions, Matcher};
pub use stats::BatchStats;

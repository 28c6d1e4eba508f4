pub mod cli;
pub mod columns;
pub mod config;
pub mod error;
pub mod export;
pub mod finder;
pub mod loader;
pub mod preview;
pub mod scanner;

pub use brand_finder_common as common;

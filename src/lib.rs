pub mod config;
pub mod error;
pub mod index;
pub mod models;
pub mod query;
pub mod testing;
pub mod tokenizer;
pub mod tree;

pub use config::{IndexConfig, TokenizerConfig};
pub use error::{FracTreeError, Result};
pub use index::{CancelToken, FracTree, IndexStats};
pub use models::*;
pub use tokenizer::Tokenizer;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

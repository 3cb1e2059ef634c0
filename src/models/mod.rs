pub mod document;
pub mod search;

pub use document::{Document, DocumentId};
pub use search::SearchHit;

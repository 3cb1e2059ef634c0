//! The FracTree index structure
//!
//! A recursively subdivided tree over the term-key space. Leaves hold postings;
//! an overfull leaf splits at a point chosen by a chaotic map rather than at
//! the midpoint, so the partitioning is irregular by design.

pub mod key;
pub mod node;
pub mod partitioner;
pub mod postings;

pub use key::{term_key, KeyRange, TermKey};
pub use node::Node;
pub use partitioner::ChaoticPartitioner;
pub use postings::{Posting, PostingList};

//! Keyword query resolution over the FracTree

pub mod resolver;

pub use resolver::resolve;

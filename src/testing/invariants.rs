//! Concrete invariants over the FracTree structure

use std::collections::HashMap;
use std::fmt;

use crate::index::FracTree;
use crate::tree::{term_key, Node};

/// A violation of an invariant
#[derive(Debug, Clone)]
pub struct Violation {
    pub invariant: String,
    pub description: String,
    pub context: HashMap<String, String>,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "INVARIANT VIOLATION: {}", self.invariant)?;
        writeln!(f, "  Description: {}", self.description)?;
        if !self.context.is_empty() {
            writeln!(f, "  Context:")?;
            for (key, value) in &self.context {
                writeln!(f, "    {}: {}", key, value)?;
            }
        }
        Ok(())
    }
}

impl Violation {
    fn new(invariant: &str, description: String) -> Self {
        Self {
            invariant: invariant.to_string(),
            description,
            context: HashMap::new(),
        }
    }

    fn with_context(mut self, key: &str, value: String) -> Self {
        self.context.insert(key.to_string(), value);
        self
    }
}

/// Trait for invariant checkers
pub trait Invariant: Send + Sync {
    /// Name of the invariant
    fn name(&self) -> &str;

    /// Check the invariant against a live index
    fn check(&self, index: &FracTree) -> Result<(), Violation>;

    /// Human-readable description
    fn description(&self) -> &str {
        "No description provided"
    }
}

/// Check all invariants and return violations
pub fn check_all_invariants(index: &FracTree, invariants: &[Box<dyn Invariant>]) -> Vec<Violation> {
    let mut violations = Vec::new();

    for invariant in invariants {
        if let Err(violation) = invariant.check(index) {
            violations.push(violation);
        }
    }

    violations
}

/// The full structural invariant suite
pub fn standard_invariants() -> Vec<Box<dyn Invariant>> {
    vec![
        Box::new(RangeCoverage),
        Box::new(KeyContainment),
        Box::new(LeafCapacity),
    ]
}

// ============================================================================
// CONCRETE INVARIANTS FOR THE FRACTREE
// ============================================================================

/// Invariant: children's ranges are disjoint, contiguous, and cover the parent
///
/// For every internal node, `left.high == right.low`, `left.low == parent.low`
/// and `right.high == parent.high`.
pub struct RangeCoverage;

impl Invariant for RangeCoverage {
    fn name(&self) -> &str {
        "RangeCoverage"
    }

    fn description(&self) -> &str {
        "Internal node ranges must equal the contiguous union of their children's ranges"
    }

    fn check(&self, index: &FracTree) -> Result<(), Violation> {
        fn walk(node: &Node) -> Result<(), Violation> {
            let Some((left, right)) = node.children() else {
                return Ok(());
            };
            let parent = node.key_range();
            let (lr, rr) = (left.key_range(), right.key_range());

            if lr.low != parent.low || rr.high != parent.high || lr.high != rr.low {
                return Err(Violation::new(
                    "RangeCoverage",
                    "child ranges do not partition the parent range".to_string(),
                )
                .with_context("parent", format!("[{}, {})", parent.low, parent.high))
                .with_context("left", format!("[{}, {})", lr.low, lr.high))
                .with_context("right", format!("[{}, {})", rr.low, rr.high)));
            }
            walk(left)?;
            walk(right)
        }

        index.with_root(walk)
    }
}

/// Invariant: every stored term key lies inside its leaf's range
pub struct KeyContainment;

impl Invariant for KeyContainment {
    fn name(&self) -> &str {
        "KeyContainment"
    }

    fn description(&self) -> &str {
        "Every term stored in a leaf must route to that leaf's key range"
    }

    fn check(&self, index: &FracTree) -> Result<(), Violation> {
        fn walk(node: &Node) -> Result<(), Violation> {
            if let Some((left, right)) = node.children() {
                if !node.postings().is_empty() {
                    return Err(Violation::new(
                        "KeyContainment",
                        "internal node still holds postings".to_string(),
                    ));
                }
                walk(left)?;
                return walk(right);
            }
            for term in node.postings().keys() {
                if !node.key_range().contains(term_key(term)) {
                    let range = node.key_range();
                    return Err(Violation::new(
                        "KeyContainment",
                        format!("term {term:?} stored outside its leaf range"),
                    )
                    .with_context("key", format!("{}", term_key(term).0))
                    .with_context("range", format!("[{}, {})", range.low, range.high)));
                }
            }
            Ok(())
        }

        index.with_root(walk)
    }
}

/// Invariant: leaves respect the capacity limit
///
/// A leaf may only exceed `max_postings_per_leaf` when a degenerate range
/// forced soft overflow, which the leaf records.
pub struct LeafCapacity;

impl Invariant for LeafCapacity {
    fn name(&self) -> &str {
        "LeafCapacity"
    }

    fn description(&self) -> &str {
        "No leaf exceeds max_postings_per_leaf except after a degenerate-range overflow"
    }

    fn check(&self, index: &FracTree) -> Result<(), Violation> {
        let max = index.config().max_postings_per_leaf;

        fn walk(node: &Node, max: usize) -> Result<(), Violation> {
            match node.children() {
                Some((left, right)) => {
                    walk(left, max)?;
                    walk(right, max)
                }
                None => {
                    let count = node.posting_count();
                    if count > max && !node.is_overflowed() {
                        let range = node.key_range();
                        return Err(Violation::new(
                            "LeafCapacity",
                            format!("leaf holds {count} postings, capacity is {max}"),
                        )
                        .with_context("range", format!("[{}, {})", range.low, range.high)));
                    }
                    Ok(())
                }
            }
        }

        index.with_root(|root| walk(root, max))
    }
}

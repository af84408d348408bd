//! Capacity-aware round-robin deployment planning.
//!
//! Nodes are grouped into buckets by their exact reuse count. One balanced
//! cycle walks `used` from 1 to the largest reuse count and, for each
//! `used`, emits every bucket whose capacity is at least `used`, in
//! ascending capacity order. A node with reuse count `k` therefore shows up
//! `k` times per cycle. Plans longer than one cycle repeat it.

use std::collections::BTreeMap;

use cluster_core::NodeSpec;
use tracing::debug;

use crate::error::{PlannerError, PlannerResult};

/// Nodes grouped by reuse count, preserving input order within a bucket.
#[derive(Debug, Clone)]
pub struct CapacityBuckets<'a> {
    buckets: BTreeMap<u32, Vec<&'a NodeSpec>>,
}

impl<'a> CapacityBuckets<'a> {
    pub fn new(nodes: &'a [NodeSpec]) -> Self {
        let mut buckets: BTreeMap<u32, Vec<&'a NodeSpec>> = BTreeMap::new();
        for node in nodes {
            buckets.entry(node.reuse_count()).or_default().push(node);
        }
        Self { buckets }
    }

    /// Largest reuse count present, or 0 without nodes.
    pub fn max_capacity(&self) -> u32 {
        self.buckets.keys().next_back().copied().unwrap_or(0)
    }

    /// Nodes whose reuse count is exactly `capacity`.
    pub fn bucket(&self, capacity: u32) -> &[&'a NodeSpec] {
        self.buckets.get(&capacity).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of entries in one balanced cycle: the sum of reuse counts.
    pub fn cycle_len(&self) -> u64 {
        self.buckets
            .iter()
            .map(|(capacity, nodes)| u64::from(*capacity) * nodes.len() as u64)
            .sum()
    }

    /// One balanced cycle, lazily.
    pub fn cycle(&self) -> impl Iterator<Item = &'a NodeSpec> {
        (1..=self.max_capacity()).flat_map(move |used| {
            self.buckets
                .range(used..)
                .flat_map(|(_, nodes)| nodes.iter().copied())
        })
    }

    /// The balanced cycle repeated without end, or nothing at all when
    /// there are no nodes. Reuse counts are never zero, so each cycle
    /// yields at least one node.
    pub fn order(&self) -> impl Iterator<Item = &'a NodeSpec> {
        let cycles = if self.is_empty() { 0 } else { usize::MAX };
        (0..cycles).flat_map(move |_| self.cycle())
    }
}

/// Produce a deployment list of exactly `count` nodes.
///
/// `repeat` is accepted for compatibility but currently has no effect:
/// the cycle repeats as often as needed either way.
pub fn generate_deployment(
    nodes: &[NodeSpec],
    count: usize,
    repeat: bool,
) -> PlannerResult<Vec<NodeSpec>> {
    if nodes.is_empty() {
        return Err(PlannerError::NoNodes);
    }
    if count == 0 {
        return Ok(Vec::new());
    }

    let buckets = CapacityBuckets::new(nodes);
    let plan: Vec<NodeSpec> = buckets.order().take(count).cloned().collect();

    debug!(
        count,
        repeat,
        nodes = nodes.len(),
        max_capacity = buckets.max_capacity(),
        cycle_len = buckets.cycle_len(),
        "generated deployment plan"
    );

    Ok(plan)
}

/// How many times each node appears in `plan`, in order of first appearance.
pub fn usage_counts(plan: &[NodeSpec]) -> Vec<(&NodeSpec, usize)> {
    let mut counts: Vec<(&NodeSpec, usize)> = Vec::new();
    for node in plan {
        match counts.iter_mut().find(|(seen, _)| *seen == node) {
            Some((_, n)) => *n += 1,
            None => counts.push((node, 1)),
        }
    }
    counts
}

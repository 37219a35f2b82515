//! Nested-interval encoding of a tree.
//!
//! Every node gets a `[lft, rgt]` interval such that the interval of a node
//! contains the intervals of all of its descendants. Subtree membership then
//! becomes a range check, which is how departments are stored.

use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NestedBounds {
    pub lft: i64,
    pub rgt: i64,
}

impl NestedBounds {
    /// True when `other` is this node or one of its descendants.
    pub fn contains(&self, other: &NestedBounds) -> bool {
        other.lft >= self.lft && other.rgt <= self.rgt
    }
}

/// Rebuilds interval bounds from an adjacency list of `(node, parent)`.
///
/// Roots and siblings are numbered in name order so the result is stable.
/// Nodes whose parent is unknown are treated as roots.
pub fn rebuild<'a, I>(nodes: I) -> HashMap<String, NestedBounds>
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let nodes: Vec<(&str, Option<&str>)> = nodes.into_iter().collect();
    let known: HashSet<&str> = nodes.iter().map(|(n, _)| *n).collect();

    let mut children: BTreeMap<Option<&str>, Vec<&str>> = BTreeMap::new();
    for (node, parent) in &nodes {
        let parent = (*parent).filter(|p| known.contains(p) && p != node);
        children.entry(parent).or_default().push(*node);
    }
    for list in children.values_mut() {
        list.sort_unstable();
    }

    let mut bounds = HashMap::with_capacity(nodes.len());
    let mut counter = 1;
    for root in children.get(&None).cloned().unwrap_or_default() {
        counter = number(root, &children, &mut bounds, counter);
    }
    bounds
}

fn number<'a>(
    node: &'a str,
    children: &BTreeMap<Option<&'a str>, Vec<&'a str>>,
    bounds: &mut HashMap<String, NestedBounds>,
    mut counter: i64,
) -> i64 {
    // a cycle would otherwise recurse forever
    if bounds.contains_key(node) {
        return counter;
    }
    let lft = counter;
    counter += 1;
    bounds.insert(node.to_string(), NestedBounds { lft, rgt: lft });

    if let Some(kids) = children.get(&Some(node)) {
        for child in kids {
            counter = number(*child, children, bounds, counter);
        }
    }

    bounds.insert(node.to_string(), NestedBounds { lft, rgt: counter });
    counter + 1
}

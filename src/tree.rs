//! Weighted binary tree construction.
//!
//! The tree is stored as an arena: [`Tree`] owns a flat `Vec<Node>` and a
//! [`NodeId`] is an index into it. Parent and child links are ids rather than
//! owning references, so the leaf-to-root walks in
//! [`build_code_table`](crate::codec::build_code_table) need no shared
//! ownership. Ids are assigned in creation order, which makes the root always
//! the last node pushed.

use crate::error::{Error, Result};

/// Index of a node in its [`Tree`]'s arena.
pub type NodeId = usize;

/// One vertex of the tree: a leaf carrying a symbol, or an internal node
/// created by merging two lower-weight nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    weight: usize,
    symbol: Option<String>,
    parent: Option<NodeId>,
    children: Option<(NodeId, NodeId)>,
}

impl Node {
    /// Aggregate frequency of all symbols in this node's subtree.
    pub fn weight(&self) -> usize {
        self.weight
    }

    /// The symbol, for leaves; `None` for internal nodes.
    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    /// The parent's id, once this node has been merged under one.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The `(left, right)` child pair, for internal nodes.
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        self.children
    }

    /// Whether this node was created directly from an input symbol.
    pub fn is_leaf(&self) -> bool {
        self.symbol.is_some()
    }
}

/// An immutable weighted binary tree whose leaves are exactly the distinct
/// symbols of the frequency map it was built from.
///
/// Built once by [`build_tree`]; afterwards only read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<Node>,
    leaves: Vec<NodeId>,
}

impl Tree {
    /// Looks up a node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this tree's builder.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// The leaves, in the order they were created from the frequency map.
    pub fn leaves(&self) -> &[NodeId] {
        &self.leaves
    }

    /// The root's id. The root is the last node created: either the final
    /// merge product, or the sole leaf of a single-symbol map.
    pub fn root(&self) -> NodeId {
        self.nodes.len() - 1
    }

    /// Total number of nodes, leaves and internal nodes combined.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no nodes. Never true for a built tree, since
    /// [`build_tree`] rejects empty frequency maps.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// Ids are handed out by a per-builder counter (the arena length), never by
// anything process-wide.
struct TreeBuilder {
    nodes: Vec<Node>,
    leaves: Vec<NodeId>,
}

impl TreeBuilder {
    fn new() -> Self {
        TreeBuilder {
            nodes: Vec::new(),
            leaves: Vec::new(),
        }
    }

    fn add_leaf(&mut self, symbol: &str, weight: usize) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            weight,
            symbol: Some(symbol.to_string()),
            parent: None,
            children: None,
        });
        self.leaves.push(id);
        id
    }

    fn merge(&mut self, left: NodeId, right: NodeId) -> NodeId {
        let id = self.nodes.len();
        let weight = self.nodes[left].weight + self.nodes[right].weight;
        self.nodes.push(Node {
            weight,
            symbol: None,
            parent: None,
            children: Some((left, right)),
        });
        self.nodes[left].parent = Some(id);
        self.nodes[right].parent = Some(id);
        id
    }

    // Selects the two unrooted nodes to merge next. Not the conventional
    // stable-priority-queue rule: a unique minimum picks its partner by a
    // second scan over the remaining weights, while a tied minimum merges the
    // first two tied positions outright. Both branches leave the chosen
    // minimum as the *left* child, wherever it sat in the list.
    fn select(weights: &[usize]) -> (usize, usize) {
        let min = *weights.iter().min().unwrap();
        let mut tied = weights
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w == min)
            .map(|(pos, _)| pos);
        let i = tied.next().unwrap();
        if let Some(j) = tied.next() {
            return (i, j);
        }
        // Unique minimum: the partner is the first position holding the
        // smallest weight once the minimum's single occurrence is excluded.
        let second = weights
            .iter()
            .enumerate()
            .filter(|&(pos, _)| pos != i)
            .map(|(_, &w)| w)
            .min()
            .unwrap();
        let j = weights.iter().position(|&w| w == second).unwrap();
        (i, j)
    }

    fn build(mut self, frequencies: &[(&str, usize)]) -> Result<Tree> {
        if frequencies.is_empty() {
            return Err(Error::EmptyInput);
        }
        let mut unrooted: Vec<NodeId> = frequencies
            .iter()
            .map(|&(symbol, weight)| self.add_leaf(symbol, weight))
            .collect();
        while unrooted.len() != 1 {
            let weights: Vec<usize> = unrooted.iter().map(|&id| self.nodes[id].weight).collect();
            let (i, j) = Self::select(&weights);
            let merged = self.merge(unrooted[i], unrooted[j]);
            // Drop the higher index first so the lower one does not shift.
            let (lo, hi) = if i < j { (i, j) } else { (j, i) };
            unrooted.remove(hi);
            unrooted.remove(lo);
            unrooted.push(merged);
        }
        Ok(Tree {
            nodes: self.nodes,
            leaves: self.leaves,
        })
    }
}

/// Builds the tree for a frequency map, merging the two lowest-weight
/// unrooted nodes until a single root remains.
///
/// The pairs are consumed in slice order, and that order takes part in
/// tie-breaking, so two maps with the same counts but different key order can
/// produce differently shaped trees. Pair a call with
/// [`frequencies`](crate::frequencies) to get first-occurrence order.
///
/// # Examples
///
/// Basic usage:
///
/// ```
/// let tree = huffman_codec::build_tree(&[("a", 3), ("b", 1), ("c", 1)]).unwrap();
///
/// // Three leaves and two merge products.
/// assert_eq!(tree.len(), 5);
/// assert_eq!(tree.node(tree.root()).weight(), 5);
/// ```
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] for an empty frequency map.
///
/// ```
/// use huffman_codec::{build_tree, Error};
///
/// assert_eq!(build_tree(&[]), Err(Error::EmptyInput));
/// ```
pub fn build_tree(frequencies: &[(&str, usize)]) -> Result<Tree> {
    TreeBuilder::new().build(frequencies)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_node(
        tree: &Tree,
        id: NodeId,
        weight: usize,
        symbol: Option<&str>,
        parent: Option<NodeId>,
        children: Option<(NodeId, NodeId)>,
    ) {
        let node = tree.node(id);
        assert_eq!(node.weight(), weight, "weight of node {}", id);
        assert_eq!(node.symbol(), symbol, "symbol of node {}", id);
        assert_eq!(node.parent(), parent, "parent of node {}", id);
        assert_eq!(node.children(), children, "children of node {}", id);
    }

    #[test]
    fn empty_map() {
        assert_eq!(build_tree(&[]), Err(Error::EmptyInput));
    }

    #[test]
    fn single_symbol() {
        let tree = build_tree(&[("x", 5)]).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.leaves(), &[0]);
        assert_eq!(tree.root(), 0);
        assert_node(&tree, 0, 5, Some("x"), None, None);
    }

    #[test]
    fn two_symbols_minimum_becomes_left_child() {
        // The minimum weight sits at position 1, so the later node ends up
        // as the left child of the root.
        let tree = build_tree(&[("a", 3), ("b", 1)]).unwrap();
        assert_eq!(tree.len(), 3);
        assert_node(&tree, 0, 3, Some("a"), Some(2), None);
        assert_node(&tree, 1, 1, Some("b"), Some(2), None);
        assert_node(&tree, 2, 4, None, None, Some((1, 0)));
    }

    #[test]
    fn tied_minimum_merges_first_two_positions() {
        // First merge is the tied pair (b, c); the second takes the unique
        // minimum bc as left child and a as right child.
        let tree = build_tree(&[("a", 3), ("b", 1), ("c", 1)]).unwrap();
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.leaves(), &[0, 1, 2]);
        assert_node(&tree, 0, 3, Some("a"), Some(4), None);
        assert_node(&tree, 1, 1, Some("b"), Some(3), None);
        assert_node(&tree, 2, 1, Some("c"), Some(3), None);
        assert_node(&tree, 3, 2, None, Some(4), Some((1, 2)));
        assert_node(&tree, 4, 5, None, None, Some((3, 0)));
    }

    #[test]
    fn unique_minimum_partner_by_second_scan() {
        // Weights [1, 2, 3, 3] exercise both selection branches in sequence:
        // unique minimum (a with b), then a tie (c with d), then a unique
        // minimum again (ab with cd).
        let tree = build_tree(&[("a", 1), ("b", 2), ("c", 3), ("d", 3)]).unwrap();
        assert_eq!(tree.len(), 7);
        assert_node(&tree, 0, 1, Some("a"), Some(4), None);
        assert_node(&tree, 1, 2, Some("b"), Some(4), None);
        assert_node(&tree, 2, 3, Some("c"), Some(5), None);
        assert_node(&tree, 3, 3, Some("d"), Some(5), None);
        assert_node(&tree, 4, 3, None, Some(6), Some((0, 1)));
        assert_node(&tree, 5, 6, None, Some(6), Some((2, 3)));
        assert_node(&tree, 6, 9, None, None, Some((4, 5)));
    }

    #[test]
    fn deterministic_rebuild() {
        let frequencies = [("e", 7), ("a", 7), ("d", 5), (" ", 9), ("b", 4)];
        let first = build_tree(&frequencies).unwrap();
        let second = build_tree(&frequencies).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn root_weight_is_total_count() {
        let frequencies = [("a", 4), ("b", 2), ("c", 2), ("d", 1)];
        let tree = build_tree(&frequencies).unwrap();
        assert_eq!(tree.node(tree.root()).weight(), 9);
        // Every node but the root has a parent.
        for id in 0..tree.len() {
            assert_eq!(tree.node(id).parent().is_none(), id == tree.root());
        }
    }
}

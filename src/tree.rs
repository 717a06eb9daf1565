//! Attribute-keyed binary search tree with duplicate left-chaining.
//!
//! The tree orders values by [`Attributed::attribute`] only. Equal keys are
//! not distributed into a branch decision: a duplicate becomes the matching
//! node's *new* left child and adopts that node's previous left subtree, so
//! duplicates chain down the left spine. This shape bias, the static
//! midpoint rebalance, and the averaging `balance` score are all inherited
//! behavior that downstream consumers depend on; none of them are the
//! textbook algorithms, and they are kept as-is.
//!
//! ```text
//!                 __ 20 __
//!               /          \
//!          __ 10 __         15
//!         /         \
//!   __ 10 (dupe)     11
//!  /
//! 9
//! ```

use crate::star::Attributed;

struct Node<T> {
    value: T,
    left: Option<Box<Node<T>>>,
    right: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
    fn leaf(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
        })
    }
}

/// A binary search tree over attribute-keyed values.
///
/// Nodes are owned exclusively by their parent; there are no back-references.
pub struct Tree<T> {
    root: Option<Box<Node<T>>>,
    count: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self {
            root: None,
            count: 0,
        }
    }
}

impl<T: Attributed + Clone> Tree<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree by inserting every value in iteration order.
    pub fn from_values<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut tree = Self::new();
        for value in values {
            tree.insert(value);
        }
        tree
    }

    /// Number of values inserted.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Insert a value, descending on attribute comparison only.
    ///
    /// An equal key is placed as the matching node's new left child, with the
    /// node's previous left subtree reattached below the newcomer.
    pub fn insert(&mut self, value: T) {
        Self::insert_rec(&mut self.root, value);
        self.count += 1;
    }

    fn insert_rec(slot: &mut Option<Box<Node<T>>>, value: T) {
        match slot {
            None => *slot = Some(Node::leaf(value)),
            Some(node) => {
                let key = value.attribute();
                if key < node.value.attribute() {
                    Self::insert_rec(&mut node.left, value);
                } else if key > node.value.attribute() {
                    Self::insert_rec(&mut node.right, value);
                } else {
                    let mut dup = Node::leaf(value);
                    dup.left = node.left.take();
                    node.left = Some(dup);
                }
            }
        }
    }

    /// In-order traversal (left, root, right): the authoritative sorted view,
    /// nondecreasing by attribute.
    pub fn in_order(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.count);
        Self::in_order_rec(&self.root, &mut out);
        out
    }

    fn in_order_rec(node: &Option<Box<Node<T>>>, out: &mut Vec<T>) {
        if let Some(node) = node {
            Self::in_order_rec(&node.left, out);
            out.push(node.value.clone());
            Self::in_order_rec(&node.right, out);
        }
    }

    /// Pre-order traversal (root, left, right): preserves tree shape, so an
    /// equivalent tree can be reconstructed by re-inserting in this order.
    pub fn pre_order(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.count);
        Self::pre_order_rec(&self.root, &mut out);
        out
    }

    fn pre_order_rec(node: &Option<Box<Node<T>>>, out: &mut Vec<T>) {
        if let Some(node) = node {
            out.push(node.value.clone());
            Self::pre_order_rec(&node.left, out);
            Self::pre_order_rec(&node.right, out);
        }
    }

    /// Build a near-balanced tree from this tree's sorted contents.
    ///
    /// Recursively inserts the integer midpoint `(max - min) / 2 + min` of
    /// each index range, starting from `(0, len - 1)` and recursing into
    /// `(min, mid)` and `(mid, max)`, stopping once the midpoint lands on a
    /// bound. The bound policy means the extreme elements of the sorted
    /// array are not re-inserted; the shape approximates balance without
    /// guaranteeing minimal height.
    pub fn rebalanced(&self) -> Tree<T> {
        let sorted = self.in_order();
        let mut tree = Tree::new();
        Self::rebalance_range(&mut tree, &sorted, 0, sorted.len() as i64 - 1);
        tree
    }

    fn rebalance_range(tree: &mut Tree<T>, sorted: &[T], min: i64, max: i64) {
        let mid = (max - min) / 2 + min;
        if mid != max && mid != min {
            tree.insert(sorted[mid as usize].clone());
            Self::rebalance_range(tree, sorted, min, mid);
            Self::rebalance_range(tree, sorted, mid, max);
        }
    }

    /// Heuristic balance score in `[0, 100]`.
    ///
    /// Leaves score 100; an internal node scores the integer mean of its
    /// children, with an absent child scoring 0. A subtree missing one child
    /// is therefore penalized harshly. Not a standard balance factor.
    pub fn balance(&self) -> u32 {
        Self::balance_rec(&self.root)
    }

    fn balance_rec(node: &Option<Box<Node<T>>>) -> u32 {
        match node {
            None => 0,
            Some(node) => {
                if node.left.is_none() && node.right.is_none() {
                    100
                } else {
                    (Self::balance_rec(&node.left) + Self::balance_rec(&node.right)) / 2
                }
            }
        }
    }

    /// Maximum height: `1 + max(left, right)`, 0 for an empty tree.
    pub fn height(&self) -> usize {
        Self::height_rec(&self.root)
    }

    fn height_rec(node: &Option<Box<Node<T>>>) -> usize {
        match node {
            None => 0,
            Some(node) => 1 + Self::height_rec(&node.left).max(Self::height_rec(&node.right)),
        }
    }
}

//! Unbalanced binary search tree shared by the book and patron indexes.
//!
//! The shape of the tree is purely a function of insertion order: keys
//! inserted in sorted order produce a tree of height `len`. Every walk is
//! iterative so such a tree can grow without bound.

use std::{cmp::Ordering, fmt};

/// Owning link from a parent (or the root) to a child node
type Link<K, V> = Option<Box<Node<K, V>>>;

/// A keyed entry with exclusive ownership of its two subtrees
#[derive(Debug)]
struct Node<K, V> {
    /// Sort key
    key: K,
    /// Record stored under the key
    value: V,
    /// Subtree of lesser keys
    left: Link<K, V>,
    /// Subtree of greater keys
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    /// Create a childless node
    fn leaf(key: K, value: V) -> Self {
        Self { key, value, left: None, right: None }
    }
}

/// Which child slot of its parent a node occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Lesser-key subtree
    Left,
    /// Greater-key subtree
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "L"),
            Self::Right => write!(f, "R"),
        }
    }
}

/// A parent to child link, as reported by [`SearchTree::edges`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<'a, K> {
    /// Key of the parent node
    pub parent: &'a K,
    /// Key of the child node
    pub child: &'a K,
    /// Slot of the child under the parent
    pub side: Side,
}

/// Binary search tree without rebalancing
#[derive(Debug)]
pub struct SearchTree<K, V> {
    /// Top of the tree, `None` while empty
    root: Link<K, V>,
    /// Number of nodes
    len: usize,
}

impl<K, V> Default for SearchTree<K, V> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<K: Ord, V> SearchTree<K, V> {
    /// Create an empty tree
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the tree
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Insert `value` under `key` on the first free slot of the descent.
    ///
    /// When `key` is already present the new value is discarded and
    /// `on_duplicate` receives the stored one instead. Returns whether a new
    /// node was created.
    pub fn insert_with<F>(&mut self, key: K, value: V, on_duplicate: F) -> bool
    where
        F: FnOnce(&mut V),
    {
        let slot = self.slot_mut(&key);
        if let Some(node) = slot {
            on_duplicate(&mut node.value);
            return false;
        }
        *slot = Some(Box::new(Node::leaf(key, value)));
        self.len = self.len.saturating_add(1);
        true
    }

    /// Return the value stored under `key`, inserting `make()` first if absent
    pub fn get_or_insert_with<F>(&mut self, key: K, make: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        if !self.contains(&key) {
            self.len = self.len.saturating_add(1);
        }
        let slot = self.slot_mut(&key);
        &mut slot.get_or_insert_with(|| Box::new(Node::leaf(key, make()))).value
    }

    /// Find the value stored under `key`
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            };
        }
        None
    }

    /// Find the value stored under `key` for in-place mutation
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.slot_mut(key).as_deref_mut().map(|node| &mut node.value)
    }

    /// Whether a node with `key` exists
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over all entries in ascending key order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref())
    }

    /// Iterate over all values in ascending key order
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Number of nodes on the longest root to leaf path, 0 for an empty tree
    #[must_use]
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut pending: Vec<(&Node<K, V>, usize)> =
            self.root.as_deref().map(|root| (root, 1)).into_iter().collect();
        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            let below = depth.saturating_add(1);
            pending.extend(node.left.as_deref().map(|child| (child, below)));
            pending.extend(node.right.as_deref().map(|child| (child, below)));
        }
        deepest
    }

    /// Every parent to child link, parents before their children, left before right
    #[must_use]
    pub fn edges(&self) -> Vec<Edge<'_, K>> {
        let mut edges = Vec::with_capacity(self.len.saturating_sub(1));
        let mut pending: Vec<&Node<K, V>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = pending.pop() {
            for (child, side) in [(&node.left, Side::Left), (&node.right, Side::Right)] {
                if let Some(child) = child.as_deref() {
                    edges.push(Edge { parent: &node.key, child: &child.key, side });
                }
            }
            pending.extend(node.right.as_deref());
            pending.extend(node.left.as_deref());
        }
        edges
    }

    /// Slot holding `key`, or the empty slot where it would be attached
    fn slot_mut(&mut self, key: &K) -> &mut Link<K, V> {
        let mut slot = &mut self.root;
        while let Some(node) = slot.as_deref() {
            let side = key.cmp(&node.key);
            if side == Ordering::Equal {
                break;
            }
            // Compare on a shared borrow, reborrow mutably only to descend
            let Some(node) = slot else { break };
            slot = if side == Ordering::Less { &mut node.left } else { &mut node.right };
        }
        slot
    }
}

impl<K, V> Drop for SearchTree<K, V> {
    fn drop(&mut self) {
        // Unlink children before each node drops so teardown never recurses.
        let mut pending: Vec<Box<Node<K, V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a SearchTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over a [`SearchTree`], driven by an explicit stack
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    /// Nodes whose left subtree has been visited but which have not been yielded yet
    stack: Vec<&'a Node<K, V>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    /// Start a walk at `root`
    fn new(root: Option<&'a Node<K, V>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.descend_left(root);
        iter
    }

    /// Push `cursor` and its chain of left children
    fn descend_left(&mut self, mut cursor: Option<&'a Node<K, V>>) {
        while let Some(node) = cursor {
            self.stack.push(node);
            cursor = node.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend_left(node.right.as_deref());
        Some((&node.key, &node.value))
    }
}

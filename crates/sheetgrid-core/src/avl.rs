//! Height-balanced (AVL) binary search tree shared by both index levels.
//!
//! ## Layout
//!
//! Every node exclusively owns its two subtrees through `Option<Box<_>>`;
//! there is no sharing and no parent pointer. Each node records its height
//! (`1` for a leaf, `0` for an empty link) so the balance factor
//! `height(left) - height(right)` can be read without walking the subtree.
//!
//! ## Invariants (checked by [`AvlTree::validate`])
//!
//! - In-order traversal yields strictly ascending keys.
//! - `height == 1 + max(height(left), height(right))` at every node.
//! - `|height(left) - height(right)| <= 1` at every node once a mutation returns.
//!
//! Updating an existing key touches the payload in place: the node keeps its
//! position and no rotation happens. There is no removal.

use std::cmp::Ordering;
use std::mem;

use smallvec::SmallVec;

type Link<K, P> = Option<Box<Node<K, P>>>;

#[derive(Debug, Clone)]
struct Node<K, P> {
    key: K,
    payload: P,
    height: u32,
    left: Link<K, P>,
    right: Link<K, P>,
}

impl<K, P> Node<K, P> {
    fn leaf(key: K, payload: P) -> Box<Self> {
        Box::new(Node {
            key,
            payload,
            height: 1,
            left: None,
            right: None,
        })
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    fn balance(&self) -> i64 {
        height(&self.left) as i64 - height(&self.right) as i64
    }
}

fn height<K, P>(link: &Link<K, P>) -> u32 {
    link.as_ref().map_or(0, |n| n.height)
}

/// Lift `y.left` into `y`'s place. Child height is fixed before the parent's.
fn rotate_right<K, P>(mut y: Box<Node<K, P>>) -> Box<Node<K, P>> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    y.left = x.right.take();
    y.update_height();
    x.right = Some(y);
    x.update_height();
    x
}

/// Mirror of [`rotate_right`].
fn rotate_left<K, P>(mut x: Box<Node<K, P>>) -> Box<Node<K, P>> {
    let Some(mut y) = x.right.take() else {
        return x;
    };
    x.right = y.left.take();
    x.update_height();
    y.left = Some(x);
    y.update_height();
    y
}

/// Restore the balance invariant at `node` after one of its subtrees grew by
/// one level.
///
/// Right after an insertion the taller child leans towards the side the new
/// key went down, so its balance factor tells single rotation (outer
/// insertion) apart from double rotation (inner insertion) exactly as
/// comparing the inserted key against the child's key would.
fn rebalance<K, P>(mut node: Box<Node<K, P>>) -> Box<Node<K, P>> {
    node.update_height();
    let balance = node.balance();
    if balance > 1 {
        // left-right
        if node.left.as_ref().is_some_and(|l| l.balance() < 0) {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }
    if balance < -1 {
        // right-left
        if node.right.as_ref().is_some_and(|r| r.balance() > 0) {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }
    node
}

/// Outcome of [`AvlTree::upsert`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Updated,
}

fn upsert_node<K, P, T>(
    link: Link<K, P>,
    key: K,
    seed: T,
    create: impl FnOnce(T) -> P,
    update: impl FnOnce(&mut P, T),
    outcome: &mut Upsert,
) -> Box<Node<K, P>>
where
    K: Ord,
{
    let Some(mut node) = link else {
        *outcome = Upsert::Inserted;
        return Node::leaf(key, create(seed));
    };

    match key.cmp(&node.key) {
        Ordering::Less => {
            let left = node.left.take();
            node.left = Some(upsert_node(left, key, seed, create, update, outcome));
        }
        Ordering::Greater => {
            let right = node.right.take();
            node.right = Some(upsert_node(right, key, seed, create, update, outcome));
        }
        Ordering::Equal => {
            update(&mut node.payload, seed);
            *outcome = Upsert::Updated;
            return node;
        }
    }

    match outcome {
        Upsert::Updated => node,
        Upsert::Inserted => rebalance(node),
    }
}

/// Reasons [`AvlTree::validate`] rejects a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("key at in-order position {position} is not greater than its predecessor")]
    OutOfOrder { position: usize },
    #[error("node at in-order position {position} records height {recorded}, actual {actual}")]
    BadHeight {
        position: usize,
        recorded: u32,
        actual: u32,
    },
    #[error("node at in-order position {position} has balance factor {balance}")]
    Unbalanced { position: usize, balance: i64 },
    #[error("tree tracks {recorded} nodes but holds {actual}")]
    LengthMismatch { recorded: usize, actual: usize },
}

fn check_node<'a, K: Ord, P>(
    link: &'a Link<K, P>,
    prev: &mut Option<&'a K>,
    position: &mut usize,
) -> Result<u32, InvariantViolation> {
    let Some(node) = link else {
        return Ok(0);
    };

    let left = check_node(&node.left, prev, position)?;

    let here = *position;
    if let Some(prev_key) = *prev
        && *prev_key >= node.key
    {
        return Err(InvariantViolation::OutOfOrder { position: here });
    }
    *prev = Some(&node.key);
    *position += 1;

    let right = check_node(&node.right, prev, position)?;

    let actual = 1 + left.max(right);
    if node.height != actual {
        return Err(InvariantViolation::BadHeight {
            position: here,
            recorded: node.height,
            actual,
        });
    }
    let balance = left as i64 - right as i64;
    if balance.abs() > 1 {
        return Err(InvariantViolation::Unbalanced {
            position: here,
            balance,
        });
    }
    Ok(actual)
}

/// Ordered map from `K` to payload `P` backed by an AVL tree.
///
/// Keys are compared with `K`'s `Ord` implementation, which must stay fixed
/// for the lifetime of the tree.
#[derive(Debug, Clone)]
pub struct AvlTree<K, P> {
    root: Link<K, P>,
    len: usize,
}

impl<K, P> Default for AvlTree<K, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, P> AvlTree<K, P> {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the root (`0` when empty).
    pub fn height(&self) -> u32 {
        height(&self.root)
    }

    /// Drop every node at once.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Nodes in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, P> {
        Iter::new(&self.root, self.len)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &P> + '_ {
        self.iter().map(|(_, p)| p)
    }

    pub fn first_key(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.key)
    }

    pub fn last_key(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.key)
    }
}

impl<K: Ord, P> AvlTree<K, P> {
    /// Insert `payload` under `key`, returning the payload it replaced.
    ///
    /// An existing key keeps its node; only the payload is swapped.
    pub fn insert(&mut self, key: K, payload: P) -> Option<P> {
        let mut replaced = None;
        self.upsert_with(
            key,
            payload,
            |payload| payload,
            |existing, payload| replaced = Some(mem::replace(existing, payload)),
        );
        replaced
    }

    /// Find-or-create in a single descent.
    ///
    /// When `key` is absent a payload is built with `create`; either way
    /// `update` then runs on the payload stored under `key`.
    pub fn upsert(
        &mut self,
        key: K,
        create: impl FnOnce() -> P,
        update: impl FnOnce(&mut P),
    ) -> Upsert {
        self.upsert_with(
            key,
            update,
            |update| {
                let mut payload = create();
                update(&mut payload);
                payload
            },
            |payload, update| update(payload),
        )
    }

    fn upsert_with<T>(
        &mut self,
        key: K,
        seed: T,
        create: impl FnOnce(T) -> P,
        update: impl FnOnce(&mut P, T),
    ) -> Upsert {
        let mut outcome = Upsert::Updated;
        let root = self.root.take();
        self.root = Some(upsert_node(root, key, seed, create, update, &mut outcome));
        if outcome == Upsert::Inserted {
            self.len += 1;
        }
        outcome
    }

    pub fn get(&self, key: &K) -> Option<&P> {
        let mut link = self.root.as_deref();
        while let Some(node) = link {
            match key.cmp(&node.key) {
                Ordering::Less => link = node.left.as_deref(),
                Ordering::Greater => link = node.right.as_deref(),
                Ordering::Equal => return Some(&node.payload),
            }
        }
        None
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut P> {
        let mut link = self.root.as_deref_mut();
        while let Some(node) = link {
            match key.cmp(&node.key) {
                Ordering::Less => link = node.left.as_deref_mut(),
                Ordering::Greater => link = node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.payload),
            }
        }
        None
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Check ordering, height bookkeeping and balance of every node.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let mut prev = None;
        let mut position = 0;
        check_node(&self.root, &mut prev, &mut position)?;
        if position != self.len {
            return Err(InvariantViolation::LengthMismatch {
                recorded: self.len,
                actual: position,
            });
        }
        Ok(())
    }
}

impl<K: Ord, P> FromIterator<(K, P)> for AvlTree<K, P> {
    fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, P> Extend<(K, P)> for AvlTree<K, P> {
    fn extend<I: IntoIterator<Item = (K, P)>>(&mut self, iter: I) {
        for (key, payload) in iter {
            self.insert(key, payload);
        }
    }
}

impl<'a, K, P> IntoIterator for &'a AvlTree<K, P> {
    type Item = (&'a K, &'a P);
    type IntoIter = Iter<'a, K, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over an [`AvlTree`].
///
/// Holds the left spine of the unvisited part of the tree on an explicit
/// stack, so memory is bounded by the tree height and no recursion happens.
pub struct Iter<'a, K, P> {
    stack: SmallVec<[&'a Node<K, P>; 32]>,
    remaining: usize,
}

impl<'a, K, P> Iter<'a, K, P> {
    fn new(root: &'a Link<K, P>, len: usize) -> Self {
        let mut iter = Iter {
            stack: SmallVec::new(),
            remaining: len,
        };
        iter.push_left_spine(root.as_deref());
        iter
    }

    fn push_left_spine(&mut self, mut link: Option<&'a Node<K, P>>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a, K, P> Iterator for Iter<'a, K, P> {
    type Item = (&'a K, &'a P);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some((&node.key, &node.payload))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, P> ExactSizeIterator for Iter<'_, K, P> {}

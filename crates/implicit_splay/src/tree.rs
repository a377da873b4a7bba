use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::ops::{Bound, Index, RangeBounds};

use crate::error::SplayError;
use crate::iter::Iter;
use crate::node::{LEFT, Link, Node, RIGHT};

/// Sequence container backed by an implicit-key splay tree.
///
/// Elements are addressed by position only. Random access, insertion,
/// removal, splitting, concatenation and range reversal all run in
/// `O(log n)` amortized time. Every splaying access moves the touched
/// element to the root, so repeated access to nearby positions is cheap.
///
/// Every node is boxed and owned by its parent. Splitting and merging hand
/// whole subtrees between trees; elements are never moved or copied.
pub struct SplayTree<T> {
    pub(crate) root: Link<T>,
}

pub(crate) fn normalize_range<R: RangeBounds<usize>>(
    range: R,
    len: usize,
) -> Result<(usize, usize), SplayError> {
    let start = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => start
            .checked_add(1)
            .ok_or(SplayError::OutOfRange { index: start, len })?,
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&end) => end
            .checked_add(1)
            .ok_or(SplayError::OutOfRange { index: end, len })?,
        Bound::Excluded(&end) => end,
        Bound::Unbounded => len,
    };

    if start > end {
        return Err(SplayError::InvalidRange { start, end });
    }
    if end > len {
        return Err(SplayError::OutOfRange { index: end, len });
    }
    Ok((start, end))
}

impl<T> SplayTree<T> {
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn len(&self) -> usize {
        Node::size(&self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Splays the element at `index` to the root.
    pub(crate) fn splay_at(&mut self, index: usize) -> Result<&mut Node<T>, SplayError> {
        let len = self.len();
        match self.root.take() {
            Some(root) if index < len => {
                let root = self.root.insert(Node::splay(root, index));
                Ok(&mut **root)
            }
            root => {
                self.root = root;
                Err(SplayError::OutOfRange { index, len })
            }
        }
    }

    /// Node of in-order rank `index` on a shared tree. Pending reversals are
    /// resolved by tracking their parity instead of pushing.
    fn node_shared(&self, index: usize) -> Option<&Node<T>> {
        let mut index = index;
        let mut link = self.root.as_deref();
        let mut flip = false;
        while let Some(node) = link {
            flip ^= node.rev;
            let left = &node.ch[LEFT ^ usize::from(flip)];
            let left_size = Node::size(left);
            match index.cmp(&left_size) {
                Ordering::Equal => return Some(node),
                Ordering::Less => link = left.as_deref(),
                Ordering::Greater => {
                    index -= left_size + 1;
                    link = node.ch[RIGHT ^ usize::from(flip)].as_deref();
                }
            }
        }
        None
    }

    /// Element at `index`, splayed to the root.
    pub fn at(&mut self, index: usize) -> Result<&T, SplayError> {
        self.splay_at(index).map(|node| &node.value)
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, SplayError> {
        self.splay_at(index).map(|node| &mut node.value)
    }

    /// Element at `index` without restructuring the tree.
    pub fn get(&self, index: usize) -> Result<&T, SplayError> {
        self.node_shared(index)
            .map(|node| &node.value)
            .ok_or(SplayError::OutOfRange {
                index,
                len: self.len(),
            })
    }

    pub fn first(&self) -> Option<&T> {
        self.get(0).ok()
    }

    pub fn last(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|index| self.get(index).ok())
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub(crate) fn split_unchecked(&mut self, at: usize) -> Self {
        debug_assert!(at <= self.len());
        let (left, right) = Node::split(self.root.take(), at);
        self.root = left;
        Self { root: right }
    }

    /// Removes `[at, len)` and returns it as a new tree; `self` keeps
    /// `[0, at)`.
    ///
    /// `at == 0` moves everything out, `at == len` returns an empty tree.
    /// The right part keeps its nodes, so nothing is moved or reallocated.
    pub fn split(&mut self, at: usize) -> Result<Self, SplayError> {
        let len = self.len();
        if at > len {
            return Err(SplayError::OutOfRange { index: at, len });
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(at, len, "split");
        Ok(self.split_unchecked(at))
    }

    /// Appends all of `other` after the last element of `self`.
    pub fn merge(&mut self, mut other: Self) {
        #[cfg(feature = "tracing")]
        tracing::trace!(left = self.len(), right = other.len(), "merge");
        self.root = Node::merge(self.root.take(), other.root.take());
    }

    /// Reverses the order of the elements in `range`.
    ///
    /// Reversing the whole sequence only flips the root's pending flag.
    pub fn reverse<R: RangeBounds<usize>>(&mut self, range: R) -> Result<(), SplayError> {
        let (start, end) = normalize_range(range, self.len())?;
        #[cfg(feature = "tracing")]
        tracing::trace!(start, end, len = self.len(), "reverse");
        if start == end {
            return Ok(());
        }
        if start == 0 && end == self.len() {
            if let Some(root) = self.root.as_deref_mut() {
                root.rev ^= true;
            }
            return Ok(());
        }
        let (rest, right) = Node::split(self.root.take(), end);
        let (left, mut middle) = Node::split(rest, start);
        if let Some(middle) = middle.as_deref_mut() {
            middle.rev ^= true;
        }
        self.root = Node::merge(Node::merge(left, middle), right);
        Ok(())
    }

    /// Inserts `value` at `index` as the new root: its left subtree holds
    /// `[0, index)` and its right subtree the rest.
    pub(crate) fn insert_unchecked(&mut self, index: usize, value: T) -> &mut T {
        debug_assert!(index <= self.len());
        let (left, right) = Node::split(self.root.take(), index);
        let mut node = Box::new(Node::new(value));
        node.ch = [left, right];
        node.pull();
        &mut self.root.insert(node).value
    }

    /// Inserts `value` so that it ends up at position `index`.
    /// `index == len()` appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<&mut T, SplayError> {
        let len = self.len();
        if index > len {
            return Err(SplayError::OutOfRange { index, len });
        }
        Ok(self.insert_unchecked(index, value))
    }

    pub fn push_back(&mut self, value: T) {
        self.insert_unchecked(self.len(), value);
    }

    pub fn push_front(&mut self, value: T) {
        self.insert_unchecked(0, value);
    }

    /// Removes the element at `index`, whose neighbours are merged in its
    /// place.
    pub fn remove(&mut self, index: usize) -> Result<T, SplayError> {
        self.splay_at(index)?;
        let Some(mut root) = self.root.take() else {
            return Err(SplayError::OutOfRange { index, len: 0 });
        };
        let [left, right] = mem::take(&mut root.ch);
        self.root = Node::merge(left, right);
        Ok(root.value)
    }

    /// Removes every element in `range`.
    pub fn erase<R: RangeBounds<usize>>(&mut self, range: R) -> Result<(), SplayError> {
        let (start, end) = normalize_range(range, self.len())?;
        #[cfg(feature = "tracing")]
        tracing::trace!(start, end, len = self.len(), "erase");
        if start == end {
            return Ok(());
        }
        let (rest, right) = Node::split(self.root.take(), end);
        let (left, middle) = Node::split(rest, start);
        self.root = Node::merge(left, right);
        drop(Self { root: middle });
        Ok(())
    }

    pub fn into_vec(mut self) -> Vec<T> {
        let mut values = Vec::with_capacity(self.len());
        let mut stack: Vec<Box<Node<T>>> = Vec::new();
        let mut cur = self.root.take();
        loop {
            while let Some(mut node) = cur {
                node.push();
                cur = node.ch[LEFT].take();
                stack.push(node);
            }
            let Some(mut node) = stack.pop() else {
                break;
            };
            cur = node.ch[RIGHT].take();
            values.push(node.value);
        }
        values
    }

    /// Checks every cached subtree size against the real one.
    ///
    /// # Panics
    ///
    /// Panics if any structural invariant is broken.
    pub fn validate(&self) {
        let mut stack: Vec<&Node<T>> = self.root.as_deref().into_iter().collect();
        let mut seen = 0;
        while let Some(node) = stack.pop() {
            seen += 1;
            let mut size = 1;
            for child in node.ch.iter().flatten() {
                size += child.sz;
                stack.push(child);
            }
            assert_eq!(node.sz, size, "stale subtree size");
        }
        assert_eq!(seen, self.len(), "root size disagrees with the node count");
    }
}

impl<T> Drop for SplayTree<T> {
    fn drop(&mut self) {
        // Iterative, so a long path cannot overflow the stack.
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.ch.iter_mut().filter_map(Option::take));
        }
    }
}

impl<T> Default for SplayTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SplayTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for SplayTree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SplayTree<T> {}

impl<T> From<Vec<T>> for SplayTree<T> {
    fn from(values: Vec<T>) -> Self {
        let len = values.len();
        Self {
            root: Node::build(&mut values.into_iter(), len),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for SplayTree<T> {
    fn from(values: [T; N]) -> Self {
        Self::from(Vec::from(values))
    }
}

impl<T> FromIterator<T> for SplayTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T> Extend<T> for SplayTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let other = iter.into_iter().collect::<Self>();
        self.merge(other);
    }
}

impl<T> Index<usize> for SplayTree<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IntoIterator for SplayTree<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<'a, T> IntoIterator for &'a SplayTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

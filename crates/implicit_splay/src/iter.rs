use std::iter::FusedIterator;

use crate::node::{LEFT, Link, Node, RIGHT};
use crate::tree::SplayTree;

/// In-order iterator over a shared [`SplayTree`].
///
/// Each end keeps the path of nodes still to be visited. Pending reversals
/// are never pushed; the orientation of every node is the parity of the
/// flags on it and above it, stored next to the node on the path.
pub struct Iter<'a, T> {
    front: Vec<(&'a Node<T>, bool)>,
    back: Vec<(&'a Node<T>, bool)>,
    remaining: usize,
}

/// Pushes the logically outermost path towards `side`, starting at `link`
/// whose parent has parity `flip`.
fn descend<'a, T>(
    path: &mut Vec<(&'a Node<T>, bool)>,
    mut link: &'a Link<T>,
    mut flip: bool,
    side: usize,
) {
    while let Some(node) = link.as_deref() {
        flip ^= node.rev;
        path.push((node, flip));
        link = &node.ch[side ^ usize::from(flip)];
    }
}

/// Visits the top of `path` and queues its logical neighbour subtree.
fn step<'a, T>(path: &mut Vec<(&'a Node<T>, bool)>, side: usize) -> Option<&'a T> {
    let (node, flip) = path.pop()?;
    descend(path, &node.ch[side ^ 1 ^ usize::from(flip)], flip, side);
    Some(&node.value)
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(tree: &'a SplayTree<T>) -> Self {
        let mut front = Vec::new();
        let mut back = Vec::new();
        descend(&mut front, &tree.root, false, LEFT);
        descend(&mut back, &tree.root, false, RIGHT);
        Self {
            front,
            back,
            remaining: tree.len(),
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        step(&mut self.front, LEFT)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        step(&mut self.back, RIGHT)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

use std::cmp::Ordering;

pub(crate) const LEFT: usize = 0;
pub(crate) const RIGHT: usize = 1;

pub(crate) type Link<T> = Option<Box<Node<T>>>;

pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) ch: [Link<T>; 2],
    pub(crate) sz: usize,
    /// Children of this subtree are logically swapped, not yet applied.
    pub(crate) rev: bool,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            value,
            ch: [None, None],
            sz: 1,
            rev: false,
        }
    }

    #[inline(always)]
    pub(crate) fn size(link: &Link<T>) -> usize {
        link.as_ref().map_or(0, |node| node.sz)
    }

    /// Recomputes the subtree size from the children.
    pub(crate) fn pull(&mut self) {
        self.sz = 1 + Self::size(&self.ch[LEFT]) + Self::size(&self.ch[RIGHT]);
    }

    /// Resolves the pending reversal one level down.
    pub(crate) fn push(&mut self) {
        if !self.rev {
            return;
        }
        self.ch.swap(LEFT, RIGHT);
        self.rev = false;
        for child in self.ch.iter_mut().flatten() {
            child.rev ^= true;
        }
    }

    /// Attaches `child` on `side` and refreshes the size.
    pub(crate) fn link(&mut self, child: Link<T>, side: usize) {
        self.ch[side] = child;
        self.pull();
    }

    /// Top-down splay: brings the node of in-order rank `index` to the root.
    ///
    /// Nodes passed on the way down are pushed before their children are
    /// compared, then hung on a left chain (smaller ranks) or a right chain
    /// (larger ranks) which become the new root's subtrees.
    pub(crate) fn splay(mut root: Box<Self>, mut index: usize) -> Box<Self> {
        debug_assert!(index < root.sz);
        let mut left_chain: Vec<Box<Self>> = Vec::new();
        let mut right_chain: Vec<Box<Self>> = Vec::new();

        loop {
            root.push();
            let left_size = Self::size(&root.ch[LEFT]);
            match index.cmp(&left_size) {
                Ordering::Equal => break,
                Ordering::Less => {
                    let Some(mut child) = root.ch[LEFT].take() else {
                        break;
                    };
                    child.push();
                    if index < Self::size(&child.ch[LEFT]) {
                        if let Some(next) = child.ch[LEFT].take() {
                            // zig-zig: rotate right before linking
                            root.ch[LEFT] = child.ch[RIGHT].take();
                            root.pull();
                            child.ch[RIGHT] = Some(root);
                            right_chain.push(child);
                            root = next;
                            continue;
                        }
                    }
                    right_chain.push(root);
                    root = child;
                }
                Ordering::Greater => {
                    let Some(mut child) = root.ch[RIGHT].take() else {
                        break;
                    };
                    child.push();
                    index -= left_size + 1;
                    let child_left = Self::size(&child.ch[LEFT]);
                    if index > child_left {
                        if let Some(next) = child.ch[RIGHT].take() {
                            root.ch[RIGHT] = child.ch[LEFT].take();
                            root.pull();
                            child.ch[LEFT] = Some(root);
                            left_chain.push(child);
                            index -= child_left + 1;
                            root = next;
                            continue;
                        }
                    }
                    left_chain.push(root);
                    root = child;
                }
            }
        }

        let mut left = root.ch[LEFT].take();
        while let Some(mut node) = left_chain.pop() {
            node.link(left, RIGHT);
            left = Some(node);
        }
        let mut right = root.ch[RIGHT].take();
        while let Some(mut node) = right_chain.pop() {
            node.link(right, LEFT);
            right = Some(node);
        }
        root.ch = [left, right];
        root.pull();
        root
    }

    /// Splits into the first `at` elements and the rest.
    pub(crate) fn split(root: Link<T>, at: usize) -> (Link<T>, Link<T>) {
        let Some(root) = root else {
            return (None, None);
        };
        if at == 0 {
            return (None, Some(root));
        }
        if at >= root.sz {
            return (Some(root), None);
        }
        let mut root = Self::splay(root, at);
        let left = root.ch[LEFT].take();
        root.pull();
        (left, Some(root))
    }

    /// Concatenates two subtrees: the last element of `left` is splayed and
    /// `right` hangs off its empty right slot.
    pub(crate) fn merge(left: Link<T>, right: Link<T>) -> Link<T> {
        match (left, right) {
            (None, right) => right,
            (left, None) => left,
            (Some(left), Some(right)) => {
                let last = left.sz - 1;
                let mut root = Self::splay(left, last);
                root.link(Some(right), RIGHT);
                Some(root)
            }
        }
    }

    /// Balanced subtree from the next `len` values, by recursive midpoint
    /// selection.
    pub(crate) fn build<I: Iterator<Item = T>>(values: &mut I, len: usize) -> Link<T> {
        if len == 0 {
            return None;
        }
        let mid = len / 2;
        let left = Self::build(values, mid);
        let Some(value) = values.next() else {
            return left;
        };
        let mut node = Box::new(Self::new(value));
        node.ch = [left, Self::build(values, len - mid - 1)];
        node.pull();
        Some(node)
    }
}

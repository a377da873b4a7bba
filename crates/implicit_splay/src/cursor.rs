use crate::error::SplayError;
use crate::tree::SplayTree;

impl<T> SplayTree<T> {
    /// Cursor at `index`; `index == len()` is the end position.
    pub fn cursor_mut(&mut self, index: usize) -> Result<CursorMut<'_, T>, SplayError> {
        let len = self.len();
        if index > len {
            return Err(SplayError::OutOfRange { index, len });
        }
        let mut cursor = CursorMut { tree: self, index };
        cursor.settle();
        Ok(cursor)
    }

    /// Cursor at the first element, or at the end position if empty.
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T> {
        let mut cursor = CursorMut {
            tree: self,
            index: 0,
        };
        cursor.settle();
        cursor
    }

    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        let index = self.len();
        CursorMut { tree: self, index }
    }
}

/// Editing position inside a [`SplayTree`].
///
/// A cursor sits on an element or on the end position after the last one.
/// The current element is always kept at the root, so reading it is `O(1)`
/// and stepping to a neighbour is a short splay.
pub struct CursorMut<'a, T> {
    tree: &'a mut SplayTree<T>,
    index: usize,
}

impl<'a, T> CursorMut<'a, T> {
    /// Splays the current element to the root, if there is one.
    fn settle(&mut self) {
        if self.index < self.tree.len() {
            let _ = self.tree.splay_at(self.index);
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_end(&self) -> bool {
        self.index == self.tree.len()
    }

    pub fn current(&self) -> Option<&T> {
        if self.is_end() {
            return None;
        }
        self.tree.root.as_ref().map(|node| &node.value)
    }

    pub fn current_mut(&mut self) -> Option<&mut T> {
        if self.is_end() {
            return None;
        }
        self.tree.root.as_mut().map(|node| &mut node.value)
    }

    /// # Panics
    ///
    /// Panics if the cursor is at the end position.
    pub fn move_next(&mut self) {
        assert!(!self.is_end(), "move_next called at the end position");
        self.index += 1;
        self.settle();
    }

    /// # Panics
    ///
    /// Panics if the cursor is at the first element.
    pub fn move_prev(&mut self) {
        assert!(self.index > 0, "move_prev called at the front of the sequence");
        self.index -= 1;
        self.settle();
    }

    /// Inserts `value` before the current position and moves onto it.
    pub fn insert_before(&mut self, value: T) {
        self.tree.insert_unchecked(self.index, value);
    }

    /// Removes the current element. The cursor then points at the element
    /// that took its position, or at the end position.
    pub fn remove_current(&mut self) -> Option<T> {
        if self.is_end() {
            return None;
        }
        let value = self.tree.remove(self.index).ok();
        self.settle();
        value
    }

    /// Removes `count` elements starting at the current one. The cursor then
    /// points at the element right after the removed run, or at the end
    /// position.
    pub fn remove_range(&mut self, count: usize) -> Result<(), SplayError> {
        let len = self.tree.len();
        let end = self
            .index
            .checked_add(count)
            .filter(|&end| end <= len)
            .ok_or(SplayError::OutOfRange {
                index: self.index.saturating_add(count),
                len,
            })?;
        self.tree.erase(self.index..end)?;
        self.settle();
        Ok(())
    }

    /// Splits the tree right before the cursor: the tree keeps the elements
    /// in front of the cursor and everything from the current position on is
    /// returned.
    pub fn split_off(self) -> SplayTree<T> {
        self.tree.split_unchecked(self.index)
    }

    pub fn as_tree(&self) -> &SplayTree<T> {
        self.tree
    }
}

use std::ops::RangeBounds;

use crate::error::SplayError;
use crate::tree::{SplayTree, normalize_range};

/// Positional sequence operations shared by the splay tree and the `Vec`
/// baseline it is benchmarked against.
pub trait SequenceBase {
    type Key;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&mut self, index: usize) -> Result<&Self::Key, SplayError>;
    fn insert(&mut self, index: usize, key: Self::Key) -> Result<(), SplayError>;
    fn remove(&mut self, index: usize) -> Result<Self::Key, SplayError>;
}

pub trait SequenceSplitMerge: SequenceBase + Sized {
    fn split_at(&mut self, index: usize) -> Result<Self, SplayError>;
    fn merge(&mut self, right: Self);
}

pub trait SequenceReverse: SequenceBase {
    fn reverse<R: RangeBounds<usize>>(&mut self, range: R) -> Result<(), SplayError>;
}

impl<T> SequenceBase for SplayTree<T> {
    type Key = T;

    fn len(&self) -> usize {
        self.len()
    }

    fn get(&mut self, index: usize) -> Result<&T, SplayError> {
        self.at(index)
    }

    fn insert(&mut self, index: usize, key: T) -> Result<(), SplayError> {
        self.insert(index, key).map(|_| ())
    }

    fn remove(&mut self, index: usize) -> Result<T, SplayError> {
        self.remove(index)
    }
}

impl<T> SequenceSplitMerge for SplayTree<T> {
    fn split_at(&mut self, index: usize) -> Result<Self, SplayError> {
        self.split(index)
    }

    fn merge(&mut self, right: Self) {
        self.merge(right)
    }
}

impl<T> SequenceReverse for SplayTree<T> {
    fn reverse<R: RangeBounds<usize>>(&mut self, range: R) -> Result<(), SplayError> {
        self.reverse(range)
    }
}

impl<T> SequenceBase for Vec<T> {
    type Key = T;

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn get(&mut self, index: usize) -> Result<&T, SplayError> {
        let len = self.as_slice().len();
        self.as_slice()
            .get(index)
            .ok_or(SplayError::OutOfRange { index, len })
    }

    fn insert(&mut self, index: usize, key: T) -> Result<(), SplayError> {
        let len = self.as_slice().len();
        if index > len {
            return Err(SplayError::OutOfRange { index, len });
        }
        Vec::insert(self, index, key);
        Ok(())
    }

    fn remove(&mut self, index: usize) -> Result<T, SplayError> {
        let len = self.as_slice().len();
        if index >= len {
            return Err(SplayError::OutOfRange { index, len });
        }
        Ok(Vec::remove(self, index))
    }
}

impl<T> SequenceSplitMerge for Vec<T> {
    fn split_at(&mut self, index: usize) -> Result<Self, SplayError> {
        let len = self.as_slice().len();
        if index > len {
            return Err(SplayError::OutOfRange { index, len });
        }
        Ok(self.split_off(index))
    }

    fn merge(&mut self, mut right: Self) {
        self.append(&mut right);
    }
}

impl<T> SequenceReverse for Vec<T> {
    fn reverse<R: RangeBounds<usize>>(&mut self, range: R) -> Result<(), SplayError> {
        let (start, end) = normalize_range(range, self.as_slice().len())?;
        self[start..end].reverse();
        Ok(())
    }
}

mod cursor;
mod error;
mod iter;
mod node;
mod traits;
mod tree;

pub use cursor::CursorMut;
pub use error::SplayError;
pub use iter::Iter;
pub use traits::{SequenceBase, SequenceReverse, SequenceSplitMerge};
pub use tree::SplayTree;

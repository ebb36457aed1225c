//! The in-memory virtual filesystem: path normalization and the node tree.

mod error;
pub mod path;
pub mod tree;

pub use error::FsError;
pub use path::{Anchor, Segment, TokenPath};
pub use tree::{Directory, File, Filesystem, Node, NodeId};

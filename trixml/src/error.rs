//! Error types for trixml.

use thiserror::Error;

/// Result type alias for trixml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing, navigating or serializing a tree.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or unterminated XML. No partial tree is ever returned.
    #[error("XML parse error: {0}")]
    Parse(String),

    /// The tree cannot be written as XML, e.g. an element has no name.
    #[error("XML serialization error: {0}")]
    Serialize(String),

    /// A first-member operation was invoked on a collection with no members.
    #[error("Cannot {operation}: the collection is empty")]
    EmptyCollection {
        /// Name of the operation that was attempted.
        operation: &'static str,
    },

    /// `remove` was invoked on a node that has no parent.
    #[error("Cannot remove node without parent")]
    DetachedNode,

    /// I/O error while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

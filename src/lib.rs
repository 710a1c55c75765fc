//! # Radix Tree
//!
//! A mutable radix tree (also known as a PATRICIA trie) keyed by byte strings.
//!
//! A PATRICIA tree is described in:
//!    Donald R. Morrison. "PATRICIA -- practical algorithm to retrieve
//!    information coded in alphanumeric". Journal of the ACM, 15(4):514-534,
//!    October 1968
//!
//! ## Features
//!
//! - **Prefix compression**: keys sharing a prefix share the nodes holding it; inserts split
//!   nodes and removals merge them back
//! - **Closest-match lookup**: [`Radix::find`] falls back to the nearest stored ancestor of a
//!   missing key, and [`Radix::find_func`] can stop at the first ancestor a predicate accepts
//! - **Ordered navigation**: [`NodeRef::next`] and [`NodeRef::prev`] walk the entries in byte
//!   order around a ring, without keeping a sorted index
//! - **Stable handles**: nodes are addressed by [`NodeId`]s that survive unrelated mutations
//!
//! The tree is not thread-safe; wrap it in a lock to share it.
//!
//! ## Example
//!
//! ```rust
//! use radix_tree::Radix;
//!
//! let mut tree = Radix::new();
//! tree.insert("nl.miek", "apex");
//! tree.insert("nl.miek.a", "a");
//! tree.insert("nl.miek.c", "c");
//!
//! // Exact lookups
//! let (node, exact) = tree.find("nl.miek.a");
//! assert!(exact);
//! assert_eq!(node.unwrap().value(), Some(&"a"));
//!
//! // A missing name resolves to its closest stored ancestor
//! let (node, exact) = tree.find("nl.miek.b.x");
//! assert!(!exact);
//! assert_eq!(node.unwrap().key(), b"nl.miek");
//!
//! // Walk in key order, wrapping around at the end
//! let c = tree.find("nl.miek.c").0.unwrap();
//! assert_eq!(c.prev().unwrap().key(), b"nl.miek.a");
//! assert_eq!(c.next().unwrap().key(), b"nl.miek");
//! ```

#[macro_use]
mod tracing_helpers;

mod config;
mod node;
mod node_ref;
mod reader;
mod trie;
mod util;
mod walk;

// Re-export public types
pub use crate::config::{RadixConfig, DEFAULT_MAX_KEY_SIZE, MAX_KEY_SIZE_ENV};
pub use crate::node::NodeId;
pub use crate::node_ref::NodeRef;
pub use crate::trie::{Radix, Removed};
pub use crate::util::longest_common_prefix;
pub use crate::walk::Iter;

/// Errors that can occur when reading keys from a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The key is empty
    InvalidKey,
    /// The key is longer than the configured maximum
    KeyTooLong {
        /// The configured maximum, in bytes
        max: usize,
    },
    /// Reading the key failed
    Io(std::io::ErrorKind),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidKey => write!(f, "Invalid key for this operation"),
            Error::KeyTooLong { max } => write!(f, "Key exceeds the maximum of {} bytes", max),
            Error::Io(kind) => write!(f, "Failed to read key: {:?}", kind),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

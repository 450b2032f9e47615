//! Package implement an ordered set using [red-black tree][wiki-rbt].
//!
//! [RbTree] is an ephemeral, single threaded, in-memory index over
//! values ordered by a caller supplied [Comparator]:
//!
//! - Each entry in RbTree is a single value, compared as a whole.
//! - Parametrised over `value-type` and `comparator-type`.
//! - CRUD operations, via insert(), find(), delete() api.
//! - Duplicate values are rejected, not overwritten.
//! - Full table scan, in-order, pre-order or post-order.
//! - Uses ownership model and borrow semantics to ensure safety, a node
//!   handle returned by find() cannot outlive the next mutation.
//! - No Durability guarantee.
//! - Not thread safe.
//!
//! Constructing a new [RbTree] instance and CRUD operations:
//!
//! ```
//! use rbtree::{Natural, RbTree};
//!
//! let mut index: RbTree<i64, Natural> = RbTree::new(Natural);
//! assert_eq!(index.len(), 0);
//! assert_eq!(index.is_empty(), true);
//!
//! assert_eq!(index.insert(10).unwrap(), true);
//! assert_eq!(index.insert(20).unwrap(), true);
//! assert_eq!(index.insert(20).unwrap(), false);
//! assert_eq!(index.len(), 2);
//!
//! let node = index.find(&10).unwrap().unwrap();
//! assert_eq!(*node.value(), 10);
//!
//! assert_eq!(index.delete(&10).unwrap(), Some(10));
//! assert_eq!(index.delete(&10).unwrap(), None);
//! assert_eq!(index.find(&10).unwrap().is_none(), true);
//! ```
//!
//! Ordering with a closure:
//!
//! ```
//! use rbtree::RbTree;
//!
//! let mut index = RbTree::new(|a: &String, b: &String| b.cmp(a));
//! index.insert("key1".to_string()).unwrap();
//! index.insert("key2".to_string()).unwrap();
//!
//! let items: Vec<&String> = index.iter().collect();
//! assert_eq!(items, vec!["key2", "key1"]);
//! ```
//!
//! [wiki-rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

use std::{error, fmt, result};

// Short form to compose Error values.
//
// Here are few possible ways:
//
// ```ignore
// use crate::Error;
// err_at!(InvariantViolation, msg: format!("bad rotation"));
// ```
//
// ```ignore
// use crate::Error;
// err_at!(TypeMismatch, value.as_int());
// ```
//
// ```ignore
// use crate::Error;
// err_at!(TypeMismatch, value.as_int(), format!("comparing {}", other));
// ```
//
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err(Error::$v(prefix, format!($($arg),+)))
    }};
    ($v:ident, $e:expr) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                Err(Error::$v(prefix, format!("{}", err)))
            }
        }
    }};
    ($v:ident, $e:expr, $($arg:expr),+) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                let msg = format!($($arg),+);
                Err(Error::$v(prefix, format!("{} {}", err, msg)))
            }
        }
    }};
}

mod cmp;
mod iter;
mod node;
mod tree;

pub use cmp::{Comparator, IntCmp, Natural, StrCmp, ThreeWay, Value};
pub use iter::{Iter, Order, Traverse};
pub use node::{Color, NodeRef};
pub use tree::RbTree;

/// Error variants that are returned by this package's API.
///
/// Each variant carries a prefix, typically identifying the
/// error location.
pub enum Error {
    /// Value compares equal to an entry already in the tree.
    DuplicateKey(String, String),
    /// Key is not present in the tree.
    KeyNotFound(String, String),
    /// Balancing logic left the tree in an impossible shape. Fatal.
    InvariantViolation(String, String),
    /// Comparator was handed a value it cannot compare.
    TypeMismatch(String, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        use Error::*;

        match self {
            DuplicateKey(p, msg) => write!(f, "{} DuplicateKey: {}", p, msg),
            KeyNotFound(p, msg) => write!(f, "{} KeyNotFound: {}", p, msg),
            InvariantViolation(p, msg) => write!(f, "{} InvariantViolation: {}", p, msg),
            TypeMismatch(p, msg) => write!(f, "{} TypeMismatch: {}", p, msg),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        write!(f, "{}", self)
    }
}

impl error::Error for Error {}

/// Type alias for Result return type, used by this package.
pub type Result<T> = result::Result<T, Error>;

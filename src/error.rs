use std::{error, fmt};

/// Error enumerates over all possible errors that this package
/// shall return.
///
/// Variants from [`Error::SortError`] onwards are only returned by the
/// validation routines and indicate a broken index rather than caller
/// misuse, refer to [`Error::is_validation`].
#[derive(Debug, Clone, PartialEq)]
pub enum Error<K, V> {
    /// Key is required but the supplied key is null, refer to
    /// [`Key::is_null`](crate::Key::is_null).
    NullKey,
    /// Returned by create() API when key is already present. The
    /// rejected key is handed back to the caller.
    DuplicateKey(K),
    /// Returned by lookup() API when key is not present.
    KeyNotFound(K),
    /// Fatal case, index entries are not in sort-order. `other_key` is
    /// the ancestor whose bound was crossed by `key`.
    SortError {
        key: K,
        value: V,
        other_key: K,
        other_value: V,
    },
    /// Fatal case, AVL height difference between subtrees is out of range.
    AvlImbalance { key: K, value: V, height: isize },
    /// Fatal case, AVL balance-factor does not match the height
    /// difference between subtrees.
    BalanceMismatch {
        key: K,
        value: V,
        height: isize,
        balance: i8,
    },
    /// Fatal case, breaking one of the two Red-Black rules.
    ConsecutiveReds { key: K, value: V },
    /// Fatal case, breaking one of the two Red-Black rules. `left` and
    /// `right` are the black-heights of the subtrees.
    UnbalancedBlacks {
        key: K,
        value: V,
        left: usize,
        right: usize,
    },
    /// Fatal case, Red-Black root is not black.
    RedRoot { key: K, value: V },
    /// Fatal case, number of nodes does not match the book-kept count.
    CountMismatch { expected: usize, found: usize },
}

impl<K, V> Error<K, V> {
    /// Return true if this error was raised by validation, that is,
    /// it signals a bug in the index and not a bad argument.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            Error::NullKey | Error::DuplicateKey(_) | Error::KeyNotFound(_)
        )
    }

    /// Short, payload free, description of this error.
    pub fn reason(&self) -> &'static str {
        match self {
            Error::NullKey => "null key",
            Error::DuplicateKey(_) => "duplicate key",
            Error::KeyNotFound(_) => "key not found",
            Error::SortError { .. } => "entries not in sort order",
            Error::AvlImbalance { .. } => "height difference is invalid",
            Error::BalanceMismatch { .. } => "height difference doesn't match balance-factor",
            Error::ConsecutiveReds { .. } => "red node has a red child",
            Error::UnbalancedBlacks { .. } => "subtrees of unequal black-height",
            Error::RedRoot { .. } => "root is red",
            Error::CountMismatch { .. } => "node count mismatch",
        }
    }
}

impl<K, V> fmt::Display for Error<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let reason = self.reason();
        match self {
            Error::NullKey => write!(f, "{}", reason),
            Error::DuplicateKey(key) | Error::KeyNotFound(key) => {
                write!(f, "{}: {:?}", reason, key)
            }
            Error::SortError {
                key,
                value,
                other_key,
                other_value,
            } => write!(
                f,
                "{}: {:?}={:?} against {:?}={:?}",
                reason, key, value, other_key, other_value
            ),
            Error::AvlImbalance { key, value, height } => {
                write!(f, "{}: {:?}={:?} height:{}", reason, key, value, height)
            }
            Error::BalanceMismatch {
                key,
                value,
                height,
                balance,
            } => write!(
                f,
                "{}: {:?}={:?} height:{} balance:{}",
                reason, key, value, height, balance
            ),
            Error::ConsecutiveReds { key, value } | Error::RedRoot { key, value } => {
                write!(f, "{}: {:?}={:?}", reason, key, value)
            }
            Error::UnbalancedBlacks {
                key,
                value,
                left,
                right,
            } => write!(
                f,
                "{}: {:?}={:?} left:{} right:{}",
                reason, key, value, left, right
            ),
            Error::CountMismatch { expected, found } => {
                write!(f, "{}: expected:{} found:{}", reason, expected, found)
            }
        }
    }
}

impl<K, V> error::Error for Error<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
}

use std::{
    cmp::{Ordering, Reverse},
    ops::Deref,
};

/// Comparison function used to order keys in an index. Default is
/// [`Ord::cmp`], applications can supply their own via
/// [`Tree::with_comparer`](crate::Tree::with_comparer).
pub type Comparer<K> = fn(&K, &K) -> Ordering;

/// Owning link to a subtree, every node is exclusively owned by its
/// parent or, for the root, by the tree.
pub type Link<K, V, M> = Option<Box<Node<K, V, M>>>;

/// Keys that can be indexed. Ordering comes from `Ord`, unless the index
/// is constructed with a custom [`Comparer`].
///
/// A key type may have a _null_ value that can never be stored in the
/// index, like `None` for `Option<T>` keys. Null keys are rejected with
/// [`Error::NullKey`](crate::Error::NullKey).
///
/// ```
/// use bst_index::{AvlTree, Error, Key};
///
/// #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
/// struct Sku(u32);
///
/// impl Key for Sku {}
///
/// let mut index: AvlTree<Sku, u64> = AvlTree::new("skus");
/// index.create(Sku(10), 100).unwrap();
///
/// let mut index: AvlTree<Option<u32>, u64> = AvlTree::new("optional");
/// assert_eq!(index.create(None, 100), Err(Error::NullKey));
/// ```
pub trait Key: Clone + Ord {
    /// Return true if this key is null.
    fn is_null(&self) -> bool {
        false
    }
}

macro_rules! impl_key {
    ($($t:ty),*) => {
        $(impl Key for $t {})*
    };
}

impl_key!(i8, i16, i32, i64, i128, isize);
impl_key!(u8, u16, u32, u64, u128, usize);
impl_key!(bool, char, (), String);

impl<'a> Key for &'a str {}

impl<T: Clone + Ord> Key for Vec<T> {}

impl<T: Key> Key for Box<T> {
    fn is_null(&self) -> bool {
        self.deref().is_null()
    }
}

impl<T: Key> Key for Reverse<T> {
    fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

impl<A: Key, B: Key> Key for (A, B) {
    fn is_null(&self) -> bool {
        self.0.is_null() || self.1.is_null()
    }
}

impl<T: Key> Key for Option<T> {
    fn is_null(&self) -> bool {
        match self {
            Some(key) => key.is_null(),
            None => true,
        }
    }
}

/// Direction addresses one of the two children of a [`Node`]. Symmetric
/// algorithms, rotations and fixups, are written once and parameterised
/// by direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left = 0,
    Right = 1,
}

impl Direction {
    /// Return the mirror direction.
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Balance-factor contribution of growing the subtree in this
    /// direction, -1 for left and +1 for right.
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    // direction to walk from a node whose key compares as `ord` against
    // the key being looked up, None when they are equal.
    #[inline]
    pub(crate) fn towards(ord: Ordering) -> Option<Direction> {
        match ord {
            Ordering::Less => Some(Direction::Left),
            Ordering::Greater => Some(Direction::Right),
            Ordering::Equal => None,
        }
    }
}

/// Target of a descent. Deletion uses the subtree extremes to pull out the
/// in-order successor or predecessor of a node with two children.
pub(crate) enum Seek<'a, K> {
    Equals(&'a K),
    SubtreeMinimum,
    SubtreeMaximum,
}

/// Node corresponds to a single entry in the index. `M` is the
/// balancing state kept by the tree's discipline: `()` for unbalanced
/// trees, balance-factor for AVL and color for Red-Black.
#[derive(Clone)]
pub struct Node<K, V, M> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) meta: M,
    pub(crate) children: [Link<K, V, M>; 2],
}

// Primary operations on a single node.
impl<K, V, M> Node<K, V, M> {
    // CREATE operation
    pub(crate) fn new(key: K, value: V, meta: M) -> Box<Node<K, V, M>> {
        Box::new(Node {
            key,
            value,
            meta,
            children: [None, None],
        })
    }

    /// Return the key of this entry.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Return the value of this entry.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Return balancing state of this node.
    #[inline]
    pub fn meta(&self) -> &M {
        &self.meta
    }

    /// Return the child in direction `dir`.
    #[inline]
    pub fn child(&self, dir: Direction) -> Option<&Node<K, V, M>> {
        self.children[dir.index()].as_ref().map(Deref::deref)
    }

    #[inline]
    pub(crate) fn link(&self, dir: Direction) -> &Link<K, V, M> {
        &self.children[dir.index()]
    }

    #[inline]
    pub(crate) fn link_mut(&mut self, dir: Direction) -> &mut Link<K, V, M> {
        &mut self.children[dir.index()]
    }

    #[inline]
    pub(crate) fn take_child(&mut self, dir: Direction) -> Link<K, V, M> {
        self.children[dir.index()].take()
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children[0].is_none() && self.children[1].is_none()
    }

    /// Return the direction to descend for `seek`, None if this node is
    /// the target.
    pub(crate) fn seek(&self, seek: &Seek<K>, cmp: Comparer<K>) -> Option<Direction> {
        match seek {
            Seek::Equals(key) => Direction::towards(cmp(*key, &self.key)),
            Seek::SubtreeMinimum => self.link(Direction::Left).as_ref().map(|_| Direction::Left),
            Seek::SubtreeMaximum => self.link(Direction::Right).as_ref().map(|_| Direction::Right),
        }
    }

    // swap entry with (key, value) and return the old entry.
    pub(crate) fn replace_entry(&mut self, key: K, value: V) -> (K, V) {
        let key = std::mem::replace(&mut self.key, key);
        let value = std::mem::replace(&mut self.value, value);
        (key, value)
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}

pub(crate) fn find<'a, K, V, M>(
    mut node: Option<&'a Node<K, V, M>>,
    key: &K,
    cmp: Comparer<K>,
) -> Option<&'a Node<K, V, M>> {
    while let Some(nref) = node {
        node = match Direction::towards(cmp(key, &nref.key)) {
            Some(dir) => nref.child(dir),
            None => return Some(nref),
        };
    }
    None
}

pub(crate) fn find_mut<'a, K, V, M>(
    mut node: Option<&'a mut Node<K, V, M>>,
    key: &K,
    cmp: Comparer<K>,
) -> Option<&'a mut Node<K, V, M>> {
    while let Some(nref) = node {
        node = match Direction::towards(cmp(key, &nref.key)) {
            Some(dir) => nref.link_mut(dir).as_deref_mut(),
            None => return Some(nref),
        };
    }
    None
}

//      rotate(link, Left)              rotate(link, Right)
//
//        node              x              node            x
//        /  \             / \             /  \           / \
//       a    x    =>   node  c           x    c   =>    a  node
//           / \        /  \             / \                /  \
//          b   c      a    b           a   b              b    c
//
// The child opposite to `dir` is raised, `node` goes down on the `dir`
// side and adopts the raised child's inner subtree.
pub(crate) fn rotate<K, V, M>(link: &mut Link<K, V, M>, dir: Direction) {
    let other = dir.opposite();
    let mut node = match link.take() {
        Some(node) => node,
        None => panic!("rotate(): rotating an empty link ? Call the programmer"),
    };
    let mut x = match node.take_child(other) {
        Some(x) => x,
        None => panic!("rotate(): rotating without a pivot ? Call the programmer"),
    };
    *node.link_mut(other) = x.take_child(dir);
    *x.link_mut(dir) = Some(node);
    *link = Some(x);
}

// Raise the inner grandchild in two steps, first rotate the child
// opposite to `dir`, then rotate `link` towards `dir`.
pub(crate) fn rotate_twice<K, V, M>(link: &mut Link<K, V, M>, dir: Direction) {
    let other = dir.opposite();
    match link.as_mut() {
        Some(node) => rotate(node.link_mut(other), other),
        None => panic!("rotate_twice(): rotating an empty link ? Call the programmer"),
    }
    rotate(link, dir);
}

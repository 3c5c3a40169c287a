use std::{
    cmp, fmt,
    marker::PhantomData,
    mem,
    ops::Index,
};

use rand::Rng;

use crate::avl::Avl;
use crate::depth::Depth;
use crate::error::Error;
use crate::node::{self, Comparer, Direction, Key, Link, Node};
use crate::rb::RedBlack;
use crate::strategy::{self, Strategy, Walk};
use crate::traverse::{InOrder, LevelOrder, PostOrder, PreOrder};
use crate::unbalanced::Unbalanced;

/// Index on a plain binary search tree, height depends on insert order.
pub type UnbalancedTree<K, V> = Tree<K, V, Unbalanced>;

/// Index on a height balanced [AVL][avl] tree.
///
/// [avl]: https://en.wikipedia.org/wiki/AVL_tree
pub type AvlTree<K, V> = Tree<K, V, Avl>;

/// Index on a color balanced [Red-Black][rb] tree.
///
/// [rb]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
pub type RedBlackTree<K, V> = Tree<K, V, RedBlack>;

/// Tree manage a single instance of in-memory ordered index, balanced by
/// the discipline `S`. Refer to [`UnbalancedTree`], [`AvlTree`] and
/// [`RedBlackTree`].
///
/// Keys are unique, adding an existing key is an error. Not thread safe,
/// applications sharing an index across threads shall serialize access.
pub struct Tree<K, V, S>
where
    S: Strategy,
{
    name: String,
    root: Link<K, V, S::Meta>,
    n_count: usize, // number of entries in the tree.
    compare: Comparer<K>,
    _strategy: PhantomData<S>,
}

/// Different ways to construct a new Tree instance.
impl<K, V, S> Tree<K, V, S>
where
    K: Key,
    V: Clone,
    S: Strategy,
{
    /// Create an empty instance of Tree, identified by `name`.
    /// Applications can choose unique names.
    pub fn new<N>(name: N) -> Tree<K, V, S>
    where
        N: AsRef<str>,
    {
        Tree::with_comparer(name, K::cmp)
    }

    /// Create an empty instance of Tree, ordering keys by `compare`
    /// instead of their natural order.
    pub fn with_comparer<N>(name: N, compare: Comparer<K>) -> Tree<K, V, S>
    where
        N: AsRef<str>,
    {
        let name = name.as_ref().to_string();
        log::debug!("{} new {} index", name, S::NAME);
        Tree {
            name,
            root: Default::default(),
            n_count: Default::default(),
            compare,
            _strategy: PhantomData,
        }
    }

    /// Create a new instance of Tree and load it with entries from
    /// `iter`. Note that iterator should return (key, value) tuples,
    /// where key must be ``unique``.
    pub fn load_from<N, I>(name: N, iter: I) -> Result<Tree<K, V, S>, Error<K, V>>
    where
        N: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut tree = Tree::new(name);
        for (key, value) in iter {
            tree.create(key, value)?;
        }
        log::debug!("{} loaded {} entries", tree.name, tree.n_count);
        Ok(tree)
    }
}

/// Maintenance API.
impl<K, V, S> Tree<K, V, S>
where
    S: Strategy,
{
    /// Identify this instance. Applications can choose unique names while
    /// creating Tree instances.
    #[inline]
    pub fn id(&self) -> String {
        self.name.clone()
    }

    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_count == 0
    }

    /// Return the number of nodes on the longest path from root to leaf.
    pub fn height(&self) -> usize {
        height(self.root.as_deref())
    }

    /// Return quickly with basic statisics, only entries() and node_size()
    /// methods are valid with this statisics.
    pub fn stats(&self) -> Stats {
        Stats::new(self.n_count, mem::size_of::<Node<K, V, S::Meta>>())
    }

    /// Return the root node, None if the index is empty.
    #[inline]
    pub fn root(&self) -> Option<&Node<K, V, S::Meta>> {
        self.root.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn root_mut(&mut self) -> &mut Link<K, V, S::Meta> {
        &mut self.root
    }
}

/// Write operations on Tree instance.
impl<K, V, S> Tree<K, V, S>
where
    K: Key,
    V: Clone,
    S: Strategy,
{
    /// Create a new {key, value} entry in the index. If key is already
    /// present return error, leaving the index untouched.
    pub fn create(&mut self, key: K, value: V) -> Result<(), Error<K, V>> {
        if key.is_null() {
            return Err(Error::NullKey);
        }
        S::insert(&mut self.root, key, value, self.compare).map_err(Error::DuplicateKey)?;
        self.n_count += 1;
        log::trace!("{} create, entries:{}", self.name, self.n_count);
        self.check_consistency();
        Ok(())
    }

    /// Set value for key. If there is an existing entry for key,
    /// overwrite the old value with new value and return the old value.
    /// Otherwise create a new entry.
    pub fn set(&mut self, key: K, value: V) -> Result<Option<V>, Error<K, V>> {
        if key.is_null() {
            return Err(Error::NullKey);
        }
        let cmp = self.compare;
        if let Some(node) = node::find_mut(self.root.as_deref_mut(), &key, cmp) {
            return Ok(Some(mem::replace(&mut node.value, value)));
        }
        self.create(key, value)?;
        Ok(None)
    }

    /// Delete key from this instance and return its value. If key is
    /// not present, then delete is effectively a no-op.
    pub fn delete(&mut self, key: &K) -> Option<V> {
        let (_, value) = S::remove(&mut self.root, key, self.compare)?;
        self.n_count -= 1;
        log::trace!("{} delete, entries:{}", self.name, self.n_count);
        self.check_consistency();
        Some(value)
    }

    /// Remove key from this instance, return false if key is not present.
    pub fn remove(&mut self, key: &K) -> bool {
        self.delete(key).is_some()
    }

    /// Remove all entries from this instance.
    pub fn clear(&mut self) {
        self.root = None;
        self.n_count = 0;
        log::debug!("{} cleared", self.name);
        self.check_consistency();
    }

    /// Validate tree with following rules:
    ///
    /// * Keys are in sort order, no duplicates.
    /// * Number of nodes match the number of entries.
    /// * AVL: balance-factor match the height difference between
    ///   subtrees, and stays within -1..=1.
    /// * Red-Black: root is black, no red node has a red child, and
    ///   number of blacks are same under left child and right child.
    ///
    /// Additionally return full statistics on the tree. Refer to [`Stats`]
    /// for more information.
    pub fn validate(&self) -> Result<Stats, Error<K, V>> {
        let root = self.root.as_deref();
        if let Some(root) = root {
            S::check_root(root)?;
        }

        let mut walk = Walk::new(self.compare);
        let measure = strategy::validate_tree::<K, V, S>(root, None, None, 0, &mut walk)?;
        if walk.count != self.n_count {
            return Err(Error::CountMismatch {
                expected: self.n_count,
                found: walk.count,
            });
        }

        let mut stats = self.stats();
        stats.set_height(walk.depths.max());
        if S::BLACK_HEIGHT {
            stats.set_blacks(measure);
        }
        stats.set_depths(walk.depths);
        Ok(stats)
    }

    #[cfg(any(test, feature = "consistency_check"))]
    fn check_consistency(&self) {
        if let Err(err) = self.validate() {
            panic!("{} consistency check failed: {}", self.name, err.reason());
        }
    }

    #[cfg(not(any(test, feature = "consistency_check")))]
    #[inline]
    fn check_consistency(&self) {}
}

/// Read operations on Tree instance.
impl<K, V, S> Tree<K, V, S>
where
    K: Key,
    V: Clone,
    S: Strategy,
{
    /// Get the value for key.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.search(key).map(Node::value)
    }

    /// Get the value for key, error if key is null or not present.
    pub fn lookup(&self, key: &K) -> Result<&V, Error<K, V>> {
        if key.is_null() {
            return Err(Error::NullKey);
        }
        self.get(key).ok_or_else(|| Error::KeyNotFound(key.clone()))
    }

    /// Check whether key is present in this index.
    pub fn contains_key(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Return the node holding key.
    pub fn search(&self, key: &K) -> Option<&Node<K, V, S::Meta>> {
        node::find(self.root.as_deref(), key, self.compare)
    }

    /// Return a random entry from this index.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Option<(&K, &V)> {
        let mut nref = self.root.as_deref()?;

        let mut at_depth = rng.gen::<u8>() % 40;
        loop {
            let dir = match rng.gen::<bool>() {
                true => Direction::Left,
                false => Direction::Right,
            };
            match nref.child(dir) {
                Some(next) if at_depth > 0 => {
                    at_depth -= 1;
                    nref = next;
                }
                _ => break Some((&nref.key, &nref.value)),
            }
        }
    }

    /// Return an iterator over all entries in ascending key order.
    pub fn iter(&self) -> InOrder<K, V, S::Meta> {
        InOrder::new(self)
    }

    /// Return an iterator over all keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Return an iterator over all values in ascending key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Return an iterator visiting node, left subtree, right subtree.
    pub fn pre_order(&self) -> PreOrder<K, V, S::Meta> {
        PreOrder::new(self)
    }

    /// Return an iterator visiting left subtree, right subtree, node.
    pub fn post_order(&self) -> PostOrder<K, V, S::Meta> {
        PostOrder::new(self)
    }

    /// Return an iterator visiting nodes level by level, left to right.
    pub fn level_order(&self) -> LevelOrder<K, V, S::Meta> {
        LevelOrder::new(self)
    }
}

/// Deep copy of every node, nothing is shared between the two trees.
impl<K, V, S> Clone for Tree<K, V, S>
where
    K: Key,
    V: Clone,
    S: Strategy,
{
    fn clone(&self) -> Self {
        let tree = Tree {
            name: self.name.clone(),
            root: self.root.clone(),
            n_count: self.n_count,
            compare: self.compare,
            _strategy: PhantomData,
        };
        tree.check_consistency();
        tree
    }
}

impl<'a, K, V, S> Index<&'a K> for Tree<K, V, S>
where
    K: Key,
    V: Clone,
    S: Strategy,
{
    type Output = V;

    /// Panics if key is not present, use [`Tree::lookup`] to handle
    /// missing keys.
    fn index(&self, key: &'a K) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("{}: key not found", self.name),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a Tree<K, V, S>
where
    K: Key,
    V: Clone,
    S: Strategy,
{
    type Item = (&'a K, &'a V);
    type IntoIter = InOrder<'a, K, V, S::Meta>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> fmt::Debug for Tree<K, V, S>
where
    K: Key + fmt::Debug,
    V: Clone + fmt::Debug,
    S: Strategy,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

fn height<K, V, M>(node: Option<&Node<K, V, M>>) -> usize {
    match node {
        None => 0,
        Some(node) => {
            let left = height(node.child(Direction::Left));
            let right = height(node.child(Direction::Right));
            1 + cmp::max(left, right)
        }
    }
}

/// Statistics on [`Tree`]. Serves two purpose:
///
/// * To get partial but quick statistics via [`Tree::stats`] method.
/// * To get full statisics via [`Tree::validate`] method.
#[derive(Default, Debug)]
pub struct Stats {
    entries: usize, // number of entries in the tree.
    node_size: usize,
    height: Option<usize>,
    blacks: Option<usize>,
    depths: Option<Depth>,
}

impl Stats {
    fn new(entries: usize, node_size: usize) -> Stats {
        Stats {
            entries,
            node_size,
            height: Default::default(),
            blacks: Default::default(),
            depths: Default::default(),
        }
    }

    #[inline]
    fn set_height(&mut self, height: usize) {
        self.height = Some(height)
    }

    #[inline]
    fn set_blacks(&mut self, blacks: usize) {
        self.blacks = Some(blacks)
    }

    #[inline]
    fn set_depths(&mut self, depths: Depth) {
        self.depths = Some(depths)
    }

    /// Return number entries in [`Tree`] instance.
    #[inline]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Return node-size, including over-head for `Tree<K,V,S>`. Although
    /// the node overhead is constant, the node size varies based on
    /// key and value types. EG:
    ///
    /// ```
    /// use bst_index::AvlTree;
    /// let index: AvlTree<u64,i128> = AvlTree::new("myinstance");
    ///
    /// // size of key: 8 bytes
    /// // size of value: 16 bytes
    /// // overhead is 24 bytes
    /// assert_eq!(index.stats().node_size(), 48);
    /// ```
    #[inline]
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Return number of nodes on the longest path from root to leaf.
    #[inline]
    pub fn height(&self) -> Option<usize> {
        self.height
    }

    /// Return number of black nodes from root to leaf, on both left
    /// and right child. Only for Red-Black trees.
    #[inline]
    pub fn blacks(&self) -> Option<usize> {
        self.blacks
    }

    /// Return [`Depth`] statistics.
    pub fn depths(&self) -> Option<Depth> {
        match self.depths.as_ref() {
            Some(depths) if depths.samples() > 0 => Some(depths.clone()),
            _ => None,
        }
    }
}


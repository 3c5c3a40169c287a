//! Color balanced discipline. Every node is either red or black, a red
//! node never has a red child, and every path from a node down to its
//! null leaves crosses the same number of black nodes.

use crate::error::Error;
use crate::node::{self, Comparer, Direction, Link, Node, Seek};
use crate::strategy::Strategy;

/// Color of a Red-Black node. Null leaves are considered black.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// Red-Black discipline, refer to [`RedBlackTree`](crate::RedBlackTree).
#[derive(Clone, Copy, Debug, Default)]
pub struct RedBlack;

// (key, value, black-height decreased)
type Delete<K, V> = Option<(K, V, bool)>;

impl Strategy for RedBlack {
    type Meta = Color;

    const NAME: &'static str = "red-black";

    const BLACK_HEIGHT: bool = true;

    fn insert<K, V>(root: &mut Link<K, V, Color>, key: K, value: V, cmp: Comparer<K>) -> Result<(), K> {
        if root.is_none() {
            *root = Some(Node::new(key, value, Color::Black));
            return Ok(());
        }
        RedBlack::insert_at(root, key, value, cmp)?;
        paint(root, Color::Black);
        Ok(())
    }

    fn remove<K, V>(root: &mut Link<K, V, Color>, key: &K, cmp: Comparer<K>) -> Option<(K, V)> {
        // a deficit at the root lowers the black-height of all paths alike.
        let (key, value, _) = RedBlack::remove_at(root, &Seek::Equals(key), cmp)?;
        paint(root, Color::Black);
        Some((key, value))
    }

    fn check<K, V>(node: &Node<K, V, Color>, left: usize, right: usize) -> Result<usize, Error<K, V>>
    where
        K: Clone,
        V: Clone,
    {
        let red = node.meta == Color::Red;
        let (lnode, rnode) = (node.child(Direction::Left), node.child(Direction::Right));
        if red && (is_red(lnode) || is_red(rnode)) {
            return Err(Error::ConsecutiveReds {
                key: node.key.clone(),
                value: node.value.clone(),
            });
        }
        if left != right {
            return Err(Error::UnbalancedBlacks {
                key: node.key.clone(),
                value: node.value.clone(),
                left,
                right,
            });
        }
        Ok(if red { left } else { left + 1 })
    }

    fn check_root<K, V>(root: &Node<K, V, Color>) -> Result<(), Error<K, V>>
    where
        K: Clone,
        V: Clone,
    {
        match root.meta {
            Color::Black => Ok(()),
            Color::Red => Err(Error::RedRoot {
                key: root.key.clone(),
                value: root.value.clone(),
            }),
        }
    }
}

impl RedBlack {
    fn insert_at<K, V>(link: &mut Link<K, V, Color>, key: K, value: V, cmp: Comparer<K>) -> Result<(), K> {
        let node = match link {
            Some(node) => node,
            None => {
                *link = Some(Node::new(key, value, Color::Red));
                return Ok(());
            }
        };

        let dir = match Direction::towards(cmp(&key, &node.key)) {
            Some(dir) => dir,
            None => return Err(key),
        };
        RedBlack::insert_at(node.link_mut(dir), key, value, cmp)?;
        RedBlack::fix_red_violation(link, dir);
        Ok(())
    }

    // `link` is the grandparent, its child in direction `dir` is the
    // parent that might have a red child after insert.
    //
    // If parent's sibling is red, push redness up to the grandparent,
    // which the level above will look at. Otherwise rotate the violating
    // pair above the grandparent and resolve locally.
    fn fix_red_violation<K, V>(link: &mut Link<K, V, Color>, dir: Direction) {
        let (violation, uncle_red) = match link.as_ref() {
            Some(grand) => match grand.child(dir) {
                Some(parent) if parent.meta == Color::Red => {
                    let violation = if is_red(parent.child(dir)) {
                        Some(dir)
                    } else if is_red(parent.child(dir.opposite())) {
                        Some(dir.opposite())
                    } else {
                        None
                    };
                    (violation, is_red(grand.child(dir.opposite())))
                }
                _ => (None, false),
            },
            None => (None, false),
        };
        let violation = match violation {
            Some(violation) => violation,
            None => return,
        };

        if uncle_red {
            if let Some(grand) = link.as_mut() {
                flip_colors(grand);
            }
            return;
        }

        let rotation = dir.opposite();
        if violation == dir {
            node::rotate(link, rotation);
        } else {
            node::rotate_twice(link, rotation);
        }
        if let Some(top) = link.as_mut() {
            top.meta = Color::Black;
            paint(top.link_mut(rotation), Color::Red);
        }
    }

    // Remove the node targeted by `seek`, return its entry and whether the
    // black-height of the subtree under `link` decreased.
    fn remove_at<K, V>(link: &mut Link<K, V, Color>, seek: &Seek<K>, cmp: Comparer<K>) -> Delete<K, V> {
        let node = link.as_mut()?;
        match node.seek(seek, cmp) {
            Some(dir) => {
                let (key, value, deficit) = RedBlack::remove_at(node.link_mut(dir), seek, cmp)?;
                Some((key, value, deficit && RedBlack::fix_black_violation(link, dir)))
            }
            None if node.link(Direction::Left).is_some() && node.link(Direction::Right).is_some() => {
                // replace with in-order predecessor.
                let dir = Direction::Left;
                let (key, value, deficit) =
                    RedBlack::remove_at(node.link_mut(dir), &Seek::SubtreeMaximum, cmp)?;
                let (key, value) = node.replace_entry(key, value);
                Some((key, value, deficit && RedBlack::fix_black_violation(link, dir)))
            }
            None if node.is_leaf() => {
                let node = link.take()?;
                let deficit = node.meta == Color::Black;
                let (key, value) = node.into_entry();
                Some((key, value, deficit))
            }
            None => {
                // single child, which must be red, splice it in its
                // parent's place. Level above recolors it black.
                let mut node = link.take()?;
                *link = match node.take_child(Direction::Left) {
                    Some(child) => Some(child),
                    None => node.take_child(Direction::Right),
                };
                let deficit = node.meta == Color::Black;
                let (key, value) = node.into_entry();
                Some((key, value, deficit))
            }
        }
    }

    // Subtree in direction `dir` of `link` is short of one black node.
    // Repair and return whether the deficit propagates above `link`.
    fn fix_black_violation<K, V>(link: &mut Link<K, V, Color>, dir: Direction) -> bool {
        let other = dir.opposite();
        let (parent, child, sibling, near, far) = match link.as_ref() {
            Some(parent) => {
                let sibling = parent.child(other);
                (
                    parent.meta,
                    color(parent.child(dir)),
                    sibling.map(|s| s.meta),
                    color(sibling.and_then(|s| s.child(dir))),
                    color(sibling.and_then(|s| s.child(other))),
                )
            }
            None => return false,
        };

        if child == Color::Red {
            // cheapest fix, absorb the deficit into the red child.
            let parent = match link.as_mut() {
                Some(parent) => parent,
                None => return false,
            };
            paint(parent.link_mut(dir), Color::Black);
            return false;
        }

        match sibling {
            None => panic!("fix_black_violation(): deficit without sibling ? Call the programmer"),
            Some(Color::Black) if far == Color::Red => {
                // sibling rises in parent's place and color.
                node::rotate(link, dir);
                if let Some(top) = link.as_mut() {
                    top.meta = parent;
                    paint(top.link_mut(dir), Color::Black);
                    paint(top.link_mut(other), Color::Black);
                }
                false
            }
            Some(Color::Black) if near == Color::Red => {
                // near nephew rises in parent's place and color.
                node::rotate_twice(link, dir);
                if let Some(top) = link.as_mut() {
                    top.meta = parent;
                    paint(top.link_mut(dir), Color::Black);
                    paint(top.link_mut(other), Color::Black);
                }
                false
            }
            Some(Color::Black) => {
                // both nephews are black, shorten the sibling's side too.
                let parent_node = match link.as_mut() {
                    Some(parent) => parent,
                    None => return false,
                };
                paint(parent_node.link_mut(other), Color::Red);
                match parent {
                    Color::Red => {
                        parent_node.meta = Color::Black;
                        false
                    }
                    Color::Black => true,
                }
            }
            Some(Color::Red) => {
                // bring a black sibling in place, parent turns red, and
                // resolve below the new subtree root.
                node::rotate(link, dir);
                let top = match link.as_mut() {
                    Some(top) => top,
                    None => return false,
                };
                top.meta = Color::Black;
                paint(top.link_mut(dir), Color::Red);
                RedBlack::fix_black_violation(top.link_mut(dir), dir)
            }
        }
    }
}

// Push redness up, `node` turns red and its children black.
fn flip_colors<K, V>(node: &mut Node<K, V, Color>) {
    node.meta = Color::Red;
    paint(node.link_mut(Direction::Left), Color::Black);
    paint(node.link_mut(Direction::Right), Color::Black);
}

fn paint<K, V>(link: &mut Link<K, V, Color>, color: Color) {
    if let Some(node) = link.as_mut() {
        node.meta = color;
    }
}

fn color<K, V>(node: Option<&Node<K, V, Color>>) -> Color {
    node.map_or(Color::Black, |node| node.meta)
}

fn is_red<K, V>(node: Option<&Node<K, V, Color>>) -> bool {
    color(node) == Color::Red
}

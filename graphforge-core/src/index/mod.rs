//! Ordered, rank-addressable storage for adjacencies.
//!
//! [`AdjacencyIndex`] is a self-adjusting binary search tree over an arena
//! of nodes addressed by stable slot indices. Every search, bound, insert,
//! and erase finishes by splaying the touched node to the root, which
//! amortizes all of them to `O(log n)` without balance bookkeeping. Each
//! node carries its subtree size and left-subtree size, maintained by a
//! single [`AdjacencyIndex::refresh`] routine invoked after every rotation,
//! splice, and join, which gives logarithmic rank and select on top of the
//! ordered-set operations.
//!
//! Entries are ordered lexicographically by `(tail, head)` and never
//! duplicated: re-inserting a present pair is an idempotent no-op.
//! [`Position`] values are validated on use — a position from another
//! index, a position whose entry was erased, and the past-the-end position
//! all produce checked [`IndexError`]s instead of undefined behaviour.
//!
//! Read paths that splay take `&mut self`; the structure is not safe for
//! concurrent use of any kind. The [`AdjacencyIndex::iter`] and
//! [`AdjacencyIndex::range`] iterators walk the tree without adjusting it
//! and therefore borrow `&self`, at the cost of not improving subsequent
//! access times.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::adjacency::Adjacency;
use crate::error::IndexError;

static NEXT_OWNER: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Debug)]
struct Node<W> {
    adjacency: Adjacency,
    weight: W,
    parent: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
    subtree_size: usize,
    left_size: usize,
    generation: u32,
}

/// A validated handle to one entry of an [`AdjacencyIndex`], or its
/// past-the-end marker.
///
/// Positions stay cheap to copy and are checked on every use: erasing the
/// entry invalidates outstanding positions to it, and positions cannot be
/// redeemed against a different index instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    owner: u64,
    slot: Option<usize>,
    generation: u32,
}

impl Position {
    /// Returns `true` for the past-the-end marker.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.slot.is_none()
    }
}

/// Augmented splay tree over adjacencies with an optional weight payload.
///
/// # Examples
/// ```
/// use graphforge_core::{Adjacency, AdjacencyIndex};
///
/// let mut index = AdjacencyIndex::new();
/// index.insert(Adjacency::new(2, 0), ());
/// index.insert(Adjacency::new(1, 0), ());
/// let entries: Vec<_> = index.iter().collect();
/// assert_eq!(entries, vec![Adjacency::new(1, 0), Adjacency::new(2, 0)]);
///
/// let pos = index.find(Adjacency::new(2, 0));
/// assert_eq!(index.rank(pos)?, 2);
/// assert_eq!(index.select(2), pos);
/// # Ok::<(), graphforge_core::IndexError>(())
/// ```
#[derive(Debug)]
pub struct AdjacencyIndex<W = ()> {
    nodes: Vec<Node<W>>,
    free: Vec<usize>,
    root: Option<usize>,
    len: usize,
    owner: u64,
}

impl<W> Default for AdjacencyIndex<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> AdjacencyIndex<W> {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
            owner: NEXT_OWNER.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Returns the number of stored adjacencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when no adjacency is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the past-the-end position.
    #[must_use]
    pub const fn end(&self) -> Position {
        Position {
            owner: self.owner,
            slot: None,
            generation: 0,
        }
    }

    /// Returns the position of the smallest adjacency, or past-the-end when
    /// empty.
    #[must_use]
    pub fn first(&self) -> Position {
        match self.root {
            Some(root) => self.position_of(self.subtree_min(root)),
            None => self.end(),
        }
    }

    /// Returns the position of the largest adjacency, or past-the-end when
    /// empty.
    #[must_use]
    pub fn last(&self) -> Position {
        match self.root {
            Some(root) => self.position_of(self.subtree_max(root)),
            None => self.end(),
        }
    }

    /// Inserts `adjacency` and returns its position.
    ///
    /// When the adjacency is already present this is a no-op returning the
    /// existing entry's position; the stored weight is left untouched.
    pub fn insert(&mut self, adjacency: Adjacency, weight: W) -> Position {
        let cut = self.lower_bound_slot(adjacency);
        if let Some(slot) = cut {
            if self.nodes[slot].adjacency == adjacency {
                return self.position_of(slot);
            }
        }

        // The cut point (last node >= adjacency) sits at the root after the
        // bound search; splice the new node between its left subtree and
        // the cut point itself.
        let slot = self.alloc(adjacency, weight);
        match cut {
            Some(cut) => {
                let detached = self.nodes[cut].left.take();
                if let Some(left) = detached {
                    self.nodes[left].parent = Some(slot);
                }
                self.nodes[slot].left = detached;
                self.nodes[slot].right = Some(cut);
                self.nodes[cut].parent = Some(slot);
                self.refresh(cut);
                self.refresh(slot);
            }
            None => {
                if let Some(root) = self.root {
                    self.nodes[root].parent = Some(slot);
                }
                self.nodes[slot].left = self.root;
                self.refresh(slot);
            }
        }
        self.root = Some(slot);
        self.len += 1;
        self.position_of(slot)
    }

    /// Erases the entry at `position` and returns its adjacency.
    ///
    /// # Errors
    /// Returns [`IndexError`] for past-the-end, stale, or foreign
    /// positions.
    pub fn erase(&mut self, position: Position) -> Result<Adjacency, IndexError> {
        let slot = self.resolve(position)?;
        Ok(self.erase_slot(slot))
    }

    /// Erases the entry holding `adjacency`.
    ///
    /// # Errors
    /// Returns [`IndexError::AbsentAdjacency`] when no such entry exists.
    pub fn erase_adjacency(&mut self, adjacency: Adjacency) -> Result<(), IndexError> {
        match self.lower_bound_slot(adjacency) {
            Some(slot) if self.nodes[slot].adjacency == adjacency => {
                self.erase_slot(slot);
                Ok(())
            }
            _ => Err(IndexError::AbsentAdjacency {
                tail: adjacency.tail,
                head: adjacency.head,
            }),
        }
    }

    /// Returns the position of `adjacency`, or past-the-end when absent.
    pub fn find(&mut self, adjacency: Adjacency) -> Position {
        match self.lower_bound_slot(adjacency) {
            Some(slot) if self.nodes[slot].adjacency == adjacency => self.position_of(slot),
            _ => self.end(),
        }
    }

    /// Returns `true` when `adjacency` is present.
    pub fn contains(&mut self, adjacency: Adjacency) -> bool {
        !self.find(adjacency).is_end()
    }

    /// Returns the position of the first entry `>= adjacency`, or
    /// past-the-end.
    pub fn lower_bound(&mut self, adjacency: Adjacency) -> Position {
        match self.lower_bound_slot(adjacency) {
            Some(slot) => self.position_of(slot),
            None => self.end(),
        }
    }

    /// Returns the position of the first entry `> adjacency`, or
    /// past-the-end.
    pub fn upper_bound(&mut self, adjacency: Adjacency) -> Position {
        let mut cursor = self.root;
        let mut cut = None;
        while let Some(slot) = cursor {
            if self.nodes[slot].adjacency > adjacency {
                cut = Some(slot);
                cursor = self.nodes[slot].left;
            } else {
                cursor = self.nodes[slot].right;
            }
        }
        match cut {
            Some(slot) => {
                self.splay(slot);
                self.position_of(slot)
            }
            None => self.end(),
        }
    }

    /// Returns the 1-based rank of the entry at `position`.
    ///
    /// # Errors
    /// Returns [`IndexError`] for past-the-end, stale, or foreign
    /// positions.
    pub fn rank(&mut self, position: Position) -> Result<usize, IndexError> {
        let slot = self.resolve(position)?;
        self.splay(slot);
        Ok(1 + self.nodes[slot].left_size)
    }

    /// Returns the position of the entry with 1-based rank `rank`, or
    /// past-the-end when `rank` is outside `[1, len()]`.
    #[must_use]
    pub fn select(&self, rank: usize) -> Position {
        if rank == 0 || rank > self.len {
            return self.end();
        }
        let mut remaining = rank;
        let mut cursor = self.root;
        while let Some(slot) = cursor {
            let left = self.nodes[slot].left_size;
            if remaining <= left {
                cursor = self.nodes[slot].left;
            } else if remaining == left + 1 {
                return self.position_of(slot);
            } else {
                remaining -= left + 1;
                cursor = self.nodes[slot].right;
            }
        }
        self.end()
    }

    /// Returns the position `delta` ranks away from `position`, or
    /// past-the-end when the target rank falls outside the index.
    ///
    /// # Errors
    /// Returns [`IndexError`] for past-the-end, stale, or foreign
    /// positions.
    pub fn advance(&mut self, position: Position, delta: isize) -> Result<Position, IndexError> {
        let rank = self.rank(position)? as isize + delta;
        if rank < 1 {
            return Ok(self.end());
        }
        Ok(self.select(rank as usize))
    }

    /// Returns the adjacency stored at `position`.
    ///
    /// # Errors
    /// Returns [`IndexError`] for past-the-end, stale, or foreign
    /// positions.
    pub fn adjacency_at(&self, position: Position) -> Result<Adjacency, IndexError> {
        let slot = self.resolve(position)?;
        Ok(self.nodes[slot].adjacency)
    }

    /// Returns the weight stored at `position`.
    ///
    /// # Errors
    /// Returns [`IndexError`] for past-the-end, stale, or foreign
    /// positions.
    pub fn weight_at(&self, position: Position) -> Result<&W, IndexError> {
        let slot = self.resolve(position)?;
        Ok(&self.nodes[slot].weight)
    }

    /// Iterates all adjacencies in ascending order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, W> {
        let mut iter = Iter {
            index: self,
            stack: Vec::new(),
            until: None,
        };
        iter.push_left(self.root);
        iter
    }

    /// Iterates adjacencies in `[from, until)` in ascending order.
    #[must_use]
    pub fn range(&self, from: Adjacency, until: Adjacency) -> Iter<'_, W> {
        let mut iter = Iter {
            index: self,
            stack: Vec::new(),
            until: Some(until),
        };
        let mut cursor = self.root;
        while let Some(slot) = cursor {
            if self.nodes[slot].adjacency >= from {
                iter.stack.push(slot);
                cursor = self.nodes[slot].left;
            } else {
                cursor = self.nodes[slot].right;
            }
        }
        iter
    }

    fn position_of(&self, slot: usize) -> Position {
        Position {
            owner: self.owner,
            slot: Some(slot),
            generation: self.nodes[slot].generation,
        }
    }

    fn resolve(&self, position: Position) -> Result<usize, IndexError> {
        if position.owner != self.owner {
            return Err(IndexError::ForeignPosition);
        }
        let slot = position.slot.ok_or(IndexError::PastTheEnd)?;
        let node = self.nodes.get(slot).ok_or(IndexError::StalePosition)?;
        if node.generation != position.generation {
            return Err(IndexError::StalePosition);
        }
        Ok(slot)
    }

    fn alloc(&mut self, adjacency: Adjacency, weight: W) -> usize {
        if let Some(slot) = self.free.pop() {
            let node = &mut self.nodes[slot];
            node.adjacency = adjacency;
            node.weight = weight;
            node.parent = None;
            node.left = None;
            node.right = None;
            node.subtree_size = 1;
            node.left_size = 0;
            slot
        } else {
            self.nodes.push(Node {
                adjacency,
                weight,
                parent: None,
                left: None,
                right: None,
                subtree_size: 1,
                left_size: 0,
                generation: 0,
            });
            self.nodes.len() - 1
        }
    }

    /// Recomputes the augmented sizes of `slot` from its children. Every
    /// structural change funnels through here.
    fn refresh(&mut self, slot: usize) {
        let left = self.nodes[slot].left;
        let right = self.nodes[slot].right;
        let left_size = left.map_or(0, |child| self.nodes[child].subtree_size);
        let right_size = right.map_or(0, |child| self.nodes[child].subtree_size);
        let node = &mut self.nodes[slot];
        node.left_size = left_size;
        node.subtree_size = 1 + left_size + right_size;
    }

    /// Rotates `slot` above its parent, preserving the in-order sequence.
    fn rotate(&mut self, slot: usize) {
        let Some(parent) = self.nodes[slot].parent else {
            return;
        };
        let grandparent = self.nodes[parent].parent;

        if self.nodes[parent].left == Some(slot) {
            let inner = self.nodes[slot].right;
            self.nodes[parent].left = inner;
            if let Some(inner) = inner {
                self.nodes[inner].parent = Some(parent);
            }
            self.nodes[slot].right = Some(parent);
        } else {
            let inner = self.nodes[slot].left;
            self.nodes[parent].right = inner;
            if let Some(inner) = inner {
                self.nodes[inner].parent = Some(parent);
            }
            self.nodes[slot].left = Some(parent);
        }
        self.nodes[parent].parent = Some(slot);
        self.nodes[slot].parent = grandparent;
        match grandparent {
            Some(grandparent) => {
                if self.nodes[grandparent].left == Some(parent) {
                    self.nodes[grandparent].left = Some(slot);
                } else {
                    self.nodes[grandparent].right = Some(slot);
                }
            }
            None => self.root = Some(slot),
        }

        self.refresh(parent);
        self.refresh(slot);
    }

    /// Reroots the tree at `slot` with zig-zig/zig-zag steps.
    fn splay(&mut self, slot: usize) {
        while let Some(parent) = self.nodes[slot].parent {
            if let Some(grandparent) = self.nodes[parent].parent {
                let slot_is_left = self.nodes[parent].left == Some(slot);
                let parent_is_left = self.nodes[grandparent].left == Some(parent);
                if slot_is_left == parent_is_left {
                    self.rotate(parent);
                    self.rotate(slot);
                } else {
                    self.rotate(slot);
                    self.rotate(slot);
                }
            } else {
                self.rotate(slot);
            }
        }
    }

    fn subtree_min(&self, mut slot: usize) -> usize {
        while let Some(left) = self.nodes[slot].left {
            slot = left;
        }
        slot
    }

    fn subtree_max(&self, mut slot: usize) -> usize {
        while let Some(right) = self.nodes[slot].right {
            slot = right;
        }
        slot
    }

    /// Finds the last node `>= adjacency` and splays it to the root.
    fn lower_bound_slot(&mut self, adjacency: Adjacency) -> Option<usize> {
        let mut cursor = self.root;
        let mut cut = None;
        while let Some(slot) = cursor {
            if self.nodes[slot].adjacency >= adjacency {
                cut = Some(slot);
                if self.nodes[slot].adjacency == adjacency {
                    break;
                }
                cursor = self.nodes[slot].left;
            } else {
                cursor = self.nodes[slot].right;
            }
        }
        if let Some(slot) = cut {
            self.splay(slot);
        }
        cut
    }

    /// Removes `slot` from the tree, joining its subtrees by splaying the
    /// left maximum and attaching the right subtree beneath it.
    fn erase_slot(&mut self, slot: usize) -> Adjacency {
        self.splay(slot);
        let left = self.nodes[slot].left.take();
        let right = self.nodes[slot].right.take();
        if let Some(left) = left {
            self.nodes[left].parent = None;
        }
        if let Some(right) = right {
            self.nodes[right].parent = None;
        }

        self.root = match (left, right) {
            (None, other) => other,
            (other, None) => other,
            (Some(left), Some(right)) => {
                let pivot = self.subtree_max(left);
                self.splay(pivot);
                self.nodes[pivot].right = Some(right);
                self.nodes[right].parent = Some(pivot);
                self.refresh(pivot);
                Some(pivot)
            }
        };

        let adjacency = self.nodes[slot].adjacency;
        self.nodes[slot].generation = self.nodes[slot].generation.wrapping_add(1);
        self.free.push(slot);
        self.len -= 1;
        adjacency
    }
}

/// Ascending iterator over an [`AdjacencyIndex`].
///
/// Walks the tree with an explicit stack and does not splay, so it borrows
/// the index immutably.
#[derive(Debug)]
pub struct Iter<'a, W = ()> {
    index: &'a AdjacencyIndex<W>,
    stack: Vec<usize>,
    until: Option<Adjacency>,
}

impl<W> Iter<'_, W> {
    fn push_left(&mut self, mut cursor: Option<usize>) {
        while let Some(slot) = cursor {
            self.stack.push(slot);
            cursor = self.index.nodes[slot].left;
        }
    }
}

impl<W> Iterator for Iter<'_, W> {
    type Item = Adjacency;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.stack.pop()?;
        let adjacency = self.index.nodes[slot].adjacency;
        if let Some(until) = self.until {
            if adjacency >= until {
                self.stack.clear();
                return None;
            }
        }
        self.push_left(self.index.nodes[slot].right);
        Some(adjacency)
    }
}

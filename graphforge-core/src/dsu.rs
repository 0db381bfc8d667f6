//! Union-find over dense vertex indices.
//!
//! Used by spanning augmentation to track connected components: one element
//! per vertex, union-by-rank with a path-compressing find. Instances are
//! built fresh per `connect()` call and discarded afterwards.

/// Disjoint-set forest with union-by-rank and path compression.
///
/// # Examples
/// ```
/// use graphforge_core::DisjointSet;
///
/// let mut dsu = DisjointSet::new(4);
/// assert!(dsu.merge(0, 1));
/// assert!(!dsu.merge(1, 0));
/// assert_eq!(dsu.find(0), dsu.find(1));
/// assert_ne!(dsu.find(0), dsu.find(2));
/// ```
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    /// Creates `n` singleton sets.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` when the structure holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the representative of the set containing `element`.
    ///
    /// # Panics
    /// Panics if `element` is out of range.
    pub fn find(&mut self, mut element: usize) -> usize {
        let mut root = element;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[element] != element {
            let parent = self.parent[element];
            self.parent[element] = root;
            element = parent;
        }

        root
    }

    /// Merges the sets containing `left` and `right`.
    ///
    /// Returns `true` when a new union occurred, `false` when both elements
    /// already shared a set.
    ///
    /// # Panics
    /// Panics if either element is out of range.
    pub fn merge(&mut self, left: usize, right: usize) -> bool {
        let mut left_root = self.find(left);
        let mut right_root = self.find(right);
        if left_root == right_root {
            return false;
        }
        let left_rank = self.rank[left_root];
        let right_rank = self.rank[right_root];
        if left_rank < right_rank {
            std::mem::swap(&mut left_root, &mut right_root);
        }
        self.parent[right_root] = left_root;
        if left_rank == right_rank {
            self.rank[left_root] = left_rank.saturating_add(1);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_is_idempotent() {
        let mut dsu = DisjointSet::new(8);
        dsu.merge(2, 5);
        dsu.merge(5, 7);
        let root = dsu.find(2);
        assert_eq!(dsu.find(2), root);
        assert_eq!(dsu.find(7), root);
    }

    #[test]
    fn successful_merges_reduce_the_partition() {
        let n = 10;
        let mut dsu = DisjointSet::new(n);
        let mut merges = 0;
        for i in 1..n {
            if dsu.merge(0, i) {
                merges += 1;
            }
        }
        assert_eq!(merges, n - 1);

        let root = dsu.find(0);
        assert!((0..n).all(|i| dsu.find(i) == root));
    }
}

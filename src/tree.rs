//! A binary guide tree over sequences, stored as parallel arrays indexed by
//! integer node id rather than as a pointer graph.

use crate::constants::{ID_GUARD, LENGTH_GUARD};

/// A binary tree of sequences within an alignment.
///
/// Leaves occupy indices `0..leaf_count`; internal nodes occupy
/// `leaf_count..node_count` in creation order. Absent indices are marked
/// with [`ID_GUARD`]; absent/unset lengths with [`LENGTH_GUARD`].
#[derive(Debug, Clone)]
pub struct Tree {
    pub node_count: usize,
    pub parents: Vec<isize>,
    pub lefts: Vec<isize>,
    pub rights: Vec<isize>,
    pub left_lengths: Vec<f64>,
    pub right_lengths: Vec<f64>,
    pub parent_lengths: Vec<f64>,
    pub names: Vec<String>,
    pub root_node_index: usize,
    pub leaf_count: usize,
}

impl Tree {
    pub fn new(
        node_count: usize,
        parents: Vec<isize>,
        lefts: Vec<isize>,
        rights: Vec<isize>,
        left_lengths: Vec<f64>,
        right_lengths: Vec<f64>,
        parent_lengths: Vec<f64>,
        names: Vec<String>,
        root_node_index: usize,
    ) -> Self {
        let leaf_count = (node_count + 1) / 2;
        assert!(node_count > 0);
        assert_eq!(parents.len(), node_count);
        assert_eq!(lefts.len(), node_count);
        assert_eq!(rights.len(), node_count);
        assert_eq!(left_lengths.len(), node_count);
        assert_eq!(right_lengths.len(), node_count);
        assert_eq!(names.len(), leaf_count);
        assert_eq!(parents[root_node_index], ID_GUARD);
        Self {
            node_count,
            parents,
            lefts,
            rights,
            left_lengths,
            right_lengths,
            parent_lengths,
            names,
            root_node_index,
            leaf_count,
        }
    }

    /// The parent of `index`. Panics if `index` is the root or out of range
    /// (a non-root node always has a parent).
    pub fn get_parent(&self, index: usize) -> usize {
        let parent = self.parents[index];
        assert!(parent >= 0 && (parent as usize) < self.node_count);
        parent as usize
    }

    pub fn get_left(&self, index: usize) -> isize {
        self.lefts[index]
    }

    pub fn get_right(&self, index: usize) -> isize {
        self.rights[index]
    }

    pub fn is_leaf(&self, index: usize) -> bool {
        assert!(index < self.node_count, "{index} > {}", self.node_count);
        self.node_count == 1 || (self.lefts[index] == ID_GUARD && self.rights[index] == ID_GUARD)
    }

    /// The length of the edge between two neighbouring nodes.
    pub fn get_edge_length(&self, first: usize, second: usize) -> f64 {
        if self.lefts[first] == second as isize {
            return self.left_lengths[first];
        }
        if self.rights[first] == second as isize {
            return self.right_lengths[first];
        }
        assert_eq!(
            self.parents[first], second as isize,
            "nodes are not neighbours: {first}, {second}"
        );
        self.parent_lengths[first]
    }

    /// The number of leaves under each node (including itself).
    pub fn node_child_counts(&self) -> Vec<usize> {
        let mut leaves_under_node = vec![0usize; self.node_count];
        if self.node_count == 1 {
            leaves_under_node[0] = 1;
            return leaves_under_node;
        }

        fn find_count(tree: &Tree, index: usize, leaves_under_node: &mut [usize]) -> usize {
            if tree.is_leaf(index) {
                leaves_under_node[index] = 1;
                return 1;
            }
            let left = tree.get_left(index) as usize;
            let left_count = find_count(tree, left, leaves_under_node);
            let right = tree.get_right(index) as usize;
            let right_count = find_count(tree, right, leaves_under_node);
            let count = left_count + right_count;
            leaves_under_node[index] = count;
            count
        }

        find_count(self, self.root_node_index, &mut leaves_under_node);
        leaves_under_node
    }

    /// Normalised per-leaf sequence weights, summing to 1.
    pub fn get_weights(&self) -> Vec<f64> {
        let leaf_count = self.leaf_count;
        if leaf_count == 0 {
            return Vec::new();
        }
        if leaf_count == 1 {
            return vec![1.0];
        }
        if leaf_count == 2 {
            return vec![0.5, 0.5];
        }

        let leaves_under = self.node_child_counts();
        let mut strengths = vec![0.0; self.node_count];
        for (i, &leaves) in leaves_under.iter().enumerate() {
            if self.root_node_index == i {
                strengths[i] = 0.0;
                continue;
            }
            let parent = self.get_parent(i);
            let length = self.get_edge_length(i, parent);
            strengths[i] = length / leaves as f64;
        }

        let mut weights = Vec::with_capacity(leaf_count);
        for leaf in 0..leaf_count {
            let mut weight = 0.0;
            let mut node = leaf;
            while node != self.root_node_index {
                weight += strengths[node];
                node = self.get_parent(node);
            }
            if weight < 0.0001 {
                weight = 1.0;
            }
            weights.push(weight);
        }
        normalise(&weights)
    }
}

fn normalise(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    values.iter().map(|v| v / total).collect()
}

/// Converts a 2D index into a triangular matrix into a 1D flat index.
pub fn flat_index(i: usize, j: usize) -> usize {
    if i >= j {
        i * (i - 1) / 2 + j
    } else {
        j * (j - 1) / 2 + i
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A 3-leaf tree: leaves 0,1,2; internal nodes 3 (root's child),4 (root).
    // node 3 = (0, 1), node 4 = root = (3, 2)
    fn small_tree() -> Tree {
        Tree::new(
            5,
            vec![3, 3, 4, 4, ID_GUARD],
            vec![ID_GUARD, ID_GUARD, ID_GUARD, 0, 3],
            vec![ID_GUARD, ID_GUARD, ID_GUARD, 1, 2],
            vec![LENGTH_GUARD, LENGTH_GUARD, LENGTH_GUARD, 1.0, 1.0],
            vec![LENGTH_GUARD, LENGTH_GUARD, LENGTH_GUARD, 1.0, 2.0],
            vec![1.0, 1.0, 2.0, 1.0, LENGTH_GUARD],
            vec!["a".into(), "b".into(), "c".into()],
            4,
        )
    }

    #[test]
    fn leaf_detection() {
        let t = small_tree();
        assert!(t.is_leaf(0));
        assert!(t.is_leaf(2));
        assert!(!t.is_leaf(3));
        assert!(!t.is_leaf(4));
    }

    #[test]
    fn weights_sum_to_one() {
        let t = small_tree();
        let w = t.get_weights();
        assert_eq!(w.len(), 3);
        let sum: f64 = w.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_leaf_counts() {
        let one = Tree::new(1, vec![ID_GUARD], vec![ID_GUARD], vec![ID_GUARD], vec![LENGTH_GUARD], vec![LENGTH_GUARD], vec![LENGTH_GUARD], vec!["solo".into()], 0);
        assert_eq!(one.get_weights(), vec![1.0]);
    }
}

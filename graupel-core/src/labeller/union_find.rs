//! Label-identity union-find backing the incremental labeller.
//!
//! Entries are keyed by label, not by site: one slot per label ever
//! allocated, with slot 0 permanently reserved for the background. Merging
//! keeps the *smaller* numeric root so the surviving label of any merge
//! history is deterministic regardless of the order unions are issued in.
//! Union-by-rank is deliberately not used: rank-based rooting could let a
//! higher-numbered label survive, which would break that guarantee.

#[derive(Clone, Debug)]
pub(super) struct LabelSet {
    parent: Vec<usize>,
}

impl LabelSet {
    /// A set holding only the background label 0.
    pub(super) fn new() -> Self {
        Self { parent: vec![0] }
    }

    /// One more than the largest label ever allocated.
    pub(super) fn len(&self) -> usize {
        self.parent.len()
    }

    /// Allocates the next unused label and makes it its own root.
    ///
    /// Labels are handed out in strictly increasing order, so a fresh label
    /// is always larger than every label allocated before it.
    pub(super) fn new_label(&mut self) -> usize {
        let label = self.parent.len();
        self.parent.push(label);
        label
    }

    /// Returns the canonical root of `label`, compressing traversed links.
    pub(super) fn find(&mut self, mut label: usize) -> usize {
        let mut root = label;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[label] != label {
            let parent = self.parent[label];
            self.parent[label] = root;
            label = parent;
        }

        root
    }

    /// Returns the canonical root of `label` without mutating the set.
    pub(super) fn resolve(&self, mut label: usize) -> usize {
        while self.parent[label] != label {
            label = self.parent[label];
        }
        label
    }

    /// Merges the sets containing `a` and `b`; the smaller root survives.
    pub(super) fn union(&mut self, a: usize, b: usize) -> usize {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return root_a;
        }
        let low = root_a.min(root_b);
        let high = root_a.max(root_b);
        self.parent[high] = low;
        low
    }

    /// Clears the set back to holding only the background label.
    pub(super) fn reset(&mut self) {
        self.parent.clear();
        self.parent.push(0);
    }

    /// Reinitialises to a fresh 1:1 state over labels `0..=count`.
    ///
    /// Used after pruning, when every surviving label is its own root again.
    pub(super) fn reinit(&mut self, count: usize) {
        self.parent.clear();
        self.parent.extend(0..=count);
    }
}

use crate::tree::{NodeId, StructureTree};

const TEXT_WEIGHT: f64 = 0.5;
const CHILD_COUNT_WEIGHT: f64 = 0.3;
const CHILD_STRUCTURE_WEIGHT: f64 = 0.2;

impl StructureTree {
    /// Structural similarity of two subtrees in `[0, 1]`
    ///
    /// Average of the recursive node score and the subtree-size ratio. Either
    /// side absent gives 0.
    pub fn similarity(&self, a: NodeId, b: NodeId) -> f64 {
        let size_a = self.subtree_size(a);
        let size_b = self.subtree_size(b);
        if size_a == 0 || size_b == 0 {
            return 0.0;
        }

        let node_score = self.node_similarity(a, b);
        let size_score = 1.0 - size_a.abs_diff(size_b) as f64 / size_a.max(size_b) as f64;
        (node_score + size_score) / 2.0
    }

    /// Children are paired by position over the shorter list
    fn node_similarity(&self, a: NodeId, b: NodeId) -> f64 {
        let (Some(left), Some(right)) = (self.node(a), self.node(b)) else {
            return 0.0;
        };
        if left.kind() != right.kind() {
            return 0.0;
        }

        let mut score = 0.0;
        if left.text() == right.text() {
            score += TEXT_WEIGHT;
        }

        let (kids_a, kids_b) = (left.children(), right.children());
        if kids_a.len() == kids_b.len() {
            score += CHILD_COUNT_WEIGHT;
        }

        let paired = kids_a.len().min(kids_b.len());
        if paired > 0 {
            let total: f64 = kids_a
                .iter()
                .zip(kids_b)
                .map(|(&x, &y)| self.node_similarity(x, y))
                .sum();
            score += CHILD_STRUCTURE_WEIGHT * total / paired as f64;
        } else if kids_a.is_empty() && kids_b.is_empty() {
            // two leaves have identical (empty) structure
            score += CHILD_STRUCTURE_WEIGHT;
        }
        score
    }

    /// Descendants of `a` with no (kind, text) match among descendants of `b`
    pub fn differences(&self, a: NodeId, b: NodeId) -> Vec<NodeId> {
        if !self.contains(a) || !self.contains(b) {
            return Vec::new();
        }

        let others: Vec<_> = self
            .descendants(b)
            .into_iter()
            .map(|id| &self[id])
            .collect();

        self.descendants(a)
            .into_iter()
            .filter(|&id| {
                let node = &self[id];
                !others
                    .iter()
                    .any(|other| other.kind() == node.kind() && other.text() == node.text())
            })
            .collect()
    }
}

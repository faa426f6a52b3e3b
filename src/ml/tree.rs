// src/ml/tree.rs

use crate::ml::{FeatureVector, ModelError, N_FEATURES};
use serde::{Deserialize, Serialize};

/// Nodes live in a flat vector; children are referenced by index.
/// The root is always `nodes[0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// CART regression tree using squared-error splits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<TreeNode>,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    score: f64,
}

impl RegressionTree {
    /// Grows a tree over `x[rows]` / `y[rows]`. `rows` may repeat indices
    /// (bootstrap samples).
    pub fn fit(
        x: &[FeatureVector],
        y: &[f64],
        rows: &[usize],
        max_depth: Option<usize>,
        min_samples_split: usize,
    ) -> Result<Self, ModelError> {
        if rows.is_empty() {
            return Err(ModelError::NotEnoughRows { needed: 1, got: 0 });
        }

        let mut tree = Self { nodes: Vec::new() };
        let mut rows = rows.to_vec();
        tree.grow(x, y, &mut rows, 0, max_depth, min_samples_split.max(2));
        Ok(tree)
    }

    pub fn predict(&self, x: &FeatureVector) -> Result<f64, ModelError> {
        let mut idx = 0;
        loop {
            match self.nodes.get(idx).ok_or(ModelError::NotFitted)? {
                TreeNode::Leaf { value } => return Ok(*value),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if x[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[cfg(test)]
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[TreeNode], idx: usize) -> usize {
            match &nodes[idx] {
                TreeNode::Leaf { .. } => 0,
                TreeNode::Split { left, right, .. } => {
                    1 + walk(nodes, *left).max(walk(nodes, *right))
                }
            }
        }
        if self.nodes.is_empty() {
            0
        } else {
            walk(&self.nodes, 0)
        }
    }

    /// Every split must point at nodes that exist and come after it.
    pub(crate) fn is_well_formed(&self) -> bool {
        !self.nodes.is_empty()
            && self.nodes.iter().enumerate().all(|(i, node)| match node {
                TreeNode::Leaf { value } => value.is_finite(),
                TreeNode::Split {
                    feature,
                    left,
                    right,
                    ..
                } => {
                    *feature < N_FEATURES
                        && *left > i
                        && *right > i
                        && *left < self.nodes.len()
                        && *right < self.nodes.len()
                }
            })
    }

    fn grow(
        &mut self,
        x: &[FeatureVector],
        y: &[f64],
        rows: &mut [usize],
        depth: usize,
        max_depth: Option<usize>,
        min_samples_split: usize,
    ) -> usize {
        let idx = self.nodes.len();
        let mean = rows.iter().map(|&r| y[r]).sum::<f64>() / rows.len() as f64;
        self.nodes.push(TreeNode::Leaf { value: mean });

        let first = y[rows[0]];
        let pure = rows.iter().all(|&r| y[r] == first);
        let depth_reached = max_depth.is_some_and(|d| depth >= d);
        if pure || depth_reached || rows.len() < min_samples_split {
            return idx;
        }

        let Some(best) = best_split(x, y, rows) else {
            return idx;
        };

        // partition rows in place: left side first
        let mut mid = 0;
        for i in 0..rows.len() {
            if x[rows[i]][best.feature] <= best.threshold {
                rows.swap(i, mid);
                mid += 1;
            }
        }
        let (left_rows, right_rows) = rows.split_at_mut(mid);

        let left = self.grow(x, y, left_rows, depth + 1, max_depth, min_samples_split);
        let right = self.grow(x, y, right_rows, depth + 1, max_depth, min_samples_split);

        self.nodes[idx] = TreeNode::Split {
            feature: best.feature,
            threshold: best.threshold,
            left,
            right,
        };
        idx
    }
}

/// Scans every feature for the threshold that maximises
/// `sum_l^2 / n_l + sum_r^2 / n_r`, which is equivalent to minimising the
/// children's summed squared error. Ties keep the first candidate found.
fn best_split(x: &[FeatureVector], y: &[f64], rows: &[usize]) -> Option<BestSplit> {
    let n = rows.len();
    let total: f64 = rows.iter().map(|&r| y[r]).sum();
    let mut best: Option<BestSplit> = None;
    let mut order = rows.to_vec();

    for feature in 0..N_FEATURES {
        order.sort_by(|&a, &b| x[a][feature].total_cmp(&x[b][feature]));

        let mut left_sum = 0.0;
        for i in 0..n - 1 {
            left_sum += y[order[i]];

            let here = x[order[i]][feature];
            let next = x[order[i + 1]][feature];
            if here == next {
                continue;
            }

            let n_left = (i + 1) as f64;
            let n_right = (n - i - 1) as f64;
            let right_sum = total - left_sum;
            let score = left_sum * left_sum / n_left + right_sum * right_sum / n_right;

            if best.as_ref().map_or(true, |b| score > b.score) {
                let mut threshold = here + (next - here) / 2.0;
                // midpoint can round up onto `next` for adjacent floats
                if threshold >= next {
                    threshold = here;
                }
                best = Some(BestSplit {
                    feature,
                    threshold,
                    score,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(area: f64) -> FeatureVector {
        [area, 0.0, 0.0, 0.0, 0.0]
    }

    #[test]
    fn fits_a_step_function_exactly() {
        let x: Vec<FeatureVector> = [1.0, 2.0, 3.0, 10.0, 11.0, 12.0].map(row).to_vec();
        let y = vec![5.0, 5.0, 5.0, 20.0, 20.0, 20.0];
        let rows: Vec<usize> = (0..x.len()).collect();

        let tree = RegressionTree::fit(&x, &y, &rows, None, 2).unwrap();

        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.predict(&row(0.0)).unwrap(), 5.0);
        assert_eq!(tree.predict(&row(6.0)).unwrap(), 5.0);
        assert_eq!(tree.predict(&row(7.0)).unwrap(), 20.0);
        assert!(tree.is_well_formed());
    }

    #[test]
    fn unlimited_tree_memorises_training_rows() {
        let x: Vec<FeatureVector> = (0..20).map(|i| row(i as f64)).collect();
        let y: Vec<f64> = (0..20).map(|i| ((i * 7919) % 31) as f64).collect();
        let rows: Vec<usize> = (0..x.len()).collect();

        let tree = RegressionTree::fit(&x, &y, &rows, None, 2).unwrap();

        for (xi, yi) in x.iter().zip(&y) {
            assert_eq!(tree.predict(xi).unwrap(), *yi);
        }
    }

    #[test]
    fn max_depth_caps_growth() {
        let x: Vec<FeatureVector> = (0..32).map(|i| row(i as f64)).collect();
        let y: Vec<f64> = (0..32).map(|i| i as f64).collect();
        let rows: Vec<usize> = (0..x.len()).collect();

        let tree = RegressionTree::fit(&x, &y, &rows, Some(2), 2).unwrap();

        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.node_count(), 7);
    }

    #[test]
    fn identical_features_make_a_single_leaf() {
        let x = vec![row(1.0), row(1.0), row(1.0)];
        let y = vec![1.0, 2.0, 6.0];

        let tree = RegressionTree::fit(&x, &y, &[0, 1, 2], None, 2).unwrap();

        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.predict(&row(99.0)).unwrap(), 3.0);
    }

    #[test]
    fn empty_tree_is_not_fitted() {
        let tree = RegressionTree { nodes: Vec::new() };
        assert_eq!(tree.predict(&row(1.0)), Err(ModelError::NotFitted));
    }
}

//! forest.rs — Random forest regression
//!
//! Each tree is a CART regressor grown on a bootstrap resample of the
//! training rows, trying `max_features` random features per split and
//! picking the threshold with the largest squared-error reduction. Trees
//! are grown in parallel on the rayon pool; tree `i` draws from its own
//! generator seeded with `seed + i`, so the forest does not depend on
//! scheduling.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::ForestConfig;
use crate::dataset::{Features, Sample};
use crate::error::{Result, SimError};
use crate::fit::Regressor;

const N_FEATURES: usize = 4;

#[derive(Debug, Clone)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_leaf: usize,
    pub max_features: usize,
    pub seed: u64,
}

impl From<&ForestConfig> for ForestParams {
    fn from(cfg: &ForestConfig) -> Self {
        Self {
            n_trees: cfg.n_trees,
            max_depth: cfg.max_depth,
            min_samples_leaf: cfg.min_samples_leaf,
            max_features: cfg.max_features,
            seed: cfg.seed,
        }
    }
}

impl ForestParams {
    fn validate(&self) -> Result<()> {
        if self.n_trees == 0 {
            return Err(SimError::parameter("n_trees", "must be at least 1"));
        }
        if self.min_samples_leaf == 0 {
            return Err(SimError::parameter("min_samples_leaf", "must be at least 1"));
        }
        if !(1..=N_FEATURES).contains(&self.max_features) {
            return Err(SimError::parameter(
                "max_features",
                format!("{} not in [1, {N_FEATURES}]", self.max_features),
            ));
        }
        Ok(())
    }
}

// ── Tree ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Node {
    Leaf(f64),
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    /// rows going left once sorted by `feature`
    left_len: usize,
    score: f64,
}

impl RegressionTree {
    /// Grow a tree over `rows[i]` for every `i` in `idx`
    fn grow(rows: &[Sample], idx: &mut [usize], params: &ForestParams, rng: &mut StdRng) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.build(rows, idx, 0, params, rng);
        tree
    }

    fn build(&mut self, rows: &[Sample], idx: &mut [usize], depth: usize, params: &ForestParams, rng: &mut StdRng) -> usize {
        let n = idx.len();
        let sum: f64 = idx.iter().map(|&i| rows[i].boat_speed).sum();
        let mean = sum / n as f64;

        let pure = idx.iter().all(|&i| rows[i].boat_speed == rows[idx[0]].boat_speed);
        if depth >= params.max_depth || n < 2 * params.min_samples_leaf || pure {
            return self.push(Node::Leaf(mean));
        }

        let best = match best_split(rows, idx, params, rng) {
            // must beat leaving the node whole
            Some(b) if b.score > sum * sum / n as f64 + 1e-12 => b,
            _ => return self.push(Node::Leaf(mean)),
        };

        sort_by_feature(rows, idx, best.feature);
        let slot = self.push(Node::Leaf(mean));
        let (left_idx, right_idx) = idx.split_at_mut(best.left_len);
        let left = self.build(rows, left_idx, depth + 1, params, rng);
        let right = self.build(rows, right_idx, depth + 1, params, rng);
        self.nodes[slot] = Node::Split { feature: best.feature, threshold: best.threshold, left, right };
        slot
    }

    fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Regressor for RegressionTree {
    fn predict(&self, x: &Features) -> f64 {
        let mut at = 0;
        loop {
            match self.nodes.get(at) {
                Some(Node::Leaf(v)) => return *v,
                Some(Node::Split { feature, threshold, left, right }) => {
                    at = if x[*feature] <= *threshold { *left } else { *right };
                }
                None => return 0.0,
            }
        }
    }
}

fn sort_by_feature(rows: &[Sample], idx: &mut [usize], feature: usize) {
    idx.sort_unstable_by(|&a, &b| rows[a].features()[feature].total_cmp(&rows[b].features()[feature]));
}

/// Best split over `max_features` random features. Score is
/// `sum_l² / n_l + sum_r² / n_r`; higher means lower squared error.
fn best_split(rows: &[Sample], idx: &mut [usize], params: &ForestParams, rng: &mut StdRng) -> Option<BestSplit> {
    let n = idx.len();
    let min_leaf = params.min_samples_leaf;
    let total: f64 = idx.iter().map(|&i| rows[i].boat_speed).sum();
    let mut best: Option<BestSplit> = None;

    for feature in index::sample(rng, N_FEATURES, params.max_features).into_iter() {
        sort_by_feature(rows, idx, feature);

        let mut left_sum = 0.0;
        for k in 1..n {
            left_sum += rows[idx[k - 1]].boat_speed;
            if k < min_leaf || n - k < min_leaf {
                continue;
            }
            let lo = rows[idx[k - 1]].features()[feature];
            let hi = rows[idx[k]].features()[feature];
            if lo == hi {
                continue;
            }

            let right_sum = total - left_sum;
            let score = left_sum * left_sum / k as f64 + right_sum * right_sum / (n - k) as f64;
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(BestSplit { feature, threshold: 0.5 * (lo + hi), left_len: k, score });
            }
        }
    }
    best
}

// ── Forest ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<RegressionTree>,
}

impl RandomForest {
    pub fn fit(rows: &[Sample], params: &ForestParams) -> Result<Self> {
        params.validate()?;
        if rows.is_empty() {
            return Err(SimError::Fit("no training rows".to_string()));
        }

        info!(
            "🌲 Growing {} trees (depth ≤ {}, leaf ≥ {}, {} features/split) on {} rows",
            params.n_trees,
            params.max_depth,
            params.min_samples_leaf,
            params.max_features,
            rows.len()
        );

        let trees: Vec<RegressionTree> = (0..params.n_trees)
            .into_par_iter()
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(params.seed.wrapping_add(i as u64));
                let mut idx: Vec<usize> = (0..rows.len()).map(|_| rng.gen_range(0..rows.len())).collect();
                RegressionTree::grow(rows, &mut idx, params, &mut rng)
            })
            .collect();

        debug!(
            "forest nodes: {}",
            trees.iter().map(RegressionTree::len).sum::<usize>()
        );
        Ok(Self { trees })
    }

    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }
}

impl Regressor for RandomForest {
    fn predict(&self, x: &Features) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.predict(x)).sum();
        sum / self.trees.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::mse;

    fn params() -> ForestParams {
        ForestParams { n_trees: 8, max_depth: 10, min_samples_leaf: 2, max_features: 4, seed: 1 }
    }

    fn step_rows() -> Vec<Sample> {
        (0..200)
            .map(|i| {
                let main = (i % 90) as f64;
                Sample {
                    wind_speed: 10.0,
                    wind_dir: 90.0,
                    main,
                    jib: (i % 7) as f64,
                    boat_speed: if main < 45.0 { 2.0 } else { 6.0 },
                }
            })
            .collect()
    }

    #[test]
    fn test_tree_learns_step() {
        let rows = step_rows();
        let mut idx: Vec<usize> = (0..rows.len()).collect();
        let mut rng = StdRng::seed_from_u64(0);
        let tree = RegressionTree::grow(&rows, &mut idx, &params(), &mut rng);
        assert_eq!(tree.predict(&[10.0, 90.0, 10.0, 0.0]), 2.0);
        assert_eq!(tree.predict(&[10.0, 90.0, 80.0, 0.0]), 6.0);
        assert_eq!(mse(&tree, &rows), 0.0);
    }

    #[test]
    fn test_constant_labels_make_one_leaf() {
        let rows: Vec<Sample> = step_rows().into_iter().map(|r| Sample { boat_speed: 3.0, ..r }).collect();
        let mut idx: Vec<usize> = (0..rows.len()).collect();
        let mut rng = StdRng::seed_from_u64(0);
        let tree = RegressionTree::grow(&rows, &mut idx, &params(), &mut rng);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.predict(&[0.0; 4]), 3.0);
    }

    #[test]
    fn test_depth_zero_predicts_mean() {
        let rows = step_rows();
        let mut idx: Vec<usize> = (0..rows.len()).collect();
        let mut rng = StdRng::seed_from_u64(0);
        let p = ForestParams { max_depth: 0, ..params() };
        let tree = RegressionTree::grow(&rows, &mut idx, &p, &mut rng);
        let mean = rows.iter().map(|r| r.boat_speed).sum::<f64>() / rows.len() as f64;
        assert!((tree.predict(&[0.0; 4]) - mean).abs() < 1e-12);
    }

    #[test]
    fn test_forest_is_reproducible() {
        let rows = step_rows();
        let a = RandomForest::fit(&rows, &params()).unwrap();
        let b = RandomForest::fit(&rows, &params()).unwrap();
        for x in [[10.0, 90.0, 10.0, 3.0], [10.0, 90.0, 44.5, 1.0], [10.0, 90.0, 70.0, 6.0]] {
            assert_eq!(a.predict(&x), b.predict(&x));
        }
        assert_eq!(a.trees().len(), 8);
        assert!(mse(&a, &rows) < 0.1);
    }

    #[test]
    fn test_invalid_params() {
        let rows = step_rows();
        assert!(RandomForest::fit(&rows, &ForestParams { n_trees: 0, ..params() }).is_err());
        assert!(RandomForest::fit(&rows, &ForestParams { max_features: 5, ..params() }).is_err());
        assert!(RandomForest::fit(&[], &params()).is_err());
    }
}

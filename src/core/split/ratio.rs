use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::core::collection::{Collection, Item};

use super::{GroupAssignment, SplitError, SplitGroup, SplitResult};

/// Configuration for the count-based ratio split
#[derive(Debug, Clone)]
pub struct RatioConfig {
    /// Fraction of items assigned to train
    pub train: f32,
    /// Fraction of items assigned to val
    pub val: f32,
    /// Keep the remainder as the test group instead of dropping it
    pub keep_remainder: bool,
    /// Seed for the shuffle; unseeded runs are not reproducible
    pub seed: Option<u64>,
}

impl Default for RatioConfig {
    fn default() -> Self {
        Self {
            train: 0.70,
            val: 0.20,
            keep_remainder: true,
            seed: None,
        }
    }
}

/// Split a collection into train/val(/test) by target fractions.
///
/// Purely count-based: a shuffled copy of the items is cut at
/// `floor(train * n)` and `floor(val * n)`. Whatever is left either
/// becomes the test group or is dropped, depending on the config.
pub fn split_ratio(
    collection: &Collection,
    config: &RatioConfig,
) -> Result<SplitResult, SplitError> {
    if collection.is_empty() {
        return Err(SplitError::EmptyInput);
    }
    if config.train < 0.0 || config.val < 0.0 || config.train + config.val > 1.0 {
        return Err(SplitError::InvalidRatios {
            train: config.train,
            val: config.val,
        });
    }

    let mut items: Vec<&Item> = collection.items().iter().collect();
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    items.shuffle(&mut rng);

    let n = items.len();
    let train_len = (config.train * n as f32).floor() as usize;
    let val_len = (config.val * n as f32).floor() as usize;
    let remainder = n - train_len - val_len;

    let mut train = GroupAssignment::new(SplitGroup::Train.as_str());
    let mut val = GroupAssignment::new(SplitGroup::Val.as_str());
    for item in &items[..train_len] {
        train.push(item.id(), item.weight());
    }
    for item in &items[train_len..train_len + val_len] {
        val.push(item.id(), item.weight());
    }

    let mut groups = vec![train, val];
    if config.keep_remainder {
        let mut test = GroupAssignment::new(SplitGroup::Test.as_str());
        for item in &items[train_len + val_len..] {
            test.push(item.id(), item.weight());
        }
        groups.push(test);
    } else if remainder > 0 {
        warn!(
            "Dropping {} items not covered by the train/val ratios",
            remainder
        );
    }

    info!(
        "Ratio split: {} train, {} val, {} remainder",
        train_len, val_len, remainder
    );

    Ok(SplitResult { groups })
}
